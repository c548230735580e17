//! Cloneable actor handle.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::builder::ActorBuilder;
use super::cell::ActorCell;
use super::envelope::Envelope;
use super::traits::Actor;
use crate::future::ReplyFuture;
use crate::util::ActorAddress;

/// Handle to a spawned actor.
///
/// Cloning is cheap and every clone addresses the same actor. Dropping the
/// last handle drops the actor together with whatever its mailbox still
/// holds; there is no explicit stop operation.
///
/// # Blocking
///
/// [`send`](ActorRef::send), [`send_priority`](ActorRef::send_priority) and
/// [`ask`](ActorRef::ask) never block beyond the brief mailbox-lock
/// acquisition. Only [`ask_blocking`](ActorRef::ask_blocking) and
/// [`ask_blocking_timeout`](ActorRef::ask_blocking_timeout) park the calling
/// thread. A handler must not block on a request to its own actor; the
/// drain that would answer it is the one it is running on.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use strand_rt::{Actor, ActorRef, Context};
///
/// struct Doubler;
///
/// impl Actor for Doubler {
///     type Message = i64;
///     type Reply = i64;
///     type Error = Infallible;
///
///     fn handle(&mut self, n: i64, ctx: &mut Context<'_, i64>) -> Result<(), Infallible> {
///         ctx.reply(n * 2);
///         Ok(())
///     }
/// }
///
/// let doubler = ActorRef::spawn(Doubler);
/// assert_eq!(doubler.ask_blocking(21), 42);
/// ```
pub struct ActorRef<A: Actor> {
    cell: Arc<ActorCell<A>>,
}

impl<A: Actor> ActorRef<A> {
    /// Spawn `actor` with defaults: anonymous, global executor, no wrappers.
    ///
    /// Use [`ActorBuilder`] to configure any of those.
    pub fn spawn(actor: A) -> Self {
        ActorBuilder::new(actor).spawn()
    }

    pub(crate) fn from_cell(cell: Arc<ActorCell<A>>) -> Self {
        Self { cell }
    }

    /// Fire-and-forget send.
    ///
    /// Appends to the mailbox; messages from one sender are delivered in
    /// send order (among those the handler accepts).
    pub fn send(&self, message: A::Message) {
        ActorCell::enqueue(&self.cell, Envelope::Tell(message), false);
    }

    /// Fire-and-forget send that jumps the queue.
    ///
    /// The message is placed ahead of every non-priority message present at
    /// the next merge. It does not preempt a handler already running. Meant
    /// for rare, urgent administrative messages.
    pub fn send_priority(&self, message: A::Message) {
        ActorCell::enqueue(&self.cell, Envelope::Tell(message), true);
    }

    /// Asynchronous request: enqueue and immediately return the future the
    /// handler's `reply` will settle.
    pub fn ask(&self, message: A::Message) -> ReplyFuture<A::Reply> {
        let reply = ReplyFuture::new();
        ActorCell::enqueue(
            &self.cell,
            Envelope::Request {
                message,
                reply: reply.clone(),
            },
            false,
        );
        reply
    }

    /// Synchronous request: block until the handler replies.
    ///
    /// Blocks indefinitely if the handler never calls `reply` for this
    /// message; prefer [`ask_blocking_timeout`](ActorRef::ask_blocking_timeout)
    /// when that is not guaranteed.
    pub fn ask_blocking(&self, message: A::Message) -> A::Reply
    where
        A::Reply: Clone,
    {
        self.ask(message).wait()
    }

    /// Synchronous request with a timeout.
    ///
    /// `None` on timeout. The handler still runs; its eventual `reply`
    /// settles the abandoned future silently.
    pub fn ask_blocking_timeout(&self, message: A::Message, timeout: Duration) -> Option<A::Reply>
    where
        A::Reply: Clone,
    {
        self.ask(message).wait_timeout(timeout)
    }

    /// Enqueue a request that carries an existing future (reply routing for
    /// `forward`).
    pub(crate) fn enqueue_request(&self, message: A::Message, reply: ReplyFuture<A::Reply>) {
        ActorCell::enqueue(&self.cell, Envelope::Request { message, reply }, false);
    }

    /// Address of this actor, for diagnostics.
    pub fn address(&self) -> &ActorAddress {
        self.cell.address()
    }

    /// Whether the actor has no activation in flight and nothing queued or
    /// staged.
    pub fn is_idle(&self) -> bool {
        self.cell.is_idle()
    }

    /// Number of undelivered messages (queued plus staged).
    ///
    /// Approximate while a drain is scanning.
    pub fn mailbox_len(&self) -> usize {
        self.cell.mailbox_len()
    }
}

impl<A: Actor> Clone for ActorRef<A> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<A: Actor> std::fmt::Debug for ActorRef<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorRef")
            .field("address", &format_args!("{}", self.cell.address()))
            .finish()
    }
}
