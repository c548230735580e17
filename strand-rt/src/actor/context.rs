//! Per-delivery handler context.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::handle::ActorRef;
use super::traits::Actor;
use crate::future::ReplyFuture;
use crate::util::ActorAddress;

/// Context handed to a handler for the duration of one delivery.
///
/// When the message being delivered arrived through `ask`, the context holds
/// the caller's reply future; [`reply`](Context::reply) settles it and
/// [`forward`](Context::forward) hands it to another actor. For a plain
/// `send` there is no future and both degrade gracefully: `reply` is a
/// silent no-op and `forward` becomes a plain send. The handler does not
/// need to know which case it is in.
///
/// The context only lives across one handler invocation; the request future
/// is installed before the handler runs and dropped with the context right
/// after it returns.
pub struct Context<'a, R> {
    address: &'a ActorAddress,
    reply: Option<ReplyFuture<R>>,
}

impl<'a, R: Send + 'static> Context<'a, R> {
    pub(crate) fn new(address: &'a ActorAddress, reply: Option<ReplyFuture<R>>) -> Self {
        Self { address, reply }
    }

    /// Address of the actor handling the message.
    pub fn address(&self) -> &ActorAddress {
        self.address
    }

    /// Whether the current message is a request awaiting a reply.
    pub fn is_request(&self) -> bool {
        self.reply.is_some()
    }

    /// Resolve the current request's future with `value`.
    ///
    /// Silent no-op when the current message was not a request, and equally
    /// silent when the future was already settled (for example because the
    /// request was forwarded and the target replied first, or the caller's
    /// timed wait has long given up — the future still accepts exactly one
    /// value, from whoever gets there first).
    pub fn reply(&self, value: R) {
        if let Some(future) = &self.reply {
            future.satisfy(value);
        }
    }

    /// Reroute the current request to `other`, reply routing included.
    ///
    /// `other` receives `message` as a request carrying the *original
    /// caller's* future, so `other`'s `reply` resolves the original `ask`.
    /// When the current message is not a request this is a plain
    /// [`send`](ActorRef::send).
    ///
    /// The future stays in scope here as well: if this handler also calls
    /// [`reply`](Context::reply), whichever reply is produced first wins and
    /// the other is ignored.
    pub fn forward<B>(&self, message: B::Message, other: &ActorRef<B>)
    where
        B: Actor<Reply = R>,
    {
        match &self.reply {
            Some(future) => other.enqueue_request(message, future.clone()),
            None => other.send(message),
        }
    }
}
