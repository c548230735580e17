//! Core Actor trait and exception-handler decisions.

// Layer 1: Standard library imports
use std::error::Error;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::context::Context;

/// The contract an actor implementation fulfills.
///
/// An actor owns private state and consumes messages one at a time; the
/// runtime guarantees that at most one handler invocation for a given actor
/// is in flight, so `&mut self` is race-free by construction.
///
/// # Partial handlers
///
/// The message handler is a *partial function*, split into
/// [`accepts`](Actor::accepts) and [`handle`](Actor::handle): the drain
/// delivers the first mailboxed message `accepts` returns `true` for, and
/// leaves the rest in place. A message no handler ever accepts stays in the
/// mailbox indefinitely; covering every message eventually is the
/// implementor's responsibility.
///
/// The optional priority handler works the same way through
/// [`accepts_priority`](Actor::accepts_priority) /
/// [`handle_priority`](Actor::handle_priority) and must be enabled with the
/// [`HAS_PRIORITY_HANDLER`](Actor::HAS_PRIORITY_HANDLER) const. While any
/// mailboxed message matches it, the priority pass runs before any normal
/// delivery.
///
/// # Errors
///
/// `handle` returning `Err` consults [`on_error`](Actor::on_error), the
/// partial exception handler: [`ErrorAction::Resume`] means the error was
/// matched and handled and the drain continues with the next message;
/// [`ErrorAction::Abort`] (the default) ends the current drain, leaving the
/// remaining messages mailboxed for the next activation. The actor stays
/// usable either way.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use strand_rt::{Actor, ActorRef, Context};
///
/// struct Counter {
///     count: u64,
/// }
///
/// impl Actor for Counter {
///     type Message = u64;
///     type Reply = u64;
///     type Error = Infallible;
///
///     fn handle(
///         &mut self,
///         message: u64,
///         ctx: &mut Context<'_, u64>,
///     ) -> Result<(), Infallible> {
///         self.count += message;
///         ctx.reply(self.count);
///         Ok(())
///     }
/// }
///
/// let counter = ActorRef::spawn(Counter { count: 0 });
/// counter.send(5);
/// assert_eq!(counter.ask_blocking(1), 6);
/// ```
pub trait Actor: Send + 'static {
    /// The type of messages this actor consumes.
    type Message: Send + 'static;

    /// The type of values this actor replies with.
    ///
    /// Actors that never reply use `()`.
    type Reply: Send + 'static;

    /// The error type of handler failures.
    ///
    /// Actors whose handlers cannot fail use `std::convert::Infallible`.
    type Error: Error + Send + 'static;

    /// Whether this actor supplies a priority handler.
    ///
    /// The drain runs the priority pass only when this is `true`; overriding
    /// [`accepts_priority`](Actor::accepts_priority) without setting it has
    /// no effect.
    const HAS_PRIORITY_HANDLER: bool = false;

    /// Whether the normal handler applies to `message`.
    ///
    /// Defaults to accepting everything. Messages this returns `false` for
    /// remain in the mailbox and are re-offered on later passes, when the
    /// actor's state (and therefore its acceptance) may have changed.
    fn accepts(&self, _message: &Self::Message) -> bool {
        true
    }

    /// Consume one message.
    ///
    /// Runs outside the mailbox lock; sending or asking other actors from
    /// here is fine. For a request, `ctx.reply(..)` resolves the caller's
    /// future; for a plain send, `ctx.reply(..)` is a silent no-op.
    fn handle(
        &mut self,
        message: Self::Message,
        ctx: &mut Context<'_, Self::Reply>,
    ) -> Result<(), Self::Error>;

    /// Whether the priority handler applies to `message`.
    ///
    /// Only consulted when [`HAS_PRIORITY_HANDLER`](Actor::HAS_PRIORITY_HANDLER)
    /// is `true`.
    fn accepts_priority(&self, _message: &Self::Message) -> bool {
        false
    }

    /// Consume one priority-matched message.
    fn handle_priority(
        &mut self,
        _message: Self::Message,
        _ctx: &mut Context<'_, Self::Reply>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// The partial exception handler.
    ///
    /// Called with every error a handler returns. Return
    /// [`ErrorAction::Resume`] for errors this actor knows how to absorb;
    /// the default [`ErrorAction::Abort`] ends the current drain and logs
    /// the error at the executor boundary.
    fn on_error(&mut self, _error: &Self::Error) -> ErrorAction {
        ErrorAction::Abort
    }
}

/// Decision returned by [`Actor::on_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// The error was matched and handled; continue with the next message.
    Resume,

    /// The error was not matched; end the current drain. Remaining messages
    /// stay mailboxed and are consumed by the next activation.
    Abort,
}

impl Default for ErrorAction {
    /// An unhandled error ends the drain.
    fn default() -> Self {
        Self::Abort
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    struct Echo;

    impl Actor for Echo {
        type Message = String;
        type Reply = String;
        type Error = Infallible;

        fn handle(
            &mut self,
            message: String,
            ctx: &mut Context<'_, String>,
        ) -> Result<(), Infallible> {
            ctx.reply(message);
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let echo = Echo;
        assert!(echo.accepts(&"anything".to_string()));
        assert!(!echo.accepts_priority(&"anything".to_string()));
        assert!(!Echo::HAS_PRIORITY_HANDLER);

        // Infallible handlers can never reach on_error; check the default
        // through the enum directly.
        assert_eq!(ErrorAction::default(), ErrorAction::Abort);
    }

    #[test]
    fn test_error_action_equality() {
        assert_eq!(ErrorAction::Resume, ErrorAction::Resume);
        assert_ne!(ErrorAction::Resume, ErrorAction::Abort);
    }
}
