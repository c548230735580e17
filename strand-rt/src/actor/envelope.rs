//! Delivery envelope: plain message or request-with-future.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::future::ReplyFuture;

/// What actually sits in a mailbox slot.
///
/// A request carries the future that `reply` will settle. Handler matching
/// is always performed against the inner message, and the future is
/// installed into the per-delivery [`Context`](super::Context) just before
/// the handler runs, so user code never sees the envelope.
pub(crate) enum Envelope<M, R> {
    /// Fire-and-forget message.
    Tell(M),
    /// Message paired with the caller's reply future.
    Request {
        message: M,
        reply: ReplyFuture<R>,
    },
}

impl<M, R> Envelope<M, R> {
    /// The inner user message, for handler matching.
    pub(crate) fn message(&self) -> &M {
        match self {
            Self::Tell(message) => message,
            Self::Request { message, .. } => message,
        }
    }

    /// Decompose for delivery.
    pub(crate) fn into_parts(self) -> (M, Option<ReplyFuture<R>>) {
        match self {
            Self::Tell(message) => (message, None),
            Self::Request { message, reply } => (message, Some(reply)),
        }
    }
}
