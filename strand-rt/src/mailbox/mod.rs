//! Message queue backing each actor's mailbox.
//!
//! # Components
//!
//! - [`MessageQueue`] - Ordered queue with FIFO append, batched front
//!   insertion, and first-match removal.
//!
//! The queue itself is not synchronized; the actor core guards it with the
//! mailbox lock and keeps freshly sent messages in separate staging lists so
//! that senders never walk the queue.

pub mod queue;

pub use queue::MessageQueue;
