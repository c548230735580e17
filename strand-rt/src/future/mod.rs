//! One-shot future used by the request/response overlay.
//!
//! # Components
//!
//! - [`ReplyFuture`] - Single-assignment cell with blocking and timed
//!   retrieval.
//!
//! This module is deliberately synchronous: a waiter parks its OS thread on a
//! condvar until the value arrives. It has no dependency on the actor core
//! and can be used on its own wherever a settable one-shot latch is needed.

pub mod reply;

pub use reply::ReplyFuture;
