//! # strand-rt - Lightweight In-Process Actor Runtime
//!
//! Concurrent components ("actors") that own private state and communicate
//! exclusively by asynchronous message passing, with an optional synchronous
//! request/response overlay. Each actor processes messages one at a time,
//! preserving single-threaded semantics internally, while many actors run
//! concurrently on a shared bounded worker pool.
//!
//! # Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//! use strand_rt::{Actor, ActorRef, Context};
//!
//! // 1. Define your actor and its state
//! struct Doubler;
//!
//! // 2. Implement the Actor trait
//! impl Actor for Doubler {
//!     type Message = i64;
//!     type Reply = i64;
//!     type Error = Infallible;
//!
//!     fn handle(&mut self, n: i64, ctx: &mut Context<'_, i64>) -> Result<(), Infallible> {
//!         ctx.reply(n * 2);
//!         Ok(())
//!     }
//! }
//!
//! // 3. Spawn and talk to it
//! let doubler = ActorRef::spawn(Doubler);
//! doubler.send(1); // fire and forget
//! assert_eq!(doubler.ask_blocking(21), 42); // request/response
//! ```
//!
//! # Core Guarantees
//!
//! - **Single-threaded actors**: at most one drain (batch of deliveries) per
//!   actor is ever in flight, so handlers see no internal races.
//! - **Non-blocking sends**: `send` and `ask` only take the mailbox lock for
//!   a few pointer moves; user callbacks never run under it.
//! - **Order**: per-sender FIFO for normal messages; priority-matched
//!   messages are delivered before any non-priority message resident at the
//!   time the priority pass runs.
//! - **Isolation**: a handler error is routed to the actor's exception
//!   handler; unmatched errors end the current drain but the actor stays
//!   usable. Panics are caught at the worker boundary and logged.
//! - **Exactly-once activation**: a two-stage interlock ensures an idle
//!   actor gets exactly one activation per burst of sends, and an unbounded
//!   mailbox means senders are never blocked by a slow actor.
//!
//! # Module Organization
//!
//! - [`actor`] - Actor trait, handles, spawn builder, drain machinery
//! - [`executor`] - Bounded worker pool with lazy lifecycle and inline mode
//! - [`future`] - Blocking one-shot future for request/response
//! - [`mailbox`] - Ordered queue with first-match removal
//! - [`util`] - Actor ids and addresses
//!
//! # Scope
//!
//! This is an in-process runtime: no distribution, no supervision trees, no
//! persistence, no mailbox bounds. Actors live until their last
//! [`ActorRef`] is dropped.

pub mod actor;
pub mod executor;
pub mod future;
pub mod mailbox;
pub mod util;

pub mod prelude;

// Re-export commonly used types
pub use actor::{Actor, ActorBuilder, ActorRef, BatchWrapper, Context, ErrorAction};
pub use executor::{Executor, ExecutorConfig, ExecutorError, ThreadPool, WorkerPool};
pub use future::ReplyFuture;
pub use mailbox::MessageQueue;
pub use util::{ActorAddress, ActorId};
