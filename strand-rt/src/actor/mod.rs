//! Actor core: message intake, activation, drain loop, request overlay.
//!
//! # Components
//!
//! - [`Actor`] - The subclass contract: partial message handler, optional
//!   priority handler, optional exception handler.
//! - [`ActorRef`] - Cloneable handle exposing `send` / `send_priority` /
//!   `ask` / `ask_blocking` / `forward`-capable context.
//! - [`ActorBuilder`] - Spawn-time configuration (name, executor, wrappers).
//! - [`Context`] - Per-delivery handler context carrying the current request
//!   future; `reply` and `forward` live here.
//! - [`BatchWrapper`] - Around-advice composed outside-in around each drain.
//! - [`ErrorAction`] - Continue-or-abort decision of the exception handler.
//!
//! # Execution model
//!
//! Sending stages the message under the actor's mailbox lock and, when the
//! actor is idle, schedules exactly one drain on the executor. The drain
//! merges staged messages into the mailbox, exhausts priority matches, then
//! delivers normal matches one at a time, re-checking for priority arrivals
//! between deliveries, until mailbox and staging are empty. A single actor
//! never runs two drains at once; handler code always runs outside the
//! mailbox lock.
//!
//! # Module Organization
//!
//! This mod.rs file contains only module declarations and re-exports.
//!
//! - `traits.rs` - Actor trait and ErrorAction enum
//! - `context.rs` - Context implementation
//! - `envelope.rs` - Tell/Request envelope (crate-internal)
//! - `wrapper.rs` - BatchWrapper trait and composition
//! - `cell.rs` - Mailbox state machine and drain loop (crate-internal)
//! - `handle.rs` - ActorRef implementation
//! - `builder.rs` - ActorBuilder implementation

pub mod builder;
pub(crate) mod cell;
pub mod context;
pub(crate) mod envelope;
pub mod handle;
pub mod traits;
pub mod wrapper;

pub use builder::ActorBuilder;
pub use context::Context;
pub use handle::ActorRef;
pub use traits::{Actor, ErrorAction};
pub use wrapper::BatchWrapper;
