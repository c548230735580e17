//! Prelude module for convenient imports.
//!
//! Re-exports the types most programs need:
//!
//! ```rust
//! use strand_rt::prelude::*;
//! ```

// Core actor surface
pub use crate::actor::{Actor, ActorBuilder, ActorRef, BatchWrapper, Context, ErrorAction};

// Scheduling
pub use crate::executor::{Executor, ExecutorConfig, ExecutorError};

// Request/response
pub use crate::future::ReplyFuture;

// Utilities
pub use crate::util::{ActorAddress, ActorId};
