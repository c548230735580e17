//! Spawn-time actor configuration.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tracing::debug;

// Layer 3: Internal module imports
use super::cell::ActorCell;
use super::handle::ActorRef;
use super::traits::Actor;
use super::wrapper::BatchWrapper;
use crate::executor::Executor;
use crate::util::ActorAddress;

/// Builder for spawning an actor with non-default settings.
///
/// Everything is optional: the name defaults to anonymous, the executor to
/// [`Executor::global`], and the wrapper list to empty.
/// [`ActorRef::spawn`] is the shorthand for all defaults.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use strand_rt::{Actor, ActorBuilder, Context, Executor};
///
/// struct Logger;
///
/// impl Actor for Logger {
///     type Message = String;
///     type Reply = ();
///     type Error = Infallible;
///
///     fn handle(&mut self, line: String, _: &mut Context<'_, ()>) -> Result<(), Infallible> {
///         println!("{line}");
///         Ok(())
///     }
/// }
///
/// let executor = Executor::new();
/// let logger = ActorBuilder::new(Logger)
///     .name("logger")
///     .executor(executor)
///     .spawn();
/// logger.send("spawned".to_string());
/// ```
pub struct ActorBuilder<A: Actor> {
    actor: A,
    name: Option<String>,
    executor: Option<Executor>,
    wrappers: Vec<Box<dyn BatchWrapper>>,
}

impl<A: Actor> ActorBuilder<A> {
    /// Start building around `actor`.
    pub fn new(actor: A) -> Self {
        Self {
            actor,
            name: None,
            executor: None,
            wrappers: Vec::new(),
        }
    }

    /// Give the actor a name for diagnostics and log output.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Run this actor's drains on `executor` instead of the global one.
    pub fn executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Add a batch wrapper; wrappers nest in the order they are added,
    /// first outermost.
    pub fn wrap<W: BatchWrapper>(mut self, wrapper: W) -> Self {
        self.wrappers.push(Box::new(wrapper));
        self
    }

    /// Spawn the actor, idle with an empty mailbox.
    pub fn spawn(self) -> ActorRef<A> {
        let address = match self.name {
            Some(name) => ActorAddress::named(name),
            None => ActorAddress::anonymous(),
        };
        let executor = self
            .executor
            .unwrap_or_else(|| Executor::global().clone());

        debug!(actor = %address, "actor spawned");
        ActorRef::from_cell(Arc::new(ActorCell::new(
            address,
            executor,
            self.wrappers,
            self.actor,
        )))
    }
}
