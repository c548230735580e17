//! Around-advice composed around each drain batch.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// A wrapper that runs around one drain batch.
///
/// The wrapper receives the batch as a callable and must invoke it exactly
/// once; whatever it does before and after happens on the draining thread,
/// bracketing every handler invocation of that batch. Typical uses are
/// installing thread-local context, opening a tracing span, or scoping a
/// transaction.
///
/// Wrappers given to [`ActorBuilder::wrap`](super::ActorBuilder::wrap)
/// compose by nesting, first wrapper outermost.
///
/// Any `Fn(&mut dyn FnMut())` closure is a `BatchWrapper`:
///
/// ```rust
/// use std::convert::Infallible;
/// use strand_rt::{Actor, ActorBuilder, Context};
///
/// struct Sink;
///
/// impl Actor for Sink {
///     type Message = u32;
///     type Reply = ();
///     type Error = Infallible;
///
///     fn handle(&mut self, _: u32, _: &mut Context<'_, ()>) -> Result<(), Infallible> {
///         Ok(())
///     }
/// }
///
/// let sink = ActorBuilder::new(Sink)
///     .wrap(|batch: &mut dyn FnMut()| {
///         // before the batch
///         batch();
///         // after the batch
///     })
///     .spawn();
/// sink.send(1);
/// ```
pub trait BatchWrapper: Send + Sync + 'static {
    /// Run `batch` exactly once, with any bracketing this wrapper provides.
    fn around(&self, batch: &mut dyn FnMut());
}

impl<F> BatchWrapper for F
where
    F: Fn(&mut dyn FnMut()) + Send + Sync + 'static,
{
    fn around(&self, batch: &mut dyn FnMut()) {
        self(batch)
    }
}

/// Run `batch` inside the composed wrapper stack, first wrapper outermost.
pub(crate) fn run_wrapped(wrappers: &[Box<dyn BatchWrapper>], batch: &mut dyn FnMut()) {
    match wrappers.split_first() {
        None => batch(),
        Some((outer, rest)) => outer.around(&mut || run_wrapped(rest, &mut *batch)),
    }
}
