//! Mailbox state machine and drain loop.
//!
//! One `ActorCell` backs every spawned actor. It owns three locks with
//! strict roles:
//!
//! - `inner` (the mailbox lock) guards the staging lists and the
//!   `processing`/`scheduled` flags. This is the only lock senders touch;
//!   its critical sections are short and never run user code.
//! - `queue` guards the merged mailbox. Only the active drain takes it, so
//!   user code running inside a match callback may freely send to the same
//!   actor without re-entering a lock it already holds.
//! - `state` guards the user actor value and is held for the whole batch,
//!   which is what makes `&mut self` in handlers race-free.
//!
//! `scheduled` and `processing` form a two-stage interlock: `scheduled`
//! means a drain task sits in the executor queue but has not started;
//! `processing` means a drain is executing. A send only schedules when both
//! are clear, so a queued-but-unstarted drain is never doubled and a
//! terminated drain leaves the actor schedulable again. The two must not be
//! collapsed into one flag.

// Layer 1: Standard library imports
use std::mem;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tracing::{debug, error, warn};

// Layer 3: Internal module imports
use super::context::Context;
use super::envelope::Envelope;
use super::traits::{Actor, ErrorAction};
use super::wrapper::{run_wrapped, BatchWrapper};
use crate::executor::Executor;
use crate::mailbox::MessageQueue;
use crate::util::ActorAddress;

pub(crate) struct ActorCell<A: Actor> {
    address: ActorAddress,
    executor: Executor,
    wrappers: Vec<Box<dyn BatchWrapper>>,
    state: Mutex<A>,
    queue: Mutex<MessageQueue<Envelope<A::Message, A::Reply>>>,
    inner: Mutex<Inner<A>>,
}

struct Inner<A: Actor> {
    staged: Vec<Envelope<A::Message, A::Reply>>,
    staged_priority: Vec<Envelope<A::Message, A::Reply>>,
    processing: bool,
    scheduled: u8,
}

/// What the sender must do after releasing the mailbox lock.
enum WakeAction {
    DrainInline,
    Schedule,
    Nothing,
}

enum Pass {
    Priority,
    Normal,
}

impl<A: Actor> ActorCell<A> {
    pub(crate) fn new(
        address: ActorAddress,
        executor: Executor,
        wrappers: Vec<Box<dyn BatchWrapper>>,
        actor: A,
    ) -> Self {
        Self {
            address,
            executor,
            wrappers,
            state: Mutex::new(actor),
            queue: Mutex::new(MessageQueue::new()),
            inner: Mutex::new(Inner {
                staged: Vec::new(),
                staged_priority: Vec::new(),
                processing: false,
                scheduled: 0,
            }),
        }
    }

    pub(crate) fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// Non-blocking enqueue: stage the envelope and wake the actor if idle.
    ///
    /// The wake-up action is decided under the mailbox lock but performed
    /// after releasing it, so neither the executor submit nor an inline
    /// drain ever runs while the lock is held.
    ///
    /// Takes the cell by `Arc` because scheduling hands a clone to the
    /// executor.
    pub(crate) fn enqueue(
        cell: &Arc<Self>,
        envelope: Envelope<A::Message, A::Reply>,
        priority: bool,
    ) {
        let action = {
            let mut inner = cell.inner.lock();
            if priority {
                inner.staged_priority.push(envelope);
            } else {
                inner.staged.push(envelope);
            }
            if !inner.processing && inner.scheduled == 0 {
                if cell.executor.runs_on_caller() {
                    inner.processing = true;
                    WakeAction::DrainInline
                } else {
                    inner.scheduled = 1;
                    WakeAction::Schedule
                }
            } else {
                WakeAction::Nothing
            }
        };

        match action {
            WakeAction::DrainInline => cell.drain(true),
            WakeAction::Schedule => {
                let scheduled = Arc::clone(cell);
                if let Err(err) = cell.executor.execute(move || scheduled.drain(false)) {
                    // Roll the interlock back so a later send retries.
                    cell.inner.lock().scheduled = 0;
                    error!(actor = %cell.address, error = %err, "failed to schedule drain");
                }
            }
            WakeAction::Nothing => {}
        }
    }

    /// One activation: drain the mailbox until nothing is left.
    ///
    /// `ignore_processing` is set on the inline path, where the sender has
    /// already claimed `processing` under the lock.
    pub(crate) fn drain(&self, ignore_processing: bool) {
        {
            let mut inner = self.inner.lock();
            if inner.processing && !ignore_processing {
                // Another drain is active; it will see our messages.
                return;
            }
            inner.processing = true;
            inner.scheduled = 0;
        }

        let mut outcome: Result<(), A::Error> = Ok(());
        let mut batch_ran = false;
        {
            let mut actor = self.state.lock();
            // If a handler panics, the unwind must not leave `processing`
            // set, or the actor would never drain again.
            let guard = ProcessingGuard {
                cell_inner: &self.inner,
                armed: true,
            };
            {
                let mut batch = || {
                    outcome = self.run_batch(&mut actor);
                    batch_ran = true;
                };
                run_wrapped(&self.wrappers, &mut batch);
            }
            if batch_ran && outcome.is_ok() {
                // The batch went idle itself, atomically with the final
                // staging check; firing the guard now could clobber a drain
                // that a concurrent send has since started.
                guard.disarm();
            }
        }

        if !batch_ran {
            warn!(actor = %self.address, "batch wrapper did not invoke the batch");
        }
        if let Err(err) = outcome {
            error!(actor = %self.address, error = %err, "unhandled handler error ended drain");
        }
    }

    /// The drain loop proper. Returns `Ok` after going idle (with
    /// `processing` already cleared, atomically with the final staging
    /// check) and `Err` when an unhandled handler error aborts the batch.
    fn run_batch(&self, actor: &mut A) -> Result<(), A::Error> {
        loop {
            self.merge_staged();

            if A::HAS_PRIORITY_HANDLER {
                self.priority_pass(actor)?;
            }

            let next = self
                .queue
                .lock()
                .take_first_match(|envelope| actor.accepts(envelope.message()));
            match next {
                Some(envelope) => self.deliver(actor, envelope, Pass::Normal)?,
                None => {
                    let mut inner = self.inner.lock();
                    if inner.staged.is_empty() && inner.staged_priority.is_empty() {
                        // Nothing queued that we accept and nothing staged:
                        // go idle. Messages the handler does not accept stay
                        // in the mailbox for a later pass.
                        inner.processing = false;
                        return Ok(());
                    }
                    // New arrivals while we were matching; go around again.
                }
            }
        }
    }

    /// Exhaust every mailboxed message the priority handler accepts before
    /// any normal delivery, folding in arrivals as long as they keep coming.
    fn priority_pass(&self, actor: &mut A) -> Result<(), A::Error> {
        loop {
            let next = self
                .queue
                .lock()
                .take_first_match(|envelope| actor.accepts_priority(envelope.message()));
            match next {
                Some(envelope) => self.deliver(actor, envelope, Pass::Priority)?,
                None => {
                    {
                        let inner = self.inner.lock();
                        if inner.staged.is_empty() && inner.staged_priority.is_empty() {
                            return Ok(());
                        }
                    }
                    self.merge_staged();
                }
            }
        }
    }

    /// Move both staging lists into the queue: the priority batch to the
    /// front, the normal batch to the tail, each in arrival order.
    ///
    /// The staging lists are drained under the mailbox lock, the queue is
    /// filled under the queue lock; the two are never held together. Only
    /// the active drain merges, so the two steps cannot interleave with
    /// another merge.
    fn merge_staged(&self) {
        let (priority, normal) = {
            let mut inner = self.inner.lock();
            (
                mem::take(&mut inner.staged_priority),
                mem::take(&mut inner.staged),
            )
        };
        if priority.is_empty() && normal.is_empty() {
            return;
        }
        let mut queue = self.queue.lock();
        if !priority.is_empty() {
            queue.prepend_in_order(priority);
        }
        if !normal.is_empty() {
            queue.append_in_order(normal);
        }
    }

    /// Hand one envelope to the handler, with the request future (if any)
    /// installed in the context for exactly this invocation.
    fn deliver(
        &self,
        actor: &mut A,
        envelope: Envelope<A::Message, A::Reply>,
        pass: Pass,
    ) -> Result<(), A::Error> {
        let (message, reply) = envelope.into_parts();
        let mut ctx = Context::new(&self.address, reply);

        let result = match pass {
            Pass::Priority => actor.handle_priority(message, &mut ctx),
            Pass::Normal => actor.handle(message, &mut ctx),
        };

        match result {
            Ok(()) => Ok(()),
            Err(err) => match actor.on_error(&err) {
                ErrorAction::Resume => {
                    debug!(actor = %self.address, error = %err, "handler error absorbed");
                    Ok(())
                }
                ErrorAction::Abort => Err(err),
            },
        }
    }

    pub(crate) fn is_idle(&self) -> bool {
        {
            let inner = self.inner.lock();
            if inner.processing
                || inner.scheduled != 0
                || !inner.staged.is_empty()
                || !inner.staged_priority.is_empty()
            {
                return false;
            }
        }
        self.queue.lock().is_empty()
    }

    pub(crate) fn mailbox_len(&self) -> usize {
        let staged = {
            let inner = self.inner.lock();
            inner.staged.len() + inner.staged_priority.len()
        };
        staged + self.queue.lock().len()
    }
}

/// Clears `processing` on drop unless disarmed; covers the panic path out of
/// handlers and wrappers.
struct ProcessingGuard<'a, A: Actor> {
    cell_inner: &'a Mutex<Inner<A>>,
    armed: bool,
}

impl<A: Actor> ProcessingGuard<'_, A> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<A: Actor> Drop for ProcessingGuard<'_, A> {
    fn drop(&mut self) {
        if self.armed {
            self.cell_inner.lock().processing = false;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::convert::Infallible;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::Arc;

    use super::*;
    use crate::executor::{ExecutorConfig, ExecutorError, WorkerPool};

    /// Pool that silently discards scheduled drains, so tests can run them
    /// by hand on the test thread.
    struct NullPool;

    impl WorkerPool for NullPool {
        fn submit(&self, _work: crate::executor::Work) -> Result<(), ExecutorError> {
            Ok(())
        }

        fn shutdown(&self) {}
    }

    fn null_executor() -> Executor {
        let executor = Executor::new();
        executor.set_pool_factory(|_: &ExecutorConfig| Arc::new(NullPool) as Arc<dyn WorkerPool>);
        executor
    }

    #[derive(Default)]
    struct Recorder {
        delivered: Vec<String>,
        fail_on: Option<String>,
    }

    impl Actor for Recorder {
        type Message = String;
        type Reply = ();
        type Error = std::io::Error;

        const HAS_PRIORITY_HANDLER: bool = true;

        fn handle(&mut self, msg: String, _: &mut Context<'_, ()>) -> Result<(), Self::Error> {
            if self.fail_on.as_deref() == Some(msg.as_str()) {
                return Err(std::io::Error::other(msg));
            }
            self.delivered.push(msg);
            Ok(())
        }

        fn accepts_priority(&self, msg: &String) -> bool {
            msg.starts_with('!')
        }

        fn handle_priority(&mut self, msg: String, _: &mut Context<'_, ()>) -> Result<(), Self::Error> {
            self.delivered.push(msg);
            Ok(())
        }
    }

    fn recorder_cell(fail_on: Option<&str>) -> Arc<ActorCell<Recorder>> {
        Arc::new(ActorCell::new(
            ActorAddress::anonymous(),
            null_executor(),
            Vec::new(),
            Recorder {
                delivered: Vec::new(),
                fail_on: fail_on.map(str::to_string),
            },
        ))
    }

    fn delivered(cell: &Arc<ActorCell<Recorder>>) -> Vec<String> {
        cell.state.lock().delivered.clone()
    }

    #[test]
    fn test_manual_drain_delivers_in_order() {
        let cell = recorder_cell(None);
        ActorCell::enqueue(&cell, Envelope::Tell("a".to_string()), false);
        ActorCell::enqueue(&cell, Envelope::Tell("b".to_string()), false);
        assert!(!cell.is_idle());

        cell.drain(false);

        assert_eq!(delivered(&cell), vec!["a", "b"]);
        assert!(cell.is_idle());
    }

    #[test]
    fn test_priority_matches_overtake_resident_normals() {
        let cell = recorder_cell(None);
        ActorCell::enqueue(&cell, Envelope::Tell("a".to_string()), false);
        ActorCell::enqueue(&cell, Envelope::Tell("!urgent".to_string()), false);
        ActorCell::enqueue(&cell, Envelope::Tell("b".to_string()), false);

        cell.drain(false);

        assert_eq!(delivered(&cell), vec!["!urgent", "a", "b"]);
    }

    #[test]
    fn test_priority_staging_merges_to_front() {
        let cell = recorder_cell(None);
        ActorCell::enqueue(&cell, Envelope::Tell("n1".to_string()), false);
        ActorCell::enqueue(&cell, Envelope::Tell("p1".to_string()), true);
        ActorCell::enqueue(&cell, Envelope::Tell("p2".to_string()), true);

        cell.drain(false);

        assert_eq!(delivered(&cell), vec!["p1", "p2", "n1"]);
    }

    #[test]
    fn test_abort_leaves_remainder_for_next_activation() {
        let cell = recorder_cell(Some("bad"));
        ActorCell::enqueue(&cell, Envelope::Tell("a".to_string()), false);
        ActorCell::enqueue(&cell, Envelope::Tell("bad".to_string()), false);
        ActorCell::enqueue(&cell, Envelope::Tell("b".to_string()), false);

        cell.drain(false);

        // The drain ended at "bad"; "b" is still mailboxed and the actor is
        // schedulable again.
        assert_eq!(delivered(&cell), vec!["a"]);
        assert_eq!(cell.mailbox_len(), 1);
        assert!(!cell.is_idle());

        cell.drain(false);
        assert_eq!(delivered(&cell), vec!["a", "b"]);
        assert!(cell.is_idle());
    }

    #[test]
    fn test_panic_in_handler_resets_processing() {
        struct Bomb;

        impl Actor for Bomb {
            type Message = ();
            type Reply = ();
            type Error = Infallible;

            fn handle(&mut self, _: (), _: &mut Context<'_, ()>) -> Result<(), Infallible> {
                panic!("bomb");
            }
        }

        let cell = Arc::new(ActorCell::new(
            ActorAddress::anonymous(),
            null_executor(),
            Vec::new(),
            Bomb,
        ));
        ActorCell::enqueue(&cell, Envelope::Tell(()), false);

        let unwound = catch_unwind(AssertUnwindSafe(|| cell.drain(false)));
        assert!(unwound.is_err());

        // The guard cleared `processing`; nothing is queued, so the actor
        // reports idle and stays usable.
        assert!(cell.is_idle());
    }

    #[test]
    fn test_second_drain_backs_off_while_first_is_active() {
        // Simulate an active drain by entering through the inline path and
        // observing that a scheduled drain entering concurrently would see
        // `processing` set. Single-threaded approximation: claim the flag,
        // then call drain(false).
        let cell = recorder_cell(None);
        ActorCell::enqueue(&cell, Envelope::Tell("late".to_string()), false);

        cell.inner.lock().processing = true;
        cell.drain(false);
        assert_eq!(delivered(&cell), Vec::<String>::new());

        cell.inner.lock().processing = false;
        cell.drain(false);
        assert_eq!(delivered(&cell), vec!["late"]);
    }
}
