//! Ordered message queue with first-match removal.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// Ordered queue of undelivered messages for one actor.
///
/// Supports the three operations the drain loop needs:
///
/// - [`push_back`](MessageQueue::push_back): FIFO append of a single item.
/// - [`prepend_in_order`](MessageQueue::prepend_in_order) /
///   [`append_in_order`](MessageQueue::append_in_order): merge a staged batch
///   at the front or the tail, keeping the batch's own arrival order.
/// - [`take_first_match`](MessageQueue::take_first_match): remove and return
///   the first item a predicate accepts, leaving every other item in place
///   and in order.
///
/// Items a handler does not accept simply stay where they are, so a later
/// scan can still find them in their original positions.
///
/// # Example
/// ```rust
/// use strand_rt::mailbox::MessageQueue;
///
/// let mut queue = MessageQueue::new();
/// queue.push_back("a");
/// queue.push_back("b");
/// queue.prepend_in_order(vec!["p1", "p2"]);
///
/// assert_eq!(queue.take_first_match(|m| m.starts_with('p')), Some("p1"));
/// assert_eq!(queue.take_first_match(|_| true), Some("p2"));
/// assert_eq!(queue.take_first_match(|_| true), Some("a"));
/// ```
#[derive(Debug)]
pub struct MessageQueue<T> {
    items: VecDeque<T>,
}

impl<T> MessageQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append one item at the tail.
    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Insert a batch at the front of the queue.
    ///
    /// The batch ends up frontmost in its own order: merging `[p1, p2]` into
    /// `[a, b]` yields `[p1, p2, a, b]`. This is how staged priority
    /// messages jump ahead of everything already queued while preserving
    /// their arrival order among themselves.
    pub fn prepend_in_order(&mut self, batch: Vec<T>) {
        for item in batch.into_iter().rev() {
            self.items.push_front(item);
        }
    }

    /// Append a batch at the tail of the queue in its own order.
    pub fn append_in_order(&mut self, batch: Vec<T>) {
        self.items.extend(batch);
    }

    /// Remove and return the first item the predicate accepts.
    ///
    /// Scans from the front; items before and after the removed one keep
    /// their relative order. Returns `None` when nothing matches.
    pub fn take_first_match<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let index = self.items.iter().position(|item| predicate(item))?;
        self.items.remove(index)
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
