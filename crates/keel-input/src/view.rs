//! Read-only view over a swapped-in event batch.

use std::ops::Index;
use std::slice;

use crate::event::EventRecord;

/// Ordered, read-only view of the events delivered by the last swap.
///
/// Borrowed from [`SwapQueue::front_queue`](crate::SwapQueue::front_queue);
/// the borrow ends before the next swap can happen.
#[derive(Clone, Copy, Debug)]
pub struct QueueView<'a> {
    events: &'a [EventRecord],
}

impl<'a> QueueView<'a> {
    pub(crate) fn new(events: &'a [EventRecord]) -> Self {
        Self { events }
    }

    /// Number of events in the batch.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event at position `i`, or `None` past the end.
    pub fn get(&self, i: usize) -> Option<&'a EventRecord> {
        self.events.get(i)
    }

    /// Oldest event in the batch.
    pub fn first(&self) -> Option<&'a EventRecord> {
        self.events.first()
    }

    /// Newest event in the batch.
    pub fn last(&self) -> Option<&'a EventRecord> {
        self.events.last()
    }

    /// Iterate in push order.
    pub fn iter(&self) -> slice::Iter<'a, EventRecord> {
        self.events.iter()
    }

    /// The batch as a slice.
    pub fn as_slice(&self) -> &'a [EventRecord] {
        self.events
    }
}

impl Index<usize> for QueueView<'_> {
    type Output = EventRecord;

    /// # Panics
    ///
    /// Panics if `i >= self.len()`. Use [`QueueView::get`] for a checked
    /// lookup.
    fn index(&self, i: usize) -> &EventRecord {
        &self.events[i]
    }
}

impl<'a> IntoIterator for QueueView<'a> {
    type Item = &'a EventRecord;
    type IntoIter = slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &QueueView<'a> {
    type Item = &'a EventRecord;
    type IntoIter = slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
