//! Double-buffered swap queue.
//!
//! [`SwapQueue`] is the consumer side. It owns the front buffer outright and
//! shares the back buffer with any number of [`EventSender`]s through an
//! `Arc<Mutex<_>>`. Producers append to the back buffer; once per frame the
//! consumer calls [`SwapQueue::swap_queues`], which exchanges the two `Vec`s
//! under the lock and clears the new back buffer.
//!
//! # Locking
//!
//! The mutex is held for one append (or one batch copy) or one pointer
//! swap. Diagnostics are reported after the guard is dropped. A poisoned
//! lock is taken over as-is: the buffer holds `Copy` records that a
//! panicking holder cannot leave half-written.

use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use keel_core::{LogDiagnostics, SharedDiagnostics};
use log::Level;

use crate::config::QueueConfig;
use crate::error::{PushError, QueueError};
use crate::event::EventRecord;
use crate::metrics::QueueMetrics;
use crate::view::QueueView;

const TARGET: &str = "keel::input";

/// State behind the lock: the back buffer and the cumulative counters.
struct Back {
    events: Vec<EventRecord>,
    pushed: u64,
    dropped: u64,
    swaps: u64,
}

/// Producer-side shared state.
struct Shared {
    back: Mutex<Back>,
    capacity: usize,
    diagnostics: SharedDiagnostics,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Back> {
        self.back.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, record: EventRecord) -> Result<(), PushError> {
        let overflow = {
            let mut back = self.lock();
            if back.events.len() < self.capacity {
                back.events.push(record);
                back.pushed += 1;
                None
            } else {
                back.dropped += 1;
                Some(back.dropped)
            }
        };
        match overflow {
            None => Ok(()),
            Some(total) => {
                self.report_overflow(1, total);
                Err(PushError::QueueFull {
                    capacity: self.capacity,
                })
            }
        }
    }

    fn push_batch(&self, records: &[EventRecord]) -> usize {
        let (accepted, total) = {
            let mut back = self.lock();
            let room = self.capacity - back.events.len();
            let accepted = room.min(records.len());
            back.events.extend_from_slice(&records[..accepted]);
            back.pushed += accepted as u64;
            back.dropped += (records.len() - accepted) as u64;
            (accepted, back.dropped)
        };
        let rejected = records.len() - accepted;
        if rejected > 0 {
            self.report_overflow(rejected, total);
        }
        accepted
    }

    fn report_overflow(&self, rejected: usize, total: u64) {
        self.diagnostics.log(
            Level::Warn,
            TARGET,
            format_args!(
                "event queue full ({} per frame): dropped {rejected} event(s), {total} dropped so far",
                self.capacity
            ),
        );
    }
}

/// Double-buffered input event queue; the consumer end.
///
/// Created by the frame loop. Producers get an [`EventSender`] from
/// [`sender`](Self::sender), or push directly through [`push`](Self::push)
/// when producer and consumer share the queue by reference.
///
/// # Example
///
/// ```
/// use keel_input::{EventRecord, InputEvent, SwapQueue};
///
/// let mut queue = SwapQueue::new();
/// let sender = queue.sender();
/// sender.push(EventRecord::new(1, InputEvent::Activate)).unwrap();
///
/// assert!(queue.front_queue().is_empty());
/// queue.swap_queues();
/// assert_eq!(queue.front_queue().len(), 1);
/// ```
pub struct SwapQueue {
    front: Vec<EventRecord>,
    shared: Arc<Shared>,
}

impl SwapQueue {
    /// Queue with the default capacity, reporting through the `log` facade.
    pub fn new() -> Self {
        Self::build(QueueConfig::default(), LogDiagnostics::shared())
    }

    /// Queue with the default capacity and the given diagnostics
    /// collaborator.
    pub fn with_diagnostics(diagnostics: SharedDiagnostics) -> Self {
        Self::build(QueueConfig::default(), diagnostics)
    }

    /// Queue from an explicit configuration.
    ///
    /// Returns `Err(QueueError::InvalidConfig)` if the configuration fails
    /// [`QueueConfig::validate`].
    pub fn with_config(
        config: QueueConfig,
        diagnostics: SharedDiagnostics,
    ) -> Result<Self, QueueError> {
        config.validate()?;
        Ok(Self::build(config, diagnostics))
    }

    fn build(config: QueueConfig, diagnostics: SharedDiagnostics) -> Self {
        let capacity = config.capacity;
        Self {
            front: Vec::with_capacity(capacity),
            shared: Arc::new(Shared {
                back: Mutex::new(Back {
                    events: Vec::with_capacity(capacity),
                    pushed: 0,
                    dropped: 0,
                    swaps: 0,
                }),
                capacity,
                diagnostics,
            }),
        }
    }

    /// A producer handle onto this queue's back buffer.
    pub fn sender(&self) -> EventSender {
        EventSender {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Append `record` to the back buffer.
    ///
    /// If the back buffer already holds `capacity` events the record is
    /// dropped, the drop is reported at `warn`, and
    /// `Err(PushError::QueueFull)` is returned.
    pub fn push(&self, record: EventRecord) -> Result<(), PushError> {
        self.shared.push(record)
    }

    /// Append records in order until the back buffer is full.
    ///
    /// Returns how many were accepted; the rest are dropped and reported
    /// once.
    pub fn push_batch(&self, records: &[EventRecord]) -> usize {
        self.shared.push_batch(records)
    }

    /// Make everything pushed since the last swap visible through
    /// [`front_queue`](Self::front_queue), and start a fresh back buffer.
    ///
    /// Swapping with nothing pushed yields an empty front.
    pub fn swap_queues(&mut self) {
        let mut back = self.shared.lock();
        mem::swap(&mut self.front, &mut back.events);
        back.events.clear();
        back.swaps += 1;
    }

    /// The batch delivered by the last swap, in push order.
    pub fn front_queue(&self) -> QueueView<'_> {
        QueueView::new(&self.front)
    }

    /// Discard both buffers without delivering anything.
    pub fn clear(&mut self) {
        self.front.clear();
        self.shared.lock().events.clear();
    }

    /// Per-frame capacity of each buffer.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Snapshot of the cumulative counters.
    pub fn metrics(&self) -> QueueMetrics {
        let back = self.shared.lock();
        QueueMetrics {
            pushed: back.pushed,
            dropped: back.dropped,
            swaps: back.swaps,
            pending: back.events.len(),
        }
    }
}

impl Default for SwapQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SwapQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapQueue")
            .field("capacity", &self.shared.capacity)
            .field("front", &self.front.len())
            .field("pending", &self.shared.lock().events.len())
            .finish_non_exhaustive()
    }
}

/// Producer handle for a [`SwapQueue`].
///
/// Cheap to clone; every clone appends to the same back buffer. Pushes from
/// one sender keep their relative order.
#[derive(Clone)]
pub struct EventSender {
    shared: Arc<Shared>,
}

impl EventSender {
    /// See [`SwapQueue::push`].
    pub fn push(&self, record: EventRecord) -> Result<(), PushError> {
        self.shared.push(record)
    }

    /// See [`SwapQueue::push_batch`].
    pub fn push_batch(&self, records: &[EventRecord]) -> usize {
        self.shared.push_batch(records)
    }

    /// Per-frame capacity of the queue.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

impl fmt::Debug for EventSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSender")
            .field("capacity", &self.shared.capacity)
            .finish_non_exhaustive()
    }
}

// Compile-time assertion: the producer handle crosses threads, and so does
// the queue itself.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<EventSender>();
    assert::<SwapQueue>();
};
