//! Double-buffered input event queue for Keel.
//!
//! The platform thread pushes [`EventRecord`]s as they arrive; the frame
//! loop swaps buffers once per frame and reads a stable, ordered batch.
//!
//! # Architecture
//!
//! ```text
//! producer thread                     consumer (frame loop)
//!   EventSender::push ──┐
//!                       ▼
//!          Arc<Mutex<back buffer>>  ◄── swap_queues (&mut self)
//!                                          │
//!                                          ▼
//!                                   front buffer ──► front_queue() -> QueueView
//! ```
//!
//! Both buffers are allocated once with capacity `K` and never grow. A push
//! into a full back buffer is dropped and reported; it never blocks and
//! never reallocates. The lock guards only the append and the swap.
//!
//! The [`QueueView`] returned by [`SwapQueue::front_queue`] borrows the
//! queue, so it cannot be held across the next
//! [`swap_queues`](SwapQueue::swap_queues).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod event;
pub mod metrics;
pub mod swap;
pub mod view;

pub use config::QueueConfig;
pub use error::{PushError, QueueError};
pub use event::{EventKind, EventRecord, InputEvent, KeyCode, MouseButton, Vec2};
pub use metrics::QueueMetrics;
pub use swap::{EventSender, SwapQueue};
pub use view::QueueView;
