//! Keel: engine primitives for game and UI runtimes.
//!
//! This is the facade crate that re-exports the public API from all Keel
//! sub-crates. For most users, adding `keel` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use keel::prelude::*;
//!
//! struct Widget {
//!     label: &'static str,
//! }
//!
//! // Objects live in a pool and are addressed by tagged handles.
//! let mut widgets: Pool<Widget> = Pool::new();
//! let ok = widgets.allocate(Widget { label: "OK" });
//!
//! // The platform thread pushes input; the frame loop swaps once per frame.
//! let mut input = SwapQueue::new();
//! let sender = input.sender();
//! sender
//!     .push(EventRecord::new(
//!         16_000,
//!         InputEvent::MouseDown {
//!             button: MouseButton::Left,
//!             position: Vec2::new(12.0, 8.0),
//!         },
//!     ))
//!     .unwrap();
//!
//! input.swap_queues();
//! for record in input.front_queue() {
//!     if record.kind() == EventKind::MouseDown {
//!         assert_eq!(widgets.get(ok).map(|w| w.label), Some("OK"));
//!     }
//! }
//!
//! // Released handles never resolve again, even once the slot is reused.
//! widgets.release(ok).unwrap();
//! let cancel = widgets.allocate(Widget { label: "Cancel" });
//! assert!(widgets.get(ok).is_none());
//! assert!(widgets.contains(cancel));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `keel-core` | `Handle`, bit layout constants, `Diagnostics` |
//! | [`pool`] | `keel-pool` | Generational `Pool`, free-index strategies, `PoolConfig` |
//! | [`input`] | `keel-input` | Event records, `SwapQueue`, `EventSender`, `QueueView` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Handles and the diagnostics collaborator (`keel-core`).
pub use keel_core as types;

/// Generational object pool (`keel-pool`).
///
/// [`pool::Pool`] with the default [`pool::FreeStack`] strategy reuses the
/// most recently released slot; [`pool::FreeBitmap`] reuses the lowest.
pub use keel_pool as pool;

/// Double-buffered input event queue (`keel-input`).
pub use keel_input as input;

/// Common imports for typical Keel usage.
///
/// ```rust
/// use keel::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use keel_core::{Diagnostics, Handle, LogDiagnostics, SharedDiagnostics};

    // Pool
    pub use keel_pool::{FreeBitmap, FreeIndices, FreeStack, Pool, PoolConfig, PoolError};

    // Input
    pub use keel_input::{
        EventKind, EventRecord, EventSender, InputEvent, KeyCode, MouseButton, PushError,
        QueueConfig, QueueError, QueueMetrics, QueueView, SwapQueue, Vec2,
    };
}
