//! Generational object pool for Keel.
//!
//! A [`Pool`] owns a table of slots. Each slot carries a generation counter
//! that moves forward every time the slot is released, so a [`Handle`]
//! minted before the release can never reach the object stored there
//! afterwards. Lookups cost one bounds check and one integer comparison.
//!
//! # Architecture
//!
//! ```text
//! Pool<T, Tag, F>
//! ├── Vec<Slot<T>>        (generation + Option<T>, one per index ever used)
//! ├── F: FreeIndices      (released indices awaiting reuse)
//! │   ├── FreeStack       (LIFO, default)
//! │   └── FreeBitmap      (lowest index first)
//! └── SharedDiagnostics   (injected logging / abort collaborator)
//! ```
//!
//! # Capacity limits
//!
//! A handle addresses at most [`MAX_INDEX`]` + 1` slots and
//! [`MAX_GENERATION`]` + 1` generations per slot. A slot that exhausts its
//! generations is retired, never wrapped. Running out of indices is a
//! configuration error and terminates through
//! [`Diagnostics::fatal`](keel_core::Diagnostics::fatal).
//!
//! The pool has no internal locking. Share it across threads only behind
//! the owner's own synchronisation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod free;
pub mod pool;
mod slot;

pub use config::PoolConfig;
pub use error::PoolError;
pub use free::{FreeBitmap, FreeIndices, FreeStack};
pub use keel_core::{Handle, MAX_GENERATION, MAX_INDEX};
pub use pool::{Drain, Iter, IterMut, Pool};
