//! Core types and collaborator contracts for the Keel engine primitives.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the pool and the input queue: the type-tagged
//! [`Handle`] and the injected [`Diagnostics`] capability used to report
//! overflow, caller errors, and fatal capacity exhaustion.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod handle;

pub use diagnostics::{Diagnostics, LogDiagnostics, SharedDiagnostics};
pub use handle::{Handle, GENERATION_BITS, INDEX_BITS, MAX_GENERATION, MAX_INDEX};
