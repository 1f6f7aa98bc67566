//! Pool-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during pool operations.
///
/// Every variant except [`Exhausted`](PoolError::Exhausted) and
/// [`InvalidConfig`](PoolError::InvalidConfig) is a caller-contract
/// violation: the operation was refused and the pool is unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The handle is the `Handle::INVALID` sentinel.
    InvalidHandle,
    /// The handle's index was never issued by this pool.
    OutOfRange {
        /// Index encoded in the handle.
        index: u32,
        /// Number of slots in the table.
        slots: u32,
    },
    /// The slot has moved on to a newer generation since the handle was
    /// issued.
    StaleHandle {
        /// Generation encoded in the handle.
        handle_generation: u32,
        /// Generation currently held by the slot.
        slot_generation: u32,
    },
    /// The handle's generation matches but the slot holds nothing
    /// (already released).
    Vacant,
    /// No free index is left and the table is at its slot limit.
    Exhausted {
        /// The configured slot limit.
        capacity: u32,
    },
    /// The pool configuration failed validation.
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle => write!(f, "invalid handle"),
            Self::OutOfRange { index, slots } => {
                write!(f, "handle index {index} out of range ({slots} slots)")
            }
            Self::StaleHandle {
                handle_generation,
                slot_generation,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, slot is at {slot_generation}"
                )
            }
            Self::Vacant => write!(f, "slot is not occupied"),
            Self::Exhausted { capacity } => {
                write!(f, "pool index space exhausted ({capacity} slots)")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid pool config: {reason}"),
        }
    }
}

impl Error for PoolError {}
