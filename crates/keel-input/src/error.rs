//! Input queue error types.

use std::error::Error;
use std::fmt;

/// Why a push was not accepted.
///
/// Overflow is lossy but recoverable: the event is discarded, the drop is
/// counted and reported, and the producer carries on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushError {
    /// The back buffer already holds `capacity` events this frame.
    QueueFull {
        /// The per-frame capacity.
        capacity: usize,
    },
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "event queue full ({capacity} events per frame)")
            }
        }
    }
}

impl Error for PushError {}

/// Errors raised when building a queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// The queue configuration failed validation.
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid queue config: {reason}"),
        }
    }
}

impl Error for QueueError {}
