//! Swap queue configuration.

use crate::error::QueueError;

/// Configuration for a [`SwapQueue`](crate::SwapQueue).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum events per buffer, and therefore per frame. Both buffers are
    /// allocated with exactly this capacity up front.
    pub capacity: usize,
}

impl QueueConfig {
    /// Default per-frame event capacity.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Largest accepted per-frame capacity. Both buffers are reserved in
    /// full at construction, so this bounds the up-front allocation.
    pub const MAX_CAPACITY: usize = 1 << 20;

    /// Configuration with the given per-frame capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check the configuration.
    ///
    /// Returns `Err(QueueError::InvalidConfig)` if `capacity` is zero or
    /// above [`MAX_CAPACITY`](Self::MAX_CAPACITY).
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.capacity == 0 {
            return Err(QueueError::InvalidConfig {
                reason: "capacity must be at least 1".into(),
            });
        }
        if self.capacity > Self::MAX_CAPACITY {
            return Err(QueueError::InvalidConfig {
                reason: format!(
                    "capacity must be <= {} (got {})",
                    Self::MAX_CAPACITY,
                    self.capacity
                ),
            });
        }
        Ok(())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = QueueConfig::default();
        assert_eq!(cfg.capacity, 1024);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = QueueConfig::with_capacity(0).validate().unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn oversized_capacity_rejected() {
        assert!(QueueConfig::with_capacity(QueueConfig::MAX_CAPACITY)
            .validate()
            .is_ok());
        let err = QueueConfig::with_capacity(QueueConfig::MAX_CAPACITY + 1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("capacity must be <="));
        assert!(QueueConfig::with_capacity(usize::MAX / 2).validate().is_err());
    }
}
