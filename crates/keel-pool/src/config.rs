//! Pool configuration parameters.

use keel_core::MAX_INDEX;

use crate::error::PoolError;

/// Configuration for a [`Pool`](crate::Pool).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of slots to reserve up front.
    ///
    /// Default: 0. The slot table grows one slot at a time past this point
    /// (amortised by `Vec`), so this only avoids early reallocations.
    pub initial_capacity: usize,

    /// Hard upper bound on the number of slots the table may hold.
    ///
    /// Default: `MAX_INDEX + 1`, the whole index space a handle can
    /// address. Lower values turn the pool into a fixed-capacity pool:
    /// allocation past the limit is treated as index-space exhaustion.
    pub max_slots: u32,
}

impl PoolConfig {
    /// Default reserved slot count.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

    /// Default slot limit: every index a handle can encode.
    pub const DEFAULT_MAX_SLOTS: u32 = MAX_INDEX + 1;

    /// A fixed-capacity configuration: `slots` reserved and never exceeded.
    pub fn fixed(slots: u32) -> Self {
        Self {
            initial_capacity: slots as usize,
            max_slots: slots,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.max_slots == 0 {
            return Err(PoolError::InvalidConfig {
                reason: "max_slots must be at least 1".to_string(),
            });
        }
        if self.max_slots > Self::DEFAULT_MAX_SLOTS {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "max_slots must be <= {} (got {}); handles carry a {}-bit index",
                    Self::DEFAULT_MAX_SLOTS,
                    self.max_slots,
                    keel_core::INDEX_BITS,
                ),
            });
        }
        if self.initial_capacity > self.max_slots as usize {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "initial_capacity ({}) exceeds max_slots ({})",
                    self.initial_capacity, self.max_slots,
                ),
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_slots: Self::DEFAULT_MAX_SLOTS,
        }
    }
}
