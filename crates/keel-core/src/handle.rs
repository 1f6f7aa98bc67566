//! Type-tagged generational handles.
//!
//! A [`Handle`] packs a slot index and a slot generation into a single
//! `u32`. The generation makes reuse of an index detectable: once a slot is
//! released its generation moves on, so every handle minted before the
//! release stops resolving.
//!
//! ```text
//!  31            20 19                     0
//! ┌────────────────┬────────────────────────┐
//! │ generation (12)│       index (20)       │
//! └────────────────┴────────────────────────┘
//! ```
//!
//! The all-ones id is the [`Handle::INVALID`] sentinel. Pools never issue
//! the all-ones generation, so no live handle can collide with it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Number of low bits of a handle id holding the slot index.
pub const INDEX_BITS: u32 = 20;

/// Number of high bits of a handle id holding the slot generation.
pub const GENERATION_BITS: u32 = u32::BITS - INDEX_BITS;

/// Largest slot index a handle can address.
pub const MAX_INDEX: u32 = (1 << INDEX_BITS) - 1;

/// Largest generation a pool will ever issue.
///
/// One below the all-ones generation, which is reserved for the
/// [`Handle::INVALID`] sentinel. A slot whose generation would pass this
/// value is retired instead of wrapping back to zero.
pub const MAX_GENERATION: u32 = (1 << GENERATION_BITS) - 2;

const INVALID_ID: u32 = u32::MAX;

/// Opaque reference to an object stored in a pool.
///
/// `Tag` is a phantom marker that keeps handles from different pools apart
/// at compile time: a `Handle<Texture>` cannot be compared with, or passed
/// where a `Handle<Mesh>` is expected. The marker is `fn() -> Tag`, so a
/// handle is `Copy + Send + Sync` no matter what `Tag` is.
///
/// A handle never owns the object. It is only meaningful to the pool that
/// issued it, and resolving it through that pool is the only way to reach
/// the object.
#[must_use]
pub struct Handle<Tag> {
    id: u32,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag> Handle<Tag> {
    /// A handle that never resolves.
    pub const INVALID: Self = Self::from_raw(INVALID_ID);

    /// Rebuild a handle from its opaque id.
    ///
    /// Intended for pool implementations and for handles that were stored
    /// as plain integers (for example across a serialisation boundary). A
    /// forged id is harmless: lookups check both index and generation.
    pub const fn from_raw(id: u32) -> Self {
        Self {
            id,
            _tag: PhantomData,
        }
    }

    /// The opaque id, for logging and serialisation.
    pub const fn raw(self) -> u32 {
        self.id
    }

    /// Whether this is the [`Handle::INVALID`] sentinel.
    pub const fn is_invalid(self) -> bool {
        self.id == INVALID_ID
    }
}

impl<Tag> Clone for Handle<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Copy for Handle<Tag> {}

impl<Tag> PartialEq for Handle<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Tag> Eq for Handle<Tag> {}

impl<Tag> PartialOrd for Handle<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tag> Ord for Handle<Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<Tag> Hash for Handle<Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<Tag> Default for Handle<Tag> {
    fn default() -> Self {
        Self::INVALID
    }
}

impl<Tag> fmt::Debug for Handle<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            return f.write_str("Handle(invalid)");
        }
        f.debug_struct("Handle")
            .field("index", &(self.id & MAX_INDEX))
            .field("generation", &(self.id >> INDEX_BITS))
            .finish()
    }
}

impl<Tag> fmt::Display for Handle<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "Handle(invalid)")
        } else {
            write!(f, "Handle(#{:08x})", self.id)
        }
    }
}

// Compile-time assertion: handles are thread-safe regardless of the tag.
const _: fn() = || {
    fn assert<T: Send + Sync + Copy>() {}
    assert::<Handle<std::rc::Rc<()>>>();
};
