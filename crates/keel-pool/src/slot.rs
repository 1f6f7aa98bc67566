//! Slot storage and handle bit packing.

use keel_core::{Handle, INDEX_BITS, MAX_GENERATION, MAX_INDEX};

/// One entry of the slot table.
///
/// `value` is `Some` exactly while the slot is occupied. `generation`
/// starts at 0 and moves forward once per release; once it passes
/// [`MAX_GENERATION`] the slot is retired and never handed out again.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) generation: u32,
    pub(crate) value: Option<T>,
}

impl<T> Slot<T> {
    pub(crate) fn vacant() -> Self {
        Self {
            generation: 0,
            value: None,
        }
    }

    pub(crate) fn is_retired(&self) -> bool {
        self.generation > MAX_GENERATION
    }
}

pub(crate) fn pack<Tag>(index: u32, generation: u32) -> Handle<Tag> {
    debug_assert!(index <= MAX_INDEX);
    debug_assert!(generation <= MAX_GENERATION);
    Handle::from_raw((generation << INDEX_BITS) | index)
}

pub(crate) fn unpack<Tag>(handle: Handle<Tag>) -> (u32, u32) {
    let id = handle.raw();
    (id & MAX_INDEX, id >> INDEX_BITS)
}
