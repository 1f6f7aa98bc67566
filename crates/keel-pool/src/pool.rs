//! The generational object pool.
//!
//! [`Pool`] is the sole authority that turns a [`Handle`] into a reference.
//! Every handle it issues carries the generation of its slot at allocation
//! time; [`Pool::release`] moves the slot's generation on, which makes every
//! outstanding copy of the handle resolve to nothing from then on.

use std::fmt;
use std::iter::Enumerate;
use std::marker::PhantomData;
use std::slice;

use keel_core::{Handle, LogDiagnostics, SharedDiagnostics, MAX_GENERATION};
use log::Level;

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::free::{FreeIndices, FreeStack};
use crate::slot::{pack, unpack, Slot};

const TARGET: &str = "keel::pool";

/// Generational pool of `T` addressed by `Handle<Tag>`.
///
/// - `Tag` defaults to `T`. Use a distinct marker type when two pools store
///   the same `T` but their handles must not be interchangeable.
/// - `F` is the free-index strategy ([`FreeStack`] by default, or
///   [`FreeBitmap`](crate::FreeBitmap) for lowest-index-first reuse).
///
/// Allocation and release are O(1) (amortised for table growth); lookup is
/// one bounds check and one generation comparison.
///
/// A slot survives [`MAX_GENERATION`]` + 1` releases and is then retired
/// for good. Under sustained churn on a few hot slots this shows up as slow
/// table growth: with [`FreeStack`], roughly one new slot per 4095
/// allocate/release cycles of the hottest slot. Watch
/// [`retired_count`](Self::retired_count) in long-running pools, and size
/// `PoolConfig::max_slots` with that growth in mind.
///
/// # Example
///
/// ```
/// use keel_pool::Pool;
///
/// let mut pool: Pool<&str> = Pool::new();
/// let a = pool.allocate("a");
/// assert_eq!(pool.get(a), Some(&"a"));
///
/// assert_eq!(pool.release(a), Ok("a"));
/// let b = pool.allocate("b");
/// assert_eq!(pool.get(a), None);
/// assert_eq!(pool.get(b), Some(&"b"));
/// ```
pub struct Pool<T, Tag = T, F = FreeStack> {
    slots: Vec<Slot<T>>,
    free: F,
    /// Number of occupied slots.
    len: usize,
    /// Number of slots that exhausted their generations.
    retired: usize,
    max_slots: u32,
    diagnostics: SharedDiagnostics,
    _tag: PhantomData<fn() -> Tag>,
}

impl<T, Tag, F: FreeIndices> Pool<T, Tag, F> {
    /// Create an empty pool with the default configuration, reporting
    /// through the `log` facade.
    pub fn new() -> Self {
        Self::with_diagnostics(LogDiagnostics::shared())
    }

    /// Create an empty pool with the default configuration and the given
    /// diagnostics collaborator.
    pub fn with_diagnostics(diagnostics: SharedDiagnostics) -> Self {
        Self::build(PoolConfig::default(), diagnostics)
    }

    /// Create an empty pool from an explicit configuration.
    ///
    /// Returns `Err(PoolError::InvalidConfig)` if the configuration fails
    /// [`PoolConfig::validate`].
    pub fn with_config(
        config: PoolConfig,
        diagnostics: SharedDiagnostics,
    ) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::build(config, diagnostics))
    }

    fn build(config: PoolConfig, diagnostics: SharedDiagnostics) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            free: F::default(),
            len: 0,
            retired: 0,
            max_slots: config.max_slots,
            diagnostics,
            _tag: PhantomData,
        }
    }

    /// Store `value` and return its handle.
    ///
    /// Reuses a released slot when one is available, otherwise grows the
    /// table by one slot.
    ///
    /// Running out of index space is a configuration error: it is reported
    /// through [`Diagnostics::fatal`](keel_core::Diagnostics::fatal), which
    /// does not return. Use [`try_allocate`](Self::try_allocate) to handle
    /// exhaustion instead.
    pub fn allocate(&mut self, value: T) -> Handle<Tag> {
        match self.try_allocate(value) {
            Ok(handle) => handle,
            Err(err) => self.diagnostics.fatal(
                TARGET,
                format_args!("{err}; raise PoolConfig::max_slots or release objects"),
            ),
        }
    }

    /// Store `value` and return its handle, or `Err(PoolError::Exhausted)`
    /// if no slot is left. On error `value` is dropped.
    pub fn try_allocate(&mut self, value: T) -> Result<Handle<Tag>, PoolError> {
        self.try_allocate_with(|_| value)
    }

    /// Store the value produced by `f`, which receives the handle the value
    /// will live under.
    ///
    /// Useful for objects that need to know their own handle. Exhaustion is
    /// fatal, as in [`allocate`](Self::allocate).
    pub fn allocate_with(&mut self, f: impl FnOnce(Handle<Tag>) -> T) -> Handle<Tag> {
        match self.try_allocate_with(f) {
            Ok(handle) => handle,
            Err(err) => self.diagnostics.fatal(
                TARGET,
                format_args!("{err}; raise PoolConfig::max_slots or release objects"),
            ),
        }
    }

    /// Fallible form of [`allocate_with`](Self::allocate_with). `f` is not
    /// called on error.
    ///
    /// If `f` panics the reserved index is not reused until
    /// [`clear`](Self::clear).
    pub fn try_allocate_with(
        &mut self,
        f: impl FnOnce(Handle<Tag>) -> T,
    ) -> Result<Handle<Tag>, PoolError> {
        let index = self.acquire_index()?;
        let slot = &mut self.slots[index as usize];
        let handle = pack(index, slot.generation);
        slot.value = Some(f(handle));
        self.len += 1;
        Ok(handle)
    }

    fn acquire_index(&mut self) -> Result<u32, PoolError> {
        if let Some(index) = self.free.pop() {
            return Ok(index);
        }
        // slots.len() never exceeds max_slots, which fits in u32.
        let next = self.slots.len() as u32;
        if next >= self.max_slots {
            return Err(PoolError::Exhausted {
                capacity: self.max_slots,
            });
        }
        self.slots.push(Slot::vacant());
        Ok(next)
    }

    /// Remove the object behind `handle` and return it.
    ///
    /// On success the slot's generation moves on, so `handle` and every copy
    /// of it stop resolving for good. Dropping the returned value destroys
    /// the object.
    ///
    /// A stale, vacant, out-of-range, or invalid handle is refused with the
    /// matching [`PoolError`] and the pool is left untouched. Releasing
    /// twice is therefore harmless and detectable.
    pub fn release(&mut self, handle: Handle<Tag>) -> Result<T, PoolError> {
        let taken = self.resolve(handle).and_then(|index| {
            self.slots[index]
                .value
                .take()
                .map(|value| (index, value))
                .ok_or(PoolError::Vacant)
        });
        match taken {
            Ok((index, value)) => {
                self.len -= 1;
                self.recycle(index);
                Ok(value)
            }
            Err(err) => {
                self.diagnostics.log(
                    Level::Debug,
                    TARGET,
                    format_args!("release of {handle} refused: {err}"),
                );
                Err(err)
            }
        }
    }

    /// Advance a just-vacated slot's generation and make it reusable, or
    /// retire it if its generations are spent.
    fn recycle(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.generation += 1;
        if slot.is_retired() {
            self.retired += 1;
            self.diagnostics.log(
                Level::Debug,
                TARGET,
                format_args!(
                    "slot {index} retired after {} generations",
                    MAX_GENERATION + 1
                ),
            );
        } else {
            self.free.push(index as u32);
        }
    }

    /// Map a handle to the index of its occupied slot.
    fn resolve(&self, handle: Handle<Tag>) -> Result<usize, PoolError> {
        if handle.is_invalid() {
            return Err(PoolError::InvalidHandle);
        }
        let (index, generation) = unpack(handle);
        let slot = self
            .slots
            .get(index as usize)
            .ok_or(PoolError::OutOfRange {
                index,
                slots: self.slots.len() as u32,
            })?;
        if slot.generation != generation {
            return Err(PoolError::StaleHandle {
                handle_generation: generation,
                slot_generation: slot.generation,
            });
        }
        if slot.value.is_none() {
            return Err(PoolError::Vacant);
        }
        Ok(index as usize)
    }

    /// Shared reference to the object behind `handle`, or `None` if the
    /// handle is stale, released, or not from this pool's index range.
    pub fn get(&self, handle: Handle<Tag>) -> Option<&T> {
        if handle.is_invalid() {
            return None;
        }
        let (index, generation) = unpack(handle);
        let slot = self.slots.get(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Mutable reference to the object behind `handle`; see [`get`](Self::get).
    pub fn get_mut(&mut self, handle: Handle<Tag>) -> Option<&mut T> {
        if handle.is_invalid() {
            return None;
        }
        let (index, generation) = unpack(handle);
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Whether `handle` currently resolves.
    pub fn contains(&self, handle: Handle<Tag>) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the table (live, free, and retired).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of released slots waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of slots permanently out of circulation.
    pub fn retired_count(&self) -> usize {
        self.retired
    }

    /// Configured slot limit.
    pub fn capacity(&self) -> u32 {
        self.max_slots
    }

    /// Iterate over live objects in index order.
    pub fn iter(&self) -> Iter<'_, T, Tag> {
        Iter {
            slots: self.slots.iter().enumerate(),
            remaining: self.len,
            _tag: PhantomData,
        }
    }

    /// Iterate mutably over live objects in index order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, Tag> {
        IterMut {
            slots: self.slots.iter_mut().enumerate(),
            remaining: self.len,
            _tag: PhantomData,
        }
    }

    /// Drop every object and invalidate every handle issued so far.
    ///
    /// Occupied slots advance their generation exactly as if each had been
    /// released, so no handle from before the call resolves afterwards.
    /// The table keeps its size; all non-retired slots become free.
    pub fn clear(&mut self) {
        self.free.clear();
        self.retired = 0;
        // Reverse so that a LIFO strategy hands out low indices first.
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation += 1;
            }
            if slot.is_retired() {
                self.retired += 1;
            } else {
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    /// Remove every object, yielding it with the handle it lived under.
    ///
    /// Slots are recycled as they are yielded; objects not yet yielded when
    /// the iterator is dropped are dropped with it.
    pub fn drain(&mut self) -> Drain<'_, T, Tag, F> {
        Drain {
            pool: self,
            cursor: 0,
        }
    }
}

impl<T, Tag, F: FreeIndices> Default for Pool<T, Tag, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Tag, F: FreeIndices> fmt::Debug for Pool<T, Tag, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .field("retired", &self.retired)
            .field("max_slots", &self.max_slots)
            .finish_non_exhaustive()
    }
}

impl<'a, T, Tag, F: FreeIndices> IntoIterator for &'a Pool<T, Tag, F> {
    type Item = (Handle<Tag>, &'a T);
    type IntoIter = Iter<'a, T, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, Tag, F: FreeIndices> IntoIterator for &'a mut Pool<T, Tag, F> {
    type Item = (Handle<Tag>, &'a mut T);
    type IntoIter = IterMut<'a, T, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Iterator over `(handle, &object)` pairs. Created by [`Pool::iter`].
pub struct Iter<'a, T, Tag> {
    slots: Enumerate<slice::Iter<'a, Slot<T>>>,
    remaining: usize,
    _tag: PhantomData<fn() -> Tag>,
}

impl<'a, T, Tag> Iterator for Iter<'a, T, Tag> {
    type Item = (Handle<Tag>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, slot) in self.slots.by_ref() {
            if let Some(value) = slot.value.as_ref() {
                self.remaining -= 1;
                return Some((pack(index as u32, slot.generation), value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Tag> ExactSizeIterator for Iter<'_, T, Tag> {}

/// Iterator over `(handle, &mut object)` pairs. Created by
/// [`Pool::iter_mut`].
pub struct IterMut<'a, T, Tag> {
    slots: Enumerate<slice::IterMut<'a, Slot<T>>>,
    remaining: usize,
    _tag: PhantomData<fn() -> Tag>,
}

impl<'a, T, Tag> Iterator for IterMut<'a, T, Tag> {
    type Item = (Handle<Tag>, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, slot) in self.slots.by_ref() {
            let generation = slot.generation;
            if let Some(value) = slot.value.as_mut() {
                self.remaining -= 1;
                return Some((pack(index as u32, generation), value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Tag> ExactSizeIterator for IterMut<'_, T, Tag> {}

/// Draining iterator. Created by [`Pool::drain`].
pub struct Drain<'a, T, Tag, F: FreeIndices> {
    pool: &'a mut Pool<T, Tag, F>,
    cursor: usize,
}

impl<T, Tag, F: FreeIndices> Iterator for Drain<'_, T, Tag, F> {
    type Item = (Handle<Tag>, T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.pool.slots.len() {
            let index = self.cursor;
            self.cursor += 1;
            let slot = &mut self.pool.slots[index];
            if let Some(value) = slot.value.take() {
                let handle = pack(index as u32, slot.generation);
                self.pool.len -= 1;
                self.pool.recycle(index);
                return Some((handle, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pool.len, Some(self.pool.len))
    }
}

impl<T, Tag, F: FreeIndices> Drop for Drain<'_, T, Tag, F> {
    fn drop(&mut self) {
        self.for_each(drop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::free::FreeBitmap;
    use keel_test_utils::{DropCounter, RecordingDiagnostics};
    use std::sync::Arc;

    fn pool<T>() -> (Pool<T>, Arc<RecordingDiagnostics>) {
        let diag = RecordingDiagnostics::shared();
        (Pool::with_diagnostics(diag.clone()), diag)
    }

    #[test]
    fn first_allocation_is_index_zero_generation_zero() {
        let (mut pool, _) = pool::<u32>();
        let a = pool.allocate(10);
        assert_eq!(a.raw(), 0);
        assert_eq!(pool.get(a), Some(&10));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn reuse_bumps_generation_and_invalidates_old_handle() {
        let (mut pool, _) = pool::<&str>();
        let a = pool.allocate("a");
        assert_eq!(pool.release(a), Ok("a"));

        let b = pool.allocate("b");
        assert_eq!(unpack(b), (0, 1));
        assert_ne!(a, b);
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.get(b), Some(&"b"));
        assert_eq!(pool.slot_count(), 1);
    }

    #[test]
    fn double_release_is_refused_and_reported() {
        let (mut pool, diag) = pool::<u8>();
        let a = pool.allocate(1);
        assert!(pool.release(a).is_ok());
        assert_eq!(
            pool.release(a),
            Err(PoolError::StaleHandle {
                handle_generation: 0,
                slot_generation: 1,
            })
        );
        assert_eq!(pool.free_count(), 1);
        assert_eq!(diag.count_at(Level::Debug), 1);
        assert!(diag.contains("refused"));
    }

    #[test]
    fn release_of_foreign_handles() {
        let (mut pool, _) = pool::<u8>();
        assert_eq!(pool.release(Handle::INVALID), Err(PoolError::InvalidHandle));
        assert_eq!(
            pool.release(Handle::from_raw(5)),
            Err(PoolError::OutOfRange { index: 5, slots: 0 })
        );
        assert!(pool.is_empty());
    }

    #[test]
    fn vacant_slot_with_matching_generation_is_refused() {
        let (mut pool, _) = pool::<u8>();
        let a = pool.allocate(1);
        pool.release(a).unwrap();
        // Forge a handle for the slot's current generation while it is free.
        let forged: Handle<u8> = pack(0, 1);
        assert_eq!(pool.get(forged), None);
        assert_eq!(pool.release(forged), Err(PoolError::Vacant));
    }

    #[test]
    fn every_refused_release_is_logged() {
        let (mut pool, diag) = pool::<u8>();
        let a = pool.allocate(1);
        pool.release(a).unwrap();

        let refusals = [
            (Handle::INVALID, PoolError::InvalidHandle),
            (Handle::from_raw(9), PoolError::OutOfRange { index: 9, slots: 1 }),
            (
                a,
                PoolError::StaleHandle {
                    handle_generation: 0,
                    slot_generation: 1,
                },
            ),
            (pack(0, 1), PoolError::Vacant),
        ];
        for (handle, expected) in refusals {
            assert_eq!(pool.release(handle), Err(expected));
        }
        assert_eq!(diag.count_at(Level::Debug), 4);
        assert!(diag.contains("refused: slot is not occupied"));
        assert_eq!(pool.free_count(), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn release_drops_exactly_once() {
        let (mut pool, _) = pool::<DropCounter>();
        let counter = DropCounter::new();
        let h = pool.allocate(counter.clone());
        drop(pool.release(h).unwrap());
        assert_eq!(counter.drops(), 1);
        assert!(pool.release(h).is_err());
        assert_eq!(counter.drops(), 1);
    }

    #[test]
    fn get_mut_modifies_in_place() {
        let (mut pool, _) = pool::<Vec<u8>>();
        let h = pool.allocate(vec![1]);
        pool.get_mut(h).unwrap().push(2);
        assert_eq!(pool.get(h), Some(&vec![1, 2]));
        pool.release(h).unwrap();
        assert!(pool.get_mut(h).is_none());
    }

    #[test]
    fn allocate_with_sees_own_handle() {
        struct Node {
            me: Handle<Node>,
            weight: u8,
        }
        let diag = RecordingDiagnostics::shared();
        let mut pool: Pool<Node> = Pool::with_diagnostics(diag);
        let _ = pool.allocate(Node {
            me: Handle::INVALID,
            weight: 0,
        });
        let h = pool.allocate_with(|me| Node { me, weight: 7 });
        let node = pool.get(h).unwrap();
        assert_eq!(node.me, h);
        assert_eq!(node.weight, 7);
        assert_eq!(unpack(h), (1, 0));
    }

    #[test]
    fn lifo_reuse_with_free_stack() {
        let (mut pool, _) = pool::<u8>();
        let hs: Vec<_> = (0..4).map(|i| pool.allocate(i)).collect();
        pool.release(hs[1]).unwrap();
        pool.release(hs[3]).unwrap();
        let next = pool.allocate(9);
        assert_eq!(unpack(next).0, 3);
    }

    #[test]
    fn lowest_first_reuse_with_bitmap() {
        let diag = RecordingDiagnostics::shared();
        let mut pool: Pool<u8, u8, FreeBitmap> = Pool::with_diagnostics(diag);
        let hs: Vec<_> = (0..4).map(|i| pool.allocate(i)).collect();
        pool.release(hs[3]).unwrap();
        pool.release(hs[1]).unwrap();
        let next = pool.allocate(9);
        assert_eq!(unpack(next).0, 1);
    }

    #[test]
    fn try_allocate_reports_exhaustion() {
        let diag = RecordingDiagnostics::shared();
        let mut pool: Pool<u8> = Pool::with_config(PoolConfig::fixed(2), diag).unwrap();
        pool.try_allocate(1).unwrap();
        pool.try_allocate(2).unwrap();
        assert_eq!(pool.try_allocate(3), Err(PoolError::Exhausted { capacity: 2 }));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn release_makes_room_in_fixed_pool() {
        let diag = RecordingDiagnostics::shared();
        let mut pool: Pool<u8> = Pool::with_config(PoolConfig::fixed(1), diag).unwrap();
        let a = pool.allocate(1);
        pool.release(a).unwrap();
        let b = pool.try_allocate(2).unwrap();
        assert_eq!(pool.get(b), Some(&2));
    }

    #[test]
    #[should_panic(expected = "fatal [keel::pool]: pool index space exhausted (1 slots)")]
    fn allocate_past_capacity_is_fatal() {
        let diag = RecordingDiagnostics::shared();
        let mut pool: Pool<u8> = Pool::with_config(PoolConfig::fixed(1), diag).unwrap();
        let _ = pool.allocate(1);
        let _ = pool.allocate(2);
    }

    #[test]
    fn invalid_config_rejected() {
        let diag = RecordingDiagnostics::shared();
        let result: Result<Pool<u8>, _> = Pool::with_config(
            PoolConfig {
                initial_capacity: 0,
                max_slots: 0,
            },
            diag,
        );
        assert!(matches!(result, Err(PoolError::InvalidConfig { .. })));
    }

    #[test]
    fn slot_retires_at_generation_limit() {
        let (mut pool, diag) = pool::<u8>();
        let mut last = pool.allocate(0);
        for _ in 0..MAX_GENERATION {
            pool.release(last).unwrap();
            last = pool.allocate(0);
        }
        assert_eq!(unpack(last), (0, MAX_GENERATION));

        pool.release(last).unwrap();
        assert_eq!(pool.retired_count(), 1);
        assert_eq!(pool.free_count(), 0);
        assert!(diag.contains("slot 0 retired"));

        // The retired index is skipped: the next object gets a fresh slot.
        let fresh = pool.allocate(1);
        assert_eq!(unpack(fresh), (1, 0));
        assert_eq!(pool.get(last), None);
    }

    #[test]
    fn clear_invalidates_everything_and_keeps_table() {
        let (mut pool, _) = pool::<DropCounter>();
        let counter = DropCounter::new();
        let hs: Vec<_> = (0..3).map(|_| pool.allocate(counter.clone())).collect();
        let released = hs[1];
        drop(pool.release(released).unwrap());

        pool.clear();
        assert_eq!(counter.drops(), 3);
        assert!(pool.is_empty());
        assert_eq!(pool.slot_count(), 3);
        assert_eq!(pool.free_count(), 3);
        assert!(hs.iter().all(|&h| !pool.contains(h)));

        // LIFO strategy hands out index 0 first after a clear.
        let h = pool.allocate(counter.clone());
        assert_eq!(unpack(h), (0, 1));
    }

    #[test]
    fn iter_yields_live_objects_in_index_order() {
        let (mut pool, _) = pool::<char>();
        let a = pool.allocate('a');
        let b = pool.allocate('b');
        let c = pool.allocate('c');
        pool.release(b).unwrap();

        let iter = pool.iter();
        assert_eq!(iter.len(), 2);
        let items: Vec<_> = iter.collect();
        assert_eq!(items, vec![(a, &'a'), (c, &'c')]);

        for (_, v) in &mut pool {
            *v = v.to_ascii_uppercase();
        }
        assert_eq!(pool.get(a), Some(&'A'));
        assert_eq!(pool.get(c), Some(&'C'));
    }

    #[test]
    fn drain_yields_all_and_invalidates() {
        let (mut pool, _) = pool::<u32>();
        let hs: Vec<_> = (0..5).map(|i| pool.allocate(i)).collect();
        let drained: Vec<_> = pool.drain().collect();
        assert_eq!(drained.len(), 5);
        for (i, (h, v)) in drained.iter().enumerate() {
            assert_eq!(*h, hs[i]);
            assert_eq!(*v, i as u32);
        }
        assert!(pool.is_empty());
        assert!(hs.iter().all(|&h| pool.get(h).is_none()));
        assert_eq!(pool.free_count(), 5);
    }

    #[test]
    fn partially_consumed_drain_drops_rest() {
        let (mut pool, _) = pool::<DropCounter>();
        let counter = DropCounter::new();
        for _ in 0..4 {
            let _ = pool.allocate(counter.clone());
        }
        {
            let mut drain = pool.drain();
            let first = drain.next();
            assert!(first.is_some());
        }
        assert_eq!(counter.drops(), 4);
        assert!(pool.is_empty());
    }

    #[test]
    fn debug_shows_counters() {
        let (mut pool, _) = pool::<u8>();
        let _ = pool.allocate(1);
        let text = format!("{pool:?}");
        assert!(text.contains("len: 1"));
        assert!(text.contains("slots: 1"));
    }

    #[test]
    fn pool_is_send_when_value_is() {
        fn assert_send<T: Send>() {}
        assert_send::<Pool<String>>();
        assert_send::<Pool<u8, u8, FreeBitmap>>();
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashMap;

        #[derive(Clone, Debug)]
        enum Op {
            Allocate(u32),
            Release(usize),
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => any::<u32>().prop_map(Op::Allocate),
                5 => any::<usize>().prop_map(Op::Release),
                1 => Just(Op::Clear),
            ]
        }

        fn check_against_model<F: FreeIndices>(ops: Vec<Op>) -> Result<(), TestCaseError> {
            let diag = RecordingDiagnostics::shared();
            let mut pool: Pool<u32, u32, F> = Pool::with_diagnostics(diag);
            let mut live: HashMap<Handle<u32>, u32> = HashMap::new();
            let mut dead: Vec<Handle<u32>> = Vec::new();
            let mut issued: Vec<Handle<u32>> = Vec::new();
            let mut max_gen: HashMap<u32, u32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Allocate(v) => {
                        let h = pool.allocate(v);
                        let (index, generation) = unpack(h);
                        if let Some(&prev) = max_gen.get(&index) {
                            prop_assert!(generation > prev);
                        }
                        max_gen.insert(index, generation);
                        prop_assert!(live.insert(h, v).is_none());
                        issued.push(h);
                    }
                    Op::Release(pick) => {
                        if issued.is_empty() {
                            continue;
                        }
                        let h = issued[pick % issued.len()];
                        match live.remove(&h) {
                            Some(v) => prop_assert_eq!(pool.release(h), Ok(v)),
                            None => prop_assert!(pool.release(h).is_err()),
                        }
                        dead.push(h);
                    }
                    Op::Clear => {
                        pool.clear();
                        dead.extend(live.drain().map(|(h, _)| h));
                    }
                }

                prop_assert_eq!(pool.len(), live.len());
                for (&h, v) in &live {
                    prop_assert_eq!(pool.get(h), Some(v));
                }
                for &h in &dead {
                    prop_assert_eq!(pool.get(h), None);
                }
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn lookup_matches_model_with_stack(
                ops in proptest::collection::vec(op(), 1..200),
            ) {
                check_against_model::<FreeStack>(ops)?;
            }

            #[test]
            fn lookup_matches_model_with_bitmap(
                ops in proptest::collection::vec(op(), 1..200),
            ) {
                check_against_model::<FreeBitmap>(ops)?;
            }

            #[test]
            fn slot_count_bounded_by_peak_live(
                rounds in proptest::collection::vec(1usize..16, 1..20),
            ) {
                let (mut pool, _) = pool::<usize>();
                let mut peak = 0;
                for n in rounds {
                    let hs: Vec<_> = (0..n).map(|i| pool.allocate(i)).collect();
                    peak = peak.max(n);
                    for h in hs {
                        pool.release(h).unwrap();
                    }
                }
                prop_assert_eq!(pool.slot_count(), peak);
            }
        }
    }
}
