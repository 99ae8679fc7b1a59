use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::{Error, Result};

/// Slab of fixed-size slots with free-list reuse. Every tree node lives here.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
    limit: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            limit: Handle::MAX,
        }
    }

    /// Creates an arena with room for `capacity` elements that never holds more
    /// than `limit` live elements.
    pub(crate) fn with_capacity_and_limit(capacity: usize, limit: Option<usize>) -> Self {
        let limit = limit.map_or(Handle::MAX, |limit| limit.min(Handle::MAX));
        Self {
            slots: Vec::with_capacity(capacity.min(limit)),
            free: Vec::new(),
            limit,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Stores `element` and returns its handle.
    ///
    /// Fails with [`Error::OutOfMemory`] when the live-element limit is reached or
    /// the backing storage cannot grow. `element` is dropped in that case and the
    /// arena is unchanged.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle> {
        if self.len() >= self.limit {
            log::warn!("node arena is at its limit of {} slots", self.limit);
            return Err(Error::OutOfMemory);
        }

        if let Some(h) = self.free.pop() {
            log::trace!("reusing node slot {}", h.to_index());
            self.slots[h.to_index()] = Some(element);
            return Ok(h);
        }

        let handle = Handle::try_from_index(self.slots.len()).ok_or(Error::OutOfMemory)?;
        self.slots.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        // The free list can hold at most one entry per slot, so reserving here keeps
        // `take()` infallible.
        self.free.try_reserve(self.slots.len() + 1 - self.free.len()).map_err(|_| Error::OutOfMemory)?;
        self.slots.push(Some(element));
        Ok(handle)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns mutable references to two distinct elements.
    pub(crate) fn get_pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (i, j) = (a.to_index(), b.to_index());
        assert_ne!(i, j, "`Arena::get_pair_mut()` - handles must be distinct!");

        let (low, high) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.slots.split_at_mut(high);
        let low_slot = head[low].as_mut().expect("`Arena::get_pair_mut()` - `handle` is invalid!");
        let high_slot = tail[0].as_mut().expect("`Arena::get_pair_mut()` - `handle` is invalid!");

        if i < j { (low_slot, high_slot) } else { (high_slot, low_slot) }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity_and_limit(10, None);
        assert_eq!(arena.capacity(), 10);
    }

    #[test]
    fn arena_limit() {
        let mut arena: Arena<u32> = Arena::with_capacity_and_limit(0, Some(2));
        let a = arena.try_alloc(1).unwrap();
        arena.try_alloc(2).unwrap();
        assert_eq!(arena.try_alloc(3), Err(Error::OutOfMemory));
        assert_eq!(arena.len(), 2);

        // Freeing a slot makes room again, and the slot is reused.
        arena.take(a);
        let c = arena.try_alloc(3).unwrap();
        assert_eq!(c, a);
        assert_eq!(*arena.get(c), 3);
    }

    #[test]
    fn arena_pair_mut() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.try_alloc(1).unwrap();
        let b = arena.try_alloc(2).unwrap();

        let (x, y) = arena.get_pair_mut(b, a);
        core::mem::swap(x, y);

        assert_eq!(*arena.get(a), 2);
        assert_eq!(*arena.get(b), 1);
    }

    #[test]
    #[should_panic(expected = "`Arena::get_pair_mut()` - handles must be distinct!")]
    fn arena_pair_mut_same_handle() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.try_alloc(1).unwrap();
        let _ = arena.get_pair_mut(a, a);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.try_alloc(value).unwrap();
                        model.push((handle, value));
                    }
                    Operation::Get(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        prop_assert_eq!(*arena.get(handle), model[index].1);
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = arena.take(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Get(usize),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => any::<usize>().prop_map(Operation::Get),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            10 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
