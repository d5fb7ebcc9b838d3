use alloc::vec::Vec;

use super::handle::Handle;

/// A flat slot store with a free list.
///
/// All tree nodes live here; the tree itself only holds handles. Freed slots
/// are recycled before the slot vector grows, so a long insert/remove churn
/// does not leak capacity.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// The number of live (non-freed) elements.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            handle
        } else {
            // `Handle::from_index` rejects indices above `Handle::MAX`, so the
            // arena can never hand out more handles than the index type spans.
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is stale!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is stale!")
    }

    /// Removes the element, returning it and recycling the slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is stale!");
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
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn capacity_is_reserved() {
        let arena: Arena<u32> = Arena::with_capacity(8);
        assert_eq!(arena.capacity(), 8);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slots_are_recycled() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        assert_eq!(arena.take(a), 1);

        // The next allocation must land in the freed slot, not grow the arena.
        let c = arena.alloc(3);
        assert_eq!(c, a);
        assert_eq!(arena.len(), 2);
        assert_eq!(*arena.get(b), 2);
        assert_eq!(*arena.get(c), 3);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is stale!")]
    fn stale_handle_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let handle = arena.alloc(7);
        arena.take(handle);
        let _ = arena.get(handle);
    }

    proptest! {
        /// Alternating alloc/take churn must keep the live set intact and
        /// `len` in agreement with a Vec model.
        #[test]
        fn churn_matches_model(values in prop::collection::vec(any::<u32>(), 1..128), drops in prop::collection::vec(any::<usize>(), 0..64)) {
            let mut arena: Arena<u32> = Arena::new();
            let mut model: Vec<(Handle, u32)> = values.iter().map(|&v| (arena.alloc(v), v)).collect();

            for drop_at in drops {
                if model.is_empty() {
                    break;
                }
                let (handle, value) = model.swap_remove(drop_at % model.len());
                prop_assert_eq!(arena.take(handle), value);
            }

            prop_assert_eq!(arena.len(), model.len());
            for &(handle, value) in &model {
                prop_assert_eq!(*arena.get(handle), value);
            }
        }
    }
}
