//! Slot descriptors and the intrusive free list over them.
//!
//! One [`Slot`] exists per block, in an array parallel to the backing
//! buffer. Free slots are threaded into a singly-linked list through
//! their `next_free` indices; the list head is the slot that the next
//! acquire will hand out. Links are `Option<u32>` indices rather than
//! pointers, so the structure carries no self-references and an index is
//! always checked against the array before use.

use crate::error::PoolError;

/// Bookkeeping for one block of the pool.
#[derive(Clone, Copy, Debug)]
struct Slot {
    /// Whether the block is currently handed out to a caller.
    used: bool,
    /// Next slot in the free list, when this slot is free.
    next_free: Option<u32>,
}

/// The set of currently free slots, as a singly-linked list over the slot
/// array.
///
/// Invariant: a slot is reachable from `head` exactly when its `used`
/// flag is false, and each free slot appears in the chain exactly once.
/// [`pop`](Self::pop) is the only operation that shrinks the list and
/// [`push`](Self::push) the only one that grows it; both are O(1).
pub struct FreeList {
    slots: Vec<Slot>,
    head: Option<u32>,
}

impl FreeList {
    /// Build a list with all `count` slots free.
    ///
    /// Slots are pushed front-to-back, so the initial traversal order is
    /// `count - 1, count - 2, .., 0`. Callers only rely on every slot
    /// being reachable exactly once, not on the order.
    pub fn new(count: u32) -> Self {
        let mut list = Self {
            slots: Vec::with_capacity(count as usize),
            head: None,
        };
        for i in 0..count {
            list.slots.push(Slot {
                used: false,
                next_free: list.head,
            });
            list.head = Some(i);
        }
        list
    }

    /// Take the head slot off the free list and mark it used.
    ///
    /// Returns the slot index, or `None` when every slot is in use.
    pub fn pop(&mut self) -> Option<u32> {
        let index = self.head?;
        let slot = &mut self.slots[index as usize];
        self.head = slot.next_free.take();
        slot.used = true;
        Some(index)
    }

    /// Return slot `index` to the front of the free list.
    ///
    /// Fails with `DoubleRelease` if the slot is already free; this is
    /// what keeps the chain cycle-free and duplicate-free.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. The pool validates indices
    /// against the block count before calling.
    pub fn push(&mut self, index: u32) -> Result<(), PoolError> {
        let slot = &mut self.slots[index as usize];
        if !slot.used {
            return Err(PoolError::DoubleRelease {
                index: index as usize,
            });
        }
        slot.used = false;
        slot.next_free = self.head;
        self.head = Some(index);
        Ok(())
    }

    /// Number of free slots, by scanning the full slot array.
    pub fn available(&self) -> usize {
        self.slots.iter().filter(|s| !s.used).count()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_list_has_every_slot_free() {
        let list = FreeList::new(8);
        assert_eq!(list.available(), 8);
        assert_eq!(list.capacity(), 8);
    }

    #[test]
    fn pop_drains_each_slot_exactly_once() {
        let mut list = FreeList::new(5);
        let mut seen = Vec::new();
        while let Some(i) = list.pop() {
            seen.push(i);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(list.available(), 0);
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut list = FreeList::new(1);
        assert!(list.pop().is_some());
        assert!(list.pop().is_none());
    }

    #[test]
    fn push_makes_a_slot_poppable_again() {
        let mut list = FreeList::new(2);
        let a = list.pop().unwrap();
        let _b = list.pop().unwrap();
        list.push(a).unwrap();
        assert_eq!(list.available(), 1);
        assert_eq!(list.pop(), Some(a));
    }

    #[test]
    fn push_of_a_free_slot_is_a_double_release() {
        let mut list = FreeList::new(3);
        let i = list.pop().unwrap();
        list.push(i).unwrap();
        let err = list.push(i).unwrap_err();
        assert_eq!(
            err,
            PoolError::DoubleRelease {
                index: i as usize
            }
        );
        // The failed push must not have disturbed the count.
        assert_eq!(list.available(), 3);
    }

    #[test]
    fn available_tracks_outstanding_slots() {
        let mut list = FreeList::new(4);
        let a = list.pop().unwrap();
        let b = list.pop().unwrap();
        assert_eq!(list.available(), 2);
        list.push(b).unwrap();
        assert_eq!(list.available(), 3);
        list.push(a).unwrap();
        assert_eq!(list.available(), 4);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pops_are_distinct_and_in_range(count in 1u32..256) {
                let mut list = FreeList::new(count);
                let mut seen = std::collections::HashSet::new();
                while let Some(i) = list.pop() {
                    prop_assert!(i < count);
                    prop_assert!(seen.insert(i), "slot {} popped twice", i);
                }
                prop_assert_eq!(seen.len(), count as usize);
            }

            #[test]
            fn interleaved_ops_keep_the_count_consistent(
                count in 1u32..64,
                ops in proptest::collection::vec(any::<bool>(), 1..200),
            ) {
                let mut list = FreeList::new(count);
                let mut outstanding = Vec::new();
                for acquire in ops {
                    if acquire {
                        if let Some(i) = list.pop() {
                            outstanding.push(i);
                        } else {
                            prop_assert_eq!(outstanding.len(), count as usize);
                        }
                    } else if let Some(i) = outstanding.pop() {
                        list.push(i).unwrap();
                    }
                    prop_assert_eq!(
                        list.available(),
                        count as usize - outstanding.len()
                    );
                }
            }

            #[test]
            fn release_order_does_not_matter(count in 2u32..64) {
                let mut list = FreeList::new(count);
                let taken: Vec<u32> = std::iter::from_fn(|| list.pop()).collect();
                // Return in reverse-of-acquisition order.
                for i in taken.into_iter().rev() {
                    list.push(i).unwrap();
                }
                prop_assert_eq!(list.available(), count as usize);
            }
        }
    }
}
