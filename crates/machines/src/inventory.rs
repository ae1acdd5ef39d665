//! Sectioned machine inventories.
//!
//! A machine inventory is a fixed run of slots split at construction into an
//! insert section at the front (what the machine consumes) and an extract
//! section at the back (what it produces). Automation attached to any side
//! sees the same rules; the side parameter exists only to satisfy the host's
//! capability interface.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use voxmech_core::{Facing, ItemStack};

/// Fixed-size slot storage with insert/extract sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineInventory {
    slots: Vec<Option<ItemStack>>,
    insert_slots: usize,
}

impl MachineInventory {
    /// Create an empty inventory.
    ///
    /// The first `insert_slots` slots accept insertion; the rest allow
    /// extraction. `insert_slots` must not exceed `slot_count`.
    pub fn new(slot_count: usize, insert_slots: usize) -> Self {
        assert!(insert_slots <= slot_count);
        Self {
            slots: vec![None; slot_count],
            insert_slots,
        }
    }

    /// Total slot count, fixed at construction.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot indices of the insert (input) section.
    pub fn insert_range(&self) -> Range<usize> {
        0..self.insert_slots
    }

    /// Slot indices of the extract (output) section.
    pub fn extract_range(&self) -> Range<usize> {
        self.insert_slots..self.slots.len()
    }

    /// Get the stack in a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Get the stack in a slot mutably.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(slot).and_then(|s| s.as_mut())
    }

    /// Replace the contents of a slot. Returns false for out-of-range slots.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) => {
                *s = stack;
                true
            }
            None => false,
        }
    }

    /// Take the stack out of a slot, leaving it empty.
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot).and_then(|s| s.take())
    }

    /// Remove one item from a slot, clearing the slot when it empties.
    pub fn consume_one(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            if let Some(stack) = entry {
                stack.remove(1);
                if stack.is_empty() {
                    *entry = None;
                }
            }
        }
    }

    /// Whether automation may insert into this slot.
    pub fn can_insert(&self, slot: usize) -> bool {
        slot < self.insert_slots
    }

    /// Whether automation may extract from this slot.
    pub fn can_extract(&self, slot: usize) -> bool {
        slot >= self.insert_slots && slot < self.slots.len()
    }

    /// Side-aware insert predicate; the side is ignored.
    pub fn can_insert_from(&self, slot: usize, _side: Facing) -> bool {
        self.can_insert(slot)
    }

    /// Side-aware extract predicate; the side is ignored.
    pub fn can_extract_from(&self, slot: usize, _side: Facing) -> bool {
        self.can_extract(slot)
    }

    /// Insert a batch of stacks into a slot range, merging with existing
    /// stacks before filling empty slots.
    ///
    /// All-or-nothing: returns true only when the entire batch fits. With
    /// `commit` unset the inventory is left untouched (capacity probe).
    pub fn insert_all(&mut self, range: Range<usize>, stacks: &[ItemStack], commit: bool) -> bool {
        let mut scratch: Vec<Option<ItemStack>> = self.slots[range.clone()].to_vec();

        for stack in stacks {
            if stack.is_empty() {
                continue;
            }
            let mut remaining = stack.count;

            for slot in scratch.iter_mut().flatten() {
                if slot.can_merge(stack) && !slot.is_full() {
                    remaining = slot.add(remaining);
                    if remaining == 0 {
                        break;
                    }
                }
            }

            if remaining > 0 {
                match scratch.iter_mut().find(|slot| slot.is_none()) {
                    Some(slot) => *slot = Some(ItemStack::new(stack.item_id, remaining)),
                    None => return false,
                }
            }
        }

        if commit {
            self.slots[range].clone_from_slice(&scratch);
        }
        true
    }

    /// Snapshot view of all slots, in order.
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// Restore slot contents from a persisted snapshot.
    ///
    /// Length mismatches mean the save is from a different machine layout;
    /// extra slots are dropped and missing slots stay empty.
    pub fn restore_slots(&mut self, saved: &[Option<ItemStack>]) {
        for (slot, value) in self.slots.iter_mut().zip(saved.iter()) {
            *slot = *value;
        }
        for slot in self.slots.iter_mut().skip(saved.len()) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harvester_layout() -> MachineInventory {
        MachineInventory::new(12, 6)
    }

    #[test]
    fn section_predicates() {
        let inv = harvester_layout();
        for slot in 0..6 {
            assert!(inv.can_insert(slot));
            assert!(!inv.can_extract(slot));
        }
        for slot in 6..12 {
            assert!(!inv.can_insert(slot));
            assert!(inv.can_extract(slot));
        }
        assert!(!inv.can_insert(12));
        assert!(!inv.can_extract(12));
    }

    #[test]
    fn side_aware_predicates_ignore_side() {
        let inv = harvester_layout();
        for facing in [Facing::North, Facing::South, Facing::West, Facing::East] {
            assert!(inv.can_insert_from(3, facing));
            assert!(!inv.can_insert_from(9, facing));
            assert!(inv.can_extract_from(9, facing));
        }
    }

    #[test]
    fn insert_all_merges_before_filling_empty_slots() {
        let mut inv = harvester_layout();
        inv.set(6, Some(ItemStack::new(7, 60)));

        let fit = inv.insert_all(6..12, &[ItemStack::new(7, 10)], true);
        assert!(fit);
        assert_eq!(inv.get(6).unwrap().count, 64);
        assert_eq!(inv.get(7).unwrap().count, 6);
    }

    #[test]
    fn insert_all_simulate_leaves_slots_untouched() {
        let mut inv = harvester_layout();
        let fit = inv.insert_all(6..12, &[ItemStack::new(7, 10)], false);
        assert!(fit);
        assert!(inv.get(6).is_none());
    }

    #[test]
    fn insert_all_is_all_or_nothing() {
        let mut inv = harvester_layout();
        // Fill the whole output section with unmergeable stacks.
        for slot in 6..12 {
            inv.set(slot, Some(ItemStack::new(slot as u16, 64)));
        }

        let before = inv.clone();
        let fit = inv.insert_all(6..12, &[ItemStack::new(100, 1)], true);
        assert!(!fit);
        assert_eq!(inv, before);
    }

    #[test]
    fn consume_one_clears_empty_slot() {
        let mut inv = harvester_layout();
        inv.set(0, Some(ItemStack::new(3, 1)));
        inv.consume_one(0);
        assert!(inv.get(0).is_none());
    }

    #[test]
    fn restore_slots_handles_length_mismatch() {
        let mut inv = harvester_layout();
        inv.set(11, Some(ItemStack::new(9, 4)));

        inv.restore_slots(&[Some(ItemStack::new(1, 2)), None]);
        assert_eq!(inv.get(0).unwrap().item_id, 1);
        assert!(inv.get(11).is_none());
    }
}
