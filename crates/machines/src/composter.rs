//! Threshold compost converter.
//!
//! A single-slot machine: pile enough raw material into it, wait, and the
//! whole pile becomes converted output. No power, no cursor; just a counter
//! that only runs while the threshold is met.

use crate::snapshot::ComposterSnapshot;
use crate::tuning::MachineTuning;
use voxmech_core::{ItemId, ItemStack};

/// Per-block composter state.
#[derive(Debug, Clone)]
pub struct ComposterState {
    /// The one slot, holding either raw input or converted output.
    pub slot: Option<ItemStack>,
    conversion_time: i32,
    input_item: ItemId,
    output_item: ItemId,
    amount_needed: u8,
    time_needed: i32,
}

impl ComposterState {
    /// Create an empty composter with the given tuning.
    pub fn new(tuning: &MachineTuning) -> Self {
        Self {
            slot: None,
            conversion_time: 0,
            input_item: tuning.compost_input,
            output_item: tuning.compost_output,
            amount_needed: tuning.compost_amount,
            time_needed: tuning.compost_time,
        }
    }

    /// Ticks spent on the current conversion.
    pub fn conversion_time(&self) -> i32 {
        self.conversion_time
    }

    /// The slot's stack limit: one conversion's worth of items.
    pub fn stack_limit(&self) -> u8 {
        self.amount_needed
    }

    /// Whether automation may insert this item.
    pub fn accepts_insert(&self, item: ItemId) -> bool {
        item == self.input_item
    }

    /// Whether automation may extract this item.
    pub fn accepts_extract(&self, item: ItemId) -> bool {
        item == self.output_item
    }

    /// Block display value: the slot fill level, bumped by one once the
    /// contents have converted.
    pub fn fill_signal(&self) -> u8 {
        match &self.slot {
            Some(stack) if stack.count > 0 => {
                stack.count + u8::from(stack.item_id == self.output_item)
            }
            _ => 0,
        }
    }

    /// Add raw input, returning the amount that didn't fit.
    pub fn add_input(&mut self, item: ItemId, count: u8) -> u8 {
        if !self.accepts_insert(item) {
            return count;
        }

        match &mut self.slot {
            None => {
                let added = count.min(self.amount_needed);
                self.slot = Some(ItemStack::new(item, added));
                count - added
            }
            Some(stack) if stack.item_id == item => {
                let space = self.amount_needed.saturating_sub(stack.count);
                let added = count.min(space);
                stack.count += added;
                count - added
            }
            Some(_) => count,
        }
    }

    /// Take the converted output, if the slot holds any.
    pub fn take_output(&mut self) -> Option<ItemStack> {
        if self.slot.is_some_and(|stack| stack.item_id == self.output_item) {
            self.slot.take()
        } else {
            None
        }
    }

    /// Advance the composter by one host tick.
    ///
    /// The timer only runs while the slot holds a full threshold of raw
    /// input; removing material mid-conversion freezes the timer where it
    /// stands. Returns whether the converting display state flipped.
    pub fn tick(&mut self) -> bool {
        let was_converting = self.conversion_time > 0;

        if let Some(stack) = self.slot {
            if stack.item_id == self.input_item && stack.count >= self.amount_needed {
                self.conversion_time += 1;
                if self.conversion_time >= self.time_needed {
                    self.slot = Some(ItemStack::new(self.output_item, self.amount_needed));
                    self.conversion_time = 0;
                }
            }
        }

        was_converting != (self.conversion_time > 0)
    }

    /// Capture the machine state for persistence.
    pub fn snapshot(&self) -> ComposterSnapshot {
        ComposterSnapshot {
            slot: self.slot,
            conversion_time: self.conversion_time,
        }
    }

    /// Apply a snapshot as one unit, clamping a malformed timer to zero.
    pub fn restore(&mut self, snapshot: &ComposterSnapshot) {
        self.slot = snapshot.slot;
        self.conversion_time = snapshot.conversion_time.max(0);
    }
}

impl Default for ComposterState {
    fn default() -> Self {
        Self::new(&MachineTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> MachineTuning {
        MachineTuning {
            compost_amount: 10,
            compost_time: 100,
            compost_input: 1,
            compost_output: 2,
            ..Default::default()
        }
    }

    #[test]
    fn converts_after_threshold_and_time() {
        let mut composter = ComposterState::new(&tuning());
        assert_eq!(composter.add_input(1, 10), 0);

        for _ in 0..99 {
            composter.tick();
        }
        assert_eq!(composter.slot.unwrap().item_id, 1);

        composter.tick();
        let converted = composter.slot.unwrap();
        assert_eq!(converted.item_id, 2);
        assert_eq!(converted.count, 10);
        assert_eq!(composter.conversion_time(), 0);
    }

    #[test]
    fn below_threshold_never_converts() {
        let mut composter = ComposterState::new(&tuning());
        composter.add_input(1, 9);

        for _ in 0..1000 {
            composter.tick();
        }
        assert_eq!(composter.conversion_time(), 0);
        assert_eq!(composter.slot.unwrap().item_id, 1);
    }

    #[test]
    fn removing_material_freezes_the_timer() {
        let mut composter = ComposterState::new(&tuning());
        composter.add_input(1, 10);

        for _ in 0..50 {
            composter.tick();
        }
        assert_eq!(composter.conversion_time(), 50);

        // Someone pulls most of the pile out mid-conversion.
        composter.slot = Some(ItemStack::new(1, 3));
        composter.tick();
        assert_eq!(composter.conversion_time(), 50);
    }

    #[test]
    fn tick_reports_converting_transitions() {
        let mut composter = ComposterState::new(&tuning());
        composter.add_input(1, 10);

        // First tick starts the conversion.
        assert!(composter.tick());
        // Steady state.
        assert!(!composter.tick());

        for _ in 0..97 {
            composter.tick();
        }
        // Final tick completes the conversion and stops the timer.
        assert!(composter.tick());
    }

    #[test]
    fn add_input_respects_item_and_limit() {
        let mut composter = ComposterState::new(&tuning());
        // Wrong item bounces entirely.
        assert_eq!(composter.add_input(5, 4), 4);
        assert!(composter.slot.is_none());

        assert_eq!(composter.add_input(1, 7), 0);
        // Slot caps at one conversion's worth.
        assert_eq!(composter.add_input(1, 7), 4);
        assert_eq!(composter.slot.unwrap().count, 10);
    }

    #[test]
    fn take_output_only_yields_converted_items() {
        let mut composter = ComposterState::new(&tuning());
        composter.add_input(1, 10);
        assert!(composter.take_output().is_none());

        for _ in 0..100 {
            composter.tick();
        }
        let taken = composter.take_output().unwrap();
        assert_eq!(taken.item_id, 2);
        assert!(composter.slot.is_none());
    }

    #[test]
    fn fill_signal_tracks_slot_contents() {
        let mut composter = ComposterState::new(&tuning());
        assert_eq!(composter.fill_signal(), 0);

        composter.add_input(1, 6);
        assert_eq!(composter.fill_signal(), 6);

        composter.add_input(1, 4);
        for _ in 0..100 {
            composter.tick();
        }
        // Converted contents read one higher than the raw count.
        assert_eq!(composter.fill_signal(), 11);
    }

    #[test]
    fn insert_extract_predicates() {
        let composter = ComposterState::new(&tuning());
        assert!(composter.accepts_insert(1));
        assert!(!composter.accepts_insert(2));
        assert!(composter.accepts_extract(2));
        assert!(!composter.accepts_extract(1));
    }
}
