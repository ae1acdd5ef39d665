//! Scripted demo field the headless driver runs machines against.
//!
//! Stands in for the host engine: a flat grid of crop cells plus the
//! orientation metadata the harvester reads. Real hosts replace all of this.

use std::collections::HashMap;
use voxmech_core::{BlockPos, Facing, ItemStack};
use voxmech_machines::{FarmContext, FieldBehavior, HostWorld, HARVESTER_USE_PER_OPERATION};

/// Item the demo plants.
pub const SEED_ITEM: u16 = 10;
/// Item the demo harvests.
pub const PRODUCE_ITEM: u16 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoCell {
    Tilled,
    Sprout(u32),
    Grown,
}

/// A flat in-memory field.
pub struct DemoWorld {
    cells: HashMap<BlockPos, DemoCell>,
    machine_meta: i32,
    grow_time: u32,
}

impl DemoWorld {
    /// Build a tilled field covering the harvester's scan area.
    ///
    /// The machine sits at the origin; the field center lies `radius + 1`
    /// blocks away in its facing direction.
    pub fn tilled_field(machine_meta: i32, radius: i32, grow_time: u32) -> Self {
        let facing = Facing::from_meta(machine_meta);
        let center = BlockPos::ORIGIN.offset(facing, radius + 1);

        let mut cells = HashMap::new();
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                cells.insert(center.add(dx, 0, dz), DemoCell::Tilled);
            }
        }
        Self {
            cells,
            machine_meta,
            grow_time,
        }
    }

    /// Advance crop growth by one tick.
    pub fn advance(&mut self) {
        for cell in self.cells.values_mut() {
            if let DemoCell::Sprout(age) = cell {
                *age += 1;
                if *age >= self.grow_time {
                    *cell = DemoCell::Grown;
                }
            }
        }
    }

    pub fn count_sprouts(&self) -> usize {
        self.cells
            .values()
            .filter(|c| matches!(c, DemoCell::Sprout(_)))
            .count()
    }

    pub fn count_grown(&self) -> usize {
        self.cells
            .values()
            .filter(|c| matches!(c, DemoCell::Grown))
            .count()
    }
}

impl HostWorld for DemoWorld {
    fn orientation_code(&self, _pos: BlockPos) -> i32 {
        self.machine_meta
    }
}

/// Demo crop content: harvesting pays the per-operation cost and returns the
/// produce plus the seed; planting consumes one seed.
pub struct DemoCropBehavior;

impl FieldBehavior<DemoWorld> for DemoCropBehavior {
    fn try_harvest(
        &self,
        world: &mut DemoWorld,
        cell: BlockPos,
        farm: &mut dyn FarmContext,
    ) -> bool {
        if world.cells.get(&cell) != Some(&DemoCell::Grown) {
            return false;
        }
        if farm.energy() < HARVESTER_USE_PER_OPERATION {
            return false;
        }

        let drops = [ItemStack::new(PRODUCE_ITEM, 2), ItemStack::new(SEED_ITEM, 1)];
        if !farm.add_to_output_inventory(&drops, false) {
            return false;
        }
        farm.add_to_output_inventory(&drops, true);
        farm.extract_energy(HARVESTER_USE_PER_OPERATION);
        world.cells.insert(cell, DemoCell::Tilled);
        true
    }

    fn try_plant(&self, stack: ItemStack, world: &mut DemoWorld, cell: BlockPos) -> bool {
        if stack.item_id != SEED_ITEM {
            return false;
        }
        if world.cells.get(&cell) != Some(&DemoCell::Tilled) {
            return false;
        }
        world.cells.insert(cell, DemoCell::Sprout(0));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_covers_the_scan_area() {
        // Metadata 0 decodes to West; radius 4 puts the center at (-5, 0, 0).
        let world = DemoWorld::tilled_field(0, 4, 40);
        assert_eq!(world.cells.len(), 81);
        assert!(world.cells.contains_key(&BlockPos::new(-5, 0, 0)));
        assert!(world.cells.contains_key(&BlockPos::new(-9, 0, -4)));
        assert!(world.cells.contains_key(&BlockPos::new(-1, 0, 4)));
        assert!(!world.cells.contains_key(&BlockPos::ORIGIN));
    }

    #[test]
    fn sprouts_mature_after_grow_time() {
        let mut world = DemoWorld::tilled_field(0, 1, 3);
        let cell = BlockPos::new(-1, 0, 0);
        world.cells.insert(cell, DemoCell::Sprout(0));

        world.advance();
        world.advance();
        assert_eq!(world.count_grown(), 0);
        world.advance();
        assert_eq!(world.count_grown(), 1);
    }
}
