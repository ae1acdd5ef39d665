//! Radius-scanning harvester machine.
//!
//! Once per scan interval the harvester advances a cursor over the square
//! field in front of it and runs its behavior chain against that one cell.
//! The field sits one block beyond the machine's own footprint in its facing
//! direction, so the machine never farms the cell it occupies.

use crate::behavior::{BehaviorChain, FarmContext, HostWorld};
use crate::cursor::ScanCursor;
use crate::energy::EnergyStorage;
use crate::inventory::MachineInventory;
use crate::snapshot::{HarvesterSnapshot, SaveMode, ScanProgress};
use crate::tuning::MachineTuning;
use voxmech_core::{BlockPos, Facing, ItemStack};

/// Total harvester slot count.
pub const HARVESTER_SLOT_COUNT: usize = 12;

/// Slots `0..HARVESTER_SEED_SLOTS` hold seeds; the rest hold produce.
pub const HARVESTER_SEED_SLOTS: usize = 6;

/// Documented energy cost of one farm operation.
///
/// The scan loop itself never charges this; behavior implementations apply
/// it through [`FarmContext::extract_energy`] when they actually do work.
pub const HARVESTER_USE_PER_OPERATION: u32 = 1500;

/// Per-block harvester state.
#[derive(Debug, Clone)]
pub struct HarvesterState {
    /// Seed and produce slots.
    pub inventory: MachineInventory,
    /// Power buffer; the machine idles while it is empty.
    pub energy: EnergyStorage,
    wait_time: i32,
    cursor: ScanCursor,
    scan_interval: i32,
    last_energy: u32,
}

impl HarvesterState {
    /// Create an idle harvester with the given tuning.
    pub fn new(tuning: &MachineTuning) -> Self {
        Self {
            inventory: MachineInventory::new(HARVESTER_SLOT_COUNT, HARVESTER_SEED_SLOTS),
            energy: EnergyStorage::new(tuning.energy_capacity),
            wait_time: 0,
            cursor: ScanCursor::new(tuning.harvester_radius),
            scan_interval: tuning.scan_interval,
            last_energy: 0,
        }
    }

    /// Ticks left until the next scan step.
    pub fn wait_time(&self) -> i32 {
        self.wait_time
    }

    /// The scan cursor, for display purposes.
    pub fn cursor(&self) -> &ScanCursor {
        &self.cursor
    }

    /// Advance the machine by one host tick.
    ///
    /// `disabled` is the host's external off-switch (redstone). The machine
    /// only runs while enabled and holding any energy. The countdown and the
    /// refill live in separate ticks: the timer refills one tick *after* the
    /// scan tick, so a full period is `scan_interval + 1` ticks. That cadence
    /// is load-bearing for host-side timing and must not be collapsed into a
    /// modulo.
    ///
    /// Returns whether the stored-energy display value changed since it was
    /// last reported, so the host can decide when to sync.
    pub fn tick<W: HostWorld>(
        &mut self,
        world: &mut W,
        pos: BlockPos,
        disabled: bool,
        chain: &BehaviorChain<W>,
    ) -> bool {
        if !disabled && self.energy.energy() > 0 {
            if self.wait_time > 0 {
                self.wait_time -= 1;

                if self.wait_time <= 0 {
                    let radius = self.cursor.radius();
                    let facing = Facing::from_meta(world.orientation_code(pos));
                    let origin = pos.offset(facing, radius + 1);

                    let (dx, dz) = self.cursor.advance();
                    let query = origin.add(dx, 0, dz);

                    // A miss is fine; the cursor has already moved on.
                    if chain.process(world, query, self) {
                        tracing::trace!(x = query.x, y = query.y, z = query.z, "behavior acted");
                    }
                }
            } else {
                self.wait_time = self.scan_interval;
            }
        }

        let changed = self.last_energy != self.energy.energy();
        if changed {
            self.last_energy = self.energy.energy();
        }
        changed
    }

    /// Capture the machine state for persistence.
    ///
    /// [`SaveMode::Block`] snapshots travel with the dropped block item and
    /// intentionally leave the scan progress behind.
    pub fn snapshot(&self, mode: SaveMode) -> HarvesterSnapshot {
        let scan = (mode != SaveMode::Block).then_some(ScanProgress {
            wait_time: self.wait_time,
            cursor_x: self.cursor.x(),
            cursor_y: self.cursor.y(),
        });
        HarvesterSnapshot {
            slots: self.inventory.slots().to_vec(),
            energy: self.energy.energy(),
            scan,
        }
    }

    /// Apply a snapshot as one unit.
    ///
    /// A snapshot without scan progress (or with out-of-range progress from a
    /// corrupt or foreign save) restarts the scan cycle rather than failing.
    pub fn restore(&mut self, snapshot: &HarvesterSnapshot) {
        self.inventory.restore_slots(&snapshot.slots);
        self.energy.set_energy(snapshot.energy);

        match &snapshot.scan {
            Some(scan) => {
                self.wait_time = scan.wait_time.max(0);
                let radius = self.cursor.radius();
                self.cursor = ScanCursor::from_saved(radius, scan.cursor_x, scan.cursor_y);
                if (self.cursor.x(), self.cursor.y()) != (scan.cursor_x, scan.cursor_y) {
                    tracing::debug!(
                        x = scan.cursor_x,
                        y = scan.cursor_y,
                        radius,
                        "saved scan cursor out of range, restarting cycle"
                    );
                }
            }
            None => {
                self.wait_time = 0;
                self.cursor.reset();
            }
        }

        self.last_energy = self.energy.energy();
    }
}

impl Default for HarvesterState {
    fn default() -> Self {
        Self::new(&MachineTuning::default())
    }
}

impl FarmContext for HarvesterState {
    fn seed_slot_count(&self) -> usize {
        self.inventory.insert_range().len()
    }

    fn seed_slot(&self, index: usize) -> Option<ItemStack> {
        if !self.inventory.insert_range().contains(&index) {
            return None;
        }
        self.inventory.get(index).copied()
    }

    fn consume_seed(&mut self, index: usize) {
        if self.inventory.insert_range().contains(&index) {
            self.inventory.consume_one(index);
        }
    }

    fn add_to_seed_inventory(&mut self, stacks: &[ItemStack], commit: bool) -> bool {
        let range = self.inventory.insert_range();
        self.inventory.insert_all(range, stacks, commit)
    }

    fn add_to_output_inventory(&mut self, stacks: &[ItemStack], commit: bool) -> bool {
        let range = self.inventory.extract_range();
        self.inventory.insert_all(range, stacks, commit)
    }

    fn energy(&self) -> u32 {
        self.energy.energy()
    }

    fn extract_energy(&mut self, amount: u32) {
        self.energy.extract(amount);
    }
}
