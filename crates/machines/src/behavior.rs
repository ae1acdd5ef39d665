//! Pluggable field behaviors and their priority chain.
//!
//! A behavior is the unit of farm content: it knows how to harvest whatever
//! grows at a cell and how to plant one of the machine's seed items there.
//! The machines stay agnostic to what "harvest" and "plant" actually touch in
//! the world; all of that lives behind [`FieldBehavior`].

use voxmech_core::{BlockPos, ItemStack};

/// The engine-side seam machines require from the host world.
///
/// The host also owns the per-tick invocation contract: exactly one tick call
/// per machine per world step, serialized by the host scheduler.
pub trait HostWorld {
    /// Raw rotation metadata of the block at `pos`.
    fn orientation_code(&self, pos: BlockPos) -> i32;
}

/// Machine-side surface a behavior may call back into while it runs.
pub trait FarmContext {
    /// Number of seed (input) slots.
    fn seed_slot_count(&self) -> usize;

    /// The stack in a seed slot, if any.
    fn seed_slot(&self, index: usize) -> Option<ItemStack>;

    /// Remove one item from a seed slot.
    fn consume_seed(&mut self, index: usize);

    /// Deposit stacks into the seed section. All-or-nothing; `commit` unset
    /// probes capacity without mutating.
    fn add_to_seed_inventory(&mut self, stacks: &[ItemStack], commit: bool) -> bool;

    /// Deposit stacks into the output section. Same contract as
    /// [`FarmContext::add_to_seed_inventory`].
    fn add_to_output_inventory(&mut self, stacks: &[ItemStack], commit: bool) -> bool;

    /// Currently stored energy.
    fn energy(&self) -> u32;

    /// Charge the machine for work this behavior performed.
    fn extract_energy(&mut self, amount: u32);
}

/// A harvest/plant capability supplied by external content.
pub trait FieldBehavior<W> {
    /// Try to consume whatever is present at `cell`. Returns true when the
    /// behavior acted; depositing produce and charging energy happen through
    /// `farm`.
    fn try_harvest(&self, world: &mut W, cell: BlockPos, farm: &mut dyn FarmContext) -> bool;

    /// Try to place one item of `stack` at `cell`. Returns true when the
    /// behavior acted; the caller deducts the planted item.
    fn try_plant(&self, stack: ItemStack, world: &mut W, cell: BlockPos) -> bool;
}

/// An ordered, first-match-wins collection of behaviors.
///
/// The chain is owned by (or injected into) each machine instance; priority
/// is registration order and fixed once built.
pub struct BehaviorChain<W> {
    behaviors: Vec<Box<dyn FieldBehavior<W>>>,
}

impl<W> BehaviorChain<W> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            behaviors: Vec::new(),
        }
    }

    /// Append a behavior at the lowest priority.
    pub fn register(&mut self, behavior: Box<dyn FieldBehavior<W>>) {
        self.behaviors.push(behavior);
    }

    /// Number of registered behaviors.
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Whether the chain has no behaviors.
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Run the chain against one cell.
    ///
    /// For each behavior in priority order: a successful harvest stops the
    /// chain immediately. Otherwise the farm's seed slots are offered to the
    /// behavior in slot order, and the first successful plant deducts one
    /// item from that slot and stops the chain. Returns whether any behavior
    /// acted; a false result is an ordinary non-match, not an error.
    pub fn process(&self, world: &mut W, cell: BlockPos, farm: &mut dyn FarmContext) -> bool {
        for behavior in &self.behaviors {
            if behavior.try_harvest(world, cell, farm) {
                return true;
            }

            for index in 0..farm.seed_slot_count() {
                let Some(stack) = farm.seed_slot(index) else {
                    continue;
                };
                if stack.is_empty() {
                    continue;
                }
                if behavior.try_plant(stack, world, cell) {
                    farm.consume_seed(index);
                    return true;
                }
            }
        }
        false
    }
}

impl<W> Default for BehaviorChain<W> {
    fn default() -> Self {
        Self::new()
    }
}
