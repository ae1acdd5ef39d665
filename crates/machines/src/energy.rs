//! Bounded energy buffer for powered machines.
//!
//! Machines only ever gate on "is there any energy"; charging comes from
//! external collaborators through [`EnergyStorage::receive`].

use serde::{Deserialize, Serialize};

/// Default energy capacity for powered machines.
pub const DEFAULT_ENERGY_CAPACITY: u32 = 100_000;

/// A capacity-bounded, never-negative energy counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyStorage {
    stored: u32,
    capacity: u32,
}

impl EnergyStorage {
    /// Create an empty buffer with the given capacity.
    pub fn new(capacity: u32) -> Self {
        Self {
            stored: 0,
            capacity,
        }
    }

    /// Currently stored energy.
    pub fn energy(&self) -> u32 {
        self.stored
    }

    /// Maximum storable energy.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Accept up to `amount` units, returning the amount actually accepted.
    ///
    /// With `simulate` set the buffer is left untouched and only the
    /// would-be-accepted amount is reported.
    pub fn receive(&mut self, amount: u32, simulate: bool) -> u32 {
        let accepted = amount.min(self.capacity - self.stored);
        if !simulate {
            self.stored += accepted;
        }
        accepted
    }

    /// Withdraw up to `amount` units, returning the amount actually taken.
    pub fn extract(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.stored);
        self.stored -= taken;
        taken
    }

    /// Restore a persisted level, clamped to capacity.
    pub fn set_energy(&mut self, stored: u32) {
        self.stored = stored.min(self.capacity);
    }
}

impl Default for EnergyStorage {
    fn default() -> Self {
        Self::new(DEFAULT_ENERGY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_respects_capacity() {
        let mut storage = EnergyStorage::new(100);
        assert_eq!(storage.receive(60, false), 60);
        assert_eq!(storage.receive(60, false), 40);
        assert_eq!(storage.energy(), 100);
        assert_eq!(storage.receive(1, false), 0);
    }

    #[test]
    fn simulate_does_not_mutate() {
        let mut storage = EnergyStorage::new(100);
        assert_eq!(storage.receive(30, true), 30);
        assert_eq!(storage.energy(), 0);

        storage.receive(90, false);
        assert_eq!(storage.receive(30, true), 10);
        assert_eq!(storage.energy(), 90);
    }

    #[test]
    fn extract_saturates_at_zero() {
        let mut storage = EnergyStorage::new(100);
        storage.receive(50, false);
        assert_eq!(storage.extract(30), 30);
        assert_eq!(storage.extract(30), 20);
        assert_eq!(storage.extract(30), 0);
        assert_eq!(storage.energy(), 0);
    }

    #[test]
    fn set_energy_clamps_to_capacity() {
        let mut storage = EnergyStorage::new(100);
        storage.set_energy(250);
        assert_eq!(storage.energy(), 100);
    }
}
