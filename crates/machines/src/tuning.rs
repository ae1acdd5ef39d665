//! Tunable machine parameters.
//!
//! Everything a host or pack config may override lives here; the defaults
//! mirror the values the machines shipped with.

use crate::energy::DEFAULT_ENERGY_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxmech_core::ItemId;

/// Rejected tuning values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TuningError {
    /// The harvester scan radius must be non-negative.
    #[error("harvester radius {0} is negative")]
    NegativeRadius(i32),
    /// The scan interval must be at least one tick.
    #[error("scan interval {0} must be at least 1 tick")]
    BadScanInterval(i32),
    /// The composter threshold must be at least one item.
    #[error("compost amount must be at least 1 item")]
    ZeroCompostAmount,
    /// The composter conversion time must be at least one tick.
    #[error("compost time {0} must be at least 1 tick")]
    BadCompostTime(i32),
    /// Raw input and converted output must be distinct items.
    #[error("compost input and output are the same item id {0}")]
    CompostItemsCollide(ItemId),
}

/// Machine tuning values, deserializable from host config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineTuning {
    /// Half-width of the square field the harvester works.
    pub harvester_radius: i32,
    /// Ticks between two scan steps.
    pub scan_interval: i32,
    /// Energy buffer capacity for powered machines.
    pub energy_capacity: u32,
    /// Documented per-operation energy cost charged by behaviors.
    pub use_per_operation: u32,
    /// Items consumed (and produced) per compost conversion.
    pub compost_amount: u8,
    /// Ticks one compost conversion takes.
    pub compost_time: i32,
    /// Item the composter consumes.
    pub compost_input: ItemId,
    /// Item the composter produces.
    pub compost_output: ItemId,
}

impl Default for MachineTuning {
    fn default() -> Self {
        Self {
            harvester_radius: 4,
            scan_interval: 5,
            energy_capacity: DEFAULT_ENERGY_CAPACITY,
            use_per_operation: 1500,
            compost_amount: 10,
            compost_time: 1000,
            compost_input: 1,
            compost_output: 2,
        }
    }
}

impl MachineTuning {
    /// Check that the values describe a machine that can actually run.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.harvester_radius < 0 {
            return Err(TuningError::NegativeRadius(self.harvester_radius));
        }
        if self.scan_interval < 1 {
            return Err(TuningError::BadScanInterval(self.scan_interval));
        }
        if self.compost_amount == 0 {
            return Err(TuningError::ZeroCompostAmount);
        }
        if self.compost_time < 1 {
            return Err(TuningError::BadCompostTime(self.compost_time));
        }
        if self.compost_input == self.compost_output {
            return Err(TuningError::CompostItemsCollide(self.compost_input));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(MachineTuning::default().validate(), Ok(()));
    }

    #[test]
    fn default_values_match_shipped_constants() {
        let tuning = MachineTuning::default();
        assert_eq!(tuning.harvester_radius, 4);
        assert_eq!(tuning.scan_interval, 5);
        assert_eq!(tuning.energy_capacity, 100_000);
        assert_eq!(tuning.use_per_operation, 1500);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut tuning = MachineTuning {
            harvester_radius: -1,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::NegativeRadius(-1)));

        tuning.harvester_radius = 4;
        tuning.scan_interval = 0;
        assert_eq!(tuning.validate(), Err(TuningError::BadScanInterval(0)));

        tuning.scan_interval = 5;
        tuning.compost_output = tuning.compost_input;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::CompostItemsCollide(tuning.compost_input))
        );
    }
}
