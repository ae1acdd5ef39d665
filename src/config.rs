use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;
use voxmech_machines::MachineTuning;

const DEFAULT_CONFIG_PATH: &str = "config/voxmech.toml";

/// Demo simulation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of host ticks to simulate.
    pub ticks: u64,
    /// Energy charged into the harvester before the run starts.
    pub charge: u32,
    /// Seeds loaded into the first seed slot.
    pub seeds: u8,
    /// Ticks a planted cell needs before it can be harvested.
    pub grow_time: u32,
    /// Machine tuning values.
    pub tuning: MachineTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 2000,
            charge: 100_000,
            seeds: 64,
            grow_time: 40,
            tuning: MachineTuning::default(),
        }
    }
}

impl SimConfig {
    /// Load the simulation config from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SimConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SimConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SimConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_in_defaults() {
        let cfg: SimConfig = toml::from_str(
            r#"
            ticks = 50

            [tuning]
            harvester_radius = 2
            "#,
        )
        .unwrap();

        assert_eq!(cfg.ticks, 50);
        assert_eq!(cfg.charge, 100_000);
        assert_eq!(cfg.tuning.harvester_radius, 2);
        assert_eq!(cfg.tuning.scan_interval, 5);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = SimConfig::load_from_path(Path::new("/nonexistent/voxmech.toml"));
        assert_eq!(cfg.ticks, SimConfig::default().ticks);
    }
}
