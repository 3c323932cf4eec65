//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of grid rows
    pub rows: i32,
    /// Number of grid columns
    pub cols: i32,
    /// Sheep placed on reset
    pub num_sheep: usize,
    /// Wolves placed on reset
    pub num_wolves: usize,
    /// Ticks before the shepherd loses on time
    pub max_steps: u64,
    /// Random seed for reproducible placement. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 15,
            num_sheep: 10,
            num_wolves: 3,
            max_steps: 100,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reject configurations that cannot be placed on the grid.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 1 || self.cols < 1 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }

        if self.max_steps == 0 {
            return Err(Error::InvalidConfig("max_steps must be at least 1".to_string()));
        }

        // The shepherd takes one cell
        let cells = (self.rows as usize)
            .checked_mul(self.cols as usize)
            .ok_or_else(|| {
                Error::InvalidConfig(format!("grid {}x{} is too large", self.rows, self.cols))
            })?;
        let agents = self
            .num_sheep
            .checked_add(self.num_wolves)
            .and_then(|animals| animals.checked_add(1))
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "{} sheep and {} wolves do not fit on any grid",
                    self.num_sheep, self.num_wolves
                ))
            })?;
        if agents > cells {
            return Err(Error::InvalidConfig(format!(
                "{} agents do not fit on a {}x{} grid ({} cells)",
                agents, self.rows, self.cols, cells
            )));
        }

        Ok(())
    }
}

/// Terminal viewer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub simulation: SimulationConfig,
    /// Simulation ticks (and redraws) per second
    pub ticks_per_second: u32,
    /// Log file used while the terminal UI owns the screen
    pub log_file: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            ticks_per_second: 5,
            log_file: "shepherd.log".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading viewer config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_second == 0 {
            return Err(Error::InvalidConfig(
                "ticks_per_second must be at least 1".to_string(),
            ));
        }
        self.simulation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = SimulationConfig::default();
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, 15);
        assert_eq!(config.num_sheep, 10);
        assert_eq!(config.num_wolves, 3);
        assert_eq!(config.max_steps, 100);
        assert!(config.validate().is_ok());

        let viewer = ViewerConfig::default();
        assert_eq!(viewer.ticks_per_second, 5);
    }

    #[test]
    fn test_overfull_grid_rejected() {
        let config = SimulationConfig {
            rows: 2,
            cols: 2,
            num_sheep: 2,
            num_wolves: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        // Exactly full is fine
        let config = SimulationConfig {
            num_wolves: 1,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_grid_rejected() {
        let config = SimulationConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_agent_counts_rejected() {
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"simulation": {"num_sheep": 18446744073709551615}}"#),
            Err(Error::InvalidConfig(_))
        ));

        let config = SimulationConfig {
            num_sheep: usize::MAX / 2 + 1,
            num_wolves: usize::MAX / 2 + 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ViewerConfig::from_json_str(r#"{"simulation": {"rows": 6, "seed": 7}}"#).unwrap();
        assert_eq!(config.simulation.rows, 6);
        assert_eq!(config.simulation.cols, 15);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.ticks_per_second, 5);
    }

    #[test]
    fn test_invalid_json_config() {
        assert!(matches!(
            ViewerConfig::from_json_str("{ not json"),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"ticks_per_second": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
    }
}
