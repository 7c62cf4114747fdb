//! # Machine Configuration
//!
//! Configuration management for a machine session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VENDO_SLOT_COUNT=8                                                 │
//! │     VENDO_DENOMINATION_CAPACITY=20                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vendo/vendo.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.vendo.pos/vendo.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     8 slots × 10 units, 20 instances per denomination                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # vendo.toml
//! [slots]
//! count = 8       # shelf positions
//! capacity = 10   # units per slot (also caps pantry staples)
//!
//! [till]
//! denomination_capacity = 20
//!
//! [combo]
//! picks = 3
//! cheese_fee_cents = 2500
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{MachineError, MachineResult};

// =============================================================================
// Slot Settings
// =============================================================================

/// Shelf geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSettings {
    /// Number of shelf positions.
    #[serde(default = "default_slot_count")]
    pub count: usize,

    /// Maximum units one slot holds. Also caps pantry staples.
    #[serde(default = "default_slot_capacity")]
    pub capacity: i64,
}

fn default_slot_count() -> usize {
    8
}

fn default_slot_capacity() -> i64 {
    10
}

impl Default for SlotSettings {
    fn default() -> Self {
        SlotSettings {
            count: default_slot_count(),
            capacity: default_slot_capacity(),
        }
    }
}

// =============================================================================
// Till Settings
// =============================================================================

/// Cash till geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillSettings {
    /// Maximum instances of each denomination accepted on replenishment.
    #[serde(default = "default_denomination_capacity")]
    pub denomination_capacity: u32,
}

fn default_denomination_capacity() -> u32 {
    vendo_core::DEFAULT_DENOMINATION_CAPACITY
}

impl Default for TillSettings {
    fn default() -> Self {
        TillSettings {
            denomination_capacity: default_denomination_capacity(),
        }
    }
}

// =============================================================================
// Combo Settings
// =============================================================================

/// Combo recipe knobs for special machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboSettings {
    /// Distinct ingredient picks per combo.
    #[serde(default = "default_combo_picks")]
    pub picks: usize,

    /// Cheese add-on fee in centavos.
    #[serde(default = "default_cheese_fee")]
    pub cheese_fee_cents: i64,
}

fn default_combo_picks() -> usize {
    3
}

fn default_cheese_fee() -> i64 {
    2500 // ₱25
}

impl Default for ComboSettings {
    fn default() -> Self {
        ComboSettings {
            picks: default_combo_picks(),
            cheese_fee_cents: default_cheese_fee(),
        }
    }
}

// =============================================================================
// Main Machine Configuration
// =============================================================================

/// Complete machine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Shelf geometry.
    #[serde(default)]
    pub slots: SlotSettings,

    /// Cash till geometry.
    #[serde(default)]
    pub till: TillSettings,

    /// Combo recipe knobs (ignored by regular machines).
    #[serde(default)]
    pub combo: ComboSettings,
}

impl MachineConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (vendo.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> MachineResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading machine config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load machine config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> MachineResult<()> {
        let path = config_path.or_else(Self::default_config_path).ok_or_else(|| {
            MachineError::InvalidConfig("No config path available".to_string())
        })?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Machine config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> MachineResult<()> {
        if self.slots.count == 0 {
            return Err(MachineError::InvalidConfig(
                "slots.count must be greater than 0".into(),
            ));
        }
        if self.slots.capacity <= 0 {
            return Err(MachineError::InvalidConfig(
                "slots.capacity must be greater than 0".into(),
            ));
        }
        if self.till.denomination_capacity == 0 {
            return Err(MachineError::InvalidConfig(
                "till.denomination_capacity must be greater than 0".into(),
            ));
        }
        if self.combo.picks == 0 {
            return Err(MachineError::InvalidConfig(
                "combo.picks must be greater than 0".into(),
            ));
        }
        if self.combo.cheese_fee_cents < 0 {
            return Err(MachineError::InvalidConfig(
                "combo.cheese_fee_cents must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(count) = std::env::var("VENDO_SLOT_COUNT") {
            if let Ok(n) = count.parse::<usize>() {
                debug!(count = n, "Overriding slot count from environment");
                self.slots.count = n;
            }
        }

        if let Ok(capacity) = std::env::var("VENDO_SLOT_CAPACITY") {
            if let Ok(n) = capacity.parse::<i64>() {
                debug!(capacity = n, "Overriding slot capacity from environment");
                self.slots.capacity = n;
            }
        }

        if let Ok(capacity) = std::env::var("VENDO_DENOMINATION_CAPACITY") {
            if let Ok(n) = capacity.parse::<u32>() {
                debug!(capacity = n, "Overriding denomination capacity from environment");
                self.till.denomination_capacity = n;
            }
        }

        if let Ok(fee) = std::env::var("VENDO_CHEESE_FEE_CENTS") {
            if let Ok(n) = fee.parse::<i64>() {
                debug!(fee = n, "Overriding cheese fee from environment");
                self.combo.cheese_fee_cents = n;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vendo", "pos").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("vendo.toml")
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_machine_constants() {
        let config = MachineConfig::default();
        assert_eq!(config.slots.count, 8);
        assert_eq!(config.slots.capacity, 10);
        assert_eq!(config.till.denomination_capacity, 20);
        assert_eq!(config.combo.picks, 3);
        assert_eq!(config.combo.cheese_fee_cents, 2500);
    }

    #[test]
    fn test_config_validation() {
        let mut config = MachineConfig::default();
        assert!(config.validate().is_ok());

        config.slots.count = 0;
        assert!(config.validate().is_err());

        config.slots.count = 8;
        config.till.denomination_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = MachineConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[slots]"));
        assert!(toml_str.contains("[till]"));

        let parsed: MachineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: MachineConfig = toml::from_str("[slots]\ncount = 6\n").unwrap();
        assert_eq!(parsed.slots.count, 6);
        assert_eq!(parsed.slots.capacity, 10);
        assert_eq!(parsed.till.denomination_capacity, 20);
    }
}
