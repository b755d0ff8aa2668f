//! Config module - init-time tuning for a session
//!
//! Defaults come from the constants in `synaptetris-types`. A config is
//! validated once, when the session is built; nothing changes mid-game.

use thiserror::Error;

use crate::types::{
    BASE_DROP_MS, CONGESTION_WEIGHT_MS, DROP_INTERVAL_MIN_MS, HOMEOSTASIS_BONUS, LINE_SPEEDUP_MS,
    POWER_UP_CHANCE_PERCENT, POWER_UP_MIN_LINES, REUPTAKE_FAILURE_PERCENT,
    REUPTAKE_FAILURE_SHIELDED_PERCENT,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum drop interval must be positive")]
    ZeroMinimumDrop,
    #[error("base drop interval {base_ms}ms is below the minimum {min_ms}ms")]
    BaseBelowMinimum { base_ms: u32, min_ms: u32 },
    #[error("{name} is {value}%, expected 0..=100")]
    PercentOutOfRange { name: &'static str, value: u32 },
    #[error("shielded reuptake failure chance {shielded}% exceeds the unshielded {unshielded}%")]
    ShieldWeakerThanBase { shielded: u32, unshielded: u32 },
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub base_drop_ms: u32,
    pub min_drop_ms: u32,
    pub congestion_weight_ms: u32,
    pub line_speedup_ms: u32,
    pub power_up_chance_percent: u32,
    pub power_up_min_lines: u32,
    pub reuptake_failure_percent: u32,
    pub reuptake_failure_shielded_percent: u32,
    pub homeostasis_bonus: u32,
}

impl GameConfig {
    /// Defaults with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_drop_ms == 0 {
            return Err(ConfigError::ZeroMinimumDrop);
        }
        if self.base_drop_ms < self.min_drop_ms {
            return Err(ConfigError::BaseBelowMinimum {
                base_ms: self.base_drop_ms,
                min_ms: self.min_drop_ms,
            });
        }
        for (name, value) in [
            ("power-up chance", self.power_up_chance_percent),
            ("reuptake failure chance", self.reuptake_failure_percent),
            (
                "shielded reuptake failure chance",
                self.reuptake_failure_shielded_percent,
            ),
        ] {
            if value > 100 {
                return Err(ConfigError::PercentOutOfRange { name, value });
            }
        }
        if self.reuptake_failure_shielded_percent > self.reuptake_failure_percent {
            return Err(ConfigError::ShieldWeakerThanBase {
                shielded: self.reuptake_failure_shielded_percent,
                unshielded: self.reuptake_failure_percent,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            base_drop_ms: BASE_DROP_MS,
            min_drop_ms: DROP_INTERVAL_MIN_MS,
            congestion_weight_ms: CONGESTION_WEIGHT_MS,
            line_speedup_ms: LINE_SPEEDUP_MS,
            power_up_chance_percent: POWER_UP_CHANCE_PERCENT,
            power_up_min_lines: POWER_UP_MIN_LINES,
            reuptake_failure_percent: REUPTAKE_FAILURE_PERCENT,
            reuptake_failure_shielded_percent: REUPTAKE_FAILURE_SHIELDED_PERCENT,
            homeostasis_bonus: HOMEOSTASIS_BONUS,
        }
    }
}
