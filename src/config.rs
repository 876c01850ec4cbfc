// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Configuration

//! Tunables for a simulation instance.
//!
//! The defaults reproduce the shipped widget. Hosts may override any field by
//! passing a partial JSON object; omitted fields keep their defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::Ton;
use crate::schedule::YIELD_TICK_INTERVAL_MS;
use crate::strategy::Strategy;

/// Progress wraps at this value and triggers a level-up.
pub const PROGRESS_SPAN: u32 = 100;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tick interval must be positive, got {0}ms")]
    NonPositiveInterval(i64),

    #[error("progress step must be within 1..={max}, got {step}")]
    ProgressStepOutOfRange { step: u32, max: u32 },

    #[error("level-up factor must be at least 1, got {0}")]
    ShrinkingMultiplier(Decimal),

    #[error("tap gain must be positive, got {0}")]
    NonPositiveGain(Decimal),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Milliseconds between automatic yield settlements.
    pub tick_interval_ms: i64,
    /// Currency earned per tap before the multiplier.
    pub tap_base_gain: Ton,
    /// Progress added per tap, out of [`PROGRESS_SPAN`].
    pub progress_step: u32,
    /// Multiplier growth applied on each level-up.
    pub level_up_factor: Decimal,
    pub initial_strategy: Strategy,
    /// Symbol used in user-facing messages.
    pub currency: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: YIELD_TICK_INTERVAL_MS,
            tap_base_gain: Ton::from_units(1),
            progress_step: 5,
            level_up_factor: dec!(1.1),
            initial_strategy: Strategy::Balanced,
            currency: "TON".to_string(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms <= 0 {
            return Err(ConfigError::NonPositiveInterval(self.tick_interval_ms));
        }
        let max = PROGRESS_SPAN - 1;
        if self.progress_step == 0 || self.progress_step > max {
            return Err(ConfigError::ProgressStepOutOfRange { step: self.progress_step, max });
        }
        if self.level_up_factor < Decimal::ONE {
            return Err(ConfigError::ShrinkingMultiplier(self.level_up_factor));
        }
        if self.tap_base_gain.0 <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveGain(self.tap_base_gain.0));
        }
        Ok(())
    }

    /// Taps needed per level at this progress step.
    pub fn taps_per_level(&self) -> u32 {
        PROGRESS_SPAN.div_ceil(self.progress_step.max(1))
    }
}
