// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Investment Strategies

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    /// Name is not one of `aggressive`, `balanced`, `conservative`.
    #[error("unknown strategy `{0}` (expected aggressive, balanced or conservative)")]
    Unknown(String),
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Yield strategy applied to the staked balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Aggressive,
    #[default]
    Balanced,
    Conservative,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::Aggressive, Self::Balanced, Self::Conservative];

    /// Daily yield rate as a fraction of the staked balance.
    pub fn yield_rate(&self) -> Decimal {
        match self {
            Self::Aggressive => dec!(0.02),
            Self::Balanced => dec!(0.01),
            Self::Conservative => dec!(0.005),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Balanced => "balanced",
            Self::Conservative => "conservative",
        }
    }

    /// Option text shown in the strategy picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aggressive => "Aggressive (2% daily, higher risk)",
            Self::Balanced => "Balanced (1% daily, moderate risk)",
            Self::Conservative => "Conservative (0.5% daily, lower risk)",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aggressive" => Ok(Self::Aggressive),
            "balanced" => Ok(Self::Balanced),
            "conservative" => Ok(Self::Conservative),
            other => Err(StrategyError::Unknown(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Strategy {
    type Error = StrategyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
