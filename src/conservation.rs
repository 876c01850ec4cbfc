// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Balance Conservation

//! Conservation check for moves between the available and staked balances.
//!
//! ```text
//! total_before + settled_yield = total_after
//! ```
//!
//! Staking and unstaking only move funds between the two pools, and the yield
//! settled first is the only value that may appear. The check runs alongside
//! the transfer; it records violations and never rejects the user action.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::Ton;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConservationError {
    #[error("transfer imbalance: expected total {expected}, got {actual}")]
    TransferImbalance { expected: Decimal, actual: Decimal },
}

// ---------------------------------------------------------------------------
// Conservation Law
// ---------------------------------------------------------------------------

/// Per-transfer tolerance for rounding differences.
pub const TRANSFER_TOLERANCE: Decimal = dec!(0.0001);

/// Relative tolerance once totals outgrow the mantissa's exact cents.
pub const RELATIVE_TOLERANCE: Decimal = dec!(0.000000000000000000000001);

/// Tracks cumulative conservation error across transfers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConservationLaw {
    cumulative_error: Decimal,
    violations: u32,
}

impl ConservationLaw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_transfer(
        &mut self,
        total_before: Ton,
        total_after: Ton,
        settled_yield: Ton,
    ) -> Result<(), ConservationError> {
        let expected = total_before.saturating_add(settled_yield).0;
        let actual = total_after.0;
        let error = (expected - actual).abs();
        self.cumulative_error = self.cumulative_error.saturating_add(error);

        let tolerance = TRANSFER_TOLERANCE.max(expected.abs() * RELATIVE_TOLERANCE);
        if error > tolerance {
            self.violations += 1;
            return Err(ConservationError::TransferImbalance { expected, actual });
        }
        Ok(())
    }

    pub fn cumulative_error(&self) -> Decimal {
        self.cumulative_error
    }

    pub fn violations(&self) -> u32 {
        self.violations
    }
}
