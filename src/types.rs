// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Type Definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{round_cents, Ton};
use crate::strategy::Strategy;

// ─── SimSnapshot ─────────────────────────────────────────────────────────────

/// Read-only copy of the simulation state for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub available: Ton,
    pub staked: Ton,
    pub total: Ton,
    pub multiplier: Decimal,
    pub level: u32,
    pub progress: u32,
    pub strategy: Strategy,
    pub yield_rate: Decimal,
    pub last_yield_ms: i64,
}

impl SimSnapshot {
    /// Strings exactly as the widget prints them.
    pub fn display(&self) -> DisplayState {
        DisplayState {
            total: self.total.to_fixed(),
            available: self.available.to_fixed(),
            staked: self.staked.to_fixed(),
            multiplier: format!("x{:.2}", round_cents(self.multiplier)),
            level: self.level.to_string(),
            progress_pct: self.progress,
            strategy: self.strategy.as_str().to_string(),
            strategy_label: self.strategy.label().to_string(),
        }
    }
}

// ─── DisplayState ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub total: String,
    pub available: String,
    pub staked: String,
    pub multiplier: String,
    pub level: String,
    /// Width of the progress bar in percent.
    pub progress_pct: u32,
    pub strategy: String,
    pub strategy_label: String,
}

// ─── Operation results ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapOutcome {
    pub gain: Ton,
    pub leveled_up: bool,
    pub level: u32,
    pub progress: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    Stake,
    Unstake,
}

/// Result of a stake or unstake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub kind: TransferKind,
    /// Amount moved between pools, after yield settlement.
    pub moved: Ton,
    /// Yield settled on the pre-transfer staked balance.
    pub settled_yield: Ton,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    pub amount: Ton,
    pub currency: String,
}

impl WithdrawReceipt {
    /// Text for the blocking acknowledgment dialog.
    pub fn message(&self) -> String {
        format!("Withdrawing {} {}", self.amount.to_fixed(), self.currency)
    }
}

// ─── SimStats ────────────────────────────────────────────────────────────────

/// Lifetime diagnostics for one instance. Withdrawn funds are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimStats {
    pub taps: u64,
    pub level_ups: u32,
    pub ticks_fired: u64,
    pub yield_accrued: Ton,
    pub strategy_changes: u32,
    pub conservation_violations: u32,
}
