// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Simulation Core

use log::{debug, error, info, warn};
use rust_decimal::Decimal;

use crate::clock::{elapsed_days, Clock};
use crate::config::{ConfigError, SimConfig, PROGRESS_SPAN};
use crate::conservation::ConservationLaw;
use crate::money::{round_cents, Ton};
use crate::schedule::{CancelToken, RecurringTask};
use crate::strategy::{Strategy, StrategyError};
use crate::types::*;

// ─── TapSimulation struct ────────────────────────────────────────────────────

/// The single tap-to-earn state holder.
///
/// Owns the balances, leveling state and the recurring yield task. Dropping
/// the instance (or calling [`shutdown`](Self::shutdown)) cancels the task.
pub struct TapSimulation {
    pub(crate) available: Ton,
    pub(crate) staked: Ton,
    pub(crate) multiplier: Decimal,
    pub(crate) level: u32,
    pub(crate) progress: u32,
    pub(crate) strategy: Strategy,
    pub(crate) yield_rate: Decimal,
    pub(crate) last_yield_ms: i64,

    pub(crate) config: SimConfig,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) ticker: RecurringTask,
    pub(crate) conservation: ConservationLaw,
    pub(crate) stats: SimStats,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl TapSimulation {
    /// Start a simulation with the widget's defaults.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::build(SimConfig::default(), Box::new(clock))
    }

    /// Start a simulation from a validated config.
    pub fn with_config(config: SimConfig, clock: impl Clock + 'static) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Box::new(clock)))
    }

    pub(crate) fn build(config: SimConfig, clock: Box<dyn Clock>) -> Self {
        let now = clock.now_ms();
        let strategy = config.initial_strategy;
        let ticker = RecurringTask::new(config.tick_interval_ms, now);
        debug!("simulation started at {now}ms, tick every {}ms", config.tick_interval_ms);
        Self {
            available: Ton::zero(),
            staked: Ton::zero(),
            multiplier: Decimal::ONE,
            level: 1,
            progress: 0,
            strategy,
            yield_rate: strategy.yield_rate(),
            last_yield_ms: now,
            config,
            clock,
            ticker,
            conservation: ConservationLaw::new(),
            stats: SimStats::default(),
        }
    }

    /// Settle yield on the staked balance for the time since the last settlement.
    pub fn accrue_yield(&mut self) -> Ton {
        let now = self.clock.now_ms();
        let days = elapsed_days(self.last_yield_ms, now);
        let amount = self.staked * (self.yield_rate * days);
        self.staked += amount;
        self.last_yield_ms = now;
        self.stats.yield_accrued += amount;
        amount
    }

    /// Body of the recurring timer.
    pub fn tick(&mut self) -> Ton {
        let settled = self.accrue_yield();
        self.stats.ticks_fired += 1;
        debug!("tick settled {settled}");
        settled
    }

    /// Run the timer if it is due. Returns the settled yield when it fired.
    pub fn pump(&mut self) -> Option<Ton> {
        let now = self.clock.now_ms();
        if self.ticker.poll(now) {
            Some(self.tick())
        } else {
            None
        }
    }

    pub fn tap(&mut self) -> TapOutcome {
        let gain = self.config.tap_base_gain * self.multiplier;
        self.available = (self.available + gain).rounded();

        let previous = self.progress;
        self.progress = (previous + self.config.progress_step) % PROGRESS_SPAN;
        let leveled_up = self.progress < previous;
        if leveled_up {
            self.level += 1;
            self.multiplier = round_cents(self.raised_multiplier());
            self.stats.level_ups += 1;
            info!("level up: level {} multiplier x{:.2}", self.level, self.multiplier);
        }
        self.stats.taps += 1;

        TapOutcome { gain, leveled_up, level: self.level, progress: self.progress }
    }

    /// Settle yield, then move the whole available balance into the stake.
    pub fn stake(&mut self) -> TransferReceipt {
        let before = self.total_balance();
        let settled_yield = self.accrue_yield();
        let moved = self.available.take();
        self.staked += moved;
        self.audit_transfer(before, settled_yield);
        debug!("staked {moved} (settled {settled_yield})");
        TransferReceipt { kind: TransferKind::Stake, moved, settled_yield }
    }

    /// Settle yield, then move the whole stake back to the available balance.
    pub fn unstake(&mut self) -> TransferReceipt {
        let before = self.total_balance();
        let settled_yield = self.accrue_yield();
        let moved = self.staked.take();
        self.available += moved;
        self.audit_transfer(before, settled_yield);
        debug!("unstaked {moved} (settled {settled_yield})");
        TransferReceipt { kind: TransferKind::Unstake, moved, settled_yield }
    }

    /// Zero the available balance. The receipt carries the acknowledgment text.
    pub fn withdraw(&mut self) -> WithdrawReceipt {
        let amount = self.available.take();
        info!("withdrew {amount}");
        WithdrawReceipt { amount, currency: self.config.currency.clone() }
    }

    /// Switch strategy. Pending yield is not settled first, so the next
    /// settlement applies the new rate to the whole elapsed period.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        if strategy != self.strategy {
            self.stats.strategy_changes += 1;
            info!("strategy {} -> {}", self.strategy, strategy);
        }
        self.strategy = strategy;
        self.yield_rate = strategy.yield_rate();
    }

    /// Parse and apply a strategy name. Unknown names leave state untouched.
    pub fn set_strategy_named(&mut self, name: &str) -> Result<Strategy, StrategyError> {
        let strategy: Strategy = name.parse()?;
        self.set_strategy(strategy);
        Ok(strategy)
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            available: self.available,
            staked: self.staked,
            total: self.total_balance(),
            multiplier: self.multiplier,
            level: self.level,
            progress: self.progress,
            strategy: self.strategy,
            yield_rate: self.yield_rate,
            last_yield_ms: self.last_yield_ms,
        }
    }

    pub fn stats(&self) -> SimStats {
        let mut stats = self.stats.clone();
        stats.conservation_violations = self.conservation.violations();
        stats
    }

    pub fn total_balance(&self) -> Ton {
        self.available + self.staked
    }

    pub fn available(&self) -> Ton { self.available }
    pub fn staked(&self) -> Ton { self.staked }
    pub fn multiplier(&self) -> Decimal { self.multiplier }
    pub fn level(&self) -> u32 { self.level }
    pub fn progress(&self) -> u32 { self.progress }
    pub fn strategy(&self) -> Strategy { self.strategy }
    pub fn yield_rate(&self) -> Decimal { self.yield_rate }
    pub fn config(&self) -> &SimConfig { &self.config }

    /// Stop the recurring task. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.ticker.is_cancelled() {
            self.ticker.cancel();
            info!("simulation shut down after {} ticks", self.stats.ticks_fired);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.ticker.is_cancelled()
    }

    /// Handle that cancels the recurring task from outside.
    pub fn cancel_token(&self) -> CancelToken {
        self.ticker.token()
    }

    /// Time at which the recurring task next fires.
    pub fn next_tick_ms(&self) -> i64 {
        self.ticker.next_due()
    }

    /// Restart from defaults, keeping config and clock.
    pub fn reset_state(&mut self) {
        self.ticker.cancel();
        let config = self.config.clone();
        let clock = std::mem::replace(&mut self.clock, Box::new(crate::clock::ManualClock::default()));
        *self = Self::build(config, clock);
    }

    /// Next level's multiplier, pinned at `Decimal::MAX` once it stops fitting.
    fn raised_multiplier(&self) -> Decimal {
        let factor = self.config.level_up_factor;
        match self.multiplier.checked_mul(factor) {
            Some(raised) => raised,
            None if self.multiplier == Decimal::MAX => Decimal::MAX,
            None => {
                warn!("multiplier x{:.2} capped at level {}", self.multiplier, self.level);
                Decimal::MAX
            }
        }
    }

    fn audit_transfer(&mut self, total_before: Ton, settled_yield: Ton) {
        let total_after = self.total_balance();
        if let Err(e) = self.conservation.verify_transfer(total_before, total_after, settled_yield) {
            error!("{e}");
        }
    }
}

impl Drop for TapSimulation {
    fn drop(&mut self) {
        self.ticker.cancel();
    }
}
