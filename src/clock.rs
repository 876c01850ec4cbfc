// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Wall Clock

//! Time sources. The engine never reads the system time directly; it asks a
//! [`Clock`], so the browser host can feed `Date.now()` and tests can step time.

use rust_decimal::Decimal;
use std::cell::Cell;
use std::rc::Rc;

/// Milliseconds in one day, the unit yield rates are quoted in.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Source of wall-clock time in Unix epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Fractional days between two instants. Backwards steps count as zero.
pub fn elapsed_days(from_ms: i64, to_ms: i64) -> Decimal {
    let elapsed = to_ms.saturating_sub(from_ms).max(0);
    Decimal::from(elapsed) / Decimal::from(MS_PER_DAY)
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// Clock whose time is pushed in from outside.
///
/// Clones share the same instant, so a host can keep one handle and hand
/// another to the simulation.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(days.saturating_mul(MS_PER_DAY));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// SystemClock
// ---------------------------------------------------------------------------

/// Native wall clock.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn elapsed_days_fractional() {
        assert_eq!(elapsed_days(0, MS_PER_DAY), dec!(1));
        assert_eq!(elapsed_days(0, MS_PER_DAY / 2), dec!(0.5));
        assert_eq!(elapsed_days(1_000, 1_000), Decimal::ZERO);
    }

    #[test]
    fn elapsed_days_clamps_backwards() {
        assert_eq!(elapsed_days(5_000, 1_000), Decimal::ZERO);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(10);
        let handle = clock.clone();
        handle.advance(90);
        assert_eq!(clock.now_ms(), 100);
        handle.advance_days(1);
        assert_eq!(clock.now_ms(), 100 + MS_PER_DAY);
        clock.set(7);
        assert_eq!(handle.now_ms(), 7);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
