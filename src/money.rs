// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Currency Amounts

//! `Ton` amounts backed by `rust_decimal::Decimal`.
//!
//! Tap gains and multipliers are rounded to cents the way the widget displays
//! them, so balances like `20.00` and multipliers like `1.10` stay exact instead
//! of drifting the way binary floats do.
//!
//! Arithmetic saturates at `Decimal::MAX` / `Decimal::MIN`. A long enough
//! session compounds the tap multiplier past the 96-bit mantissa, and the
//! engine must keep running when it does.

use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::sync::atomic::{AtomicBool, Ordering};

/// Number of decimal places shown to the user.
pub const DISPLAY_DP: u32 = 2;

/// Round to two decimals, ties away from zero.
pub fn round_cents(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

static OVERFLOW_REPORTED: AtomicBool = AtomicBool::new(false);

/// Result of a checked operation, or the saturated value when it overflowed.
/// Only the first overflow in a process is logged at warn.
fn clamp_overflow(op: &str, checked: Option<Decimal>, saturate: impl FnOnce() -> Decimal) -> Decimal {
    checked.unwrap_or_else(|| {
        let clamped = saturate();
        if OVERFLOW_REPORTED.swap(true, Ordering::Relaxed) {
            debug!("{op} overflowed, clamped to {clamped}");
        } else {
            warn!("{op} overflowed, clamping to {clamped}; further overflows log at debug");
        }
        clamped
    })
}

/// Amount of the simulated currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ton(pub Decimal);

impl Ton {
    pub const ZERO: Ton = Ton(Decimal::ZERO);
    pub const MAX: Ton = Ton(Decimal::MAX);

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    /// Whole-unit amount, mostly for tests and scenario setup.
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    /// Same amount rounded to cents.
    pub fn rounded(self) -> Self {
        Self(round_cents(self.0))
    }

    /// Fixed two-decimal rendering, e.g. `"20.00"`.
    pub fn to_fixed(self) -> String {
        format!("{:.2}", round_cents(self.0))
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(clamp_overflow("TON addition", self.0.checked_add(rhs.0), || self.0.saturating_add(rhs.0)))
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(clamp_overflow("TON subtraction", self.0.checked_sub(rhs.0), || self.0.saturating_sub(rhs.0)))
    }

    pub fn saturating_mul(self, rhs: Decimal) -> Self {
        Self(clamp_overflow("TON multiplication", self.0.checked_mul(rhs), || self.0.saturating_mul(rhs)))
    }

    /// Move the whole amount out, leaving zero behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl Add for Ton {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Ton {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for Ton {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl Mul<Decimal> for Ton {
    type Output = Self;
    fn mul(self, rhs: Decimal) -> Self::Output {
        self.saturating_mul(rhs)
    }
}

impl Sum for Ton {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Ton::ZERO, |acc, t| acc + t)
    }
}

impl fmt::Display for Ton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TON", self.to_fixed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_cents_ties_away_from_zero() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_cents(dec!(1.004)), dec!(1.00));
        assert_eq!(round_cents(dec!(1.331)), dec!(1.33));
    }

    #[test]
    fn to_fixed_pads_two_places() {
        assert_eq!(Ton::zero().to_fixed(), "0.00");
        assert_eq!(Ton::from_units(20).to_fixed(), "20.00");
        assert_eq!(Ton(dec!(1.1)).to_fixed(), "1.10");
        assert_eq!(Ton(dec!(0.6666)).to_fixed(), "0.67");
    }

    #[test]
    fn display_appends_symbol() {
        assert_eq!(Ton(dec!(3.5)).to_string(), "3.50 TON");
    }

    #[test]
    fn take_leaves_zero() {
        let mut t = Ton(dec!(12.34));
        let moved = t.take();
        assert_eq!(moved, Ton(dec!(12.34)));
        assert!(t.is_zero());
    }

    #[test]
    fn sum_and_mul() {
        let total: Ton = [Ton::from_units(1), Ton(dec!(0.5))].into_iter().sum();
        assert_eq!(total, Ton(dec!(1.5)));
        assert_eq!(Ton::from_units(100) * dec!(0.01), Ton(dec!(1.00)));
    }

    #[test]
    fn arithmetic_saturates_instead_of_panicking() {
        assert_eq!(Ton::MAX + Ton::from_units(1), Ton::MAX);
        assert_eq!(Ton::MAX * dec!(1.1), Ton::MAX);
        assert_eq!(Ton(Decimal::MIN) - Ton::from_units(1), Ton(Decimal::MIN));

        let mut t = Ton::MAX;
        t += Ton(dec!(0.01));
        assert_eq!(t, Ton::MAX);
        assert_eq!(t.rounded(), Ton::MAX);
    }

    #[test]
    fn arithmetic_below_the_limit_is_exact() {
        assert_eq!(Ton(dec!(19.99)) + Ton(dec!(0.01)), Ton::from_units(20));
        assert_eq!(Ton(dec!(1.5)) - Ton::from_units(2), Ton(dec!(-0.5)));
    }
}
