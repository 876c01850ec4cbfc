//! Adapter layer: converts between the host's f64 numbers and the engine's Decimal types.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::money::Ton;

/// Convert f64 to Decimal (lossy; NaN and infinities become zero).
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub fn ton_to_f64(t: Ton) -> f64 {
    from_decimal(t.0)
}

pub fn ton_from_f64(v: f64) -> Ton {
    Ton(to_decimal(v))
}

/// JS timestamps arrive as f64 milliseconds (`Date.now()`).
/// Non-finite values map to 0; fractions are truncated.
pub fn millis_from_js(ms: f64) -> i64 {
    if ms.is_finite() {
        ms.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    } else {
        0
    }
}
