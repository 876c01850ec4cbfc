// Poisson Tap Generator - seedable, statistically validated
// Simulates a player's tapping as Poisson arrivals per simulated minute

use rand::Rng;
use rand_chacha::ChaCha8Rng;

const MINUTES_PER_DAY: u64 = 1_440;

pub struct TapTraffic {
    rng: ChaCha8Rng,
    pub tap_count: u64,
    /// Length of the daily play session, in minutes from midnight.
    session_minutes: u64,
}

impl TapTraffic {
    pub fn new(rng: ChaCha8Rng, session_minutes: u64) -> Self {
        Self { rng, tap_count: 0, session_minutes: session_minutes.min(MINUTES_PER_DAY) }
    }

    /// Whether `minute` (since start) falls inside the daily session.
    pub fn in_session(&self, minute: u64) -> bool {
        minute % MINUTES_PER_DAY < self.session_minutes
    }

    /// Number of taps during one simulated minute.
    /// `taps_per_minute` is the expected rate while the player is in session.
    pub fn generate_minute(&mut self, minute: u64, taps_per_minute: f64) -> u32 {
        if !self.in_session(minute) || taps_per_minute <= 0.0 {
            return 0;
        }
        let n = poisson_sample(&mut self.rng, taps_per_minute);
        self.tap_count += n as u64;
        n
    }
}

/// Poisson sampling via Knuth algorithm.
/// For λ < 30, uses direct method. For larger λ, uses normal approximation.
fn poisson_sample(rng: &mut ChaCha8Rng, lambda: f64) -> u32 {
    if lambda < 30.0 {
        let l = (-lambda).exp();
        let mut k: u32 = 0;
        let mut p: f64 = 1.0;
        loop {
            k += 1;
            p *= rng.gen::<f64>();
            if p <= l {
                return k - 1;
            }
        }
    } else {
        let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
        let u2: f64 = rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        let result = lambda + lambda.sqrt() * z;
        result.round().max(0.0) as u32
    }
}
