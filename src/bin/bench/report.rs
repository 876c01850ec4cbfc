// Benchmark Report Types
// Structured output for offline analysis of player economies

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub seed: u64,
    pub pass: bool,
    pub taps: u64,
    pub final_level: u32,
    pub final_multiplier: f64,
    pub final_available: f64,
    pub final_staked: f64,
    pub final_total: f64,
    pub withdrawn: f64,
    pub yield_accrued: f64,
    pub ticks_fired: u64,
    pub strategy_changes: u32,
    pub conservation_violations: u32,
    pub invariant_breaches: u32,
    pub elapsed_ms: f64,
}

// ─── Aggregated Scenario Report ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub runs: usize,
    pub pass_rate: f64,
    pub final_total: Stats,
    pub yield_accrued: Stats,
    pub final_level: Stats,
    pub withdrawn: Stats,
    pub taps: Stats,
    pub elapsed_ms: Stats,
    pub results: Vec<BenchResult>,
}

// ─── Strategy Comparison ────────────────────────────────────────────────────

/// Mean yield of the three single-strategy scenarios under identical traffic.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyComparison {
    pub aggressive_yield: f64,
    pub balanced_yield: f64,
    pub conservative_yield: f64,
    /// Aggressive > balanced > conservative.
    pub ordering_holds: bool,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub simulated_days: u64,
    pub summary: Summary,
    pub strategy_comparison: Option<StrategyComparison>,
    pub scenarios: Vec<ScenarioReport>,
}
