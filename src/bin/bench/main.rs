// reTON Benchmark Runner - Monte Carlo player-economy scenarios
// Poisson tap traffic, seedable PRNG, per-hour audit trail
//
// Usage:
//   cargo run --release --bin bench                        # All scenarios, 30 runs, 7 days
//   cargo run --release --bin bench -- --runs 5            # Quick mode
//   cargo run --release --bin bench -- HODL                # Filter by name
//   cargo run --release --bin bench -- --time-series       # Enable JSONL output
//   RUST_LOG=debug cargo run --release --bin bench         # Verbose engine logs

mod monte_carlo;
mod report;
mod scenarios;
mod time_series;
mod traffic;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use report::*;
use scenarios::*;
use std::path::PathBuf;
use std::time::Instant;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "bench")]
#[command(about = "Monte Carlo benchmark of tap-to-earn player scenarios", long_about = None)]
#[command(version)]
struct Cli {
    /// Runs per scenario
    #[arg(long, default_value_t = 30)]
    runs: usize,

    /// Base PRNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Simulated days per run
    #[arg(long, default_value_t = 7)]
    days: u64,

    /// Write hourly JSONL time series per run
    #[arg(long)]
    time_series: bool,

    /// Output directory
    #[arg(long, default_value = "benchmark-results")]
    out: PathBuf,

    /// Only run scenarios whose name, label or category contains this
    filter: Option<String>,
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        bail!("no scenarios match filter: {:?}", cli.filter);
    }

    let ts_dir = cli.time_series.then(|| cli.out.join("time-series"));

    println!("\n  reTON Benchmark Runner v{}", env!("CARGO_PKG_VERSION"));
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Days: {} | Base seed: {}",
        cli.runs, cli.days, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<36} {:>5} {:>12} {:>10} {:>7} {:>10} {:>7}",
        "Scenario", "Pass%", "Total", "Yield", "Level", "Withdrawn", "Time");
    println!("  {}", "-".repeat(94));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(
            scenario,
            cli.runs,
            cli.seed,
            cli.days,
            ts_dir.as_deref(),
        )?;

        let pass_pct = report.pass_rate * 100.0;
        let status = if report.pass_rate >= 1.0 { "PASS" } else { "FAIL" };

        println!("  {:<36} {:>4}% {:>12.2} {:>10.4} {:>7.1} {:>10.2} {:>5.0}ms  {}",
            report.label,
            pass_pct as u32,
            report.final_total.mean,
            report.yield_accrued.mean,
            report.final_level.mean,
            report.withdrawn.mean,
            report.elapsed_ms.mean,
            status,
        );
        info!("{}: {} runs, pass rate {:.3}", report.scenario_name, report.runs, report.pass_rate);

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Strategy Comparison ────────────────────────────────────────────

    let strategy_comparison = monte_carlo::compare_strategies(&mc_reports);

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= 1.0).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(94));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    if let Some(cmp) = &strategy_comparison {
        println!("  Strategy Yield (mean over {} days):", cli.days);
        println!("    Aggressive:   {:.4}", cmp.aggressive_yield);
        println!("    Balanced:     {:.4}", cmp.balanced_yield);
        println!("    Conservative: {:.4}", cmp.conservative_yield);
        println!("    Ordering:     {}\n", if cmp.ordering_holds { "PASS" } else { "FAIL" });
    }

    // ─── Write JSON Report ──────────────────────────────────────────────

    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        simulated_days: cli.days,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        strategy_comparison: strategy_comparison.clone(),
        scenarios: mc_reports,
    };

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;
    let path = cli.out.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("  Results saved to: {}\n", path.display());

    let ordering_failed = strategy_comparison.map_or(false, |c| !c.ordering_holds);
    if failed > 0 || ordering_failed {
        std::process::exit(1);
    }
    Ok(())
}
