// Hourly JSONL Time Series Recorder
// Outputs one JSON line per simulated hour for independent analysis

use reton_engine::adapter::{from_decimal, ton_to_f64};
use reton_engine::{SimSnapshot, SimStats};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct HourSnapshot {
    pub minute: u64,
    pub available: f64,
    pub staked: f64,
    pub total: f64,
    pub multiplier: f64,
    pub level: u32,
    pub progress: u32,
    pub strategy: &'static str,
    pub yield_rate: f64,
    pub taps: u64,
    pub yield_accrued: f64,
}

impl HourSnapshot {
    pub fn from_state(minute: u64, snap: &SimSnapshot, stats: &SimStats) -> Self {
        Self {
            minute,
            available: ton_to_f64(snap.available),
            staked: ton_to_f64(snap.staked),
            total: ton_to_f64(snap.total),
            multiplier: from_decimal(snap.multiplier),
            level: snap.level,
            progress: snap.progress,
            strategy: snap.strategy.as_str(),
            yield_rate: from_decimal(snap.yield_rate),
            taps: stats.taps,
            yield_accrued: ton_to_f64(stats.yield_accrued),
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<HourSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, minute: u64, snap: &SimSnapshot, stats: &SimStats) {
        self.snapshots.push(HourSnapshot::from_state(minute, snap, stats));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        for snapshot in &self.snapshots {
            serde_json::to_writer(&mut file, snapshot)?;
            writeln!(file)?;
        }
        file.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
