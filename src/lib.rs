// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation ("reTON")

pub mod adapter;
pub mod clock;
pub mod config;
pub mod conservation;
#[cfg(target_arch = "wasm32")]
pub mod logging;
pub mod money;
pub mod schedule;
pub mod simulation;
pub mod strategy;
pub mod types;

pub use clock::{Clock, ManualClock};
pub use config::{ConfigError, SimConfig};
pub use money::Ton;
pub use simulation::TapSimulation;
pub use strategy::{Strategy, StrategyError};
pub use types::*;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    fn alert(s: &str);
}

/// Blocking acknowledgment shown by the host.
fn acknowledge(message: &str) {
    #[cfg(target_arch = "wasm32")]
    alert(message);
    #[cfg(not(target_arch = "wasm32"))]
    log::info!("{message}");
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser-facing handle: one simulation plus the clock the page feeds.
#[wasm_bindgen]
pub struct TapEngine {
    sim: TapSimulation,
    clock: ManualClock,
}

/// Browser panic hook and console logger. Native hosts install their own
/// `log` backend (the bench uses `env_logger`).
fn install_hooks() {
    #[cfg(target_arch = "wasm32")]
    {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        logging::init();
    }
}

#[wasm_bindgen]
impl TapEngine {
    /// `now_ms` is the page's `Date.now()` at start.
    #[wasm_bindgen(constructor)]
    pub fn new(now_ms: f64) -> Self {
        install_hooks();
        let clock = ManualClock::new(adapter::millis_from_js(now_ms));
        let sim = TapSimulation::with_clock(clock.clone());
        Self { sim, clock }
    }

    /// Start from a partial config object, e.g. `{ tick_interval_ms: 1000 }`.
    pub fn with_config(now_ms: f64, config: JsValue) -> Result<TapEngine, JsValue> {
        install_hooks();
        let config: SimConfig = serde_wasm_bindgen::from_value(config)?;
        let clock = ManualClock::new(adapter::millis_from_js(now_ms));
        let sim = TapSimulation::with_config(config, clock.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { sim, clock })
    }

    /// Push the page clock and run the yield timer if due.
    /// Returns the yield settled by the timer, or 0.
    pub fn advance_clock(&mut self, now_ms: f64) -> f64 {
        self.clock.set(adapter::millis_from_js(now_ms));
        self.sim.pump().map(adapter::ton_to_f64).unwrap_or(0.0)
    }

    #[wasm_bindgen(js_name = tap)]
    pub fn js_tap(&mut self) -> JsValue {
        let outcome = self.sim.tap();
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = stake)]
    pub fn js_stake(&mut self) -> JsValue {
        let receipt = self.sim.stake();
        serde_wasm_bindgen::to_value(&receipt).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = unstake)]
    pub fn js_unstake(&mut self) -> JsValue {
        let receipt = self.sim.unstake();
        serde_wasm_bindgen::to_value(&receipt).unwrap_or(JsValue::NULL)
    }

    /// Shows the blocking acknowledgment and returns the withdrawn amount.
    #[wasm_bindgen(js_name = withdraw)]
    pub fn js_withdraw(&mut self) -> f64 {
        let receipt = self.sim.withdraw();
        acknowledge(&receipt.message());
        adapter::ton_to_f64(receipt.amount)
    }

    #[wasm_bindgen(js_name = setStrategy)]
    pub fn js_set_strategy(&mut self, name: &str) -> Result<(), JsValue> {
        self.sim
            .set_strategy_named(name)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = snapshot)]
    pub fn js_snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.sim.snapshot()).unwrap_or(JsValue::NULL)
    }

    /// Formatted strings for rendering.
    pub fn display(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.sim.snapshot().display()).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = stats)]
    pub fn js_stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.sim.stats()).unwrap_or(JsValue::NULL)
    }

    /// Strategy names and labels for the picker.
    pub fn strategies() -> JsValue {
        let options: Vec<(&str, &str)> = Strategy::ALL.iter().map(|s| (s.as_str(), s.label())).collect();
        serde_wasm_bindgen::to_value(&options).unwrap_or(JsValue::NULL)
    }

    pub fn total_balance(&self) -> f64 {
        adapter::ton_to_f64(self.sim.total_balance())
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    /// Cancel the yield timer; call before discarding the handle.
    pub fn dispose(&mut self) {
        self.sim.shutdown();
    }

    /// Reset simulation to initial state
    pub fn reset(&mut self) {
        self.sim.reset_state();
    }
}

impl TapEngine {
    /// Borrow the underlying simulation.
    pub fn simulation(&self) -> &TapSimulation {
        &self.sim
    }
}
