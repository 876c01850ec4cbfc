#![cfg(target_arch = "wasm32")]

use reton_engine::{DisplayState, SimSnapshot, TapEngine};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const START_MS: f64 = 1_700_000_000_000.0;

#[wasm_bindgen_test]
fn engine_taps_and_renders() {
    let mut engine = TapEngine::new(START_MS);
    for _ in 0..20 {
        engine.js_tap();
    }
    let display: DisplayState = serde_wasm_bindgen::from_value(engine.display()).unwrap();
    assert_eq!(display.available, "20.00");
    assert_eq!(display.multiplier, "x1.10");
    assert_eq!(display.level, "2");
}

#[wasm_bindgen_test]
fn advance_clock_drives_yield_timer() {
    let mut engine = TapEngine::new(START_MS);
    for _ in 0..20 {
        engine.js_tap();
    }
    engine.js_stake();
    assert_eq!(engine.advance_clock(START_MS + 30_000.0), 0.0);
    assert!(engine.advance_clock(START_MS + 60_000.0) > 0.0);
    let snap: SimSnapshot = serde_wasm_bindgen::from_value(engine.js_snapshot()).unwrap();
    assert!(snap.staked.0 > rust_decimal::Decimal::from(20));
}

#[wasm_bindgen_test]
fn set_strategy_rejects_unknown() {
    let mut engine = TapEngine::new(START_MS);
    assert!(engine.js_set_strategy("aggressive").is_ok());
    assert!(engine.js_set_strategy("moonshot").is_err());
    assert_eq!(engine.simulation().strategy().as_str(), "aggressive");
}

#[wasm_bindgen_test]
fn dispose_stops_timer() {
    let mut engine = TapEngine::new(START_MS);
    engine.dispose();
    assert!(!engine.is_running());
    assert_eq!(engine.advance_clock(START_MS + 3_600_000.0), 0.0);
}

fn js_object(value: serde_json::Value) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

#[wasm_bindgen_test]
fn with_config_validates() {
    let bad = js_object(serde_json::json!({ "progress_step": 0 }));
    assert!(TapEngine::with_config(START_MS, bad).is_err());
    let good = js_object(serde_json::json!({ "tick_interval_ms": 1000 }));
    let mut engine = TapEngine::with_config(START_MS, good).unwrap();
    // Nothing staked, so the tick fires but settles zero.
    assert_eq!(engine.advance_clock(START_MS + 1_000.0), 0.0);
    assert_eq!(engine.simulation().stats().ticks_fired, 1);
}
