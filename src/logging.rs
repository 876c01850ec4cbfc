// Copyright 2026 Hypermesh Foundation. All rights reserved.
// reTON Tap Simulation - Logging

//! `log` backend for the browser. Compiled for wasm32 only; native binaries
//! install `env_logger` instead.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// One console line per record.
pub fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("[{level} {target}] {message}")
}

/// Logger writing to the browser console.
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        emit(record.level(), &line);
    }

    fn flush(&self) {}
}

fn emit(level: Level, line: &str) {
    match level {
        Level::Error => console_error(line),
        Level::Warn => console_warn(line),
        _ => console_log(line),
    }
}

static CONSOLE: ConsoleLogger = ConsoleLogger::new(LevelFilter::Info);

/// Install the console logger. Later calls are no-ops.
pub fn init() {
    if log::set_logger(&CONSOLE).is_ok() {
        log::set_max_level(CONSOLE.max_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn line_format() {
        assert_eq!(
            format_line(Level::Info, "reton_engine::simulation", "level up"),
            "[INFO reton_engine::simulation] level up"
        );
    }

    #[wasm_bindgen_test]
    fn filters_below_max_level() {
        let logger = ConsoleLogger::new(LevelFilter::Info);
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }

    #[wasm_bindgen_test]
    fn init_is_idempotent() {
        init();
        init();
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
