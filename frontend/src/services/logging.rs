use shared::{LogConfig, LogLevel};
use std::cell::Cell;

thread_local! {
    static MIN_LEVEL: Cell<LogLevel> = Cell::new(LogLevel::Info);
}

pub struct Logger;

impl Logger {
    /// Apply the page's log configuration. Called once during boot.
    pub fn init(config: &LogConfig) {
        MIN_LEVEL.with(|level| level.set(config.min_level));
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    pub fn enabled(level: LogLevel) -> bool {
        level >= MIN_LEVEL.with(Cell::get)
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        let line = format!("[{}] {}", component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_level_threshold() {
        Logger::init(&LogConfig { min_level: LogLevel::Warn });
        assert!(!Logger::enabled(LogLevel::Info));
        assert!(Logger::enabled(LogLevel::Warn));
        assert!(Logger::enabled(LogLevel::Error));

        Logger::init(&LogConfig::default());
        assert!(Logger::enabled(LogLevel::Info));
        assert!(!Logger::enabled(LogLevel::Debug));
    }
}
