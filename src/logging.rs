#![cfg(feature = "std")]

use std::env;
use log::{self, LevelFilter, Metadata, Record};

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger with a level taken from `QBATTLE_LOG`.
/// Defaults to `info` if the variable is not set or invalid. Calling it twice
/// keeps the first logger.
pub fn init_logging() {
    init_logging_with(LevelFilter::Info);
}

/// Same as [`init_logging`] with a caller-chosen fallback level.
pub fn init_logging_with(default: LevelFilter) {
    let level = env::var("QBATTLE_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
