//! Leveled progress reporting, following this workspace's own
//! `report-to-stderr` / `report-allow-override` feature convention: a tiny,
//! dependency-light reporter rather than pulling in the `log`/`env_logger`
//! stack, compiled out entirely when the `report-to-stderr` feature is
//! disabled.
//!
//! `WalkForward` and `allExtensions` are the two operations in this crate
//! that can do an unbounded amount of work on a pathological graph (a long
//! unbranching stretch, a large requested extension length); both report a
//! single `Trace` line with the resulting path length through this module.

use std::time::Instant;

/// Severity of a reported line, in increasing order of urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Info,
    Warn,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Info => "info",
            Level::Warn => "warn",
        }
    }
}

#[cfg(feature = "report-to-stderr")]
pub fn report(level: Level, msg: impl std::fmt::Display) {
    eprintln!("[{}] {}", level.tag(), msg);
}

#[cfg(not(feature = "report-to-stderr"))]
pub fn report(_level: Level, _msg: impl std::fmt::Display) {}

pub fn trace(msg: impl std::fmt::Display) {
    report(Level::Trace, msg);
}

pub fn info(msg: impl std::fmt::Display) {
    report(Level::Info, msg);
}

pub fn warn(msg: impl std::fmt::Display) {
    report(Level::Warn, msg);
}

/// Times a closure, matching the `let (result, time) = measure(...)` idiom
/// used throughout this workspace's `main.rs`/io-loading code.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, chrono::Duration) {
    let start = Instant::now();
    let result = f();
    let elapsed = chrono::Duration::from_std(start.elapsed()).unwrap_or_else(|_| chrono::Duration::zero());
    (result, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_returns_the_closures_result() {
        let (value, _time) = measure(|| 2 + 2);
        assert_eq!(value, 4);
    }
}
