//! Logging backend for omero-login.
//!
//! Routes `log::info!()` and friends to stderr, or to a file when one is
//! given. The level comes from `--log-level`, else the DEBUG_LEVEL
//! environment variable:
//! - 0 or unset: Warnings and errors only
//! - 1: Errors only
//! - 2: Info level (profile loading, sealed credentials)
//! - 3: Debug level (host parsing, argument handling)
//! - 4: Trace level
//!
//! stdout is left to the credential summary so it can be piped.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use log::{LevelFilter, Log, Metadata, Record};

/// Log level selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Map a DEBUG_LEVEL value to a level filter.
pub fn level_from_debug_level(value: Option<&str>) -> LevelFilter {
    match value.and_then(|v| v.trim().parse::<u8>().ok()) {
        Some(1) => LevelFilter::Error,
        Some(2) => LevelFilter::Info,
        Some(3) => LevelFilter::Debug,
        Some(4) => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

struct LogBridge {
    level: LevelFilter,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let mut sink = self.sink.lock();
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

static LOGGER: OnceLock<LogBridge> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the logger. Only the first call has any effect.
///
/// `cli_level` takes precedence over DEBUG_LEVEL. If `log_file` cannot be
/// opened, output falls back to stderr.
pub fn init_log_bridge(cli_level: Option<LogLevel>, log_file: Option<&Path>) {
    let level = match cli_level {
        Some(level) => level.into(),
        None => level_from_debug_level(std::env::var("DEBUG_LEVEL").ok().as_deref()),
    };

    let logger = LOGGER.get_or_init(|| {
        let sink: Box<dyn Write + Send> = match log_file.map(|path| {
            OpenOptions::new().create(true).append(true).open(path)
        }) {
            Some(Ok(file)) => Box::new(file),
            Some(Err(e)) => {
                eprintln!("omero-login: cannot open log file, using stderr: {e}");
                Box::new(std::io::stderr())
            }
            None => Box::new(std::io::stderr()),
        };
        LogBridge {
            level,
            sink: Mutex::new(sink),
        }
    });

    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_level_mapping() {
        assert_eq!(level_from_debug_level(None), LevelFilter::Warn);
        assert_eq!(level_from_debug_level(Some("0")), LevelFilter::Warn);
        assert_eq!(level_from_debug_level(Some("1")), LevelFilter::Error);
        assert_eq!(level_from_debug_level(Some(" 3 ")), LevelFilter::Debug);
        assert_eq!(level_from_debug_level(Some("4")), LevelFilter::Trace);
        assert_eq!(level_from_debug_level(Some("loud")), LevelFilter::Warn);
    }

    #[test]
    fn test_cli_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::Info);
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
    }
}
