//! # linelog
//! Thread-safe leveled logger writing timestamped text lines to a file or
//! stdout.
//!
//! Each call emits exactly one line, tagged with a millisecond timestamp,
//! the severity level and a caller-supplied type string:
//!
//! ```text
//! [2026-08-06T12:01:33.412Z]-[info]-[main] server started
//! ```
//!
//! A single lock serializes the write path, so lines from concurrent
//! threads never interleave, and the sink is flushed after every line, so a
//! call returns only once its line is visible to readers of the sink.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! linelog = "0.1.0"
//! ```
//!
//! ```rust
//! use linelog::{Level, Logger};
//!
//! let logger = Logger::new(None); // no file: log to stdout
//! logger.log(Level::Info, "main", &["server started"]);
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//! Close the logger to flush buffered output and release the file.
//!
//! ```rust
//! use linelog::{Level, Logger};
//!
//! let logger = Logger::create("/tmp/linelog-doc.log").expect("Unable to create log file");
//! linelog::info!(logger, "server started", "port 8080");
//! logger.close().expect("Unable to close log file");
//! assert!(std::fs::read_to_string("/tmp/linelog-doc.log")
//!     .unwrap()
//!     .ends_with("server started : port 8080\n"));
//! ```
//!
//! The [`debug!`], [`info!`], [`error!`] and [`fatal!`] macros tag each line
//! with the calling module path; the equivalent [`Logger`] methods cannot
//! see their caller and tag with `"???"` instead. [`fatal!`] (and
//! [`Logger::fatal`]) exits the process with status 1 after logging.
//!
//! ## `log` facade
//! A logger can also serve as the global backend for the [`log`] crate's
//! macros:
//!
//! ```rust
//! use linelog::Logger;
//!
//! linelog::init_global(Logger::new(None)).unwrap();
//! log::info!("hello from the log facade");
//! ```

mod error;
mod level;
mod logger;

pub use error::Error;
pub use level::Level;
pub use logger::Logger;

use log::LevelFilter;

/// Adapter routing [`log`] facade records into a [`Logger`].
struct LineLogger {
    logger: Logger,
}

/// Folds the facade's five levels into the four line levels.
fn facade_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn | log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

const fn level_filter(level: Level) -> LevelFilter {
    match level {
        Level::Debug => LevelFilter::Trace,
        Level::Info => LevelFilter::Info,
        Level::Error | Level::Fatal => LevelFilter::Error,
    }
}

impl log::Log for LineLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        facade_level(metadata.level()) >= self.logger.level()
    }

    fn log(&self, record: &log::Record) {
        let message = record.args().to_string();
        self.logger
            .log(facade_level(record.level()), record.target(), &[&message]);
    }

    fn flush(&self) {}
}

/// Installs `logger` as the global backend for the [`log`] facade.
///
/// Facade levels fold into the line levels (`warn!` joins `info`, `trace!`
/// joins `debug`) and the record target — the calling module path unless
/// overridden — becomes the line's type tag. Fails if a global logger is
/// already installed.
pub fn init_global(logger: Logger) -> Result<(), log::SetLoggerError> {
    log::set_max_level(level_filter(logger.level()));
    log::set_boxed_logger(Box::new(LineLogger { logger }))
}

#[test]
fn test_facade_level_mapping() {
    assert_eq!(facade_level(log::Level::Error), Level::Error);
    assert_eq!(facade_level(log::Level::Warn), Level::Info);
    assert_eq!(facade_level(log::Level::Info), Level::Info);
    assert_eq!(facade_level(log::Level::Debug), Level::Debug);
    assert_eq!(facade_level(log::Level::Trace), Level::Debug);
}

#[test]
fn test_level_filter_mapping() {
    assert_eq!(level_filter(Level::Debug), LevelFilter::Trace);
    assert_eq!(level_filter(Level::Info), LevelFilter::Info);
    assert_eq!(level_filter(Level::Error), LevelFilter::Error);
    assert_eq!(level_filter(Level::Fatal), LevelFilter::Error);
}
