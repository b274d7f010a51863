//! Compatibility bridge for the Rust `log` crate.
//!
//! [`LogBridge`] implements `log::Log` and forwards records to a
//! [`LogClient`], so code written against the `log` facade reaches the
//! daemon. The client reports its own problems through `log` as well; those
//! records are recognised by target and written to standard error instead of
//! being fed back into the client.

use std::borrow::Cow;

use log::{Metadata, Record, SetLoggerError};

use crate::{client::LogClient, global, level::LogLevel};

/// Target prefix of diagnostics emitted by this crate.
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

fn map_log_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Trace | log::Level::Debug => LogLevel::Debug,
        log::Level::Info => LogLevel::Info,
        log::Level::Warn => LogLevel::Warning,
        log::Level::Error => LogLevel::Error,
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        map_log_level(level)
    }
}

fn normalise_target(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

fn is_own_diagnostic(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// Own diagnostics are emitted while the client lock is held, so they are
/// filtered by a fixed threshold rather than the client's minimum level.
fn own_diagnostic_enabled(level: log::Level) -> bool {
    level <= log::Level::Warn
}

/// Adapter implementing the Rust `log::Log` trait over a [`LogClient`].
#[derive(Debug)]
pub struct LogBridge {
    client: &'static LogClient,
    target_names: bool,
}

impl LogBridge {
    /// Forward records to `client` under its default name.
    pub fn new(client: &'static LogClient) -> Self {
        Self {
            client,
            target_names: false,
        }
    }

    /// Use each record's target, with `::` replaced by `.`, as the source
    /// name instead of the client's default name.
    pub fn with_target_names(mut self, enabled: bool) -> Self {
        self.target_names = enabled;
        self
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        if is_own_diagnostic(metadata.target()) {
            return own_diagnostic_enabled(metadata.level());
        }
        self.client.is_enabled_for(map_log_level(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if is_own_diagnostic(record.target()) {
            if !own_diagnostic_enabled(record.level()) {
                return;
            }
            eprintln!("{OWN_TARGET}: [{}] {}", record.level(), record.args());
            return;
        }
        let level = map_log_level(record.level());
        if !self.client.is_enabled_for(level) {
            return;
        }
        let text = record.args().to_string();
        if self.target_names {
            let name = normalise_target(record.target());
            self.client.log(level, &text, Some(name.as_ref()));
        } else {
            self.client.log(level, &text, None);
        }
    }

    fn flush(&self) {
        self.client.retry_backlog();
    }
}

/// Install a [`LogBridge`] over the process-wide client as the `log` backend.
///
/// The `log` max level is opened fully; each record is checked against the
/// client's minimum level when it arrives, so later
/// [`set_min_log_level`](LogClient::set_min_log_level) calls take effect.
pub fn install_log_bridge() -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(global::logger())))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
