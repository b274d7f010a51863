//! The transport client shared by every caller in the process.

use std::{collections::HashSet, path::PathBuf, time::Duration};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::{
    frame::{LoggerType, encode_log_message, encode_new_logger},
    level::LogLevel,
    rate_limited_warner::RateLimitedWarner,
};

use super::{
    backlog::Backlog,
    config::{ClientConfig, ConfigError},
    delivery::{Delivery, Rejection},
    transport::{ActiveConnection, ConnectError, connect_endpoint},
};

/// Mutable state guarded by the client's single lock.
#[derive(Debug)]
struct ClientState {
    /// `Some` while connected.
    connection: Option<ActiveConnection>,
    backlog: Backlog,
    registered: HashSet<String>,
    min_level: LogLevel,
    default_name: String,
}

/// Client delivering registration and log frames to the local daemon.
///
/// Every operation runs on the calling thread and may block on socket I/O.
/// Frames produced while the daemon is unreachable are kept in a bounded
/// backlog and replayed, oldest first, by the next call that finds a working
/// connection. Nothing here ever returns an error or panics because the
/// daemon is missing.
pub struct LogClient {
    state: Mutex<ClientState>,
    socket_path: PathBuf,
    strict_registration: bool,
    write_timeout: Option<Duration>,
    warner: RateLimitedWarner,
}

impl LogClient {
    /// Validate `config`, then build a client as [`new`](Self::new) does.
    pub fn try_new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Build a client and make one connection attempt.
    ///
    /// `config` is not validated; a zero capacity yields a client that drops
    /// every frame while disconnected. Use [`try_new`](Self::try_new) to
    /// reject such settings.
    pub fn new(config: ClientConfig) -> Self {
        let ClientConfig {
            socket_path,
            capacity,
            min_level,
            default_name,
            strict_registration,
            write_timeout,
            warn_interval,
        } = config;
        let client = Self {
            state: Mutex::new(ClientState {
                connection: None,
                backlog: Backlog::new(capacity),
                registered: HashSet::new(),
                min_level,
                default_name,
            }),
            socket_path,
            strict_registration,
            write_timeout,
            warner: RateLimitedWarner::new(warn_interval),
        };
        {
            let mut state = client.state.lock();
            client.ensure_connected(&mut state);
        }
        client
    }

    /// Replace the name used by calls that do not pass one.
    pub fn set_default_name(&self, name: impl Into<String>) {
        self.state.lock().default_name = name.into();
    }

    /// Deprecated alias of [`set_default_name`](Self::set_default_name).
    #[deprecated(note = "use set_default_name")]
    pub fn set_name(&self, name: impl Into<String>) {
        warn!("set_name is deprecated; use set_default_name");
        self.set_default_name(name);
    }

    pub fn default_name(&self) -> String {
        self.state.lock().default_name.clone()
    }

    /// Discard messages below `level` from now on. `Fatal` is never discarded.
    pub fn set_min_log_level(&self, level: LogLevel) {
        self.state.lock().min_level = level;
    }

    pub fn min_log_level(&self) -> LogLevel {
        self.state.lock().min_level
    }

    /// Whether a log message at `level` would currently be serialised.
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level.passes(self.min_log_level())
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock().connection.is_some()
    }

    /// Number of frames waiting for the daemon.
    pub fn backlog_len(&self) -> usize {
        self.state.lock().backlog.len()
    }

    pub fn strict_registration(&self) -> bool {
        self.strict_registration
    }

    /// Whether `name` has been registered through this client.
    pub fn is_registered(&self, name: &str) -> bool {
        self.state.lock().registered.contains(name)
    }

    pub fn socket_path(&self) -> &std::path::Path {
        &self.socket_path
    }

    /// Register the default name with the daemon under `logger_type`.
    pub fn register_logger(&self, logger_type: LoggerType) -> Delivery {
        self.register(logger_type, None)
    }

    /// Register `name` with the daemon under `logger_type`.
    pub fn register_logger_named(&self, logger_type: LoggerType, name: &str) -> Delivery {
        self.register(logger_type, Some(name))
    }

    fn register(&self, logger_type: LoggerType, name: Option<&str>) -> Delivery {
        let mut state = self.state.lock();
        let name = name.map_or_else(|| state.default_name.clone(), str::to_owned);
        if name.is_empty() {
            warn!("no logger name is specified; registration ignored");
            return Delivery::Rejected(Rejection::EmptyName);
        }
        let frame = match encode_new_logger(&name, logger_type) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("cannot register logger {name:?}: {err}");
                return Delivery::Rejected(Rejection::Encoding(err));
            }
        };
        let outcome = self.send(&mut state, frame);
        if self.strict_registration {
            state.registered.insert(name);
        }
        outcome
    }

    /// Emit `text` at `level` under `name`.
    pub fn emit(&self, name: &str, level: LogLevel, text: &str) -> Delivery {
        self.log(level, text, Some(name))
    }

    /// Emit `text` at `level`, under `name` or the default name when `None`.
    pub fn log(&self, level: LogLevel, text: &str, name: Option<&str>) -> Delivery {
        let mut state = self.state.lock();
        if !level.passes(state.min_level) {
            return Delivery::Filtered;
        }
        let frame = {
            let name = name.unwrap_or(state.default_name.as_str());
            if name.is_empty() {
                warn!("name is empty; call set_default_name or register_logger first");
                return Delivery::Rejected(Rejection::EmptyName);
            }
            if self.strict_registration && !state.registered.contains(name) {
                warn!("{name} has no loggers registered");
                return Delivery::Rejected(Rejection::Unregistered(name.to_owned()));
            }
            match encode_log_message(name, text, level) {
                Ok(frame) => frame,
                Err(err) => {
                    warn!("cannot encode message for {name:?}: {err}");
                    return Delivery::Rejected(Rejection::Encoding(err));
                }
            }
        };
        self.send(&mut state, frame)
    }

    pub fn debug(&self, text: &str) -> Delivery {
        self.log(LogLevel::Debug, text, None)
    }

    pub fn info(&self, text: &str) -> Delivery {
        self.log(LogLevel::Info, text, None)
    }

    pub fn warning(&self, text: &str) -> Delivery {
        self.log(LogLevel::Warning, text, None)
    }

    pub fn error(&self, text: &str) -> Delivery {
        self.log(LogLevel::Error, text, None)
    }

    pub fn fatal(&self, text: &str) -> Delivery {
        self.log(LogLevel::Fatal, text, None)
    }

    pub fn debug_named(&self, text: &str, name: &str) -> Delivery {
        self.log(LogLevel::Debug, text, Some(name))
    }

    pub fn info_named(&self, text: &str, name: &str) -> Delivery {
        self.log(LogLevel::Info, text, Some(name))
    }

    pub fn warning_named(&self, text: &str, name: &str) -> Delivery {
        self.log(LogLevel::Warning, text, Some(name))
    }

    pub fn error_named(&self, text: &str, name: &str) -> Delivery {
        self.log(LogLevel::Error, text, Some(name))
    }

    pub fn fatal_named(&self, text: &str, name: &str) -> Delivery {
        self.log(LogLevel::Fatal, text, Some(name))
    }

    /// Try to deliver the backlog without sending anything new.
    ///
    /// Returns `true` when the backlog is empty afterwards.
    pub fn retry_backlog(&self) -> bool {
        let mut state = self.state.lock();
        self.ensure_connected(&mut state);
        self.warner.flush(|count| {
            warn!("backlog full; dropped {count} frames");
        });
        if state.connection.is_some() {
            self.flush_backlog(&mut state);
        }
        state.backlog.is_empty()
    }

    fn ensure_connected(&self, state: &mut ClientState) {
        if state.connection.is_some() {
            return;
        }
        match connect_endpoint(&self.socket_path, self.write_timeout) {
            Ok(connection) => {
                debug!("connected to log daemon at {}", self.socket_path.display());
                state.connection = Some(connection);
            }
            Err(err @ ConnectError::Missing(_)) => debug!("{err}"),
            Err(err) => warn!("{err}"),
        }
    }

    /// Deliver `frame`, replaying any backlog ahead of it.
    fn send(&self, state: &mut ClientState, frame: Vec<u8>) -> Delivery {
        self.ensure_connected(state);
        if state.connection.is_none() || !self.flush_backlog(state) {
            return self.enqueue(state, frame);
        }
        let Some(connection) = state.connection.as_mut() else {
            return self.enqueue(state, frame);
        };
        match connection.write_frame(&frame) {
            Ok(()) => Delivery::Sent,
            Err(err) => {
                warn!("could not send frame: {err}");
                state.connection = None;
                self.enqueue(state, frame)
            }
        }
    }

    /// Write queued frames in order, removing each only once written.
    ///
    /// Stops and disconnects at the first failed write.
    fn flush_backlog(&self, state: &mut ClientState) -> bool {
        while let Some(frame) = state.backlog.front() {
            let Some(connection) = state.connection.as_mut() else {
                return false;
            };
            if let Err(err) = connection.write_frame(frame) {
                warn!(
                    "could not replay backlog ({} frames left): {err}",
                    state.backlog.len()
                );
                state.connection = None;
                return false;
            }
            state.backlog.pop_front();
        }
        true
    }

    fn enqueue(&self, state: &mut ClientState, frame: Vec<u8>) -> Delivery {
        if state.backlog.push(frame) {
            debug!(
                "storing frame for later delivery ({}/{})",
                state.backlog.len(),
                state.backlog.capacity()
            );
            return Delivery::Buffered;
        }
        self.warner.record_drop();
        self.warner.warn_if_due(|count| {
            warn!("backlog full; dropped {count} frames");
        });
        Delivery::Dropped
    }
}

impl std::fmt::Debug for LogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogClient")
            .field("socket_path", &self.socket_path)
            .field("strict_registration", &self.strict_registration)
            .field("write_timeout", &self.write_timeout)
            .finish()
    }
}
