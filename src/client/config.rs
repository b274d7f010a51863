//! Configuration consumed by [`LogClient`](super::LogClient) at construction.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

use crate::{level::LogLevel, rate_limited_warner::DEFAULT_WARN_INTERVAL};

/// Well-known path of the daemon's listening socket.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/log_sock";
/// Default number of frames retained while the daemon is unreachable.
pub const DEFAULT_BACKLOG_CAPACITY: usize = 1024;

/// Errors raised while assembling a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid user supplied configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown configuration key {0:?}")]
    UnknownKey(String),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ini::ParseError),
}

/// Settings describing how a client reaches the daemon and buffers frames.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Filesystem path of the daemon's Unix-domain socket.
    pub socket_path: PathBuf,
    /// Maximum number of frames held in the backlog.
    pub capacity: usize,
    /// Messages below this level are discarded before serialisation.
    pub min_level: LogLevel,
    /// Name used when a call does not supply one.
    pub default_name: String,
    /// Require `NEW_LOGGER` before a name may emit messages.
    pub strict_registration: bool,
    /// Optional deadline applied to socket writes. `None` blocks indefinitely.
    pub write_timeout: Option<Duration>,
    /// Minimum spacing between backlog overflow warnings.
    pub warn_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            capacity: DEFAULT_BACKLOG_CAPACITY,
            min_level: LogLevel::default(),
            default_name: String::new(),
            strict_registration: false,
            write_timeout: None,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }
}

impl ClientConfig {
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = path.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    pub fn with_strict_registration(mut self, strict: bool) -> Self {
        self.strict_registration = strict;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn with_warn_interval(mut self, interval: Duration) -> Self {
        self.warn_interval = interval;
        self
    }

    /// Check the settings for values the client cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "capacity must be greater than zero".into(),
            ));
        }
        if self.socket_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "socket_path must not be empty".into(),
            ));
        }
        if self.write_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidConfig(
                "write_timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
