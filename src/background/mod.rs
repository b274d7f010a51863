//! Non-blocking front end for [`LogClient`](crate::client::LogClient).
//!
//! `BackgroundClient` places requests on a bounded queue consumed by a
//! dedicated worker thread, so the caller never waits on socket I/O. The
//! worker applies the client's usual filtering, validation and backlog policy;
//! when the queue itself is full, requests are dropped with a rate-limited
//! warning.

mod handle;
mod worker;

#[cfg(test)]
mod tests;

use std::{io, time::Duration};

use thiserror::Error;

use crate::rate_limited_warner::DEFAULT_WARN_INTERVAL;

pub use handle::BackgroundClient;

/// Default number of requests the dispatch queue holds.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
/// Default time `flush` and `close` wait for the worker.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings for [`BackgroundClient`].
#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    pub capacity: usize,
    pub flush_timeout: Duration,
    pub warn_interval: Duration,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }
}

impl BackgroundConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    pub fn with_warn_interval(mut self, interval: Duration) -> Self {
        self.warn_interval = interval;
        self
    }
}

/// Errors that may occur while starting a [`BackgroundClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid dispatcher configuration: {0}")]
    InvalidConfig(String),
    /// The worker thread could not be spawned.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result of handing a request to the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Queued,
    /// The queue was full and the request was discarded.
    QueueFull,
    /// The dispatcher has been closed.
    Closed,
}
