//! Caller-facing handle of the background dispatcher.

use std::{ops::Deref, thread, time::Duration};

use crossbeam_channel::Sender;
use log::warn;
use parking_lot::Mutex;

use crate::{
    client::LogClient, frame::LoggerType, level::LogLevel,
    rate_limited_warner::RateLimitedWarner,
};

use super::{
    BackgroundConfig, BuildError, Dispatch,
    worker::{Command, enqueue, flush_queue, spawn_worker},
};

/// Queue-backed handle forwarding requests to a worker-owned [`LogClient`].
pub struct BackgroundClient {
    tx: Option<Sender<Command>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    warner: RateLimitedWarner,
    flush_timeout: Duration,
}

impl BackgroundClient {
    /// Start a worker driving `client`.
    ///
    /// `client` may be an `Arc<LogClient>` or the process-wide
    /// `&'static LogClient`.
    pub fn spawn<C>(client: C, config: BackgroundConfig) -> Result<Self, BuildError>
    where
        C: Deref<Target = LogClient> + Send + 'static,
    {
        if config.capacity == 0 {
            return Err(BuildError::InvalidConfig(
                "capacity must be greater than zero".into(),
            ));
        }
        let (tx, handle) = spawn_worker(client, config.capacity)?;
        Ok(Self {
            tx: Some(tx),
            handle: Mutex::new(Some(handle)),
            warner: RateLimitedWarner::new(config.warn_interval),
            flush_timeout: config.flush_timeout,
        })
    }

    pub fn register_logger(&self, logger_type: LoggerType) -> Dispatch {
        self.submit(Command::Register {
            logger_type,
            name: None,
        })
    }

    pub fn register_logger_named(&self, logger_type: LoggerType, name: &str) -> Dispatch {
        self.submit(Command::Register {
            logger_type,
            name: Some(name.to_owned()),
        })
    }

    /// Queue `text` at `level`, under `name` or the client's default name.
    pub fn log(&self, level: LogLevel, text: &str, name: Option<&str>) -> Dispatch {
        self.submit(Command::Log {
            level,
            text: text.to_owned(),
            name: name.map(str::to_owned),
        })
    }

    pub fn debug(&self, text: &str) -> Dispatch {
        self.log(LogLevel::Debug, text, None)
    }

    pub fn info(&self, text: &str) -> Dispatch {
        self.log(LogLevel::Info, text, None)
    }

    pub fn warning(&self, text: &str) -> Dispatch {
        self.log(LogLevel::Warning, text, None)
    }

    pub fn error(&self, text: &str) -> Dispatch {
        self.log(LogLevel::Error, text, None)
    }

    pub fn fatal(&self, text: &str) -> Dispatch {
        self.log(LogLevel::Fatal, text, None)
    }

    /// Wait for queued requests to be processed and the backlog retried.
    ///
    /// Returns `false` when the handle is closed, the worker does not answer
    /// within the flush timeout, or frames remain in the client's backlog.
    pub fn flush(&self) -> bool {
        let Some(tx) = self.tx.as_ref() else {
            return false;
        };
        self.warner.flush(|count| {
            warn!("dispatch queue dropped {count} requests in the last interval");
        });
        flush_queue(tx, self.flush_timeout)
    }

    /// Stop the worker after it drains the queue, then join it.
    pub fn close(&mut self) {
        self.request_shutdown();
        self.join_worker();
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_none()
    }

    fn submit(&self, cmd: Command) -> Dispatch {
        let Some(tx) = self.tx.as_ref() else {
            self.warner.record_drop();
            self.warner.warn_if_due(|count| {
                warn!("BackgroundClient dropped {count} requests after shutdown");
            });
            return Dispatch::Closed;
        };
        enqueue(tx, cmd, &self.warner)
    }

    fn request_shutdown(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if tx.send(Command::Shutdown(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.recv_timeout(self.flush_timeout);
    }

    fn join_worker(&mut self) {
        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("BackgroundClient: worker thread panicked");
        }
    }
}

impl Drop for BackgroundClient {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for BackgroundClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundClient")
            .field("closed", &self.is_closed())
            .field("flush_timeout", &self.flush_timeout)
            .finish()
    }
}
