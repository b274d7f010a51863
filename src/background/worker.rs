//! Worker thread driving a [`LogClient`] on behalf of non-blocking callers.

use std::{ops::Deref, thread, time::Duration};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::warn;

use crate::{
    client::LogClient, frame::LoggerType, level::LogLevel,
    rate_limited_warner::RateLimitedWarner,
};

use super::Dispatch;

/// Commands processed by the worker thread.
#[derive(Debug)]
pub enum Command {
    Register {
        logger_type: LoggerType,
        name: Option<String>,
    },
    Log {
        level: LogLevel,
        text: String,
        name: Option<String>,
    },
    Flush(Sender<bool>),
    Shutdown(Sender<()>),
}

pub fn spawn_worker<C>(
    client: C,
    capacity: usize,
) -> std::io::Result<(Sender<Command>, thread::JoinHandle<()>)>
where
    C: Deref<Target = LogClient> + Send + 'static,
{
    let (tx, rx) = bounded(capacity);
    let handle = thread::Builder::new()
        .name("loglib-dispatch".into())
        .spawn(move || worker_loop(rx, client))?;
    Ok((tx, handle))
}

fn worker_loop<C>(rx: Receiver<Command>, client: C)
where
    C: Deref<Target = LogClient>,
{
    while let Ok(cmd) = rx.recv() {
        match cmd {
            Command::Register { logger_type, name } => {
                match name {
                    Some(name) => client.register_logger_named(logger_type, &name),
                    None => client.register_logger(logger_type),
                };
            }
            Command::Log { level, text, name } => {
                client.log(level, &text, name.as_deref());
            }
            Command::Flush(ack) => {
                let _ = ack.send(client.retry_backlog());
            }
            Command::Shutdown(ack) => {
                let _ = ack.send(());
                break;
            }
        }
    }
}

pub fn enqueue(tx: &Sender<Command>, cmd: Command, warner: &RateLimitedWarner) -> Dispatch {
    match tx.try_send(cmd) {
        Ok(()) => Dispatch::Queued,
        Err(TrySendError::Full(_)) => {
            warner.record_drop();
            warner.warn_if_due(|count| {
                warn!("dispatch queue full; dropped {count} requests");
            });
            Dispatch::QueueFull
        }
        Err(TrySendError::Disconnected(_)) => {
            warner.record_drop();
            warner.warn_if_due(|count| {
                warn!("dispatcher stopped; dropped {count} requests");
            });
            Dispatch::Closed
        }
    }
}

/// Ask the worker to retry the backlog and wait for its answer.
///
/// Returns `true` only if the worker acknowledged within `timeout` and the
/// backlog was empty afterwards.
pub fn flush_queue(tx: &Sender<Command>, timeout: Duration) -> bool {
    let (ack_tx, ack_rx) = bounded(1);
    if tx.send_timeout(Command::Flush(ack_tx), timeout).is_err() {
        return false;
    }
    ack_rx.recv_timeout(timeout).unwrap_or(false)
}
