//! In-process stand-in for the logging daemon.
//!
//! Binds a real Unix-domain listener, accepts any number of connections, and
//! forwards every decoded frame to a channel so tests can assert on what the
//! client actually wrote.

use std::{
    io,
    os::unix::net::UnixListener,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, unbounded};

use crate::frame::{Frame, FrameReader};
use crate::level::LogLevel;

/// Listener that records frames written by clients.
#[derive(Debug)]
pub struct FakeDaemon {
    path: PathBuf,
    frames: Receiver<Frame>,
    connections: Arc<AtomicUsize>,
}

impl FakeDaemon {
    /// Bind a listener at `path` and start accepting connections.
    pub fn bind(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let listener = UnixListener::bind(&path)?;
        let (tx, frames) = unbounded();
        let connections = Arc::new(AtomicUsize::new(0));
        let accepted = Arc::clone(&connections);
        thread::Builder::new()
            .name("fake-log-daemon".into())
            .spawn(move || {
                for stream in listener.incoming() {
                    let Ok(stream) = stream else {
                        break;
                    };
                    accepted.fetch_add(1, Ordering::SeqCst);
                    let tx = tx.clone();
                    thread::spawn(move || {
                        for frame in FrameReader::new(stream) {
                            let Ok(frame) = frame else {
                                break;
                            };
                            if tx.send(frame).is_err() {
                                break;
                            }
                        }
                    });
                }
            })?;
        Ok(Self {
            path,
            frames,
            connections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of connections accepted so far.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Wait up to `timeout` for the next frame.
    pub fn recv(&self, timeout: Duration) -> Option<Frame> {
        self.frames.recv_timeout(timeout).ok()
    }

    /// Collect `count` frames, giving up once `timeout` has elapsed overall.
    pub fn recv_many(&self, count: usize, timeout: Duration) -> Vec<Frame> {
        let deadline = Instant::now() + timeout;
        let mut frames = Vec::with_capacity(count);
        while frames.len() < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.frames.recv_timeout(remaining) {
                Ok(frame) => frames.push(frame),
                Err(_) => break,
            }
        }
        frames
    }

    /// `true` if no frame arrives within `wait`.
    pub fn is_quiet(&self, wait: Duration) -> bool {
        self.frames.recv_timeout(wait).is_err()
    }
}

impl Drop for FakeDaemon {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Text of a `LOG_MESSAGE` frame, or `None` for registrations.
pub fn message_text(frame: &Frame) -> Option<&str> {
    match frame {
        Frame::LogMessage { text, .. } => Some(text),
        Frame::NewLogger { .. } => None,
    }
}

/// Shorthand for building an expected `LOG_MESSAGE` frame.
pub fn log_frame(name: &str, text: &str, level: LogLevel) -> Frame {
    Frame::LogMessage {
        name: name.into(),
        text: text.into(),
        level,
    }
}
