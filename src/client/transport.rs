//! Unix-domain socket transport to the daemon.

use std::{
    io::{self, Write},
    os::unix::net::UnixStream,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;

/// Reasons a connection attempt left the client disconnected.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The socket file has not been created yet, typically because the daemon
    /// is still starting.
    #[error("{} doesn't exist yet", .0.display())]
    Missing(PathBuf),
    #[error("could not connect to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Established stream to the daemon.
#[derive(Debug)]
pub struct ActiveConnection {
    stream: UnixStream,
}

impl ActiveConnection {
    /// Write one complete frame.
    pub fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.stream.write_all(frame)?;
        self.stream.flush()
    }
}

/// Connect to the socket at `path`.
///
/// The existence check runs first so a missing daemon is reported as
/// [`ConnectError::Missing`] rather than a generic I/O failure.
pub fn connect_endpoint(
    path: &Path,
    write_timeout: Option<Duration>,
) -> Result<ActiveConnection, ConnectError> {
    if !path.exists() {
        return Err(ConnectError::Missing(path.to_path_buf()));
    }
    let io_err = |source| ConnectError::Io {
        path: path.to_path_buf(),
        source,
    };
    let stream = UnixStream::connect(path).map_err(io_err)?;
    stream.set_write_timeout(write_timeout).map_err(io_err)?;
    Ok(ActiveConnection { stream })
}
