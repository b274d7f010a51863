//! Resilient delivery of frames to the local logging daemon.
//!
//! [`LogClient`] owns the Unix-domain socket, filters by level, serialises
//! each request exactly once, and keeps a bounded backlog of frames produced
//! while the daemon is unreachable. Reconnection is opportunistic: every call
//! that needs the socket retries the connection first, and a successful
//! connection replays the backlog before anything new is written.

mod backlog;
mod config;
mod delivery;
mod log_client;
mod transport;


pub use config::{ClientConfig, ConfigError, DEFAULT_BACKLOG_CAPACITY, DEFAULT_SOCKET_PATH};
pub use delivery::{Delivery, Rejection};
pub use log_client::LogClient;
pub use transport::ConnectError;
