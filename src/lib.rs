//! Client for a local logging daemon listening on a Unix-domain socket.
//!
//! Processes register named log sources and emit leveled messages through a
//! [`LogClient`]. Delivery is best effort: while the daemon is absent, frames
//! wait in a bounded backlog and are replayed in order once a later call finds
//! the socket. Logging never fails or panics because the daemon is missing.
//!
//! ```rust,no_run
//! use loglib::{LoggerType, logger};
//!
//! let client = logger();
//! client.set_default_name("billing");
//! client.register_logger(LoggerType::new(0));
//! client.info("service started");
//! ```

#[cfg(not(unix))]
compile_error!("loglib requires Unix-domain socket support");

pub mod background;
pub mod client;
pub mod file_config;
pub mod frame;
mod global;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
mod logging_macros;
pub mod rate_limited_warner;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use background::{BackgroundClient, BackgroundConfig, BuildError, Dispatch};
pub use client::{ClientConfig, ConfigError, Delivery, LogClient, Rejection};
pub use file_config::{load_client_config, parse_client_config};
pub use frame::{Frame, FrameError, FrameReader, LoggerType, RequestType, decode_frame};
pub use global::{InitError, init, logger, try_logger};
pub use level::LogLevel;
#[cfg(feature = "log-compat")]
pub use log_compat::{LogBridge, install_log_bridge};
