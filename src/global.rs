//! Process-wide client instance.
//!
//! The client is created on first use and lives until the process exits; any
//! frames still in its backlog at that point are lost. Call [`init`] before
//! the first [`logger`] call to construct it from a custom configuration.

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::client::{ClientConfig, ConfigError, LogClient};

static CLIENT: OnceCell<LogClient> = OnceCell::new();

/// Reasons [`init`] did not install a client.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("the process-wide log client is already initialised")]
    AlreadyInitialised,
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Process-wide client, built with [`ClientConfig::default`] if [`init`] was
/// not called first.
pub fn logger() -> &'static LogClient {
    CLIENT.get_or_init(|| LogClient::new(ClientConfig::default()))
}

/// Construct the process-wide client from `config`.
///
/// The configuration is validated first. Fails without side effects if it is
/// invalid or if the client already exists, whether from an earlier `init` or
/// a call to [`logger`].
pub fn init(config: ClientConfig) -> Result<&'static LogClient, InitError> {
    config.validate()?;
    let mut created = false;
    let client = CLIENT.get_or_init(|| {
        created = true;
        LogClient::new(config)
    });
    if created {
        Ok(client)
    } else {
        Err(InitError::AlreadyInitialised)
    }
}

/// The process-wide client if it has been created.
pub fn try_logger() -> Option<&'static LogClient> {
    CLIENT.get()
}
