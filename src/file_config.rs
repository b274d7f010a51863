//! INI configuration for the client.
//!
//! Settings live in a `[client]` section; a file without one yields the
//! defaults. Keys mirror the fields of [`ClientConfig`]:
//!
//! ```ini
//! [client]
//! socket_path = /run/logd.sock
//! capacity = 256
//! min_level = warning
//! default_name = billing
//! strict_registration = true
//! write_timeout_ms = 500
//! warn_interval_ms = 10000
//! ```

use std::{fs, path::Path, str::FromStr, time::Duration};

use ini::Ini;

use crate::client::{ClientConfig, ConfigError};

const SECTION: &str = "client";

/// Read and validate a configuration file.
pub fn load_client_config(path: impl AsRef<Path>) -> Result<ClientConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_client_config(&text)
}

/// Parse and validate configuration text.
pub fn parse_client_config(text: &str) -> Result<ClientConfig, ConfigError> {
    let ini = Ini::load_from_str(text)?;
    let mut config = ClientConfig::default();
    if let Some(section) = ini.section(Some(SECTION)) {
        for (key, value) in section.iter() {
            apply_entry(&mut config, key, value.trim())?;
        }
    }
    config.validate()?;
    Ok(config)
}

fn apply_entry(config: &mut ClientConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "socket_path" => config.socket_path = value.into(),
        "capacity" => config.capacity = parse_value(key, value)?,
        "min_level" => config.min_level = parse_value(key, value)?,
        "default_name" => config.default_name = value.to_owned(),
        "strict_registration" => config.strict_registration = parse_bool(key, value)?,
        "write_timeout_ms" => {
            let millis: u64 = parse_value(key, value)?;
            config.write_timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }
        "warn_interval_ms" => {
            config.warn_interval = Duration::from_millis(parse_value(key, value)?);
        }
        _ => return Err(ConfigError::UnknownKey(key.to_owned())),
    }
    Ok(())
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
