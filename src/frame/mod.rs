//! Binary frames exchanged with the logging daemon.
//!
//! Every request is a self-delimiting sequence of native-endian 32-bit
//! integers and NUL-terminated strings. There is no outer length prefix: a
//! reader recovers frame boundaries purely from the embedded length fields.
//!
//! `NEW_LOGGER` frames carry `[request type][name length][name\0][logger type]`
//! and `LOG_MESSAGE` frames carry
//! `[request type][name length][name\0][text length][text\0][level]`, where
//! every length counts the trailing NUL.

mod decode;
mod encode;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::level::LogLevel;

pub use decode::{FrameReader, decode_frame};
pub use encode::{encode_log_message, encode_new_logger};

/// Upper bound applied to string fields while decoding untrusted input.
pub const MAX_DECODED_FIELD_LEN: usize = 1 << 24; // 16 MiB

/// Discriminator written at the start of every frame.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestType {
    NewLogger = 0,
    LogMessage = 1,
}

impl RequestType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::NewLogger),
            1 => Some(Self::LogMessage),
            _ => None,
        }
    }
}

/// Sink category a named source is routed to.
///
/// The value is interpreted by the daemon only; the client forwards it
/// unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoggerType(i32);

impl LoggerType {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<i32> for LoggerType {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<LoggerType> for i32 {
    fn from(value: LoggerType) -> Self {
        value.0
    }
}

/// Decoded representation of a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    NewLogger {
        name: String,
        logger_type: LoggerType,
    },
    LogMessage {
        name: String,
        text: String,
        level: LogLevel,
    },
}

impl Frame {
    pub fn request_type(&self) -> RequestType {
        match self {
            Frame::NewLogger { .. } => RequestType::NewLogger,
            Frame::LogMessage { .. } => RequestType::LogMessage,
        }
    }

    /// Source name carried by the frame.
    pub fn name(&self) -> &str {
        match self {
            Frame::NewLogger { name, .. } | Frame::LogMessage { name, .. } => name,
        }
    }

    /// Serialise the frame into its wire representation.
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> {
        match self {
            Frame::NewLogger { name, logger_type } => encode_new_logger(name, *logger_type),
            Frame::LogMessage { name, text, level } => encode_log_message(name, text, *level),
        }
    }
}

/// Failures raised while building or parsing frames.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// A string field contains a NUL byte, which would end it early on the
    /// receiving side.
    #[error("{field} contains an embedded NUL byte")]
    InteriorNul { field: &'static str },
    /// A string field is too long for its 32-bit length prefix.
    #[error("{field} is too long to encode ({len} bytes)")]
    TooLong { field: &'static str, len: usize },
    /// A decoded length prefix is zero, negative, or above the decode limit.
    #[error("invalid length {len} for {field}")]
    InvalidLength { field: &'static str, len: i32 },
    /// A decoded string field does not end with NUL.
    #[error("{field} is not NUL-terminated")]
    MissingTerminator { field: &'static str },
    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
    #[error("unknown request type {0}")]
    UnknownRequestType(i32),
    #[error("unknown log level {0}")]
    UnknownLevel(i32),
    /// The input ended before the frame was complete.
    #[error("frame is truncated")]
    Truncated,
}
