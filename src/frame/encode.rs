//! Frame serialisation.

use crate::level::LogLevel;

use super::{FrameError, LoggerType, RequestType};

const FIELD_WIDTH: usize = size_of::<i32>();

/// Append-only writer laying out frame fields in order.
struct FrameWriter {
    buf: Vec<u8>,
}

impl FrameWriter {
    fn new(request: RequestType, capacity: usize) -> Self {
        let mut writer = Self {
            buf: Vec::with_capacity(capacity),
        };
        writer.put_i32(request.as_i32());
        writer
    }

    fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_ne_bytes());
    }

    /// Write a length-prefixed string including its trailing NUL.
    fn put_cstr(&mut self, field: &'static str, value: &str) -> Result<(), FrameError> {
        self.put_i32(cstr_len(field, value)?);
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.push(0);
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Length of `value` on the wire, counting the terminator.
fn cstr_len(field: &'static str, value: &str) -> Result<i32, FrameError> {
    if value.as_bytes().contains(&0) {
        return Err(FrameError::InteriorNul { field });
    }
    value
        .len()
        .checked_add(1)
        .and_then(|len| i32::try_from(len).ok())
        .ok_or(FrameError::TooLong {
            field,
            len: value.len(),
        })
}

/// Serialise a `NEW_LOGGER` request registering `name` under `logger_type`.
pub fn encode_new_logger(name: &str, logger_type: LoggerType) -> Result<Vec<u8>, FrameError> {
    let mut writer = FrameWriter::new(RequestType::NewLogger, FIELD_WIDTH * 3 + name.len() + 1);
    writer.put_cstr("name", name)?;
    writer.put_i32(logger_type.as_i32());
    Ok(writer.finish())
}

/// Serialise a `LOG_MESSAGE` request carrying `text` at `level` under `name`.
pub fn encode_log_message(name: &str, text: &str, level: LogLevel) -> Result<Vec<u8>, FrameError> {
    let capacity = FIELD_WIDTH * 4 + name.len() + text.len() + 2;
    let mut writer = FrameWriter::new(RequestType::LogMessage, capacity);
    writer.put_cstr("name", name)?;
    writer.put_cstr("text", text)?;
    writer.put_i32(level.as_i32());
    Ok(writer.finish())
}
