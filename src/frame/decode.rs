//! Frame parsing for daemon-side consumers and tests.

use std::io::{self, Read};

use crate::level::LogLevel;

use super::{Frame, FrameError, LoggerType, MAX_DECODED_FIELD_LEN, RequestType};

enum ReadError {
    Io(io::Error),
    Frame(FrameError),
}

impl From<FrameError> for ReadError {
    fn from(err: FrameError) -> Self {
        ReadError::Frame(err)
    }
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, ReadError> {
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw).map_err(ReadError::Io)?;
    Ok(i32::from_ne_bytes(raw))
}

fn read_cstr<R: Read>(reader: &mut R, field: &'static str) -> Result<String, ReadError> {
    let len = read_i32(reader)?;
    let size = usize::try_from(len)
        .ok()
        .filter(|size| (1..=MAX_DECODED_FIELD_LEN).contains(size))
        .ok_or(FrameError::InvalidLength { field, len })?;
    let mut bytes = vec![0u8; size];
    reader.read_exact(&mut bytes).map_err(ReadError::Io)?;
    if bytes.pop() != Some(0) {
        return Err(FrameError::MissingTerminator { field }.into());
    }
    if bytes.contains(&0) {
        return Err(FrameError::InteriorNul { field }.into());
    }
    String::from_utf8(bytes).map_err(|_| FrameError::InvalidUtf8 { field }.into())
}

/// Read the remainder of a frame once its request type is known.
fn read_body<R: Read>(reader: &mut R, request: i32) -> Result<Frame, ReadError> {
    match RequestType::from_i32(request) {
        Some(RequestType::NewLogger) => {
            let name = read_cstr(reader, "name")?;
            let logger_type = LoggerType::new(read_i32(reader)?);
            Ok(Frame::NewLogger { name, logger_type })
        }
        Some(RequestType::LogMessage) => {
            let name = read_cstr(reader, "name")?;
            let text = read_cstr(reader, "text")?;
            let raw_level = read_i32(reader)?;
            let level = LogLevel::from_i32(raw_level).ok_or(FrameError::UnknownLevel(raw_level))?;
            Ok(Frame::LogMessage { name, text, level })
        }
        None => Err(FrameError::UnknownRequestType(request).into()),
    }
}

/// Decode one frame from the front of `buf`.
///
/// Returns the frame and the number of bytes it occupied so callers can
/// advance through a buffer holding several concatenated frames.
pub fn decode_frame(buf: &[u8]) -> Result<(Frame, usize), FrameError> {
    let mut cursor = buf;
    let result = read_i32(&mut cursor).and_then(|request| read_body(&mut cursor, request));
    match result {
        Ok(frame) => Ok((frame, buf.len() - cursor.len())),
        Err(ReadError::Frame(err)) => Err(err),
        Err(ReadError::Io(_)) => Err(FrameError::Truncated),
    }
}

/// Incremental frame reader over a byte stream such as a socket.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly on a frame boundary.
    /// Malformed input surfaces as [`io::ErrorKind::InvalidData`].
    pub fn read_frame(&mut self) -> io::Result<Option<Frame>> {
        let mut raw = [0u8; 4];
        let mut filled = 0;
        while filled < raw.len() {
            match self.inner.read(&mut raw[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        match read_body(&mut self.inner, i32::from_ne_bytes(raw)) {
            Ok(frame) => Ok(Some(frame)),
            Err(ReadError::Io(err)) => Err(err),
            Err(ReadError::Frame(err)) => Err(io::Error::new(io::ErrorKind::InvalidData, err)),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = io::Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}
