//! Tests for frame encoding and decoding.

use std::io::Cursor;

use rstest::rstest;

use crate::level::LogLevel;

use super::*;

fn ne(value: i32) -> [u8; 4] {
    value.to_ne_bytes()
}

#[rstest]
fn new_logger_layout() {
    let frame = encode_new_logger("svc", LoggerType::new(7)).expect("encode");
    let mut expected = Vec::new();
    expected.extend(ne(RequestType::NewLogger.as_i32()));
    expected.extend(ne(4));
    expected.extend(b"svc\0");
    expected.extend(ne(7));
    assert_eq!(frame, expected);
}

#[rstest]
fn log_message_layout() {
    let frame = encode_log_message("svc", "boom", LogLevel::Error).expect("encode");
    let mut expected = Vec::new();
    expected.extend(ne(RequestType::LogMessage.as_i32()));
    expected.extend(ne(4));
    expected.extend(b"svc\0");
    expected.extend(ne(5));
    expected.extend(b"boom\0");
    expected.extend(ne(LogLevel::Error.as_i32()));
    assert_eq!(frame, expected);
}

#[rstest]
fn log_message_round_trips_with_terminators() {
    let bytes = encode_log_message("svc", "boom", LogLevel::Error).expect("encode");
    // name terminator sits after the two leading integers and three name bytes
    assert_eq!(bytes[8 + 3], 0);
    assert_eq!(bytes[8 + 4 + 4 + 4], 0);

    let (frame, used) = decode_frame(&bytes).expect("decode");
    assert_eq!(used, bytes.len());
    assert_eq!(
        frame,
        Frame::LogMessage {
            name: "svc".into(),
            text: "boom".into(),
            level: LogLevel::Error,
        }
    );
}

#[rstest]
fn empty_text_is_a_lone_terminator() {
    let bytes = encode_log_message("svc", "", LogLevel::Info).expect("encode");
    assert_eq!(&bytes[12..16], &ne(1));
    assert_eq!(bytes[16], 0);
    let (frame, _) = decode_frame(&bytes).expect("decode");
    assert!(matches!(frame, Frame::LogMessage { text, .. } if text.is_empty()));
}

#[rstest]
#[case("sv\0c", "text", "name")]
#[case("svc", "bo\0om", "text")]
fn rejects_embedded_nul(#[case] name: &str, #[case] text: &str, #[case] field: &'static str) {
    let err = encode_log_message(name, text, LogLevel::Info).expect_err("must reject");
    assert_eq!(err, FrameError::InteriorNul { field });
}

#[rstest]
fn new_logger_rejects_embedded_nul() {
    let err = encode_new_logger("a\0b", LoggerType::default()).expect_err("must reject");
    assert_eq!(err, FrameError::InteriorNul { field: "name" });
}

#[rstest]
fn frame_encode_matches_free_functions() {
    let frame = Frame::NewLogger {
        name: "db".into(),
        logger_type: LoggerType::from(3),
    };
    assert_eq!(
        frame.encode().expect("encode"),
        encode_new_logger("db", LoggerType::new(3)).expect("encode")
    );
    assert_eq!(frame.request_type(), RequestType::NewLogger);
    assert_eq!(frame.name(), "db");
}

#[rstest]
fn decode_reports_consumed_bytes_for_concatenated_frames() {
    let mut stream = encode_new_logger("svc", LoggerType::new(1)).expect("encode");
    let first_len = stream.len();
    stream.extend(encode_log_message("svc", "hi", LogLevel::Info).expect("encode"));

    let (first, used) = decode_frame(&stream).expect("first frame");
    assert_eq!(used, first_len);
    assert_eq!(first.request_type(), RequestType::NewLogger);

    let (second, rest) = decode_frame(&stream[used..]).expect("second frame");
    assert_eq!(rest, stream.len() - first_len);
    assert_eq!(second.request_type(), RequestType::LogMessage);
}

#[rstest]
fn decode_detects_truncation() {
    let bytes = encode_log_message("svc", "boom", LogLevel::Error).expect("encode");
    for cut in [0, 3, 8, 12, bytes.len() - 1] {
        assert_eq!(decode_frame(&bytes[..cut]), Err(FrameError::Truncated));
    }
}

#[rstest]
fn decode_rejects_unknown_discriminators() {
    let mut bytes = encode_log_message("svc", "boom", LogLevel::Error).expect("encode");
    let level_at = bytes.len() - 4;
    bytes[level_at..].copy_from_slice(&ne(9));
    assert_eq!(decode_frame(&bytes), Err(FrameError::UnknownLevel(9)));

    bytes[..4].copy_from_slice(&ne(42));
    assert_eq!(decode_frame(&bytes), Err(FrameError::UnknownRequestType(42)));
}

#[rstest]
#[case(0)]
#[case(-5)]
fn decode_rejects_invalid_lengths(#[case] len: i32) {
    let mut bytes = Vec::new();
    bytes.extend(ne(RequestType::NewLogger.as_i32()));
    bytes.extend(ne(len));
    bytes.extend(ne(0));
    assert_eq!(
        decode_frame(&bytes),
        Err(FrameError::InvalidLength { field: "name", len })
    );
}

#[rstest]
fn decode_requires_terminator() {
    let mut bytes = Vec::new();
    bytes.extend(ne(RequestType::NewLogger.as_i32()));
    bytes.extend(ne(3));
    bytes.extend(b"svc");
    bytes.extend(ne(0));
    assert_eq!(
        decode_frame(&bytes),
        Err(FrameError::MissingTerminator { field: "name" })
    );
}

#[rstest]
fn reader_yields_frames_until_clean_eof() {
    let mut stream = encode_new_logger("svc", LoggerType::new(2)).expect("encode");
    stream.extend(encode_log_message("svc", "one", LogLevel::Debug).expect("encode"));
    stream.extend(encode_log_message("svc", "two", LogLevel::Fatal).expect("encode"));

    let frames: Vec<Frame> = FrameReader::new(Cursor::new(stream))
        .collect::<std::io::Result<_>>()
        .expect("read frames");
    assert_eq!(frames.len(), 3);
    assert_eq!(
        frames[2],
        Frame::LogMessage {
            name: "svc".into(),
            text: "two".into(),
            level: LogLevel::Fatal,
        }
    );
}

#[rstest]
fn reader_reports_partial_frame_as_eof_error() {
    let bytes = encode_log_message("svc", "boom", LogLevel::Error).expect("encode");
    let mut reader = FrameReader::new(Cursor::new(bytes[..10].to_vec()));
    let err = reader.read_frame().expect_err("partial frame");
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

#[rstest]
fn reader_maps_malformed_input_to_invalid_data() {
    let mut reader = FrameReader::new(Cursor::new(ne(77).to_vec()));
    let err = reader.read_frame().expect_err("bad request type");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
