//! Property-based tests for frame encoding.
//!
//! These generate arbitrary names and texts to check that every encoded frame
//! decodes back to its fields and that concatenated frames split at exactly
//! the right boundaries.

use loglib::{
    Frame, FrameReader, LogLevel, LoggerType, decode_frame,
    frame::{encode_log_message, encode_new_logger},
};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

proptest! {
    #[test]
    fn log_message_decodes_to_its_fields(
        name in "[^\\x00]{1,32}",
        text in "[^\\x00]{0,256}",
        level in level(),
    ) {
        let bytes = encode_log_message(&name, &text, level).expect("encodable");
        prop_assert_eq!(bytes.len(), 16 + name.len() + text.len() + 2);
        let (frame, used) = decode_frame(&bytes).expect("decodable");
        prop_assert_eq!(used, bytes.len());
        prop_assert_eq!(frame, Frame::LogMessage { name, text, level });
    }

    #[test]
    fn stream_of_frames_splits_on_embedded_lengths(
        entries in proptest::collection::vec(("[a-z.]{1,12}", "[^\\x00]{0,64}", any::<i32>()), 1..8),
    ) {
        let mut stream = Vec::new();
        let mut expected = Vec::new();
        for (name, text, raw_type) in entries {
            let register = Frame::NewLogger { name: name.clone(), logger_type: LoggerType::new(raw_type) };
            stream.extend(encode_new_logger(&name, LoggerType::new(raw_type)).expect("encodable"));
            stream.extend(encode_log_message(&name, &text, LogLevel::Info).expect("encodable"));
            expected.push(register);
            expected.push(Frame::LogMessage { name, text, level: LogLevel::Info });
        }
        let decoded: Vec<Frame> = FrameReader::new(stream.as_slice())
            .collect::<std::io::Result<_>>()
            .expect("stream decodes");
        prop_assert_eq!(decoded, expected);
    }
}
