//! Test-only helpers shared by unit and integration tests.
//!
//! Compiled for unit tests and, for integration tests, behind the
//! `test-util` feature.

pub mod fake_daemon;

pub use fake_daemon::{FakeDaemon, log_frame, message_text};
