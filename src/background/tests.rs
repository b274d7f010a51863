//! Tests for the background dispatcher.

use std::{sync::Arc, time::Duration};

use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::{
    client::{ClientConfig, LogClient},
    frame::{Frame, LoggerType},
    level::LogLevel,
    test_utils::{FakeDaemon, log_frame},
};

use super::{BackgroundClient, BackgroundConfig, BuildError, Dispatch};

const WAIT: Duration = Duration::from_secs(2);

#[fixture]
fn socket_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn client_for(dir: &TempDir) -> Arc<LogClient> {
    Arc::new(LogClient::new(
        ClientConfig::default()
            .with_socket_path(dir.path().join("log_sock"))
            .with_default_name("bg"),
    ))
}

#[rstest]
fn rejects_zero_capacity(socket_dir: TempDir) {
    let err = BackgroundClient::spawn(
        client_for(&socket_dir),
        BackgroundConfig::default().with_capacity(0),
    )
    .expect_err("zero capacity must fail");
    assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("capacity")));
}

#[rstest]
fn config_builders_override_defaults() {
    let config = BackgroundConfig::default()
        .with_capacity(8)
        .with_flush_timeout(Duration::from_millis(250))
        .with_warn_interval(Duration::from_secs(30));
    assert_eq!(config.capacity, 8);
    assert_eq!(config.flush_timeout, Duration::from_millis(250));
    assert_eq!(config.warn_interval, Duration::from_secs(30));
}

#[rstest]
fn forwards_requests_in_order(socket_dir: TempDir) {
    let daemon = FakeDaemon::bind(socket_dir.path().join("log_sock")).expect("daemon");
    let mut background =
        BackgroundClient::spawn(client_for(&socket_dir), BackgroundConfig::default())
            .expect("spawn");

    assert_eq!(
        background.register_logger_named(LoggerType::new(5), "bg"),
        Dispatch::Queued
    );
    assert_eq!(background.info("hello"), Dispatch::Queued);
    assert_eq!(background.fatal("bye"), Dispatch::Queued);
    assert!(background.flush());

    assert_eq!(
        daemon.recv_many(3, WAIT),
        vec![
            Frame::NewLogger {
                name: "bg".into(),
                logger_type: LoggerType::new(5),
            },
            log_frame("bg", "hello", LogLevel::Info),
            log_frame("bg", "bye", LogLevel::Fatal),
        ]
    );
    background.close();
}

#[rstest]
fn flush_reports_undelivered_backlog(socket_dir: TempDir) {
    let client = client_for(&socket_dir);
    let background =
        BackgroundClient::spawn(Arc::clone(&client), BackgroundConfig::default())
            .expect("spawn");

    background.warning("waiting");
    assert!(!background.flush(), "daemon is absent");
    assert_eq!(client.backlog_len(), 1);

    let daemon = FakeDaemon::bind(socket_dir.path().join("log_sock")).expect("daemon");
    assert!(background.flush());
    assert_eq!(
        daemon.recv(WAIT),
        Some(log_frame("bg", "waiting", LogLevel::Warning))
    );
}

#[rstest]
fn worker_applies_client_filtering(socket_dir: TempDir) {
    let client = client_for(&socket_dir);
    client.set_min_log_level(LogLevel::Error);
    let background =
        BackgroundClient::spawn(Arc::clone(&client), BackgroundConfig::default())
            .expect("spawn");

    assert_eq!(background.debug("ignored"), Dispatch::Queued);
    background.flush();
    assert_eq!(client.backlog_len(), 0);
}

#[rstest]
fn closed_handle_refuses_requests(socket_dir: TempDir) {
    let mut background =
        BackgroundClient::spawn(client_for(&socket_dir), BackgroundConfig::default())
            .expect("spawn");
    background.close();
    assert!(background.is_closed());
    assert_eq!(background.error("late"), Dispatch::Closed);
    assert!(!background.flush());
    background.close();
}

#[rstest]
fn close_drains_pending_requests(socket_dir: TempDir) {
    let client = client_for(&socket_dir);
    let mut background =
        BackgroundClient::spawn(Arc::clone(&client), BackgroundConfig::default())
            .expect("spawn");
    for i in 0..10 {
        background.info(&format!("m{i}"));
    }
    background.close();
    assert_eq!(client.backlog_len(), 10);
}
