//! Benchmarks for frame encoding and the disconnected logging path.

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use loglib::{
    ClientConfig, LogClient, LogLevel, LoggerType,
    frame::{encode_log_message, encode_new_logger},
};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.bench_function("new_logger", |b| {
        b.iter(|| encode_new_logger(black_box("billing.db"), LoggerType::new(1)))
    });
    for size in [16usize, 256, 4096] {
        let text = "x".repeat(size);
        group.bench_with_input(BenchmarkId::new("log_message", size), &text, |b, text| {
            b.iter(|| encode_log_message(black_box("billing.db"), text, LogLevel::Info))
        });
    }
    group.finish();
}

fn bench_disconnected(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = LogClient::new(
        ClientConfig::default()
            .with_socket_path(dir.path().join("absent"))
            .with_default_name("bench")
            .with_warn_interval(Duration::from_secs(3600)),
    );
    let mut group = c.benchmark_group("disconnected");
    group.bench_function("filtered", |b| {
        b.iter(|| client.debug(black_box("below threshold")))
    });
    // Backlog saturates after the first iterations; this measures the drop path.
    group.bench_function("dropped", |b| b.iter(|| client.info(black_box("queued"))));
    group.finish();
}

criterion_group!(benches, bench_encode, bench_disconnected);
criterion_main!(benches);
