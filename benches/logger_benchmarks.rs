//! Criterion benchmarks for buffered_logger

use buffered_logger::prelude::*;
use buffered_logger::tags;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use std::thread;

struct NullPrinter;

impl Printer for NullPrinter {
    fn print(&self, record: &LogRecord) -> Result<()> {
        black_box(record);
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_sync_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_logging");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .service_name("bench")
        .printer(NullPrinter)
        .build()
        .unwrap();

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Benchmark message")));
    });

    group.bench_function("info_with_tags", |b| {
        b.iter(|| {
            logger.info_with_tags(
                black_box("Benchmark message"),
                tags! { "user_id" => 12345, "region" => "eu-west-1" },
            )
        });
    });

    group.finish();
}

fn bench_buffered_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffered_logging");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .printer(NullPrinter)
        .buffered(true)
        .build()
        .unwrap();

    group.bench_function("push", |b| {
        b.iter(|| logger.info(black_box("Buffered message")));
    });

    group.finish();
    logger.close();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let logger = Arc::new(
                Logger::builder()
                    .printer(NullPrinter)
                    .buffered(true)
                    .build()
                    .unwrap(),
            );

            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..100 {
                                logger.info(format!("Thread message {}", i));
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.join().unwrap();
                }
            });

            logger.close();
        });
    }

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(1));

    let record = LogRecord::new(
        LogLevel::Warning,
        Some("Disk usage above threshold".to_string()),
        tags! { "mount" => "/var", "used_pct" => 91.5 },
        Some("storage".to_string()),
    );

    let colored = ConsolePrinter::with_writer(Vec::<u8>::new());
    group.bench_function("colored", |b| {
        b.iter(|| colored.render(black_box(&record)));
    });

    let plain = ConsolePrinter::with_writer(Vec::<u8>::new()).with_colors(false);
    group.bench_function("plain", |b| {
        b.iter(|| plain.render(black_box(&record)));
    });

    group.bench_function("tag_suffix", |b| {
        b.iter(|| black_box(record.tags()).format_suffix());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sync_logging,
    bench_buffered_logging,
    bench_concurrent_logging,
    bench_render
);
criterion_main!(benches);
