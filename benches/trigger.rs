use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use log_manager::{
    CounterKey, InMemoryCounterStore, LogManager, LogSink, Metrics, Params, Severity, SinkError,
    SuppressionGate, Template,
};
use std::sync::Arc;
use std::time::Duration;

/// Sink that drops everything, so only manager overhead is measured
#[derive(Debug)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, message: &str, level: Severity) -> Result<(), SinkError> {
        black_box((message, level));
        Ok(())
    }
}

fn manager() -> LogManager {
    let manager = LogManager::builder()
        .with_sink(Arc::new(NullSink))
        .build()
        .unwrap();
    manager.add_template("static", "Schedule triggered successfully");
    manager.add_template("scheduled", "Schedule for %{entity} triggered at %{time}");
    manager
}

fn gate() -> SuppressionGate {
    SuppressionGate::new(
        Arc::new(InMemoryCounterStore::new()),
        Duration::from_secs(300),
        "bench",
        Metrics::new(),
    )
}

/// Benchmark template rendering
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let plain = Template::new("static", "Schedule triggered successfully");
    let placeholders = Template::new("scheduled", "Schedule for %{entity} triggered at %{time}");
    let params = Params::new().with("time", 1000);

    group.bench_function("no_values", |b| {
        b.iter(|| plain.render(black_box(None), black_box(None)).unwrap())
    });

    group.bench_function("entity_and_params", |b| {
        b.iter(|| {
            placeholders
                .render(black_box(Some("S1")), black_box(Some(&params)))
                .unwrap()
        })
    });

    group.bench_function("many_placeholders", |b| {
        let pattern: String = (0..20).map(|i| format!("%{{k{}}} ", i)).collect();
        let template = Template::new("many", pattern);
        let params: Params = (0..20).map(|i| (format!("k{}", i), i)).collect();

        b.iter(|| template.render(None, black_box(Some(&params))).unwrap())
    });

    group.finish();
}

/// Benchmark counter key construction
fn bench_counter_key(c: &mut Criterion) {
    c.bench_function("counter_key", |b| {
        b.iter(|| {
            CounterKey::new(
                black_box("log_manager"),
                black_box("schedule_triggered"),
                black_box("scheduler:number:one"),
                Severity::Error,
            )
        })
    });
}

/// Benchmark gate decisions against the in-memory store
fn bench_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("non_error_bypass", |b| {
        let gate = gate();
        b.iter(|| {
            for _ in 0..1000 {
                black_box(gate.should_trigger("t", "e", Severity::Warn).unwrap());
            }
        })
    });

    // Single counter (maximum contention on one shard)
    group.bench_function("repeated_error", |b| {
        let gate = gate();
        b.iter(|| {
            for _ in 0..1000 {
                black_box(gate.should_trigger("t", "e", Severity::Error).unwrap());
            }
        })
    });

    group.bench_function("1000_entities", |b| {
        let gate = gate();
        let entities: Vec<String> = (0..1000).map(|i| format!("entity-{}", i)).collect();
        b.iter(|| {
            for entity in &entities {
                black_box(gate.should_trigger("t", entity, Severity::Error).unwrap());
            }
        })
    });

    group.finish();
}

/// Benchmark the full trigger path
fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("info_no_context", |b| {
        let manager = manager();
        b.iter(|| {
            for _ in 0..1000 {
                manager.info(black_box("static"), ()).unwrap();
            }
        })
    });

    group.bench_function("info_entity_params", |b| {
        let manager = manager();
        let params = Params::new().with("time", 1000);
        b.iter(|| {
            for _ in 0..1000 {
                manager
                    .info(black_box("scheduled"), ("S1", params.clone()))
                    .unwrap();
            }
        })
    });

    group.bench_function("error_suppressed", |b| {
        let manager = manager();
        let params = Params::new().with("time", 1000);
        b.iter(|| {
            for _ in 0..1000 {
                manager
                    .error(black_box("scheduled"), ("S1", params.clone()))
                    .unwrap();
            }
        })
    });

    group.finish();
}

/// Benchmark multi-threaded error triggers
fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");

    for num_threads in [2, 4, 8].iter() {
        group.throughput(Throughput::Elements((*num_threads as u64) * 1000));

        group.bench_with_input(
            BenchmarkId::new("threads", num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let manager = manager();

                    let handles: Vec<_> = (0..num_threads)
                        .map(|i| {
                            let manager = manager.clone();
                            std::thread::spawn(move || {
                                let entity = format!("scheduler-{}", i);
                                let params = Params::new().with("time", i);
                                for _ in 0..1000 {
                                    manager
                                        .error("scheduled", (entity.as_str(), params.clone()))
                                        .unwrap();
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_counter_key,
    bench_gate,
    bench_trigger,
    bench_concurrent,
);
criterion_main!(benches);
