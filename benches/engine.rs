//! Benchmarks for full simulation runs.
//!
//! Throughput is measured in executed burst ticks, so figures are comparable
//! across policies even though round-robin touches the queue far more often.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use schedsim_rs::{Engine, PolicyKind, ProcessSpec, Scenario, SCHEMA_VERSION};

// Simple xorshift for reproducible workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

fn make_workload(count: usize, seed: u64) -> Vec<ProcessSpec> {
    let mut rng = XorShift64::new(seed);
    (0..count)
        .map(|_| ProcessSpec {
            id: None,
            arrival: rng.next_u64() % count as u64,
            burst: 1 + rng.next_u64() % 9,
            priority: rng.next_u64() % 5,
        })
        .collect()
}

fn policies() -> [(&'static str, PolicyKind, Option<u64>); 4] {
    [
        ("fcfs", PolicyKind::Fcfs, None),
        ("sjf", PolicyKind::Sjf, None),
        ("priority", PolicyKind::Priority, None),
        ("rr_q3", PolicyKind::RoundRobin, Some(3)),
    ]
}

fn bench_run_to_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/run");

    for count in [64usize, 512, 4096] {
        let processes = make_workload(count, 0x5EED_1234);
        let total_ticks: u64 = processes.iter().map(|p| p.burst).sum();
        group.throughput(Throughput::Elements(total_ticks));

        for (name, policy, quantum) in policies() {
            let scenario = Scenario {
                schema_version: SCHEMA_VERSION,
                processes: processes.clone(),
                policy,
                quantum,
            };
            group.bench_with_input(BenchmarkId::new(name, count), &scenario, |b, scenario| {
                b.iter(|| {
                    let mut engine = Engine::new(scenario).unwrap();
                    black_box(engine.run_to_completion().unwrap())
                })
            });
        }
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/new");

    for count in [64usize, 512, 4096] {
        let scenario = Scenario::new(make_workload(count, 0xBEEF_5678), PolicyKind::Fcfs);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("validate", count),
            &scenario,
            |b, scenario| b.iter(|| black_box(Engine::new(scenario).unwrap())),
        );
    }

    group.finish();
}

fn bench_saturated_ready_queue(c: &mut Criterion) {
    // Every process arrives at tick zero, so SJF and priority scan a queue
    // of (count - completed) candidates at each selection.
    let mut group = c.benchmark_group("engine/saturated");

    for count in [64usize, 512, 4096] {
        let mut processes = make_workload(count, 0xFACE_9ABC);
        for p in &mut processes {
            p.arrival = 0;
        }
        let total_ticks: u64 = processes.iter().map(|p| p.burst).sum();
        group.throughput(Throughput::Elements(total_ticks));

        for (name, policy, quantum) in [
            ("sjf", PolicyKind::Sjf, None),
            ("priority", PolicyKind::Priority, None),
            ("rr_q3", PolicyKind::RoundRobin, Some(3)),
        ] {
            let scenario = Scenario {
                schema_version: SCHEMA_VERSION,
                processes: processes.clone(),
                policy,
                quantum,
            };
            group.bench_with_input(BenchmarkId::new(name, count), &scenario, |b, scenario| {
                b.iter(|| {
                    let mut engine = Engine::new(scenario).unwrap();
                    black_box(engine.run_to_completion().unwrap())
                })
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_run_to_completion,
    bench_validation,
    bench_saturated_ready_queue
);
criterion_main!(benches);
