//! Token generation throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sensor_pipeline_core::logging::LogContext;
use sensor_pipeline_core::models::{Payload, PayloadValue, Rule, RuleStatus, SensorSnapshot};
use sensor_pipeline_core::tokens::generate_tokens;

fn snapshot(fields: usize) -> SensorSnapshot {
    let mut payload: Payload = (0..fields)
        .map(|i| (format!("field_{}", i), PayloadValue::Number(i as f64)))
        .collect();
    payload.insert("unit".to_string(), PayloadValue::from("si"));

    SensorSnapshot {
        source: "bench".to_string(),
        timestamp: "2026-01-01T00:00:00Z".to_string(),
        payload,
    }
}

fn rules(count: usize, fields: usize) -> Vec<Rule> {
    (0..count)
        .map(|i| Rule {
            rule_id: format!("r-{}", i),
            rule_type: "range".to_string(),
            field: format!("field_{}", i % fields),
            min: 0.0,
            max: (fields / 2) as f64,
            confidence: 0.5,
            status: if i % 4 == 0 { RuleStatus::Draft } else { RuleStatus::Stable },
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let ctx = LogContext::new("bench");
    let snap = snapshot(64);
    let mut group = c.benchmark_group("generate_tokens");

    for count in [10usize, 100, 1_000] {
        let rule_set = rules(count, 64);
        group.bench_with_input(BenchmarkId::from_parameter(count), &rule_set, |b, rule_set| {
            b.iter(|| generate_tokens(black_box(&snap), black_box(rule_set), &ctx))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
