//! Benchmarks for the redefinition pass.
//!
//! Measures the cache amortization that motivates the whole design: a cold pass pays for
//! the transformer, warm passes over the same (type, configuration) reapply the cached
//! outcome.

extern crate mimicry;

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use mimicry::prelude::*;
use mimicry::redefinition::TransformOutcome;
use std::hint::black_box;

struct BenchTransformer;

impl Transformer for BenchTransformer {
    fn transform(&self, target: &TargetTypeRc, _: &MockingConfiguration) -> TransformOutcome {
        TransformOutcome::Transformed(TransformedType::new(target.clone()))
    }

    fn transform_in_place(
        &self,
        target: &TargetTypeRc,
        _: &MockingConfiguration,
    ) -> TransformOutcome {
        TransformOutcome::Transformed(TransformedType::new(target.clone()))
    }
}

fn fixture_class() -> FixtureClassRc {
    let target = TargetType::new(TypeToken::new(1), "app", "Repository", TypeKind::Class);
    FixtureClass::builder("BenchTest")
        .slot(FixtureSlot::new(
            "repo",
            target,
            SlotModifiers::FINAL,
            Some(MockingRequest::full()),
        ))
        .build()
}

/// Benchmark a cold redefinition pass: fresh shared state every iteration, so every pass
/// goes through the transformer.
fn bench_redefinition_cold(c: &mut Criterion) {
    let transformer: Arc<dyn Transformer> = Arc::new(BenchTransformer);
    let class = fixture_class();

    c.bench_function("redefinition_cold", |b| {
        b.iter(|| {
            let shared = SharedMockState::new();
            let director = MockSlotDirector::build_redefinitions(
                shared,
                transformer.clone(),
                black_box(class.clone()),
            )
            .unwrap();
            black_box(director)
        });
    });
}

/// Benchmark a warm redefinition pass: shared state reused, so every pass after the first
/// hits the cache and reapplies.
fn bench_redefinition_warm(c: &mut Criterion) {
    let transformer: Arc<dyn Transformer> = Arc::new(BenchTransformer);
    let class = fixture_class();
    let shared = SharedMockState::new();

    c.bench_function("redefinition_warm", |b| {
        b.iter(|| {
            let director = MockSlotDirector::build_redefinitions(
                shared.clone(),
                transformer.clone(),
                black_box(class.clone()),
            )
            .unwrap();
            black_box(director)
        });
    });
}

criterion_group!(benches, bench_redefinition_cold, bench_redefinition_warm);
criterion_main!(benches);
