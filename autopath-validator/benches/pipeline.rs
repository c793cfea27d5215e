//! Criterion benchmarks for the validation hot paths
//!
//! Covers: normalization, kinematics estimation, constraint validation,
//! route analysis, and the full pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use autopath_validator::analysis::route_analyzer::RouteAnalyzer;
use autopath_validator::kinematics::estimator::KinematicsEstimator;
use autopath_validator::trajectory::normalizer::normalize;
use autopath_validator::validation::validator::ConstraintValidator;
use autopath_validator::{Constraints, TrajectoryPipeline};

/// A WPILib-style S-curve sampled at 20 ms
fn make_states(count: usize) -> Value {
    let states: Vec<Value> = (0..count)
        .map(|i| {
            let t = i as f64 * 0.02;
            let x = t * 2.0;
            let y = (t * 0.8).sin() * 1.5;
            json!({
                "time": t,
                "velocity": 2.0 + (t * 0.5).sin(),
                "acceleration": 0.5 * (t * 0.5).cos(),
                "curvature": -(t * 0.8).sin() * 0.4,
                "pose": {
                    "translation": {"x": x, "y": y},
                    "rotation": {"radians": (t * 0.8).cos().atan2(1.0)}
                }
            })
        })
        .collect();
    json!({ "states": states })
}

// ---------------------------------------------------------------------------
// Stage benchmarks
// ---------------------------------------------------------------------------

fn bench_normalize(c: &mut Criterion) {
    let raw = make_states(500);

    c.bench_function("normalize_500", |b| {
        b.iter(|| {
            let points = normalize(black_box(&raw)).unwrap();
            black_box(points);
        });
    });
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich");
    let estimator = KinematicsEstimator::new();

    for size in [100, 500, 2000] {
        let points = normalize(&make_states(size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| {
                let enriched = estimator.enrich(black_box(points));
                black_box(enriched);
            });
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let points = KinematicsEstimator::new().enrich(&normalize(&make_states(500)).unwrap());
    let validator = ConstraintValidator::new();
    let constraints = Constraints::default();

    c.bench_function("validate_500", |b| {
        b.iter(|| {
            let violations = validator.validate(black_box(&points), black_box(&constraints));
            black_box(violations);
        });
    });
}

fn bench_route_analysis(c: &mut Criterion) {
    let points = KinematicsEstimator::new().enrich(&normalize(&make_states(500)).unwrap());
    let analyzer = RouteAnalyzer::new();
    // generous limits so the scan covers the whole path
    let constraints = Constraints::new(10.0, 10.0, 100.0, 10.0);

    c.bench_function("route_analysis_500", |b| {
        b.iter(|| {
            let analysis = analyzer.analyze(black_box(&points), black_box(&constraints));
            black_box(analysis);
        });
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let raw = make_states(500);
    let pipeline = TrajectoryPipeline::new();
    let constraints = Constraints::default();

    c.bench_function("pipeline_500", |b| {
        b.iter(|| {
            let output = pipeline.run(black_box(&raw), &constraints).unwrap();
            black_box(output);
        });
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_enrich,
    bench_validate,
    bench_route_analysis,
    bench_full_pipeline,
);
criterion_main!(benches);
