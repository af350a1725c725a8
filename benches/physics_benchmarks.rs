//! Physics benchmarks.
//!
//! Frame-level costs of both engines: one pendulum tick and one full
//! oscillator grid recomputation (what a slider drag triggers every frame).
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use oscisim::prelude::*;
use oscisim::render::{pendulum_scene, spring_points};

fn bench_pendulum_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pendulum");
    group.sample_size(100);

    group.bench_function("integrator_advance", |b| {
        let params = PendulumParams::default();
        let integrator = PendulumIntegrator::default();
        let mut state = PendulumState::at_rest(params.initial_angle());
        b.iter(|| {
            state = integrator.advance(black_box(state), &params, black_box(1.0 / 60.0));
            black_box(state.angle)
        });
    });

    group.bench_function("session_tick_and_scene", |b| {
        let mut session =
            PendulumSession::new(PendulumParams::default(), PendulumIntegrator::default(), 100);
        let mapping = ScreenMapping::default();
        session.start();
        b.iter(|| {
            session.tick(black_box(1.0 / 60.0));
            black_box(pendulum_scene(&session, &mapping, 20.0))
        });
    });

    group.finish();
}

fn bench_oscillator_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("oscillator");
    group.sample_size(100);

    for samples in [100, 1000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("grid_evaluate", samples),
            samples,
            |b, &samples| {
                let grid = SampleGrid::new(10.0, samples).unwrap_or_default();
                let params = OscillatorParams::default();
                b.iter(|| black_box(grid.evaluate(&params)));
            },
        );
    }

    group.bench_function("spring_points", |b| {
        b.iter(|| black_box(spring_points(black_box(0.75), 10, 0.5)));
    });

    group.finish();
}

criterion_group!(benches, bench_pendulum_tick, bench_oscillator_recompute);
criterion_main!(benches);
