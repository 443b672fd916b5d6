//! Throughput of the simulation core:
//! - one closed-loop step (controller + plant)
//! - a full default batch run (10 000 steps + analysis)
//! - analysis alone over a finished trajectory

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use motor_pid_sim::control::ControllerState;
use motor_pid_sim::plant::{PlantConstants, PlantModel, PlantState};
use motor_pid_sim::sim::{simulate_batch, step, SimParams, Timing};
use motor_pid_sim::analyze;

fn bench_single_step(c: &mut Criterion) {
    let model = PlantModel::new(PlantConstants::default());
    let params = SimParams::default();
    let mut plant = PlantState::default();
    let mut controller = ControllerState::default();
    let mut index = 0usize;

    c.bench_function("closed_loop_step", |b| {
        b.iter(|| {
            index += 1;
            black_box(step(&model, &mut plant, &mut controller, black_box(&params), 0.01, index))
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let constants = PlantConstants::default();
    let params = SimParams::default();
    let timing = Timing::default();

    c.bench_function("batch_10k_steps", |b| {
        b.iter(|| black_box(simulate_batch(&constants, black_box(&params), &timing)))
    });
}

fn bench_analyze(c: &mut Criterion) {
    let run = simulate_batch(&PlantConstants::default(), &SimParams::default(), &Timing::default());

    c.bench_function("analyze_10k_samples", |b| {
        b.iter(|| black_box(analyze(black_box(&run.samples), 1.0, 0.01)))
    });
}

criterion_group!(benches, bench_single_step, bench_batch, bench_analyze);
criterion_main!(benches);
