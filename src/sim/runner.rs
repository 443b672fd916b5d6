use tracing::{debug, info};

use crate::analysis::{analyze, PerformanceMetrics};
use crate::control::{pid_compute, ControllerState};
use crate::plant::{PlantConstants, PlantModel, PlantState};

use super::params::{SimParams, Timing};
use super::sample::{DebugSample, Sample};

// ---------------------------------------------------------------------------
// Single closed-loop step (shared by batch and incremental modes)
// ---------------------------------------------------------------------------

/// Advance controller and plant by one step and record the result.
///
/// The controller reads the angle at the start of the step; the recorded
/// sample holds the plant state after it. Sample time is `index * dt`.
pub fn step(
    model: &PlantModel,
    plant: &mut PlantState,
    controller: &mut ControllerState,
    params: &SimParams,
    dt: f64,
    index: usize,
) -> DebugSample {
    let pid = pid_compute(
        controller,
        &params.gains,
        params.target,
        plant.angle,
        params.disturbance,
        dt,
    );
    *plant = model.advance(plant, pid.output, 0.0, dt);

    DebugSample {
        time: index as f64 * dt,
        angle: plant.angle,
        target: params.target,
        error: pid.error,
        integral_error: controller.integral_error,
        derivative_error: pid.derivative_error,
        pid_output: pid.output,
        current: plant.current,
        velocity: plant.velocity,
    }
}

// ---------------------------------------------------------------------------
// Batch run
// ---------------------------------------------------------------------------

/// Output of one batch run, published as a whole once the loop finishes.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub samples: Vec<Sample>,
    pub debug: Vec<DebugSample>,
    pub metrics: PerformanceMetrics,
}

/// Run `timing.steps()` steps from rest and analyze the response.
///
/// Deterministic: the result depends only on the arguments.
pub fn simulate_batch(constants: &PlantConstants, params: &SimParams, timing: &Timing) -> BatchRun {
    let model = PlantModel::new(*constants);
    let mut plant = PlantState::default();
    let mut controller = ControllerState::default();

    let steps = timing.steps();
    debug!(steps, dt = timing.dt, ?params, "batch run starting");

    let mut debug_log = Vec::with_capacity(steps.min(200_000));
    for index in 0..steps {
        debug_log.push(step(&model, &mut plant, &mut controller, params, timing.dt, index));
    }

    let samples: Vec<Sample> = debug_log.iter().map(DebugSample::sample).collect();
    let metrics = analyze(&samples, params.target, timing.dt);

    info!(
        steps,
        final_angle = plant.angle,
        overshoot_percent = metrics.overshoot_percent,
        "batch run complete"
    );

    BatchRun { samples, debug: debug_log, metrics }
}

/// Lifecycle of a [`BatchRunner`]: `Idle -> Running -> Done`.
///
/// A run is synchronous and holds `&mut BatchRunner` for its whole length,
/// so callers only ever observe `Idle` (never run) or `Done` (a complete
/// result is published). `Running` marks the span inside
/// [`BatchRunner::run`] and is never visible from outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    Running,
    Done,
}

/// Batch-mode engine: Idle until the first run, Done afterwards.
///
/// Each run starts from zeroed plant and controller state; the previous
/// result is replaced only once the new run has finished.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    constants: PlantConstants,
    timing: Timing,
    phase: BatchPhase,
    last: Option<BatchRun>,
}

impl BatchRunner {
    pub fn new(constants: PlantConstants, timing: Timing) -> Self {
        Self {
            constants,
            timing,
            phase: BatchPhase::Idle,
            last: None,
        }
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn run(&mut self, params: &SimParams) -> &BatchRun {
        self.phase = BatchPhase::Running;
        let run = simulate_batch(&self.constants, params, &self.timing);
        self.phase = BatchPhase::Done;
        self.last.insert(run)
    }

    pub fn last_run(&self) -> Option<&BatchRun> {
        self.last.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
