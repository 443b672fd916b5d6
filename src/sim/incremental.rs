use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::control::{ControllerState, PidGains};
use crate::plant::{PlantConstants, PlantModel, PlantState};

use super::params::{SimParams, Timing};
use super::runner::step;
use super::sample::{DebugSample, Sample};

/// Incremental simulation shared with a ticker thread.
pub type SharedSimulation = Arc<Mutex<IncrementalSimulation>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Unbounded simulation advanced one step per external tick.
///
/// Plant and controller state persist across ticks until [`reset`] is
/// called. Parameter changes apply from the next step on. The display
/// buffer keeps the trailing `window` samples; the debug log keeps all.
///
/// [`reset`]: IncrementalSimulation::reset
#[derive(Debug, Clone)]
pub struct IncrementalSimulation {
    model: PlantModel,
    params: SimParams,
    dt: f64,
    window: usize,
    plant: PlantState,
    controller: ControllerState,
    steps: usize,
    run_state: RunState,
    samples: VecDeque<Sample>,
    debug: Vec<DebugSample>,
}

impl IncrementalSimulation {
    pub fn new(constants: PlantConstants, params: SimParams, timing: &Timing) -> Self {
        Self {
            model: PlantModel::new(constants),
            params,
            dt: timing.dt,
            window: timing.window,
            plant: PlantState::default(),
            controller: ControllerState::default(),
            steps: 0,
            run_state: RunState::Stopped,
            samples: VecDeque::with_capacity(timing.window.saturating_add(1)),
            debug: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedSimulation {
        Arc::new(Mutex::new(self))
    }

    // -- run control --------------------------------------------------------

    pub fn start(&mut self) {
        if self.run_state == RunState::Stopped {
            debug!(steps = self.steps, "incremental simulation started");
        }
        self.run_state = RunState::Running;
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            debug!(steps = self.steps, angle = self.plant.angle, "incremental simulation stopped");
        }
        self.run_state = RunState::Stopped;
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// One timer tick: steps only while running.
    pub fn tick(&mut self) -> Option<DebugSample> {
        self.is_running().then(|| self.step())
    }

    /// Advance exactly one step regardless of run state.
    pub fn step(&mut self) -> DebugSample {
        let record = step(
            &self.model,
            &mut self.plant,
            &mut self.controller,
            &self.params,
            self.dt,
            self.steps,
        );
        self.steps += 1;

        self.samples.push_back(record.sample());
        while self.samples.len() > self.window {
            self.samples.pop_front();
        }
        self.debug.push(record);

        record
    }

    /// Zero plant and controller state and clear all recorded samples.
    /// The run state is left unchanged.
    pub fn reset(&mut self) {
        self.plant.reset();
        self.controller.reset();
        self.steps = 0;
        self.samples.clear();
        self.debug.clear();
        debug!("incremental simulation reset");
    }

    // -- parameters ---------------------------------------------------------

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SimParams) {
        self.params = params;
    }

    pub fn set_gains(&mut self, gains: PidGains) {
        self.params.gains = gains;
    }

    pub fn set_target(&mut self, target: f64) {
        self.params.target = target;
    }

    pub fn set_disturbance(&mut self, disturbance: f64) {
        self.params.disturbance = disturbance;
    }

    // -- outputs ------------------------------------------------------------

    /// Trailing display window, oldest first.
    pub fn samples(&self) -> &VecDeque<Sample> {
        &self.samples
    }

    pub fn debug_samples(&self) -> &[DebugSample] {
        &self.debug
    }

    pub fn current_angle(&self) -> f64 {
        self.plant.angle
    }

    pub fn plant_state(&self) -> &PlantState {
        &self.plant
    }

    pub fn controller_state(&self) -> &ControllerState {
        &self.controller
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}
