//! Discrete-time simulation of a PID-controlled DC motor position loop.
//!
//! - [`plant`]: armature current / velocity / angle model, explicit Euler
//! - [`control`]: PID controller producing the armature voltage
//! - [`sim`]: batch runs, tick-driven incremental runs, fixed-cadence ticker
//! - [`analysis`]: rise time, settling time, overshoot, steady-state error
//! - [`io`]: CSV debug export, summary report, JSON summary

pub mod analysis;
pub mod config;
pub mod control;
pub mod error;
pub mod io;
pub mod plant;
pub mod sim;

pub use analysis::{analyze, PerformanceMetrics};
pub use config::SimConfig;
pub use control::{pid_compute, ControllerState, PidGains};
pub use error::SimError;
pub use plant::{PlantConstants, PlantModel, PlantState};
pub use sim::{
    simulate_batch, BatchRun, BatchRunner, DebugSample, IncrementalSimulation, Sample, SimParams,
    SimulationMode, Ticker, Timing,
};
