pub mod incremental;
pub mod params;
pub mod runner;
pub mod sample;
pub mod ticker;

pub use incremental::{IncrementalSimulation, RunState, SharedSimulation};
pub use params::{SimParams, SimulationMode, Timing};
pub use runner::{simulate_batch, step, BatchPhase, BatchRun, BatchRunner};
pub use sample::{DebugSample, Sample};
pub use ticker::Ticker;
