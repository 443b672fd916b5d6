use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::analysis::PerformanceMetrics;
use crate::error::SimError;
use crate::plant::PlantConstants;
use crate::sim::{SimParams, Timing};

/// Everything needed to reproduce and compare a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub plant: &'a PlantConstants,
    pub params: &'a SimParams,
    pub timing: &'a Timing,
    pub steps: usize,
    pub final_angle: Option<f64>,
    pub performance: &'a PerformanceMetrics,
}

/// Write a run summary as pretty-printed JSON.
///
/// Non-finite metrics (e.g. overshoot with a zero target) serialize as `null`.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary<'_>) -> Result<(), SimError> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a run summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(path: P, summary: &RunSummary<'_>) -> Result<(), SimError> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}
