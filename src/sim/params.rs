use serde::{Deserialize, Serialize};

use crate::control::PidGains;

// ---------------------------------------------------------------------------
// Run parameters supplied by the caller
// ---------------------------------------------------------------------------

/// Inputs that may change between runs (batch) or between ticks (incremental).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimParams {
    pub gains: PidGains,
    pub target: f64,
    pub disturbance: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gains: PidGains::default(),
            target: 1.0,
            disturbance: 0.0,
        }
    }
}

/// `Continuous` steps once per external tick; `Matlab` runs a fixed-length
/// batch and analyzes the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    Continuous,
    #[default]
    Matlab,
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub dt: f64,       // s, fixed step
    pub duration: f64, // s, batch length
    pub window: usize, // samples kept for live display
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            dt: 0.01,
            duration: 100.0,
            window: 100,
        }
    }
}

impl Timing {
    /// Number of steps in a batch run, `duration / dt` rounded to nearest.
    ///
    /// Ratios that are NaN, infinite (`dt == 0`), non-positive, or too large
    /// to count in a `usize` yield zero steps.
    pub fn steps(&self) -> usize {
        let n = (self.duration / self.dt).round();
        if n.is_finite() && n > 0.0 && n < usize::MAX as f64 {
            n as usize
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_batch_is_ten_thousand_steps() {
        assert_eq!(Timing::default().steps(), 10_000);
    }

    #[test]
    fn degenerate_timing_has_no_steps() {
        let t = Timing { dt: 0.0, duration: 0.0, ..Default::default() };
        assert_eq!(t.steps(), 0);
        let t = Timing { dt: -0.01, ..Default::default() };
        assert_eq!(t.steps(), 0);
        let t = Timing { dt: 0.0, ..Default::default() };
        assert_eq!(t.steps(), 0);
        let t = Timing { dt: 1e-300, ..Default::default() };
        assert_eq!(t.steps(), 0);
        let t = Timing { dt: 0.01, duration: f64::NAN, ..Default::default() };
        assert_eq!(t.steps(), 0);
    }

    #[test]
    fn fractional_ratio_rounds_to_nearest() {
        let t = Timing { dt: 0.3, duration: 1.0, ..Default::default() };
        assert_eq!(t.steps(), 3);
        let t = Timing { dt: 0.01, duration: 0.004, ..Default::default() };
        assert_eq!(t.steps(), 0);
    }

    #[test]
    fn mode_names_are_lowercase() {
        let m: SimulationMode = serde_json::from_str("\"continuous\"").unwrap();
        assert_eq!(m, SimulationMode::Continuous);
        assert_eq!(serde_json::to_string(&SimulationMode::Matlab).unwrap(), "\"matlab\"");
    }
}
