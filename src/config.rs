//! TOML configuration.
//!
//! Every field is optional; missing values fall back to the reference setup
//! (classic DC motor constants, default PID gains, unit step target,
//! `dt = 0.01`, 100 s batch).
//!
//! ```toml
//! mode = "continuous"
//!
//! [controller]
//! kp = 60.54
//! ki = 79.80
//! kd = 45.48
//!
//! [reference]
//! target = 1.0
//! disturbance = 0.0
//!
//! [timing]
//! dt = 0.01
//! duration = 100.0
//! window = 100
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::control::PidGains;
use crate::error::SimError;
use crate::plant::PlantConstants;
use crate::sim::{SimParams, SimulationMode, Timing};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub target: f64,
    pub disturbance: f64,
}

impl Default for Reference {
    fn default() -> Self {
        let p = SimParams::default();
        Self {
            target: p.target,
            disturbance: p.disturbance,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub mode: SimulationMode,
    pub plant: PlantConstants,
    pub controller: PidGains,
    pub reference: Reference,
    pub timing: Timing,
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn params(&self) -> SimParams {
        SimParams {
            gains: self.controller,
            target: self.reference.target,
            disturbance: self.reference.disturbance,
        }
    }

    /// Log values that will make the simulation meaningless.
    ///
    /// Nothing is rejected: the engine runs whatever it is given.
    /// Returns the number of warnings emitted.
    pub fn warn_preconditions(&self) -> usize {
        let mut warnings = 0;
        if !self.plant.is_physical() {
            warn!(plant = ?self.plant, "plant constants should be finite and positive");
            warnings += 1;
        }
        if !(self.timing.dt.is_finite() && self.timing.dt > 0.0) {
            warn!(dt = self.timing.dt, "time step should be positive");
            warnings += 1;
        }
        if self.reference.target == 0.0 {
            warn!("zero target: overshoot is undefined");
            warnings += 1;
        }
        let g = &self.controller;
        if ![g.kp, g.ki, g.kd].iter().all(|k| k.is_finite()) {
            warn!(gains = ?g, "non-finite PID gains");
            warnings += 1;
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_is_reference_setup() {
        let c = SimConfig::from_toml_str("").unwrap();
        assert_eq!(c, SimConfig::default());
        assert_eq!(c.mode, SimulationMode::Matlab);
        assert_eq!(c.params(), SimParams::default());
        assert_eq!(c.timing.steps(), 10_000);
        assert_eq!(c.warn_preconditions(), 0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let c = SimConfig::from_toml_str(
            r#"
            mode = "continuous"

            [controller]
            kp = 10.0

            [reference]
            disturbance = 0.05

            [timing]
            window = 20
            "#,
        )
        .unwrap();
        assert_eq!(c.mode, SimulationMode::Continuous);
        assert_eq!(c.controller.kp, 10.0);
        assert_eq!(c.controller.ki, 79.80);
        assert_eq!(c.reference.target, 1.0);
        assert_eq!(c.reference.disturbance, 0.05);
        assert_eq!(c.timing.window, 20);
        assert_eq!(c.timing.dt, 0.01);
        assert_eq!(c.plant, PlantConstants::default());
    }

    #[test]
    fn bad_mode_is_a_parse_error() {
        let err = SimConfig::from_toml_str("mode = \"analog\"").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }));
    }

    #[test]
    fn invalid_values_only_warn() {
        let c = SimConfig::from_toml_str(
            r#"
            [plant]
            inductance = 0.0
            [reference]
            target = 0.0
            [timing]
            dt = -1.0
            "#,
        )
        .unwrap();
        assert_eq!(c.warn_preconditions(), 3);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[plant]\ninertia = 0.02").unwrap();
        let c = SimConfig::load(file.path()).unwrap();
        assert_eq!(c.plant.inertia, 0.02);
        assert_eq!(c.plant.friction, 0.1);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimConfig::load(Path::new("/nonexistent/motor.toml")).unwrap_err();
        assert!(matches!(err, SimError::ConfigRead { .. }));
        assert!(err.to_string().contains("/nonexistent/motor.toml"));
    }
}
