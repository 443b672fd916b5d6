use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Physical constants of the DC motor
// ---------------------------------------------------------------------------

/// Electromechanical constants of the motor. Fixed for the lifetime of a run.
///
/// All values must be strictly positive; `inertia` and `inductance` appear as
/// divisors in the equations of motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConstants {
    pub inertia: f64,        // J, kg·m^2
    pub friction: f64,       // b, N·m·s (viscous)
    pub motor_constant: f64, // K, N·m/A == V·s/rad
    pub resistance: f64,     // R, ohm
    pub inductance: f64,     // L, H
}

impl Default for PlantConstants {
    fn default() -> Self {
        Self {
            inertia: 0.01,
            friction: 0.1,
            motor_constant: 0.01,
            resistance: 1.0,
            inductance: 0.5,
        }
    }
}

impl PlantConstants {
    /// True when every constant is finite and strictly positive.
    pub fn is_physical(&self) -> bool {
        [
            self.inertia,
            self.friction,
            self.motor_constant,
            self.resistance,
            self.inductance,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    }
}

// ---------------------------------------------------------------------------
// Plant state: armature current, shaft velocity, shaft angle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlantState {
    pub current: f64,  // A
    pub velocity: f64, // angle units / s
    pub angle: f64,    // angle units
}

impl PlantState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
