use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PID position controller (voltage output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self { kp: 60.54, ki: 79.80, kd: 45.48 }
    }
}

/// Integral accumulator and previous error, carried between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerState {
    pub integral_error: f64,
    pub last_error: f64,
}

impl ControllerState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of one controller evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidStep {
    pub output: f64,
    pub error: f64,
    pub derivative_error: f64,
}

/// Evaluate the controller once and update `state`.
///
/// The disturbance is added to the error signal, acting as a sensing or
/// reference offset rather than a load on the shaft. No output clamping, no
/// anti-windup and no derivative filter: the first call after a reset sees
/// `last_error == 0`, so its derivative term is `error / dt`.
pub fn pid_compute(
    state: &mut ControllerState,
    gains: &PidGains,
    target: f64,
    measured: f64,
    disturbance: f64,
    dt: f64,
) -> PidStep {
    let error = target - measured + disturbance;
    state.integral_error += error * dt;
    let derivative_error = (error - state.last_error) / dt;
    state.last_error = error;

    let output = gains.kp * error + gains.ki * state.integral_error + gains.kd * derivative_error;

    PidStep { output, error, derivative_error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 0.01;

    #[test]
    fn pid_proportional() {
        let mut s = ControllerState::default();
        let g = PidGains::new(2.0, 0.0, 0.0);
        let out = pid_compute(&mut s, &g, 1.0, 0.75, 0.0, DT);
        assert_relative_eq!(out.output, 0.5, epsilon = 1e-12);
        assert_relative_eq!(out.error, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn pid_integral_accumulates() {
        let mut s = ControllerState::default();
        let g = PidGains::new(0.0, 1.0, 0.0);
        pid_compute(&mut s, &g, 1.0, 0.0, 0.0, 0.1);
        let out = pid_compute(&mut s, &g, 1.0, 0.0, 0.0, 0.1);
        assert_relative_eq!(out.output, 0.2, epsilon = 1e-12);
        assert_relative_eq!(s.integral_error, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn first_derivative_is_error_over_dt() {
        let mut s = ControllerState::default();
        let g = PidGains::new(0.0, 0.0, 1.0);
        let out = pid_compute(&mut s, &g, 1.0, 0.0, 0.0, DT);
        assert_relative_eq!(out.derivative_error, 1.0 / DT, epsilon = 1e-9);
        assert_relative_eq!(out.output, 100.0, epsilon = 1e-9);
        assert_eq!(s.last_error, 1.0);
    }

    #[test]
    fn constant_error_has_zero_derivative_after_first_step() {
        let mut s = ControllerState::default();
        let g = PidGains::default();
        pid_compute(&mut s, &g, 0.5, 0.0, 0.0, DT);
        let out = pid_compute(&mut s, &g, 0.5, 0.0, 0.0, DT);
        assert_eq!(out.derivative_error, 0.0);
    }

    #[test]
    fn disturbance_is_added_to_error() {
        let mut s = ControllerState::default();
        let g = PidGains::new(1.0, 0.0, 0.0);
        let out = pid_compute(&mut s, &g, 1.0, 1.0, 0.2, DT);
        assert_relative_eq!(out.error, 0.2, epsilon = 1e-12);
        assert_relative_eq!(out.output, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn reset_clears_state() {
        let mut s = ControllerState { integral_error: 3.0, last_error: -1.0 };
        s.reset();
        assert_eq!(s, ControllerState::default());
    }

    #[test]
    fn zero_dt_propagates_non_finite() {
        let mut s = ControllerState::default();
        let out = pid_compute(&mut s, &PidGains::default(), 1.0, 0.0, 0.0, 0.0);
        assert!(!out.derivative_error.is_finite());
        assert!(!out.output.is_finite());
    }
}
