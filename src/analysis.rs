//! Step-response metrics derived from a sampled trajectory.
//!
//! The definitions are deliberately simple and match the reference batch
//! tooling the simulator is compared against:
//!
//! - rise time: first sample with `angle >= 0.9 * target`
//! - settling time: first sample with `|angle - target| <= 0.02 * target`.
//!   This is first entry into the band; staying inside is not checked.
//! - overshoot: `(peak - target) / target * 100`, negative if the response
//!   never passes the target
//! - steady-state error: `|final angle - target| * 100`. An absolute error
//!   scaled by 100, which is a percentage of target only when `target == 1`.

use serde::Serialize;

use crate::sim::Sample;

/// Step index reported for an event that never happened.
pub const NOT_FOUND: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub rise_time_steps: Option<usize>,
    pub settling_time_steps: Option<usize>,
    pub peak_value: f64,
    pub overshoot_percent: f64,
    pub steady_state_error_percent: f64,
    pub dt: f64,
}

impl PerformanceMetrics {
    /// Rise time in seconds. A missing rise time converts as [`NOT_FOUND`]` * dt`.
    pub fn rise_time(&self) -> f64 {
        steps_to_seconds(self.rise_time_steps, self.dt)
    }

    /// Settling time in seconds, with the same sentinel conversion as
    /// [`rise_time`](Self::rise_time).
    pub fn settling_time(&self) -> f64 {
        steps_to_seconds(self.settling_time_steps, self.dt)
    }
}

fn steps_to_seconds(steps: Option<usize>, dt: f64) -> f64 {
    steps.map_or(NOT_FOUND as f64, |s| s as f64) * dt
}

/// Reduce a trajectory to step-response metrics.
///
/// `target` must be non-zero for a meaningful overshoot. An empty trajectory
/// yields no rise/settling index and non-finite overshoot and error.
pub fn analyze(samples: &[Sample], target: f64, dt: f64) -> PerformanceMetrics {
    let rise_time_steps = samples.iter().position(|s| s.angle >= 0.9 * target);
    let settling_time_steps = samples
        .iter()
        .position(|s| (s.angle - target).abs() <= 0.02 * target);

    let peak_value = samples
        .iter()
        .map(|s| s.angle)
        .fold(f64::NEG_INFINITY, f64::max);
    let overshoot_percent = (peak_value - target) / target * 100.0;

    let steady_state_error_percent = samples
        .last()
        .map_or(f64::NAN, |s| (s.angle - target).abs() * 100.0);

    PerformanceMetrics {
        rise_time_steps,
        settling_time_steps,
        peak_value,
        overshoot_percent,
        steady_state_error_percent,
        dt,
    }
}
