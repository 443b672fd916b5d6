use serde::Serialize;

/// One point of the primary output sequence (chart series).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub angle: f64,
    pub target: f64,
}

/// Full per-step record: controller internals and plant state after the step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugSample {
    pub time: f64,
    pub angle: f64,
    pub target: f64,
    pub error: f64,
    pub integral_error: f64,
    pub derivative_error: f64,
    pub pid_output: f64,
    pub current: f64,
    pub velocity: f64,
}

impl DebugSample {
    pub fn sample(&self) -> Sample {
        Sample {
            time: self.time,
            angle: self.angle,
            target: self.target,
        }
    }
}
