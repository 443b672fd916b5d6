//! Armature-controlled DC motor, discretized with a fixed-step explicit
//! Euler scheme.
//!
//! State vector `x = [i, ω, θ]`, input `u` (armature voltage):
//!
//! ```text
//!   di/dt = (u - R·i - K·ω) / L
//!   dω/dt = (K·i - b·ω - τ_load) / J
//!   dθ/dt = ω
//! ```

pub mod state;

use nalgebra::{Matrix3, Vector3};

pub use state::{PlantConstants, PlantState};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlantModel {
    pub constants: PlantConstants,
}

impl PlantModel {
    pub fn new(constants: PlantConstants) -> Self {
        Self { constants }
    }

    /// Time derivatives `[di/dt, dω/dt, dθ/dt]` at `state`.
    ///
    /// `load_torque` opposes the motor torque. The closed loop in
    /// [`crate::sim`] always passes zero: its disturbance enters through the
    /// controller error instead.
    pub fn derivatives(&self, state: &PlantState, voltage: f64, load_torque: f64) -> Vector3<f64> {
        let c = &self.constants;
        let torque = c.motor_constant * state.current;
        let back_emf = c.motor_constant * state.velocity;

        Vector3::new(
            (voltage - c.resistance * state.current - back_emf) / c.inductance,
            (torque - c.friction * state.velocity - load_torque) / c.inertia,
            state.velocity,
        )
    }

    /// Advance the plant by one step of `dt`.
    ///
    /// Update order is fixed: velocity, then current, then angle. The angle
    /// is integrated with the *updated* velocity (semi-implicit in θ), while
    /// current and velocity use derivatives taken at the start of the step.
    pub fn advance(&self, state: &PlantState, voltage: f64, load_torque: f64, dt: f64) -> PlantState {
        let d = self.derivatives(state, voltage, load_torque);

        let velocity = state.velocity + d.y * dt;
        let current = state.current + d.x * dt;
        let angle = state.angle + velocity * dt;

        PlantState { current, velocity, angle }
    }

    /// Continuous linear model `dx/dt = A·x + B·u` (no load torque).
    pub fn state_space(&self) -> (Matrix3<f64>, Vector3<f64>) {
        let c = &self.constants;
        #[rustfmt::skip]
        let a = Matrix3::new(
            -c.resistance / c.inductance, -c.motor_constant / c.inductance, 0.0,
            c.motor_constant / c.inertia, -c.friction / c.inertia, 0.0,
            0.0, 1.0, 0.0,
        );
        let b = Vector3::new(1.0 / c.inductance, 0.0, 0.0);
        (a, b)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
