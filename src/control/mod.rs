pub mod pid;

pub use pid::{pid_compute, ControllerState, PidGains, PidStep};
