use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use motor_pid_sim::io::{self, RunSummary, SummaryReport};
use motor_pid_sim::sim::{BatchRunner, IncrementalSimulation, SimulationMode, Ticker};
use motor_pid_sim::{SimConfig, SimError};

/// DC motor position control simulator (PID + explicit Euler plant)
#[derive(Parser, Debug)]
#[command(name = "motor-pid-sim")]
#[command(version)]
#[command(about = "Simulate a PID-controlled DC motor tracking a target angle")]
struct Args {
    /// TOML configuration file. Flags below override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// `matlab` runs one fixed-length batch, `continuous` steps per tick.
    #[arg(long, value_enum)]
    mode: Option<SimulationMode>,

    #[arg(long, allow_negative_numbers = true)]
    kp: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    ki: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    kd: Option<f64>,

    /// Target angle.
    #[arg(long, allow_negative_numbers = true)]
    target: Option<f64>,

    /// Offset added to the controller error.
    #[arg(long, allow_negative_numbers = true)]
    disturbance: Option<f64>,

    /// Fixed time step [s].
    #[arg(long)]
    dt: Option<f64>,

    /// Batch duration [s].
    #[arg(long)]
    duration: Option<f64>,

    /// Write the per-step debug trail as CSV.
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write a JSON run summary (batch mode).
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Number of ticks in continuous mode (default: duration / dt).
    #[arg(long)]
    ticks: Option<u64>,

    /// Pace continuous mode in wall-clock time, one tick per dt.
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        let overrides = [
            (self.kp, &mut config.controller.kp),
            (self.ki, &mut config.controller.ki),
            (self.kd, &mut config.controller.kd),
            (self.target, &mut config.reference.target),
            (self.disturbance, &mut config.reference.disturbance),
            (self.dt, &mut config.timing.dt),
            (self.duration, &mut config.timing.duration),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("motor-pid-sim v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn setup_tracing(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    args.apply(&mut config);
    config.warn_preconditions();

    print_header(&config);

    match config.mode {
        SimulationMode::Matlab => run_batch(&config, args),
        SimulationMode::Continuous => run_continuous(&config, args),
    }
}

fn print_header(config: &SimConfig) {
    let p = &config.plant;
    let g = &config.controller;
    println!();
    println!("====================================================================");
    println!("  DC MOTOR POSITION CONTROL — {:?} mode", config.mode);
    println!("====================================================================");
    println!();
    println!("  Plant");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  J: {:>10.4} kg·m^2   b: {:>8.4} N·m·s   K: {:>8.4}",
        p.inertia, p.friction, p.motor_constant
    );
    println!("  R: {:>10.4} ohm      L: {:>8.4} H", p.resistance, p.inductance);
    println!();
    println!("  Controller");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Kp: {:>9.2}   Ki: {:>9.2}   Kd: {:>9.2}", g.kp, g.ki, g.kd);
    println!(
        "  Target: {:>6.3}   Disturbance: {:>6.3}   dt: {} s",
        config.reference.target, config.reference.disturbance, config.timing.dt
    );
    println!();
}

fn run_batch(config: &SimConfig, args: &Args) -> Result<(), SimError> {
    let params = config.params();
    let mut runner = BatchRunner::new(config.plant, config.timing);
    let run = runner.run(&params);

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    for line in SummaryReport::new(&run.metrics).to_string().lines() {
        println!("  {line}");
    }
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>8}  {:>10}  {:>10}  {:>10}  {:>10}",
        "t (s)", "angle", "error", "voltage", "current"
    );
    println!("  {}", "─".repeat(56));
    let interval = (run.debug.len() / 25).max(1);
    for (i, d) in run.debug.iter().enumerate() {
        if i % interval != 0 && i + 1 != run.debug.len() {
            continue;
        }
        println!(
            "  {:>8.2}  {:>10.5}  {:>10.5}  {:>10.3}  {:>10.4}",
            d.time, d.angle, d.error, d.pid_output, d.current
        );
    }
    println!();
    println!("  Simulation: {} steps, dt={} s", run.debug.len(), config.timing.dt);
    println!("====================================================================");

    if let Some(path) = &args.csv {
        io::write_debug_csv_file(path, &run.debug)?;
        info!(path = %path.display(), rows = run.debug.len(), "debug CSV written");
    }

    if let Some(path) = &args.json {
        let summary = RunSummary {
            plant: &config.plant,
            params: &params,
            timing: &config.timing,
            steps: run.samples.len(),
            final_angle: run.samples.last().map(|s| s.angle),
            performance: &run.metrics,
        };
        io::write_summary_file(path, &summary)?;
        info!(path = %path.display(), "JSON summary written");
    }

    Ok(())
}

fn run_continuous(config: &SimConfig, args: &Args) -> Result<(), SimError> {
    let ticks = args.ticks.unwrap_or(config.timing.steps() as u64);
    let mut sim = IncrementalSimulation::new(config.plant, config.params(), &config.timing);

    if args.realtime {
        let dt = config.timing.dt;
        let period = Duration::try_from_secs_f64(dt)
            .ok()
            .filter(|p| !p.is_zero())
            .ok_or(SimError::InvalidTickPeriod { dt })?;

        let shared = sim.into_shared();
        shared.lock().start();
        info!(ticks, ?period, "running in real time");
        let delivered = Ticker::spawn_limited(Arc::clone(&shared), period, ticks)?.wait();
        info!(delivered, "ticker finished");

        let mut sim = shared.lock();
        sim.stop();
        finish_continuous(&sim, args)
    } else {
        sim.start();
        for _ in 0..ticks {
            sim.tick();
        }
        sim.stop();
        finish_continuous(&sim, args)
    }
}

fn finish_continuous(sim: &IncrementalSimulation, args: &Args) -> Result<(), SimError> {
    println!("  Live Readout");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Steps:          {:>10}", sim.steps());
    println!("  Time:           {:>10.2} s", sim.steps() as f64 * sim.dt());
    println!("  Current angle:  {:>10.5}", sim.current_angle());
    println!("  Target:         {:>10.5}", sim.params().target);
    println!("  Window samples: {:>10}", sim.samples().len());
    println!("====================================================================");

    if let Some(path) = &args.csv {
        io::write_debug_csv_file(path, sim.debug_samples())?;
        info!(path = %path.display(), rows = sim.debug_samples().len(), "debug CSV written");
    }

    Ok(())
}
