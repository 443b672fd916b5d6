use std::io::{self, Write};
use std::path::Path;

use crate::sim::DebugSample;

/// Header row of the debug export. Field order is part of the file format.
pub const DEBUG_HEADER: &str =
    "Time,Angle,Target,Error,IntegralError,DerivativeError,PIDOutput,Current,Velocity";

/// Write the debug trail as CSV: the header, then one row per step.
///
/// Values use Rust's shortest round-trip float formatting, so the file
/// reloads to the exact simulated values.
pub fn write_debug_csv<W: Write>(writer: &mut W, samples: &[DebugSample]) -> io::Result<()> {
    writeln!(writer, "{DEBUG_HEADER}")?;

    for s in samples {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{}",
            s.time,
            s.angle,
            s.target,
            s.error,
            s.integral_error,
            s.derivative_error,
            s.pid_output,
            s.current,
            s.velocity,
        )?;
    }

    Ok(())
}

/// Write the debug trail to a CSV file at `path`.
pub fn write_debug_csv_file<P: AsRef<Path>>(path: P, samples: &[DebugSample]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_debug_csv(&mut file, samples)?;
    file.flush()
}
