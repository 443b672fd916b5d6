use std::fmt;

use crate::analysis::PerformanceMetrics;

/// Human-readable step-response summary for a batch run.
///
/// ```text
/// Rise Time: 0.22 s
/// Overshoot: 13.31%
/// Settling Time: 0.25 s
/// System is stable.
/// Steady-State Error: 0.00%
/// ```
///
/// Times are step indices times `dt`; a missing index prints as `-dt`.
#[derive(Debug, Clone, Copy)]
pub struct SummaryReport<'a> {
    metrics: &'a PerformanceMetrics,
}

impl<'a> SummaryReport<'a> {
    pub fn new(metrics: &'a PerformanceMetrics) -> Self {
        Self { metrics }
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics;
        writeln!(f, "Rise Time: {:.2} s", m.rise_time())?;
        writeln!(f, "Overshoot: {:.2}%", m.overshoot_percent)?;
        writeln!(f, "Settling Time: {:.2} s", m.settling_time())?;
        writeln!(f, "System is stable.")?;
        write!(f, "Steady-State Error: {:.2}%", m.steady_state_error_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> PerformanceMetrics {
        PerformanceMetrics {
            rise_time_steps: Some(22),
            settling_time_steps: Some(25),
            peak_value: 1.133,
            overshoot_percent: 13.306,
            steady_state_error_percent: 0.0004,
            dt: 0.01,
        }
    }

    #[test]
    fn report_lines() {
        let text = SummaryReport::new(&metrics()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Rise Time: 0.22 s",
                "Overshoot: 13.31%",
                "Settling Time: 0.25 s",
                "System is stable.",
                "Steady-State Error: 0.00%",
            ]
        );
    }

    #[test]
    fn missing_times_print_sentinel() {
        let m = PerformanceMetrics {
            rise_time_steps: None,
            settling_time_steps: None,
            ..metrics()
        };
        let text = SummaryReport::new(&m).to_string();
        assert!(text.contains("Rise Time: -0.01 s"));
        assert!(text.contains("Settling Time: -0.01 s"));
    }
}
