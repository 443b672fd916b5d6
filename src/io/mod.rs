pub mod csv;
pub mod json;
pub mod report;

pub use csv::{write_debug_csv, write_debug_csv_file, DEBUG_HEADER};
pub use json::{write_summary, write_summary_file, RunSummary};
pub use report::SummaryReport;
