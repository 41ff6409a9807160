pub mod csv;

use std::path::PathBuf;

use crate::app::Result;
use crate::domain::JobRecord;

pub use self::csv::CsvSink;

/// Destination for the records of a run. Called once per run.
pub trait RecordSink {
    /// Persist `records` and return where they went
    fn write(&self, records: &[JobRecord]) -> Result<PathBuf>;
}
