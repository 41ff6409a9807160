use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use uuid::Uuid;

use crate::app::Result;
use crate::config::OutputConfig;
use crate::domain::{JobRecord, COLUMNS};
use crate::store::RecordSink;

/// Writes each run to its own uniquely named CSV file
#[derive(Debug, Clone)]
pub struct CsvSink {
    directory: PathBuf,
    prefix: String,
}

impl CsvSink {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            directory: output.directory.clone(),
            prefix: output.file_prefix.clone(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<prefix>-<YYYYMMDD-HHMMSS>-<8 hex>.csv`
    fn next_file_name(&self) -> String {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}-{}.csv", self.prefix, stamp, &suffix[..8])
    }
}

impl RecordSink for CsvSink {
    fn write(&self, records: &[JobRecord]) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(self.next_file_name());

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;

        Ok(path)
    }
}
