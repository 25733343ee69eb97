//! Append-mode CSV sinks
//!
//! One sink per event type. Files are opened in append mode and the
//! header row is written once at pipeline start; rows are written (and
//! flushed) one at a time as records resolve, so memory stays bounded
//! regardless of result-set size.
//!
//! Re-running the pipeline over the same range appends duplicate rows;
//! that is a caller responsibility, inherited from the export contract.

use crate::config::ExportConfig;
use crate::core::rows::{BirthRow, DeathRow};
use crate::domain::Result;
use std::fs::OpenOptions;
use std::path::Path;

/// Append-only tabular writer for one output file
pub struct CsvSink {
    writer: csv::Writer<std::fs::File>,
}

impl CsvSink {
    /// Opens the file in append mode and writes the header row
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or
    /// the file cannot be opened.
    pub fn open(path: &Path, headers: &[&str]) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(headers)?;
        writer.flush()?;

        Ok(Self { writer })
    }

    /// Appends one row and flushes it to disk
    pub fn append(&mut self, values: &[String]) -> Result<()> {
        self.writer.write_record(values)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// The pair of per-event-type sinks for one pipeline run
pub struct RowSinks {
    birth: CsvSink,
    death: CsvSink,
}

impl RowSinks {
    /// Opens both output files and writes their headers
    pub fn open(config: &ExportConfig) -> Result<Self> {
        let birth = CsvSink::open(&config.birth_path(), &BirthRow::headers())?;
        let death = CsvSink::open(&config.death_path(), &DeathRow::headers())?;
        Ok(Self { birth, death })
    }

    /// Writes one birth row
    pub fn write_birth(&mut self, row: &BirthRow) -> Result<()> {
        self.birth.append(&row.values())
    }

    /// Writes one death row
    pub fn write_death(&mut self, row: &DeathRow) -> Result<()> {
        self.death.append(&row.values())
    }
}
