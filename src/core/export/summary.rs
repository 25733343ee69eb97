//! Export reporting
//!
//! Every record processed in a window lands in exactly one outcome:
//! exported with a row, filtered by the business-status gate, or failed
//! with a reason. Outcomes aggregate into per-window reports and an
//! overall summary, so a run's skips are observable rather than buried
//! in log lines.

use crate::core::scheduler::MonthWindow;
use crate::domain::EventType;
use std::time::Duration;

/// Result of processing one event record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A row was written for this event type
    Exported(EventType),
    /// Record excluded by the business-status gate
    Filtered { status: String },
    /// Resolution or store failure; the record was skipped
    Failed { message: String },
}

/// One skipped record with its identifying context
#[derive(Debug, Clone)]
pub struct RecordFailure {
    pub record_id: String,
    pub message: String,
}

/// Aggregated outcomes for one month window
#[derive(Debug, Clone)]
pub struct WindowReport {
    pub window: MonthWindow,
    /// Record count reported by the cursor at open
    pub total_records: u64,
    pub births_exported: usize,
    pub deaths_exported: usize,
    pub filtered: usize,
    pub failed: usize,
    pub failures: Vec<RecordFailure>,
}

impl WindowReport {
    /// Creates an empty report for a window with a known record count
    pub fn new(window: MonthWindow, total_records: u64) -> Self {
        Self {
            window,
            total_records,
            births_exported: 0,
            deaths_exported: 0,
            filtered: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// Files one record outcome into the report
    pub fn record(&mut self, record_id: &str, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Exported(EventType::Birth) => self.births_exported += 1,
            RecordOutcome::Exported(EventType::Death) => self.deaths_exported += 1,
            RecordOutcome::Filtered { .. } => self.filtered += 1,
            RecordOutcome::Failed { message } => {
                self.failed += 1;
                self.failures.push(RecordFailure {
                    record_id: record_id.to_string(),
                    message: message.clone(),
                });
            }
        }
    }

    /// Number of rows written in this window
    pub fn exported(&self) -> usize {
        self.births_exported + self.deaths_exported
    }

    /// Logs the report for this window
    pub fn log_report(&self) {
        tracing::info!(
            window = %self.window,
            total = self.total_records,
            births = self.births_exported,
            deaths = self.deaths_exported,
            filtered = self.filtered,
            failed = self.failed,
            "Window completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                record_id = %failure.record_id,
                reason = %failure.message,
                "Record skipped"
            );
        }
    }
}

/// Summary of an entire export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub windows: Vec<WindowReport>,
    pub duration: Duration,
}

impl ExportSummary {
    /// Creates a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Adds a completed window report
    pub fn add_window(&mut self, report: WindowReport) {
        self.windows.push(report);
    }

    /// Total records seen across all windows
    pub fn total_records(&self) -> u64 {
        self.windows.iter().map(|w| w.total_records).sum()
    }

    /// Total birth rows written
    pub fn births_exported(&self) -> usize {
        self.windows.iter().map(|w| w.births_exported).sum()
    }

    /// Total death rows written
    pub fn deaths_exported(&self) -> usize {
        self.windows.iter().map(|w| w.deaths_exported).sum()
    }

    /// Total records filtered by the business-status gate
    pub fn filtered(&self) -> usize {
        self.windows.iter().map(|w| w.filtered).sum()
    }

    /// Total records skipped for failures
    pub fn failed(&self) -> usize {
        self.windows.iter().map(|w| w.failed).sum()
    }

    /// Whether the run completed without any skipped record
    pub fn is_successful(&self) -> bool {
        self.failed() == 0
    }

    /// Logs the summary
    pub fn log_summary(&self) {
        tracing::info!(
            windows = self.windows.len(),
            total_records = self.total_records(),
            births = self.births_exported(),
            deaths = self.deaths_exported(),
            filtered = self.filtered(),
            failed = self.failed(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        if !self.is_successful() {
            tracing::warn!(
                failed = self.failed(),
                "Export completed with skipped records"
            );
        }
    }
}
