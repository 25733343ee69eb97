//! Export coordinator - main orchestrator for the export process
//!
//! Drives the window → record state machine: for each calendar-month
//! window, open a cursor and load the location set, then resolve and
//! write records one at a time. Per-record failures are isolated here:
//! a record that fails to resolve is logged and skipped, and the cursor
//! moves on. A failure at cursor-advance time aborts the window (with a
//! partial report) but not the run.

use crate::adapters::store::{DocumentStore, EventCursor};
use crate::config::VitalexConfig;
use crate::core::export::summary::{ExportSummary, RecordOutcome, WindowReport};
use crate::core::resolve::{CompositionResolver, LocationIndex};
use crate::core::rows::{BirthRow, DeathRow};
use crate::core::scheduler::{month_windows, MonthWindow};
use crate::core::sink::RowSinks;
use crate::domain::records::EventRecord;
use crate::domain::vocabulary::is_exportable_status;
use crate::domain::{EventType, Result, VitalexError};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
///
/// Owns nothing external: the store handle is injected at construction
/// and dropped with the coordinator when the run ends.
pub struct ExportCoordinator {
    store: Arc<dyn DocumentStore>,
    config: VitalexConfig,
}

impl ExportCoordinator {
    /// Creates a coordinator over an injected store handle
    pub fn new(store: Arc<dyn DocumentStore>, config: VitalexConfig) -> Self {
        Self { store, config }
    }

    /// Executes the export over `[start, end]`
    ///
    /// Fatal errors (invalid range, unreachable store, unopenable
    /// output files) abort before any window is processed. Everything
    /// after that is absorbed into the summary.
    pub async fn run(&self, start: NaiveDate, end: NaiveDate) -> Result<ExportSummary> {
        let start_time = Instant::now();

        let windows = month_windows(start, end)?;

        self.store.ping().await.map_err(|e| {
            VitalexError::Export(format!("document store unreachable at startup: {e}"))
        })?;

        // Headers are written exactly once, here, at pipeline start
        let mut sinks = RowSinks::open(&self.config.export)?;

        tracing::info!(
            start = %start,
            end = %end,
            windows = windows.len(),
            "Starting export"
        );

        let mut summary = ExportSummary::new();

        for window in windows {
            let report = self.process_window(&window, &mut sinks).await?;
            report.log_report();
            summary.add_window(report);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Processes one month window
    ///
    /// The location set is loaded fresh for every window and shared
    /// read-only across its records.
    async fn process_window(
        &self,
        window: &MonthWindow,
        sinks: &mut RowSinks,
    ) -> Result<WindowReport> {
        tracing::info!(window = %window, "Processing window");

        let mut cursor = EventCursor::open(
            self.store.clone(),
            window.query_start(),
            window.query_end(),
            self.config.store.page_size,
        )
        .await?;

        let mut report = WindowReport::new(*window, cursor.total());

        if cursor.total() == 0 {
            tracing::info!(window = %window, "No records in window");
            return Ok(report);
        }

        let locations = LocationIndex::new(self.store.locations_by_ids(&[]).await?);
        tracing::debug!(locations = locations.len(), "Location set loaded");

        let resolver = CompositionResolver::new(self.store.as_ref(), &locations);

        loop {
            let event = match cursor.next().await {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(e) => {
                    // Cursor advance failed: the window cannot continue,
                    // but the run moves on with a partial report.
                    tracing::error!(window = %window, error = %e, "Window aborted mid-cursor");
                    break;
                }
            };

            let outcome = match self.process_record(&event, &resolver, sinks).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(record_id = %event.id, error = %e, "Failed to process record");
                    RecordOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            };
            report.record(&event.id, &outcome);
        }

        Ok(report)
    }

    /// Processes one event record in isolation
    async fn process_record(
        &self,
        event: &EventRecord,
        resolver: &CompositionResolver<'_>,
        sinks: &mut RowSinks,
    ) -> Result<RecordOutcome> {
        let task = self
            .store
            .task_for_event(&event.id)
            .await?
            .ok_or_else(|| {
                VitalexError::Resolution(format!("no task record for event {}", event.id))
            })?;

        let status = task.status_code().to_string();
        if !is_exportable_status(&status) {
            tracing::debug!(record_id = %event.id, status = %status, "Record filtered by status");
            return Ok(RecordOutcome::Filtered { status });
        }

        let composition = resolver.resolve(event, &task).await?;
        let event_type = EventType::from_title(&event.title);

        match event_type {
            EventType::Birth => sinks.write_birth(&BirthRow::from_composition(&composition))?,
            EventType::Death => sinks.write_death(&DeathRow::from_composition(&composition))?,
        }

        tracing::debug!(record_id = %event.id, event_type = %event_type, "Row written");
        Ok(RecordOutcome::Exported(event_type))
    }
}
