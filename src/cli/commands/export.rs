//! Export command implementation
//!
//! This module implements the `export` command: two positional
//! inclusive ISO-8601 dates select the range, everything else comes
//! from configuration.

use crate::adapters::store::HttpDocumentStore;
use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Inclusive start date of the export range (YYYY-MM-DD)
    pub start_date: NaiveDate,

    /// Inclusive end date of the export range (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            start = %self.start_date,
            end = %self.end_date,
            "Starting export command"
        );

        let config = load_config(config_path)?;

        let store = Arc::new(HttpDocumentStore::new(config.store.clone())?);
        let coordinator = ExportCoordinator::new(store, config);

        let summary = coordinator.run(self.start_date, self.end_date).await?;

        println!(
            "Export finished: {} birth rows, {} death rows ({} records seen, {} filtered, {} skipped)",
            summary.births_exported(),
            summary.deaths_exported(),
            summary.total_records(),
            summary.filtered(),
            summary.failed()
        );

        if !summary.is_successful() {
            println!("⚠️  {} record(s) were skipped; see the log for details", summary.failed());
        }

        // Zero records found is still a successful completion
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_hold_parsed_dates() {
        let args = ExportArgs {
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
        };
        assert!(args.start_date < args.end_date);
    }
}
