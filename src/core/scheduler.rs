//! Date-range scheduling
//!
//! Splits the requested export span into sequential calendar-month
//! windows. Each window starts the day after the previous window's end
//! and ends at the last day of its starting month, except the final
//! window which ends exactly at the overall end date. The windows are
//! contiguous, non-overlapping, and their union covers the span exactly.

use crate::domain::{Result, VitalexError};
use chrono::{Datelike, NaiveDate};

/// One calendar-month-aligned export window, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Window start as a day-start timestamp for range queries
    pub fn query_start(&self) -> String {
        format!("{}T00:00:00.000", self.start)
    }

    /// Window end as a day-end timestamp for range queries
    pub fn query_end(&self) -> String {
        format!("{}T23:59:59.000", self.end)
    }
}

impl std::fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Splits `[start, end]` into calendar-month windows
///
/// The number of windows equals the calendar-month span plus one.
///
/// # Errors
///
/// Returns a validation error when `start` is after `end`; this is a
/// fatal startup condition for the pipeline.
pub fn month_windows(start: NaiveDate, end: NaiveDate) -> Result<Vec<MonthWindow>> {
    if start > end {
        return Err(VitalexError::Validation(format!(
            "start date {start} is after end date {end}"
        )));
    }

    let mut windows = Vec::new();
    let mut cursor = start;

    while cursor <= end {
        let window_end = last_day_of_month(cursor).min(end);
        windows.push(MonthWindow {
            start: cursor,
            end: window_end,
        });

        cursor = match window_end.succ_opt() {
            Some(next) => next,
            None => break, // end of the calendar
        };
    }

    Ok(windows)
}

/// Last day of the month `date` falls in
fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .expect("valid previous day for first of month")
}
