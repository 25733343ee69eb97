//! Forward-only event cursor
//!
//! The cursor pages lazily through the event records of one window,
//! holding at most one page in memory. It is forward-only and
//! non-resumable: a failure at advance time aborts the window.

use super::traits::DocumentStore;
use crate::domain::records::EventRecord;
use crate::domain::Result;
use std::collections::VecDeque;
use std::sync::Arc;

/// Lazily-advancing cursor over event records in a date range
pub struct EventCursor {
    store: Arc<dyn DocumentStore>,
    from: String,
    to: String,
    page_size: u64,
    offset: u64,
    total: u64,
    buffer: VecDeque<EventRecord>,
    exhausted: bool,
}

impl EventCursor {
    /// Opens a cursor over `[from, to]`, fetching the total count up
    /// front without materializing any records
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        from: impl Into<String>,
        to: impl Into<String>,
        page_size: u64,
    ) -> Result<Self> {
        let from = from.into();
        let to = to.into();
        let total = store.count_events(&from, &to).await?;

        Ok(Self {
            store,
            from,
            to,
            page_size: page_size.max(1),
            offset: 0,
            total,
            buffer: VecDeque::new(),
            exhausted: total == 0,
        })
    }

    /// Total number of records in the range, known since open
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Advances to the next record, fetching a new page when the buffer
    /// runs dry. Returns `None` once the range is exhausted.
    pub async fn next(&mut self) -> Result<Option<EventRecord>> {
        if self.buffer.is_empty() && !self.exhausted {
            let page = self
                .store
                .events_page(&self.from, &self.to, self.offset, self.page_size)
                .await?;

            if page.is_empty() {
                self.exhausted = true;
            } else {
                self.offset += page.len() as u64;
                if (page.len() as u64) < self.page_size {
                    self.exhausted = true;
                }
                self.buffer.extend(page);
            }
        }

        Ok(self.buffer.pop_front())
    }
}
