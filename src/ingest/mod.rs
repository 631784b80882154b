//! Turns fetched entries into stored posts.
//!
//! Every entry is handled on its own: a bad date or a failed insert is
//! recorded in the [`IngestionReport`] and the rest of the batch carries on.

pub mod date;

use std::fmt;

use tracing::{debug, warn};

use crate::app::GatorError;
use crate::domain::NewPost;
use crate::fetcher::FetchedEntry;
use crate::store::Store;

pub use date::{parse_pub_date, DateParseError};

pub const DEFAULT_MAX_REPORTED_FAILURES: usize = 10;

/// Outcome counts for one batch. `failures` keeps the first few messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub inserted: usize,
    pub duplicate: usize,
    pub parse_failed: usize,
    pub insert_failed: usize,
    pub failures: Vec<String>,
}

impl IngestionReport {
    pub fn total(&self) -> usize {
        self.inserted + self.duplicate + self.parse_failed + self.insert_failed
    }

    pub fn failed(&self) -> usize {
        self.parse_failed + self.insert_failed
    }
}

impl fmt::Display for IngestionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new, {} already present, {} bad dates, {} insert errors",
            self.inserted, self.duplicate, self.parse_failed, self.insert_failed
        )
    }
}

#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    max_reported_failures: usize,
}

impl Default for IngestionPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPORTED_FAILURES)
    }
}

impl IngestionPipeline {
    pub fn new(max_reported_failures: usize) -> Self {
        Self {
            max_reported_failures,
        }
    }

    pub fn ingest<S: Store + ?Sized>(
        &self,
        store: &S,
        feed_id: i64,
        entries: &[FetchedEntry],
    ) -> IngestionReport {
        let mut report = IngestionReport::default();

        for entry in entries {
            let published_at = match parse_pub_date(&entry.raw_pub_date) {
                Ok(dt) => dt,
                Err(e) => {
                    warn!(feed_id, link = %entry.link, "Skipping entry: {}", e);
                    report.parse_failed += 1;
                    self.record(&mut report, format!("{}: {}", entry.link, e));
                    continue;
                }
            };

            let post = NewPost {
                feed_id,
                title: entry.title.clone(),
                url: entry.link.clone(),
                description: entry.description.clone(),
                published_at,
            };

            match store.insert_post(&post) {
                Ok(_) => report.inserted += 1,
                Err(GatorError::DuplicatePost(url)) => {
                    debug!(feed_id, url = %url, "Post already exists");
                    report.duplicate += 1;
                }
                Err(e) => {
                    warn!(feed_id, link = %entry.link, "Failed to store post: {}", e);
                    report.insert_failed += 1;
                    self.record(&mut report, format!("{}: {}", entry.link, e));
                }
            }
        }

        report
    }

    fn record(&self, report: &mut IngestionReport, message: String) {
        if report.failures.len() < self.max_reported_failures {
            report.failures.push(message);
        }
    }
}
