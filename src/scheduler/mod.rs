//! Feed polling loop.
//!
//! Each tick runs one cycle for exactly one feed:
//!
//! ```text
//! Idle → ClaimingFeed → MarkingFetched → Fetching → Ingesting → Idle
//! ```
//!
//! The claimed feed is stamped before the network fetch, so a slow or failing
//! feed still moves to the back of the rotation. Failures inside a cycle are
//! logged and the loop carries on; only a run of consecutive store failures
//! (or a stop request) ends it.

pub mod clock;
pub mod interval;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::app::{GatorError, Result};
use crate::fetcher::Fetcher;
use crate::ingest::{IngestionPipeline, IngestionReport, DEFAULT_MAX_REPORTED_FAILURES};
use crate::store::Store;

pub use clock::{Clock, SteppingClock, SystemClock};
pub use interval::{format_interval, parse_interval};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_STORE_FAILURES: u32 = 5;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between cycles
    pub interval: Duration,
    /// Upper bound on a single feed fetch
    pub fetch_timeout: Duration,
    /// Consecutive claim/mark failures tolerated before the loop stops (0 = never)
    pub max_store_failures: u32,
    /// Failure messages kept per ingestion report
    pub max_reported_failures: usize,
}

impl SchedulerConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_store_failures: DEFAULT_MAX_STORE_FAILURES,
            max_reported_failures: DEFAULT_MAX_REPORTED_FAILURES,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(GatorError::Config("Interval must be positive".into()));
        }
        if self.fetch_timeout.is_zero() {
            return Err(GatorError::Config("Fetch timeout must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    ClaimingFeed,
    MarkingFetched,
    Fetching,
    Ingesting,
    Stopped,
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Entries of the claimed feed went through the pipeline
    Ingested { feed_id: i64, report: IngestionReport },
    /// The store holds no feeds
    NoFeeds,
    /// The claimed feed was deleted before it could be marked
    FeedGone { feed_id: i64 },
    /// Fetching or parsing the claimed feed failed
    FetchFailed { feed_id: i64, error: GatorError },
    /// Claiming or marking failed inside the store
    StoreFailed(GatorError),
}

/// Totals over one `run`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: usize,
    pub posts_inserted: usize,
    pub fetch_failures: usize,
    pub store_failures: usize,
    pub empty_claims: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Ingested { report, .. } => self.posts_inserted += report.inserted,
            CycleOutcome::NoFeeds | CycleOutcome::FeedGone { .. } => self.empty_claims += 1,
            CycleOutcome::FetchFailed { .. } => self.fetch_failures += 1,
            CycleOutcome::StoreFailed(_) => self.store_failures += 1,
        }
    }
}

pub struct Scheduler<S> {
    store: Arc<S>,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    pipeline: IngestionPipeline,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    state: Mutex<CycleState>,
    stop_tx: watch::Sender<bool>,
}

impl<S: Store + Send + Sync + 'static> Scheduler<S> {
    pub fn new(
        store: Arc<S>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        config: SchedulerConfig,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            store,
            fetcher,
            pipeline: IngestionPipeline::new(config.max_reported_failures),
            clock: Arc::new(SystemClock),
            config,
            state: Mutex::new(CycleState::Idle),
            stop_tx,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> CycleState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Ask a running loop to stop at its next state boundary. A cycle in
    /// flight is abandoned; posts it already stored are kept.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Run cycles until stopped. The first cycle starts immediately.
    pub async fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;

        let mut stop_rx = self.stop_tx.subscribe();
        let mut summary = RunSummary::default();

        if *stop_rx.borrow() {
            self.set_state(CycleState::Stopped);
            return Ok(summary);
        }

        info!(
            "Collecting feeds every {} (fetch timeout {})",
            format_interval(self.config.interval),
            format_interval(self.config.fetch_timeout)
        );

        let mut timer = tokio::time::interval(self.config.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut store_failures = 0u32;

        loop {
            tokio::select! {
                _ = timer.tick() => {}
                _ = stop_rx.changed() => break,
            }

            let outcome = tokio::select! {
                outcome = self.run_cycle() => outcome,
                _ = stop_rx.changed() => {
                    info!("Stop requested, abandoning cycle in progress");
                    break;
                }
            };
            summary.record(&outcome);

            match outcome {
                CycleOutcome::StoreFailed(e) => {
                    store_failures += 1;
                    if self.config.max_store_failures > 0
                        && store_failures >= self.config.max_store_failures
                    {
                        error!(
                            failures = store_failures,
                            "Store keeps failing, stopping aggregation: {}", e
                        );
                        self.set_state(CycleState::Stopped);
                        return Err(e);
                    }
                }
                _ => store_failures = 0,
            }
        }

        self.set_state(CycleState::Stopped);
        info!(
            cycles = summary.cycles,
            new_posts = summary.posts_inserted,
            "Aggregation stopped"
        );
        Ok(summary)
    }

    /// Claim, mark, fetch and ingest one feed.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let outcome = self.cycle().await;
        self.set_state(CycleState::Idle);
        outcome
    }

    async fn cycle(&self) -> CycleOutcome {
        self.set_state(CycleState::ClaimingFeed);
        let feed = match self.store.claim_next_feed() {
            Ok(feed) => feed,
            Err(GatorError::NoFeeds) => {
                info!("No feeds to fetch, add one with `gator addfeed <name> <url>`");
                return CycleOutcome::NoFeeds;
            }
            Err(e) => {
                warn!("Failed to claim next feed: {}", e);
                return CycleOutcome::StoreFailed(e);
            }
        };

        self.set_state(CycleState::MarkingFetched);
        match self.store.mark_fetched(feed.id, self.clock.now()) {
            Ok(()) => {}
            Err(GatorError::FeedNotFound(_)) => {
                info!(feed_id = feed.id, "Feed was removed before it could be fetched");
                return CycleOutcome::FeedGone { feed_id: feed.id };
            }
            Err(e) => {
                warn!(feed_id = feed.id, "Failed to mark feed as fetched: {}", e);
                return CycleOutcome::StoreFailed(e);
            }
        }

        self.set_state(CycleState::Fetching);
        info!(feed_id = feed.id, url = %feed.url, "Fetching {}", feed.display_title());
        let timeout = self.config.fetch_timeout;
        let fetched = tokio::time::timeout(timeout, self.fetcher.fetch(&feed.url, timeout))
            .await
            .unwrap_or(Err(GatorError::Timeout(timeout)));

        let doc = match fetched {
            Ok(doc) => doc,
            Err(e) => {
                warn!(feed_id = feed.id, url = %feed.url, "Error fetching feed: {}", e);
                return CycleOutcome::FetchFailed {
                    feed_id: feed.id,
                    error: e,
                };
            }
        };

        self.set_state(CycleState::Ingesting);
        let report = self.pipeline.ingest(self.store.as_ref(), feed.id, &doc.entries);
        info!(
            feed_id = feed.id,
            entries = report.total(),
            failed = report.failed(),
            "{}: {}",
            feed.display_title(),
            report
        );

        CycleOutcome::Ingested {
            feed_id: feed.id,
            report,
        }
    }

    fn set_state(&self, next: CycleState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != next {
            debug!(from = ?*state, to = ?next, "Scheduler state");
            *state = next;
        }
    }
}
