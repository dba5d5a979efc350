use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_FETCH_TIMEOUT;
use crate::error::AppError;
use crate::models::{Job, JobSnapshot, JobSource};
use crate::traits::{Fetcher, JobStore, ListingParser};

/// How a [`JobLoader::load_jobs`] run ended.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The live scrape succeeded.
    Live(Vec<Job>),
    /// The live scrape failed and the persisted collection was read instead.
    Fallback { jobs: Vec<Job>, cause: AppError },
    /// Neither source produced a collection.
    Unavailable {
        live_error: AppError,
        fallback_error: AppError,
    },
}

impl LoadOutcome {
    pub fn source(&self) -> JobSource {
        match self {
            LoadOutcome::Live(_) => JobSource::Live,
            LoadOutcome::Fallback { .. } => JobSource::Persisted,
            LoadOutcome::Unavailable { .. } => JobSource::Unavailable,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        match self {
            LoadOutcome::Live(jobs) | LoadOutcome::Fallback { jobs, .. } => jobs,
            LoadOutcome::Unavailable { .. } => &[],
        }
    }

    /// Freeze the outcome into the snapshot a process serves from.
    /// An unavailable outcome becomes an empty snapshot.
    pub fn into_snapshot(self) -> JobSnapshot {
        let source = self.source();
        let jobs = match self {
            LoadOutcome::Live(jobs) | LoadOutcome::Fallback { jobs, .. } => jobs,
            LoadOutcome::Unavailable { .. } => Vec::new(),
        };
        JobSnapshot::new(jobs, source)
    }
}

/// Loads the job collection: one live scrape, then one read of the
/// persisted file if the scrape fails.
///
/// Generic over all external dependencies via traits, so the fallback
/// path can be exercised without a network or a real file.
pub struct JobLoader<F, P, S>
where
    F: Fetcher,
    P: ListingParser,
    S: JobStore,
{
    fetcher: F,
    parser: P,
    store: S,
    source_url: String,
    fetch_timeout: Duration,
}

impl<F, P, S> JobLoader<F, P, S>
where
    F: Fetcher,
    P: ListingParser,
    S: JobStore,
{
    pub fn new(fetcher: F, parser: P, store: S, source_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            parser,
            store,
            source_url: source_url.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch and parse the listing page. Does not persist anything.
    ///
    /// The fetch is bounded by the loader's timeout and by `cancel`.
    /// A page with no listings is reported as [`AppError::NoListings`].
    pub async fn scrape_live(&self, cancel: &CancellationToken) -> Result<Vec<Job>, AppError> {
        tracing::info!("Fetching {}", self.source_url);

        let html = tokio::select! {
            () = cancel.cancelled() => return Err(AppError::Cancelled),
            res = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(&self.source_url)) => {
                match res {
                    Ok(fetched) => fetched?,
                    Err(_) => return Err(AppError::timeout(self.fetch_timeout)),
                }
            }
        };
        tracing::info!("Fetched {} bytes of HTML", html.len());

        let jobs = self.parser.parse(&html)?;
        if jobs.is_empty() {
            return Err(AppError::NoListings(self.source_url.clone()));
        }
        tracing::info!(count = jobs.len(), "Scraped jobs");

        Ok(jobs)
    }

    /// Run the load state machine once.
    ///
    /// 1. Live scrape; on success persist the result (a failed save is
    ///    logged and does not affect the returned jobs)
    /// 2. On any live failure, read the persisted collection
    /// 3. If that fails too, report both errors
    pub async fn load_jobs(&self, cancel: &CancellationToken) -> LoadOutcome {
        let live_error = match self.scrape_live(cancel).await {
            Ok(jobs) => {
                if let Err(e) = self.store.save(&jobs).await {
                    tracing::warn!(error = %e, "Failed to persist scraped jobs");
                }
                return LoadOutcome::Live(jobs);
            }
            Err(e) => e,
        };

        tracing::warn!(error = %live_error, "Live scrape failed, reading persisted jobs");

        match self.store.load().await {
            Ok(jobs) => {
                tracing::info!(count = jobs.len(), "Loaded persisted jobs");
                LoadOutcome::Fallback {
                    jobs,
                    cause: live_error,
                }
            }
            Err(fallback_error) => {
                tracing::error!(
                    live_error = %live_error,
                    fallback_error = %fallback_error,
                    "No job source available"
                );
                LoadOutcome::Unavailable {
                    live_error,
                    fallback_error,
                }
            }
        }
    }
}
