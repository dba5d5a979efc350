//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::Job;
use crate::traits::{Fetcher, JobStore, ListingParser};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum FetchBehavior {
    Respond(Arc<Mutex<Option<Result<String, AppError>>>>),
    Hang,
}

/// Mock fetcher that returns a configurable response once.
#[derive(Clone)]
pub struct MockFetcher {
    behavior: FetchBehavior,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::respond(Ok(html.to_string()))
    }

    pub fn with_error(error: AppError) -> Self {
        Self::respond(Err(error))
    }

    /// A fetcher whose request never completes.
    pub fn hanging() -> Self {
        Self {
            behavior: FetchBehavior::Hang,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn respond(response: Result<String, AppError>) -> Self {
        Self {
            behavior: FetchBehavior::Respond(Arc::new(Mutex::new(Some(response)))),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs passed to `fetch`, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.requested.lock().unwrap().push(url.to_string());
        let response = match &self.behavior {
            FetchBehavior::Hang => return std::future::pending().await,
            FetchBehavior::Respond(response) => response.lock().unwrap().take(),
        };
        response.unwrap_or_else(|| Err(AppError::HttpError("mock fetcher exhausted".into())))
    }
}

// ---------------------------------------------------------------------------
// MockParser
// ---------------------------------------------------------------------------

/// Mock parser that ignores its input and returns fixed jobs.
#[derive(Clone)]
pub struct MockParser {
    jobs: Vec<Job>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockParser {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            jobs: Vec::new(),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl ListingParser for MockParser {
    fn parse(&self, _html: &str) -> Result<Vec<Job>, AppError> {
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self.jobs.clone())
    }
}

// ---------------------------------------------------------------------------
// MockStore
// ---------------------------------------------------------------------------

/// In-memory job store that records saves and can be told to fail.
#[derive(Clone)]
pub struct MockStore {
    contents: Arc<Mutex<Option<Vec<Job>>>>,
    saved: Arc<Mutex<Vec<Vec<Job>>>>,
    load_calls: Arc<Mutex<usize>>,
    save_error: Arc<Mutex<Option<AppError>>>,
    load_error: Arc<Mutex<Option<AppError>>>,
}

impl MockStore {
    fn build(contents: Option<Vec<Job>>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(contents)),
            saved: Arc::new(Mutex::new(Vec::new())),
            load_calls: Arc::new(Mutex::new(0)),
            save_error: Arc::new(Mutex::new(None)),
            load_error: Arc::new(Mutex::new(None)),
        }
    }

    /// A store with nothing persisted yet.
    pub fn empty() -> Self {
        Self::build(None)
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self::build(Some(jobs))
    }

    pub fn with_save_error(error: AppError) -> Self {
        let store = Self::build(None);
        *store.save_error.lock().unwrap() = Some(error);
        store
    }

    pub fn with_load_error(error: AppError) -> Self {
        let store = Self::build(None);
        *store.load_error.lock().unwrap() = Some(error);
        store
    }

    /// Every collection passed to a successful `save`.
    pub fn saved(&self) -> Vec<Vec<Job>> {
        self.saved.lock().unwrap().clone()
    }

    pub fn load_calls(&self) -> usize {
        *self.load_calls.lock().unwrap()
    }
}

impl JobStore for MockStore {
    async fn save(&self, jobs: &[Job]) -> Result<(), AppError> {
        if let Some(e) = self.save_error.lock().unwrap().take() {
            return Err(e);
        }
        self.saved.lock().unwrap().push(jobs.to_vec());
        *self.contents.lock().unwrap() = Some(jobs.to_vec());
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Job>, AppError> {
        *self.load_calls.lock().unwrap() += 1;
        if let Some(e) = self.load_error.lock().unwrap().take() {
            return Err(e);
        }
        self.contents
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::FileError("nothing persisted".into()))
    }
}
