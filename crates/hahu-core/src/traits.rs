use std::future::Future;

use crate::error::AppError;
use crate::models::Job;

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Turns a listing page into job records, in document order.
///
/// A page without any listing yields an empty collection, not an error.
pub trait ListingParser: Send + Sync + Clone {
    fn parse(&self, html: &str) -> Result<Vec<Job>, AppError>;
}

/// Persists and retrieves the last scraped job collection.
pub trait JobStore: Send + Sync + Clone {
    /// Replace the stored collection with `jobs`.
    fn save(&self, jobs: &[Job]) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Read the stored collection back, unmodified.
    fn load(&self) -> impl Future<Output = Result<Vec<Job>, AppError>> + Send;
}
