use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;
use crate::store::DEFAULT_JOBS_FILE;

pub const DEFAULT_SOURCE_URL: &str = "https://hahu.jobs/jobs";
pub const DEFAULT_ALLOWED_DOMAIN: &str = "hahu.jobs";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by every entry point that loads jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Listing page to scrape.
    pub source_url: String,
    /// Only this host may be fetched.
    pub allowed_domain: String,
    /// Where the last scraped collection is kept.
    pub jobs_file: PathBuf,
    pub fetch_timeout: Duration,
    /// Optional JSON layout overriding the built-in selector table.
    pub layout_file: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            allowed_domain: DEFAULT_ALLOWED_DOMAIN.to_string(),
            jobs_file: PathBuf::from(DEFAULT_JOBS_FILE),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            layout_file: None,
        }
    }
}

impl LoaderConfig {
    /// Read configuration from environment variables.
    ///
    /// - `HAHU_SOURCE_URL` (optional, defaults to `https://hahu.jobs/jobs`)
    /// - `HAHU_ALLOWED_DOMAIN` (optional, defaults to `hahu.jobs`)
    /// - `HAHU_JOBS_FILE` (optional, defaults to `jobs.json`)
    /// - `HAHU_FETCH_TIMEOUT_SECS` (optional, defaults to 30)
    /// - `HAHU_LAYOUT_FILE` (optional)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let fetch_timeout = match lookup("HAHU_FETCH_TIMEOUT_SECS") {
            None => defaults.fetch_timeout,
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid HAHU_FETCH_TIMEOUT_SECS '{raw}': must be a positive integer"
                    ))
                })?;
                if secs == 0 {
                    return Err(AppError::ConfigError(
                        "HAHU_FETCH_TIMEOUT_SECS must be at least 1".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
        };

        Ok(Self {
            source_url: lookup("HAHU_SOURCE_URL").unwrap_or(defaults.source_url),
            allowed_domain: lookup("HAHU_ALLOWED_DOMAIN").unwrap_or(defaults.allowed_domain),
            jobs_file: lookup("HAHU_JOBS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.jobs_file),
            fetch_timeout,
            layout_file: lookup("HAHU_LAYOUT_FILE").map(PathBuf::from),
        })
    }
}
