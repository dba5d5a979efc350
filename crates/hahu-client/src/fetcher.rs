use std::sync::Arc;
use std::time::Duration;

use hahu_core::config::DEFAULT_FETCH_TIMEOUT;
use hahu_core::error::AppError;
use hahu_core::traits::Fetcher;
use reqwest::Client;
use reqwest::redirect::Policy;
use url::Url;

const USER_AGENT: &str = "hahu-scraper/0.1";
const MAX_REDIRECTS: usize = 10;

/// HTTP fetcher using reqwest, restricted to a fixed set of domains.
///
/// Requests to any host outside the allowed set are refused before they
/// are sent, and redirects leaving the set are not followed.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout: Duration,
    allowed_domains: Arc<[String]>,
}

impl ReqwestFetcher {
    pub fn new<I, S>(allowed_domains: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_timeout(allowed_domains, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout<I, S>(allowed_domains: I, timeout: Duration) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed_domains: Arc<[String]> = allowed_domains
            .into_iter()
            .map(|d| d.into().to_ascii_lowercase())
            .collect();
        if allowed_domains.is_empty() {
            return Err(AppError::ConfigError(
                "at least one allowed domain is required".into(),
            ));
        }

        let redirect_domains = Arc::clone(&allowed_domains);
        let redirect = Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if is_allowed_host(&redirect_domains, attempt.url()) {
                attempt.follow()
            } else {
                tracing::warn!(url = %attempt.url(), "Refusing redirect outside allowed domains");
                attempt.stop()
            }
        });

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(redirect)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout,
            allowed_domains,
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let url = validate_url(url, &self.allowed_domains)?;

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::timeout(self.timeout)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Domain restriction
// ---------------------------------------------------------------------------

/// Parse `url` and check it may be fetched.
///
/// 1. Only allow `http` and `https` schemes.
/// 2. The host must equal one of the allowed domains (no subdomains).
fn validate_url(url: &str, allowed_domains: &[String]) -> Result<Url, AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::HttpError(format!("Invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::HttpError(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    if !is_allowed_host(allowed_domains, &parsed) {
        let host = parsed.host_str().unwrap_or("<none>").to_string();
        return Err(AppError::DomainNotAllowed(host));
    }

    Ok(parsed)
}

fn is_allowed_host(allowed_domains: &[String], url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| allowed_domains.iter().any(|d| d.eq_ignore_ascii_case(host)))
}
