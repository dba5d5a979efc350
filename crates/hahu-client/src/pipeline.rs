use hahu_core::config::LoaderConfig;
use hahu_core::error::AppError;
use hahu_core::layout::ListingLayout;
use hahu_core::loader::JobLoader;
use hahu_core::store::JsonFileStore;

use crate::fetcher::ReqwestFetcher;
use crate::listing::HtmlListingParser;

/// Loader wired to the real board, the `scraper` parser and the JSON file.
pub type HahuLoader = JobLoader<ReqwestFetcher, HtmlListingParser, JsonFileStore>;

/// Build a [`HahuLoader`] from configuration.
///
/// Uses the layout file when one is configured, the built-in layout otherwise.
pub fn build_loader(config: &LoaderConfig) -> Result<HahuLoader, AppError> {
    let fetcher =
        ReqwestFetcher::with_timeout([config.allowed_domain.as_str()], config.fetch_timeout)?;

    let parser = match &config.layout_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using custom listing layout");
            HtmlListingParser::with_layout(ListingLayout::from_file(path)?)?
        }
        None => HtmlListingParser::new()?,
    };

    let store = JsonFileStore::new(&config.jobs_file);

    Ok(
        JobLoader::new(fetcher, parser, store, config.source_url.as_str())
            .with_fetch_timeout(config.fetch_timeout),
    )
}
