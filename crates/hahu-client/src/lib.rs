pub mod fetcher;
pub mod listing;
pub mod pipeline;

pub use fetcher::ReqwestFetcher;
pub use listing::HtmlListingParser;
pub use pipeline::{HahuLoader, build_loader};
