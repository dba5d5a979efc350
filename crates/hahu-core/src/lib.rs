pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod models;
pub mod store;
pub mod traits;

#[cfg(test)]
mod testutil;

pub use config::LoaderConfig;
pub use error::AppError;
pub use layout::{FieldRule, ListingLayout, SelectorRule};
pub use loader::{JobLoader, LoadOutcome};
pub use models::{Job, JobField, JobSnapshot, JobSource};
pub use store::JsonFileStore;
pub use traits::{Fetcher, JobStore, ListingParser};
