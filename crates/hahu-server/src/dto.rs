use chrono::{DateTime, Utc};
use serde::Serialize;

use hahu_core::JobSnapshot;

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `ok` when serving a live scrape, `degraded` otherwise
    pub status: &'static str,
    /// `live`, `persisted` or `unavailable`
    pub source: &'static str,
    /// Number of jobs in the snapshot
    pub jobs: usize,
    pub loaded_at: DateTime<Utc>,
}

impl From<&JobSnapshot> for HealthResponse {
    fn from(snapshot: &JobSnapshot) -> Self {
        Self {
            status: if snapshot.is_degraded() {
                "degraded"
            } else {
                "ok"
            },
            source: snapshot.source.as_str(),
            jobs: snapshot.jobs.len(),
            loaded_at: snapshot.loaded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
