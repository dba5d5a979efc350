use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hahu_core::{AppError, Job, JobSource};

use crate::dto::{HealthResponse, RootResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/jobs", get(list_jobs))
        .route("/jobs/{index}", get(get_job))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API greeting", body = RootResponse),
    ),
    tag = "system"
)]
pub async fn root() -> axum::Json<RootResponse> {
    axum::Json(RootResponse {
        message: "Free Jobs API",
    })
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/jobs",
    responses(
        (status = 200, description = "All jobs in page order", body = Vec<Job>),
    ),
    tag = "jobs"
)]
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> axum::Json<Vec<Job>> {
    axum::Json(state.snapshot.jobs.clone())
}

#[utoipa::path(
    get,
    path = "/jobs/{index}",
    params(
        ("index" = usize, Path, description = "Zero-based position of the job on the listing page"),
    ),
    responses(
        (status = 200, description = "Job found", body = Job),
        (status = 404, description = "No job at this position", body = crate::dto::ErrorResponse),
    ),
    tag = "jobs"
)]
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<axum::Json<Job>, ApiError> {
    let job = state
        .snapshot
        .jobs
        .get(index)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("no job at position {index}")))?;

    Ok(axum::Json(job))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Serving a live or persisted snapshot", body = HealthResponse),
        (status = 503, description = "No job source was available at startup", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = match state.snapshot.source {
        JobSource::Live | JobSource::Persisted => StatusCode::OK,
        JobSource::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, axum::Json(HealthResponse::from(&state.snapshot)))
}
