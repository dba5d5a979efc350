use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use hahu_core::{Job, JobSnapshot, JobSource};
use hahu_server::routes;
use hahu_server::state::AppState;

pub fn job(title: &str, company: &str) -> Job {
    Job {
        title: title.to_string(),
        company: company.to_string(),
        ..Default::default()
    }
}

/// Router serving a fixed snapshot.
pub fn setup_test_app(jobs: Vec<Job>, source: JobSource) -> Router {
    let state = Arc::new(AppState {
        snapshot: JobSnapshot::new(jobs, source),
    });
    routes::router(state)
}

/// Issue a GET and return the status and parsed JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}
