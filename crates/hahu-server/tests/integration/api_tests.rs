use axum::http::StatusCode;

use hahu_core::{Job, JobSource};

use crate::integration::common::{get_json, job, setup_test_app};

#[tokio::test]
async fn root_returns_greeting() {
    let app = setup_test_app(vec![], JobSource::Live);

    let (status, json) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Free Jobs API");
}

#[tokio::test]
async fn jobs_returns_snapshot_unmodified() {
    let jobs = vec![
        Job {
            location: "Addis Ababa".into(),
            time_left: "5 days left".into(),
            ..job("Backend Engineer", "Acme")
        },
        job("Accountant", "Ethio Trading"),
    ];
    let app = setup_test_app(jobs.clone(), JobSource::Live);

    let (status, json) = get_json(app, "/jobs").await;

    assert_eq!(status, StatusCode::OK);
    let served: Vec<Job> = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(served, jobs);

    let first = json[0].as_object().unwrap();
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 12);
    assert_eq!(json[0]["job_title"], "Backend Engineer");
    assert_eq!(json[0]["salary"], "");
}

#[tokio::test]
async fn jobs_is_empty_array_when_unavailable() {
    let app = setup_test_app(vec![], JobSource::Unavailable);

    let (status, json) = get_json(app, "/jobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn get_job_by_position() {
    let app = setup_test_app(
        vec![job("Backend Engineer", "Acme"), job("Nurse", "Clinic")],
        JobSource::Persisted,
    );

    let (status, json) = get_json(app, "/jobs/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["job_title"], "Nurse");
    assert_eq!(json["company"], "Clinic");
}

#[tokio::test]
async fn get_job_out_of_range_returns_404() {
    let app = setup_test_app(vec![job("Backend Engineer", "Acme")], JobSource::Live);

    let (status, json) = get_json(app, "/jobs/5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn health_reports_live_snapshot() {
    let app = setup_test_app(vec![job("Backend Engineer", "Acme")], JobSource::Live);

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["source"], "live");
    assert_eq!(json["jobs"], 1);
    assert!(json["loaded_at"].is_string());
}

#[tokio::test]
async fn health_reports_degraded_fallback() {
    let app = setup_test_app(vec![job("X", "Y")], JobSource::Persisted);

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["source"], "persisted");
}

#[tokio::test]
async fn health_unavailable_returns_503() {
    let app = setup_test_app(vec![], JobSource::Unavailable);

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["source"], "unavailable");
    assert_eq!(json["jobs"], 0);
}

#[tokio::test]
async fn openapi_document_lists_job_routes() {
    let app = setup_test_app(vec![], JobSource::Live);

    let (status, json) = get_json(app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/jobs"].is_object());
    assert!(json["paths"]["/jobs/{index}"].is_object());
    assert!(json["components"]["schemas"]["Job"].is_object());
}
