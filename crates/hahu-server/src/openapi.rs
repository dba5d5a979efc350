use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "hahu Jobs API",
        version = "0.1.0",
        description = "Job listings scraped from hahu.jobs, loaded once at startup."
    ),
    paths(
        crate::routes::root,
        crate::routes::list_jobs,
        crate::routes::get_job,
        crate::routes::health,
    ),
    components(schemas(
        hahu_core::Job,
        crate::dto::RootResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "jobs", description = "Job listing snapshot"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
