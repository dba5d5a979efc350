use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hahu_client::build_loader;
use hahu_core::{JobSource, LoaderConfig};
use hahu_server::config::ServerConfig;
use hahu_server::routes;
use hahu_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hahu=info".parse()?))
        .with_target(false)
        .init();

    let loader_config = LoaderConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    // Ctrl-C during startup cancels the load and the process quits without serving.
    let startup = CancellationToken::new();
    let startup_guard = startup.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            startup_guard.cancel();
        }
    });

    let loader = build_loader(&loader_config).context("Failed to build job loader")?;
    let snapshot = loader.load_jobs(&startup).await.into_snapshot();
    interrupt.abort();

    if startup.is_cancelled() {
        tracing::info!("Interrupted during startup");
        return Ok(());
    }
    if snapshot.source == JobSource::Unavailable && server_config.require_jobs {
        bail!("No jobs available from the board or the jobs file, refusing to start");
    }

    tracing::info!(
        source = %snapshot.source,
        count = snapshot.jobs.len(),
        "Job snapshot ready"
    );

    let state = Arc::new(AppState { snapshot });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", server_config.port);
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
