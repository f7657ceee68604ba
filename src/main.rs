use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use seedream_scene_proxy::{
    api,
    config::Config,
    generation::{BatchOrchestrator, Generator},
    prompt::catalog,
    seedream::{self, SeedreamClient},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Config::dotenv_load();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::new();
    Config::print_env_vars();

    let client = SeedreamClient::new(
        &config.seedream_base_url,
        &config.seedream_api_key,
        &config.seedream_model,
        config.request_timeout,
    )?;

    // Mode is fixed before the listener opens; the probe is bounded by PROBE_TIMEOUT_SECS.
    let mode = seedream::resolve_mode(&config, &client).await;

    let generator = Arc::new(Generator::from_config(&config, client, mode));
    let state = Arc::new(api::AppState {
        batches: BatchOrchestrator::new(generator, config.pacing),
        series_prompts: catalog::series_prompts(),
        max_body_bytes: config.max_body_bytes,
    });

    let app = api::router(state, Some(config.static_dir.as_str()));

    let socket_address = config.socket_addr();
    tracing::info!("listening on {} ({} mode)", socket_address, mode);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
