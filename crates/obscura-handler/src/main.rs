use std::sync::Arc;

use obscura_core::Config;
use obscura_handler::routes::build_router;
use obscura_handler::state::AppState;
use obscura_handler::telemetry::init_telemetry;
use obscura_storage::create_storage;
use obscura_vision::{GoogleVisionClient, SafetyClassifier};

// The musl default allocator degrades badly under multi-threaded load;
// mimalloc keeps allocation fast in containerized deployments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;
    init_telemetry(&config)?;

    tracing::info!(
        backend = %config.storage_backend,
        destination = %config.blurred_bucket,
        "Initializing blur handler"
    );

    let storage = create_storage(&config).await?;
    let classifier: Arc<dyn SafetyClassifier> =
        Arc::new(GoogleVisionClient::from_config(&config)?);
    let state = Arc::new(AppState::new(config, storage, classifier));

    let addr = format!("0.0.0.0:{}", state.config.server_port);
    let app = build_router(state);

    tracing::info!(addr = %addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server ready and accepting connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
