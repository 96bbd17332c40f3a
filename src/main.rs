use matchlog::{build_state, router, AppConfig, AppError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matchlog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    info!("Starting match ledger server");

    let config = AppConfig::from_env()?;
    let state = build_state(&config).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| AppError::Config(format!("Cannot bind {}: {}", config.bind_addr, e)))?;
    info!(addr = %config.bind_addr, "Server running");

    axum::serve(listener, app).await.map_err(|e| {
        error!(error = %e, "Server error");
        AppError::Internal
    })
}
