use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voyage_estimator::config::Config;
use voyage_estimator::distance::RouteTable;
use voyage_estimator::estimator::VoyageEstimator;
use voyage_estimator::handlers::AppState;
use voyage_estimator::router::build_rate_limited_router;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration and the route table once, then
/// starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyage_estimator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Route table is loaded once and never mutated afterwards
    let routes = match config.route_table_path {
        Some(ref path) => RouteTable::from_json_file(path)?,
        None => RouteTable::default(),
    };
    tracing::info!("Route table ready with {} routes", routes.len());

    let estimator = VoyageEstimator::new(routes, config.thresholds.clone());
    let app_state = Arc::new(AppState::new(config.clone(), estimator));

    let app = build_rate_limited_router(app_state)?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
