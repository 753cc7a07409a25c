use crate::handlers::{self, AppState};
use crate::models::{Currency, Decision, FieldError, ProfitZone, RouteEntry, VoyageRequest, VoyageResult};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Voyage Estimator API"),
    paths(handlers::health, handlers::estimate, handlers::list_routes),
    components(schemas(
        VoyageRequest,
        VoyageResult,
        Currency,
        ProfitZone,
        Decision,
        RouteEntry,
        FieldError
    ))
)]
pub struct ApiDoc;

/// Estimate and route endpoints, with the request size limit applied.
fn api_routes(max_body_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/estimate", post(handlers::estimate))
        .route("/estimate", post(handlers::estimate))
        .route("/api/v1/routes", get(handlers::list_routes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
}

fn finish(api: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Full application router without rate limiting.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = api_routes(state.config.max_body_bytes);
    finish(api, state)
}

/// Application router with per-IP rate limiting on the API routes.
///
/// The rate limiter keys on the client address, so the server must be run
/// with `into_make_service_with_connect_info::<SocketAddr>()`. `/health`
/// bypasses rate limiting.
pub fn build_rate_limited_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(state.config.rate_limit_per_second)
            .burst_size(state.config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let api = api_routes(state.config.max_body_bytes).layer(ServiceBuilder::new().layer(
        GovernorLayer {
            config: governor_conf,
        },
    ));

    Ok(finish(api, state))
}
