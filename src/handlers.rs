use crate::config::Config;
use crate::errors::AppError;
use crate::estimator::VoyageEstimator;
use crate::models::{FieldError, RouteEntry, VoyageRequest, VoyageResult};
use crate::validation::validate_request;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Estimator holding the route table and decision thresholds.
    pub estimator: Arc<VoyageEstimator>,
}

impl AppState {
    pub fn new(config: Config, estimator: VoyageEstimator) -> Self {
        Self {
            config,
            estimator: Arc::new(estimator),
        }
    }
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "voyage-estimator",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/estimate
///
/// Validates the request, then runs the estimation pipeline. Pipeline
/// failures never become HTTP errors: they come back as a degraded result
/// with `needs_manual_*` flags or a manual review decision.
#[utoipa::path(
    post,
    path = "/api/v1/estimate",
    request_body = VoyageRequest,
    responses(
        (status = 200, description = "Estimate produced (possibly degraded)", body = VoyageResult),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Field validation failed", body = [FieldError])
    )
)]
pub async fn estimate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VoyageRequest>, JsonRejection>,
) -> Result<Json<VoyageResult>, AppError> {
    let Json(request) = payload?;

    let request_id = Uuid::new_v4();
    tracing::info_span!("estimate", %request_id).in_scope(|| -> Result<_, AppError> {
        tracing::info!(
            "POST /estimate - {} -> {} at {} kn",
            request.start_port,
            request.end_port,
            request.speed
        );

        validate_request(&request).map_err(AppError::Validation)?;

        Ok(Json(state.estimator.estimate(&request)))
    })
}

/// GET /api/v1/routes
///
/// Lists the configured route table.
#[utoipa::path(
    get,
    path = "/api/v1/routes",
    responses((status = 200, description = "Configured routes", body = [RouteEntry]))
)]
pub async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<RouteEntry>> {
    Json(state.estimator.routes().routes().to_vec())
}
