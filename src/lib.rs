//! Voyage Estimator Library
//!
//! Estimates maritime voyage profitability from commercial and operational
//! inputs and issues a GO/NO-GO recommendation.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `config`: Configuration and decision thresholds.
//! - `decision`: Profit classification and risk rules.
//! - `distance`: Route table and distance resolution.
//! - `errors`: Pipeline failures and HTTP error responses.
//! - `estimator`: Pipeline orchestration and degradation policy.
//! - `fuel`: Voyage duration, fuel and expense calculation.
//! - `handlers`: HTTP request handlers.
//! - `models`: Request/response models.
//! - `retry`: Retry helper shared by the pipeline stages.
//! - `router`: Axum router, middleware and OpenAPI document.
//! - `validation`: Request field validation.

pub mod api;
pub mod core;

pub mod config;
pub mod decision;
pub mod distance;
pub mod errors;
pub mod estimator;
pub mod fuel;
pub mod handlers;
pub mod models;
pub mod retry;
pub mod router;
pub mod validation;
