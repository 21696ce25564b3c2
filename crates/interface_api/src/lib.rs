//! HTTP API Layer
//!
//! REST API for the financial engine using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for documents, plans, and treasury
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{documents, health, installments, treasury};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let document_routes =
        Router::new().route("/:id/recompute", post(documents::recompute_totals));

    let plan_routes = Router::new()
        .route("/", post(installments::create_plan))
        .route("/:id", get(installments::get_plan))
        .route("/:id/installments", post(installments::generate_installments));

    let installment_routes = Router::new().route(
        "/:id/status",
        patch(installments::update_installment_status),
    );

    let treasury_routes = Router::new()
        .route("/kpis", get(treasury::get_kpis))
        .route("/schedule", get(treasury::get_schedule));

    let api_routes = Router::new()
        .nest("/documents", document_routes)
        .nest("/plans", plan_routes)
        .nest("/installments", installment_routes)
        .nest("/treasury", treasury_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
