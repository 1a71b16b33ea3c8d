//! HTTP API Layer
//!
//! REST surface of the flight compensation system, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for flights, claims, login and docs
//! - **Middleware**: Admin gating and audit logging on the admin routes
//! - **DTOs**: Request/Response data transfer objects
//! - **OpenAPI**: Document generated from the handler annotations
//!
//! Handlers only talk to the domain services held in [`AppState`], so the
//! router runs the same against PostgreSQL adapters or in-memory mocks.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(flights, claims, admins, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;
pub mod openapi;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_admin::AdminService;
use domain_claims::CompensationService;
use domain_flight::FlightService;

use crate::config::ApiConfig;
use crate::handlers::{auth as login, claims, docs, flights, health};
use crate::middleware::{audit_middleware, require_admin};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub flights: FlightService,
    pub claims: CompensationService,
    pub admins: AdminService,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(
        flights: FlightService,
        claims: CompensationService,
        admins: AdminService,
        config: ApiConfig,
    ) -> Self {
        Self {
            flights,
            claims,
            admins,
            config: Arc::new(config),
        }
    }
}

/// Creates the main API router
///
/// Admin routes sit behind `require_admin`, which rejects the request before
/// any handler runs. Unmatched paths fall through to a plain 404.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/flights", get(flights::list_flights))
        .route("/api/flights/:flight_number", get(flights::get_flight))
        .route("/api/claims", post(claims::submit_claim))
        .route("/api/claims/status", get(claims::claim_status))
        .route("/compensation-rules", get(claims::compensation_rules))
        .route("/api/docs", get(docs::api_docs))
        .route("/swagger.json", get(docs::openapi_json))
        .route("/admin/login", post(login::login));

    // route_layer: the last one added runs first
    let admin_routes = Router::new()
        .route("/admin/flights", post(flights::create_flight))
        .route(
            "/admin/flights/:flight_number",
            put(flights::update_flight).delete(flights::delete_flight),
        )
        .route("/admin/claims", get(claims::list_claims))
        .route("/admin/claims/:claim_id", get(claims::get_claim))
        .route(
            "/admin/claims/compensation/:claim_id",
            get(claims::assess_claim_get).post(claims::assess_claim),
        )
        .route_layer(axum_middleware::from_fn(audit_middleware))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
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
