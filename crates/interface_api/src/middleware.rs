//! API middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::auth::{authorize_admin, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Admin gate
///
/// Rejects requests without a valid admin bearer token. On success the
/// verified claims are inserted into the request extensions.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match authorize_admin(header, &state.config.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!(uri = %request.uri(), reason = %e, "Admin request rejected");
            Err(e.into())
        }
    }
}

/// Audit logging middleware
///
/// Logs every admin request with the acting user.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.sub.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Instant::now();
    let response = next.run(request).await;

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Admin request"
    );

    response
}
