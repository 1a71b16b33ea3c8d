//! Administrator login

use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::{create_token, ADMIN_ROLE};
use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Exchange admin credentials for a bearer token
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    request.validate()?;
    let account = state
        .admins
        .authenticate(&request.username, &request.password)
        .await?;

    let expires_in = state.config.jwt_expiration_secs;
    let token = create_token(&account.username, ADMIN_ROLE, &state.config.jwt_secret, expires_in)?;

    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in,
    }))
}
