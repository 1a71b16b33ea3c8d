//! Claims handlers

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::NewClaim;

use crate::dto::claims::*;
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Claim id from the path; a non-numeric id is a 400 with the usual error body
fn claim_id(path: Result<Path<i64>, PathRejection>) -> Result<ClaimId, ApiError> {
    let Path(id) = path?;
    Ok(ClaimId::new(id))
}

/// Submit a compensation claim
///
/// The claim starts out pending with a zero amount.
#[utoipa::path(
    post,
    path = "/api/claims",
    tag = "claims",
    request_body = SubmitClaimRequest,
    responses(
        (status = 201, description = "Claim filed", body = ClaimSubmittedResponse),
        (status = 404, description = "Flight not found", body = ErrorResponse),
        (status = 422, description = "Missing passenger name or flight number", body = ErrorResponse)
    )
)]
pub async fn submit_claim(
    State(state): State<AppState>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimSubmittedResponse>), ApiError> {
    request.validate()?;
    let claim = NewClaim::new(request.passenger_name, request.flight_number)?;
    let created = state.claims.submit_claim(claim).await?;

    Ok((
        StatusCode::CREATED,
        Json(ClaimSubmittedResponse {
            message: "Claim submitted successfully".to_string(),
            claim_id: created.id.value(),
            status: created.status.as_str().to_string(),
        }),
    ))
}

/// Check a claim's status
///
/// Look up by `claim_id`, or by passenger name and flight number.
#[utoipa::path(
    get,
    path = "/api/claims/status",
    tag = "claims",
    params(ClaimStatusQuery),
    responses(
        (status = 200, description = "Claim found", body = ClaimResponse),
        (status = 400, description = "No lookup key given", body = ErrorResponse),
        (status = 404, description = "Claim not found", body = ErrorResponse)
    )
)]
pub async fn claim_status(
    State(state): State<AppState>,
    Query(query): Query<ClaimStatusQuery>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.claim_status(query.lookup()?).await?;
    Ok(Json(claim.into()))
}

/// View the compensation table
#[utoipa::path(
    get,
    path = "/compensation-rules",
    tag = "claims",
    responses((status = 200, description = "Every compensation tier", body = [CompensationRuleResponse]))
)]
pub async fn compensation_rules(State(state): State<AppState>) -> Json<Vec<CompensationRuleResponse>> {
    Json(state.claims.schedule().rules().iter().map(Into::into).collect())
}

/// List all claims (admin)
#[utoipa::path(
    get,
    path = "/admin/claims",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All claims", body = [ClaimResponse]))
)]
pub async fn list_claims(State(state): State<AppState>) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let records = state.claims.list_claims().await?;
    Ok(Json(records.into_iter().map(ClaimResponse::from).collect()))
}

/// Get a claim by ID (admin)
#[utoipa::path(
    get,
    path = "/admin/claims/{claim_id}",
    tag = "admin",
    params(("claim_id" = i64, Path, description = "Claim identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Claim details", body = ClaimResponse),
        (status = 400, description = "Claim id is not a number", body = ErrorResponse),
        (status = 404, description = "Claim not found", body = ErrorResponse)
    )
)]
pub async fn get_claim(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let record = state.claims.get_claim(claim_id(path)?).await?;
    Ok(Json(record.into()))
}

/// Calculate compensation for a claim (admin)
///
/// Prices the claim from its flight's departure delay and records the
/// decision. Repeating the call with an unchanged delay gives the same result.
#[utoipa::path(
    post,
    path = "/admin/claims/compensation/{claim_id}",
    tag = "admin",
    params(("claim_id" = i64, Path, description = "Claim identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Claim assessed", body = CompensationResponse),
        (status = 404, description = "Claim or flight not found", body = ErrorResponse),
        (status = 422, description = "Flight delay unusable", body = ErrorResponse)
    )
)]
pub async fn assess_claim(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CompensationResponse>, ApiError> {
    let assessment = state.claims.assess(claim_id(path)?).await?;
    Ok(Json(assessment.into()))
}

/// Calculate compensation for a claim (admin, GET form)
#[utoipa::path(
    get,
    path = "/admin/claims/compensation/{claim_id}",
    tag = "admin",
    params(("claim_id" = i64, Path, description = "Claim identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Claim assessed", body = CompensationResponse),
        (status = 404, description = "Claim or flight not found", body = ErrorResponse)
    )
)]
pub async fn assess_claim_get(
    state: State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CompensationResponse>, ApiError> {
    assess_claim(state, path).await
}
