//! Flight handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use domain_flight::FlightPatch;

use crate::dto::flights::*;
use crate::dto::MessageResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// List flights
///
/// Pulls fresh departures from the flight feed when one is configured, then
/// returns every stored flight.
#[utoipa::path(
    get,
    path = "/api/flights",
    tag = "flights",
    responses(
        (status = 200, description = "Stored flights", body = [FlightResponse]),
        (status = 404, description = "No flights stored", body = ErrorResponse),
        (status = 502, description = "Flight feed request failed", body = ErrorResponse)
    )
)]
pub async fn list_flights(
    State(state): State<AppState>,
) -> Result<Json<Vec<FlightResponse>>, ApiError> {
    let flights = state.flights.list_flights().await?;
    if flights.is_empty() {
        return Err(ApiError::NotFound("No flight data available.".to_string()));
    }
    Ok(Json(flights.into_iter().map(FlightResponse::from).collect()))
}

/// Get a flight by flight number
#[utoipa::path(
    get,
    path = "/api/flights/{flight_number}",
    tag = "flights",
    params(("flight_number" = String, Path, description = "IATA flight number")),
    responses(
        (status = 200, description = "Flight details", body = FlightResponse),
        (status = 404, description = "Flight not found", body = ErrorResponse)
    )
)]
pub async fn get_flight(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
) -> Result<Json<FlightResponse>, ApiError> {
    let flight = state.flights.get_flight(&flight_number).await?;
    Ok(Json(flight.into()))
}

/// Add a flight (admin)
#[utoipa::path(
    post,
    path = "/admin/flights",
    tag = "admin",
    request_body = CreateFlightRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Flight added", body = FlightCreatedResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 409, description = "Flight number already stored", body = ErrorResponse),
        (status = 422, description = "Negative delay", body = ErrorResponse)
    )
)]
pub async fn create_flight(
    State(state): State<AppState>,
    Json(request): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<FlightCreatedResponse>), ApiError> {
    request.validate()?;
    let flight = state.flights.create_flight(request.into_new_flight()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(FlightCreatedResponse {
            message: "Flight added successfully".to_string(),
            flight_number: flight.flight_number,
        }),
    ))
}

/// Update a flight (admin)
///
/// Only the fields present in the body change.
#[utoipa::path(
    put,
    path = "/admin/flights/{flight_number}",
    tag = "admin",
    params(("flight_number" = String, Path, description = "IATA flight number")),
    request_body = UpdateFlightRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Flight updated", body = MessageResponse),
        (status = 404, description = "Flight not found", body = ErrorResponse)
    )
)]
pub async fn update_flight(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
    Json(request): Json<UpdateFlightRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let patch = FlightPatch::try_from(request)?;
    state.flights.update_flight(&flight_number, patch).await?;
    Ok(Json(MessageResponse::new("Flight updated successfully")))
}

/// Delete a flight (admin)
#[utoipa::path(
    delete,
    path = "/admin/flights/{flight_number}",
    tag = "admin",
    params(("flight_number" = String, Path, description = "IATA flight number")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Flight deleted", body = MessageResponse),
        (status = 404, description = "Flight not found", body = ErrorResponse)
    )
)]
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.flights.delete_flight(&flight_number).await?;
    Ok(Json(MessageResponse::new("Flight deleted successfully")))
}
