//! OpenAPI document
//!
//! Generated from the `#[utoipa::path]` annotations on the handlers. Admin
//! operations reference the `bearer_auth` scheme registered here.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::dto::claims::{
    ClaimResponse, ClaimSubmittedResponse, CompensationResponse, CompensationRuleResponse,
    SubmitClaimRequest,
};
use crate::dto::flights::{
    AirlineDto, ArrivalInput, ArrivalResponse, CreateFlightRequest, DepartureInput,
    DepartureResponse, FlightCreatedResponse, FlightResponse, UpdateFlightRequest,
};
use crate::dto::MessageResponse;
use crate::error::ErrorResponse;
use crate::handlers::docs::{EndpointDoc, EndpointListing};
use crate::handlers::{auth, claims, docs, flights};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flight Delay Compensation API",
        description = "Flights, passenger claims and delay compensation"
    ),
    paths(
        flights::list_flights,
        flights::get_flight,
        flights::create_flight,
        flights::update_flight,
        flights::delete_flight,
        claims::submit_claim,
        claims::claim_status,
        claims::compensation_rules,
        claims::list_claims,
        claims::get_claim,
        claims::assess_claim,
        claims::assess_claim_get,
        auth::login,
        docs::api_docs,
    ),
    components(schemas(
        FlightResponse,
        DepartureResponse,
        ArrivalResponse,
        AirlineDto,
        CreateFlightRequest,
        UpdateFlightRequest,
        DepartureInput,
        ArrivalInput,
        FlightCreatedResponse,
        SubmitClaimRequest,
        ClaimSubmittedResponse,
        ClaimResponse,
        CompensationResponse,
        CompensationRuleResponse,
        LoginRequest,
        TokenResponse,
        MessageResponse,
        ErrorResponse,
        EndpointDoc,
        EndpointListing,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "flights", description = "Public flight data"),
        (name = "claims", description = "Passenger claims and the compensation table"),
        (name = "admin", description = "Operations requiring an admin bearer token"),
        (name = "auth", description = "Admin login"),
        (name = "docs", description = "API documentation")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
