//! Flight DTOs
//!
//! Timestamps arrive as strings and go through `parse_timestamp`, so a bad
//! value is reported as a 400 rather than a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use domain_flight::{
    parse_timestamp, ArrivalLeg, DepartureLeg, Flight, FlightError, FlightPatch, FlightStatus, NewFlight,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DepartureInput {
    pub airport: Option<String>,
    pub timezone: Option<String>,
    pub iata: Option<String>,
    /// Minutes; must not be negative
    pub delay: Option<f64>,
    /// RFC 3339 timestamp
    pub scheduled: Option<String>,
    pub actual: Option<String>,
}

impl DepartureInput {
    fn into_leg(self) -> Result<DepartureLeg, FlightError> {
        Ok(DepartureLeg {
            airport: self.airport,
            timezone: self.timezone,
            iata: self.iata,
            delay: self.delay,
            scheduled: timestamp(self.scheduled.as_deref())?,
            actual: timestamp(self.actual.as_deref())?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ArrivalInput {
    pub airport: Option<String>,
    pub timezone: Option<String>,
    pub iata: Option<String>,
    pub scheduled: Option<String>,
    pub actual: Option<String>,
}

impl ArrivalInput {
    fn into_leg(self) -> Result<ArrivalLeg, FlightError> {
        Ok(ArrivalLeg {
            airport: self.airport,
            timezone: self.timezone,
            iata: self.iata,
            scheduled: timestamp(self.scheduled.as_deref())?,
            actual: timestamp(self.actual.as_deref())?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AirlineDto {
    pub name: Option<String>,
}

/// Body of `POST /admin/flights`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFlightRequest {
    #[validate(length(min = 1, max = 20))]
    pub flight_number: String,
    #[validate(length(min = 1))]
    pub flight_status: String,
    pub flight_date: Option<String>,
    #[serde(default)]
    pub departure: DepartureInput,
    #[serde(default)]
    pub arrival: ArrivalInput,
    pub airline: Option<AirlineDto>,
}

impl CreateFlightRequest {
    /// Converts the body, requiring the flight date and both scheduled times
    pub fn into_new_flight(self) -> Result<NewFlight, FlightError> {
        let flight_date = timestamp(self.flight_date.as_deref())?;
        let departure = self.departure.into_leg()?;
        let arrival = self.arrival.into_leg()?;

        if flight_date.is_none() || departure.scheduled.is_none() || arrival.scheduled.is_none() {
            return Err(FlightError::InvalidFlight(
                "Missing or invalid datetime fields".to_string(),
            ));
        }

        let mut flight = NewFlight::new(self.flight_number);
        flight.flight_date = flight_date;
        flight.flight_status = Some(FlightStatus::parse(&self.flight_status));
        flight.departure = departure;
        flight.arrival = arrival;
        flight.airline_name = self.airline.and_then(|a| a.name);
        Ok(flight)
    }
}

/// Body of `PUT /admin/flights/{flight_number}`; absent fields are left as they are
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateFlightRequest {
    pub flight_number: Option<String>,
    pub flight_date: Option<String>,
    pub flight_status: Option<String>,
    pub departure: Option<DepartureInput>,
    pub arrival: Option<ArrivalInput>,
    pub airline: Option<AirlineDto>,
}

impl TryFrom<UpdateFlightRequest> for FlightPatch {
    type Error = FlightError;

    fn try_from(req: UpdateFlightRequest) -> Result<Self, Self::Error> {
        Ok(FlightPatch {
            flight_number: req.flight_number,
            flight_date: timestamp(req.flight_date.as_deref())?,
            flight_status: req.flight_status.as_deref().map(FlightStatus::parse),
            departure: req.departure.unwrap_or_default().into_leg()?,
            arrival: req.arrival.unwrap_or_default().into_leg()?,
            airline_name: req.airline.and_then(|a| a.name),
        })
    }
}

fn timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>, FlightError> {
    match value {
        Some(v) => parse_timestamp(v),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartureResponse {
    pub airport: Option<String>,
    pub timezone: Option<String>,
    pub iata: Option<String>,
    pub delay: Option<f64>,
    pub scheduled: Option<DateTime<Utc>>,
    pub actual: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArrivalResponse {
    pub airport: Option<String>,
    pub timezone: Option<String>,
    pub iata: Option<String>,
    pub scheduled: Option<DateTime<Utc>>,
    pub actual: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlightResponse {
    pub flight_number: String,
    pub flight_date: Option<DateTime<Utc>>,
    pub flight_status: Option<String>,
    pub departure: DepartureResponse,
    pub arrival: ArrivalResponse,
    pub airline: AirlineDto,
}

impl From<Flight> for FlightResponse {
    fn from(flight: Flight) -> Self {
        Self {
            flight_number: flight.flight_number,
            flight_date: flight.flight_date,
            flight_status: flight.flight_status.map(|s| s.as_str().to_string()),
            departure: DepartureResponse {
                airport: flight.departure.airport,
                timezone: flight.departure.timezone,
                iata: flight.departure.iata,
                delay: flight.departure.delay,
                scheduled: flight.departure.scheduled,
                actual: flight.departure.actual,
            },
            arrival: ArrivalResponse {
                airport: flight.arrival.airport,
                timezone: flight.arrival.timezone,
                iata: flight.arrival.iata,
                scheduled: flight.arrival.scheduled,
                actual: flight.arrival.actual,
            },
            airline: AirlineDto {
                name: flight.airline_name,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlightCreatedResponse {
    pub message: String,
    pub flight_number: String,
}
