//! Flight aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::FlightId;
use crate::error::FlightError;

/// Observed departure delay in minutes
///
/// Always finite and non-negative. Sub-minute precision is kept because some
/// flight data sources report fractional delays.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DelayMinutes(f64);

impl DelayMinutes {
    /// Validates a raw delay reading
    pub fn new(minutes: f64) -> Result<Self, FlightError> {
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(FlightError::InvalidDelay(minutes));
        }
        Ok(Self(minutes))
    }

    /// No delay at all
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Returns the delay in minutes
    pub fn minutes(&self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for DelayMinutes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let minutes = f64::deserialize(deserializer)?;
        DelayMinutes::new(minutes).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DelayMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// Operational status reported for a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Active,
    Landed,
    Cancelled,
    Incident,
    Diverted,
    #[serde(other)]
    Unknown,
}

impl FlightStatus {
    /// Parses a status string, mapping anything unrecognised to `Unknown`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "scheduled" => FlightStatus::Scheduled,
            "active" => FlightStatus::Active,
            "landed" => FlightStatus::Landed,
            "cancelled" | "canceled" => FlightStatus::Cancelled,
            "incident" => FlightStatus::Incident,
            "diverted" => FlightStatus::Diverted,
            _ => FlightStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::Active => "active",
            FlightStatus::Landed => "landed",
            FlightStatus::Cancelled => "cancelled",
            FlightStatus::Incident => "incident",
            FlightStatus::Diverted => "diverted",
            FlightStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Departure side of a flight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartureLeg {
    pub airport: Option<String>,
    pub timezone: Option<String>,
    pub iata: Option<String>,
    /// Delay in minutes as recorded; `None` means no delay was reported
    pub delay: Option<f64>,
    pub scheduled: Option<DateTime<Utc>>,
    pub actual: Option<DateTime<Utc>>,
}

/// Arrival side of a flight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrivalLeg {
    pub airport: Option<String>,
    pub timezone: Option<String>,
    pub iata: Option<String>,
    pub scheduled: Option<DateTime<Utc>>,
    pub actual: Option<DateTime<Utc>>,
}

/// A stored flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique identifier
    pub id: FlightId,
    /// IATA flight number, e.g. `TU712`
    pub flight_number: String,
    pub flight_date: Option<DateTime<Utc>>,
    pub flight_status: Option<FlightStatus>,
    pub departure: DepartureLeg,
    pub arrival: ArrivalLeg,
    pub airline_name: Option<String>,
}

impl Flight {
    /// Returns the departure delay used for compensation
    ///
    /// A missing delay reading counts as zero minutes.
    pub fn departure_delay(&self) -> Result<DelayMinutes, FlightError> {
        match self.departure.delay {
            Some(minutes) => DelayMinutes::new(minutes),
            None => Ok(DelayMinutes::zero()),
        }
    }

    /// Applies a partial update; only fields present in the patch change
    pub fn apply(&mut self, patch: FlightPatch) -> Result<(), FlightError> {
        patch.validate()?;

        if let Some(number) = patch.flight_number {
            self.flight_number = number.trim().to_string();
        }
        if let Some(date) = patch.flight_date {
            self.flight_date = Some(date);
        }
        if let Some(status) = patch.flight_status {
            self.flight_status = Some(status);
        }

        let dep = patch.departure;
        set_if_present(&mut self.departure.airport, dep.airport);
        set_if_present(&mut self.departure.timezone, dep.timezone);
        set_if_present(&mut self.departure.iata, dep.iata);
        set_if_present(&mut self.departure.delay, dep.delay);
        set_if_present(&mut self.departure.scheduled, dep.scheduled);
        set_if_present(&mut self.departure.actual, dep.actual);

        let arr = patch.arrival;
        set_if_present(&mut self.arrival.airport, arr.airport);
        set_if_present(&mut self.arrival.timezone, arr.timezone);
        set_if_present(&mut self.arrival.iata, arr.iata);
        set_if_present(&mut self.arrival.scheduled, arr.scheduled);
        set_if_present(&mut self.arrival.actual, arr.actual);

        set_if_present(&mut self.airline_name, patch.airline_name);
        Ok(())
    }
}

fn set_if_present<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Data for a flight that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFlight {
    pub flight_number: String,
    pub flight_date: Option<DateTime<Utc>>,
    pub flight_status: Option<FlightStatus>,
    pub departure: DepartureLeg,
    pub arrival: ArrivalLeg,
    pub airline_name: Option<String>,
}

impl NewFlight {
    /// Creates a flight with only a number set
    pub fn new(flight_number: impl Into<String>) -> Self {
        Self {
            flight_number: flight_number.into().trim().to_string(),
            flight_date: None,
            flight_status: None,
            departure: DepartureLeg::default(),
            arrival: ArrivalLeg::default(),
            airline_name: None,
        }
    }

    /// Checks the invariants every stored flight must hold
    pub fn validate(&self) -> Result<(), FlightError> {
        if self.flight_number.trim().is_empty() {
            return Err(FlightError::InvalidFlight("flight number must not be empty".to_string()));
        }
        if let Some(delay) = self.departure.delay {
            DelayMinutes::new(delay)?;
        }
        Ok(())
    }

    /// Materialises the stored flight once an identifier is assigned
    pub fn into_flight(self, id: FlightId) -> Flight {
        Flight {
            id,
            flight_number: self.flight_number,
            flight_date: self.flight_date,
            flight_status: self.flight_status,
            departure: self.departure,
            arrival: self.arrival,
            airline_name: self.airline_name,
        }
    }
}

/// Partial update for a flight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPatch {
    pub flight_number: Option<String>,
    pub flight_date: Option<DateTime<Utc>>,
    pub flight_status: Option<FlightStatus>,
    pub departure: DepartureLeg,
    pub arrival: ArrivalLeg,
    pub airline_name: Option<String>,
}

impl FlightPatch {
    fn validate(&self) -> Result<(), FlightError> {
        if let Some(number) = &self.flight_number {
            if number.trim().is_empty() {
                return Err(FlightError::InvalidFlight("flight number must not be empty".to_string()));
            }
        }
        if let Some(delay) = self.departure.delay {
            DelayMinutes::new(delay)?;
        }
        Ok(())
    }
}

/// Parses a timestamp from a flight data source
///
/// Accepts RFC 3339 timestamps (`2024-12-01T10:30:00+00:00`) and bare
/// dates (`2024-12-01`, read as midnight UTC). Returns `None` for empty input.
pub fn parse_timestamp(value: &str) -> Result<Option<DateTime<Utc>>, FlightError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.and_utc()));
        }
    }
    Err(FlightError::InvalidTimestamp(value.to_string()))
}
