//! PostgreSQL Flight Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{FlightId, PortError, DomainPort, HealthCheckable, HealthCheckResult};
use domain_flight::{ArrivalLeg, DepartureLeg, Flight, FlightPort, FlightStatus, NewFlight};

use crate::adapters::{db_to_port_error, pool_health};
use crate::error::DatabaseError;
use crate::repositories::flights::{FlightRepository, FlightRow, FlightValues};

/// PostgreSQL-backed implementation of `FlightPort`
#[derive(Debug, Clone)]
pub struct PostgresFlightAdapter {
    repository: FlightRepository,
    pool: PgPool,
}

impl PostgresFlightAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FlightRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &FlightRepository {
        &self.repository
    }
}

impl DomainPort for PostgresFlightAdapter {}

#[async_trait]
impl HealthCheckable for PostgresFlightAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        pool_health(&self.pool, "postgres-flight-adapter").await
    }
}

#[async_trait]
impl FlightPort for PostgresFlightAdapter {
    #[instrument(skip(self))]
    async fn get_flight(&self, flight_number: &str) -> Result<Flight, PortError> {
        self.repository
            .get_by_number(flight_number)
            .await
            .map(row_to_flight)
            .map_err(|e| flight_error(e, flight_number))
    }

    async fn list_flights(&self) -> Result<Vec<Flight>, PortError> {
        let rows = self.repository.list_all().await.map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_flight).collect())
    }

    #[instrument(skip(self, flight), fields(flight_number = %flight.flight_number))]
    async fn create_flight(&self, flight: NewFlight) -> Result<Flight, PortError> {
        let values = new_flight_values(flight);
        self.repository
            .insert(&values)
            .await
            .map(row_to_flight)
            .map_err(|e| flight_error(e, &values.flight_number))
    }

    #[instrument(skip(self, flight), fields(flight_id = %flight.id))]
    async fn save_flight(&self, flight: &Flight) -> Result<(), PortError> {
        let values = flight_values(flight);
        self.repository
            .update(flight.id.value(), &values)
            .await
            .map_err(|e| flight_error(e, &flight.flight_number))
    }

    #[instrument(skip(self))]
    async fn delete_flight(&self, flight_number: &str) -> Result<(), PortError> {
        self.repository
            .delete_by_number(flight_number)
            .await
            .map_err(|e| flight_error(e, flight_number))
    }

    async fn exists(&self, flight_number: &str) -> Result<bool, PortError> {
        self.repository.exists(flight_number).await.map_err(db_to_port_error)
    }
}

/// Error mapping with the flight number as the key for NotFound and Conflict
fn flight_error(e: DatabaseError, flight_number: &str) -> PortError {
    match e {
        DatabaseError::NotFound(_) => PortError::not_found("Flight", flight_number),
        DatabaseError::DuplicateEntry(_) => PortError::conflict(flight_number),
        other => db_to_port_error(other),
    }
}

pub(crate) fn row_to_flight(row: FlightRow) -> Flight {
    Flight {
        id: FlightId::new(row.id),
        flight_number: row.flight_number,
        flight_date: row.flight_date,
        flight_status: row.flight_status.as_deref().map(FlightStatus::parse),
        departure: DepartureLeg {
            airport: row.departure_airport,
            timezone: row.departure_timezone,
            iata: row.departure_iata,
            delay: row.departure_delay,
            scheduled: row.departure_scheduled,
            actual: row.departure_actual,
        },
        arrival: ArrivalLeg {
            airport: row.arrival_airport,
            timezone: row.arrival_timezone,
            iata: row.arrival_iata,
            scheduled: row.arrival_scheduled,
            actual: row.arrival_actual,
        },
        airline_name: row.airline_name,
    }
}

fn new_flight_values(flight: NewFlight) -> FlightValues {
    FlightValues {
        flight_number: flight.flight_number,
        flight_date: flight.flight_date,
        flight_status: flight.flight_status.map(|s| s.as_str().to_string()),
        departure_airport: flight.departure.airport,
        departure_timezone: flight.departure.timezone,
        departure_iata: flight.departure.iata,
        departure_delay: flight.departure.delay,
        departure_scheduled: flight.departure.scheduled,
        departure_actual: flight.departure.actual,
        arrival_airport: flight.arrival.airport,
        arrival_timezone: flight.arrival.timezone,
        arrival_iata: flight.arrival.iata,
        arrival_scheduled: flight.arrival.scheduled,
        arrival_actual: flight.arrival.actual,
        airline_name: flight.airline_name,
    }
}

fn flight_values(flight: &Flight) -> FlightValues {
    new_flight_values(NewFlight {
        flight_number: flight.flight_number.clone(),
        flight_date: flight.flight_date,
        flight_status: flight.flight_status,
        departure: flight.departure.clone(),
        arrival: flight.arrival.clone(),
        airline_name: flight.airline_name.clone(),
    })
}
