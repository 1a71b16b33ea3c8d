//! Flight Domain Ports
//!
//! `FlightPort` is the storage port for flight records. The PostgreSQL
//! adapter lives in `infra_db`; an in-memory mock is available behind the
//! `mock` feature for tests of dependent crates.
//!
//! Flights are addressed by flight number everywhere outside the storage
//! layer, so every lookup on this port is keyed by it.

use async_trait::async_trait;

use core_kernel::{PortError, DomainPort, HealthCheckable};

use crate::flight::{Flight, NewFlight};

/// Storage port for flights
#[async_trait]
pub trait FlightPort: DomainPort + HealthCheckable {
    /// Retrieves a flight by its flight number
    ///
    /// Returns `PortError::NotFound` with entity type `Flight` if absent.
    async fn get_flight(&self, flight_number: &str) -> Result<Flight, PortError>;

    /// Lists every stored flight, ordered by identifier
    async fn list_flights(&self) -> Result<Vec<Flight>, PortError>;

    /// Stores a new flight
    ///
    /// Returns `PortError::Conflict` if the flight number is already taken.
    async fn create_flight(&self, flight: NewFlight) -> Result<Flight, PortError>;

    /// Overwrites an existing flight, matched by identifier
    async fn save_flight(&self, flight: &Flight) -> Result<(), PortError>;

    /// Deletes a flight by its flight number
    async fn delete_flight(&self, flight_number: &str) -> Result<(), PortError>;

    /// Returns true if a flight with this number is stored
    async fn exists(&self, flight_number: &str) -> Result<bool, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};
    use tokio::sync::RwLock;
    use core_kernel::{FlightId, HealthCheckResult};

    /// In-memory mock implementation of FlightPort
    #[derive(Debug, Default)]
    pub struct MockFlightPort {
        flights: Arc<RwLock<BTreeMap<FlightId, Flight>>>,
        next_id: AtomicI64,
    }

    impl MockFlightPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with flights for testing
        pub async fn with_flights(flights: Vec<NewFlight>) -> Self {
            let port = Self::new();
            for flight in flights {
                // Duplicates in fixtures are a test bug; keep the first one
                let _ = port.create_flight(flight).await;
            }
            port
        }
    }

    impl DomainPort for MockFlightPort {}

    #[async_trait]
    impl HealthCheckable for MockFlightPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-flight-port")
        }
    }

    #[async_trait]
    impl FlightPort for MockFlightPort {
        async fn get_flight(&self, flight_number: &str) -> Result<Flight, PortError> {
            self.flights
                .read()
                .await
                .values()
                .find(|f| f.flight_number == flight_number)
                .cloned()
                .ok_or_else(|| PortError::not_found("Flight", flight_number))
        }

        async fn list_flights(&self) -> Result<Vec<Flight>, PortError> {
            Ok(self.flights.read().await.values().cloned().collect())
        }

        async fn create_flight(&self, flight: NewFlight) -> Result<Flight, PortError> {
            let mut flights = self.flights.write().await;
            if flights.values().any(|f| f.flight_number == flight.flight_number) {
                return Err(PortError::conflict(flight.flight_number));
            }
            let id = FlightId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let stored = flight.into_flight(id);
            flights.insert(id, stored.clone());
            Ok(stored)
        }

        async fn save_flight(&self, flight: &Flight) -> Result<(), PortError> {
            let mut flights = self.flights.write().await;
            if flights
                .values()
                .any(|f| f.id != flight.id && f.flight_number == flight.flight_number)
            {
                return Err(PortError::conflict(flight.flight_number.clone()));
            }
            match flights.get_mut(&flight.id) {
                Some(slot) => {
                    *slot = flight.clone();
                    Ok(())
                }
                None => Err(PortError::not_found("Flight", &flight.flight_number)),
            }
        }

        async fn delete_flight(&self, flight_number: &str) -> Result<(), PortError> {
            let mut flights = self.flights.write().await;
            let id = flights
                .values()
                .find(|f| f.flight_number == flight_number)
                .map(|f| f.id)
                .ok_or_else(|| PortError::not_found("Flight", flight_number))?;
            flights.remove(&id);
            Ok(())
        }

        async fn exists(&self, flight_number: &str) -> Result<bool, PortError> {
            Ok(self
                .flights
                .read()
                .await
                .values()
                .any(|f| f.flight_number == flight_number))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockFlightPort;
    use super::*;

    #[tokio::test]
    async fn test_mock_create_and_get() {
        let port = MockFlightPort::new();
        let created = port.create_flight(NewFlight::new("TU712")).await.unwrap();

        let fetched = port.get_flight("TU712").await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert!(port.exists("TU712").await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_rejects_duplicate_number() {
        let port = MockFlightPort::new();
        port.create_flight(NewFlight::new("TU712")).await.unwrap();

        let err = port.create_flight(NewFlight::new("TU712")).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_mock_delete_missing_flight() {
        let port = MockFlightPort::new();
        let err = port.delete_flight("BJ100").await.unwrap_err();
        assert_eq!(err.missing_entity(), Some("Flight"));
    }

    #[tokio::test]
    async fn test_mock_list_in_insertion_order() {
        let port = MockFlightPort::with_flights(vec![
            NewFlight::new("TU712"),
            NewFlight::new("BJ100"),
        ])
        .await;

        let numbers: Vec<_> = port
            .list_flights()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.flight_number)
            .collect();
        assert_eq!(numbers, vec!["TU712", "BJ100"]);
    }
}
