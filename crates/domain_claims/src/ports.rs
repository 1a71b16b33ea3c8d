//! Claims Domain Ports
//!
//! `ClaimsPort` stores claims and runs the assessment unit of work:
//! read the claim, read its flight's delay, price it and write the result.
//! Implementations must make that unit atomic. The PostgreSQL adapter uses a
//! transaction holding a row lock on the claim; the mock holds its write lock
//! for the whole unit.

use async_trait::async_trait;

use core_kernel::{ClaimId, PortError, DomainPort, HealthCheckable};

use crate::claim::{Claim, CompensationAssessment, NewClaim};
use crate::compensation::CompensationSchedule;

/// Storage port for claims
#[async_trait]
pub trait ClaimsPort: DomainPort + HealthCheckable {
    /// Stores a new pending claim
    async fn create_claim(&self, claim: NewClaim) -> Result<Claim, PortError>;

    /// Retrieves a claim by ID
    ///
    /// Returns `PortError::NotFound` with entity type `Claim` if absent.
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Finds the oldest claim filed by a passenger for a flight
    ///
    /// Matching is trimmed and case-insensitive on both values.
    async fn find_claim(
        &self,
        passenger_name: &str,
        flight_number: &str,
    ) -> Result<Option<Claim>, PortError>;

    /// Lists every claim ordered by ID
    async fn list_claims(&self) -> Result<Vec<Claim>, PortError>;

    /// Prices a claim and persists the result atomically
    ///
    /// Errors:
    /// - `NotFound` (`Claim`) if the claim does not exist
    /// - `NotFound` (`Flight`) if its flight does not exist
    /// - `Validation` if the flight's recorded delay is unusable
    ///
    /// Nothing is written on error.
    async fn assess_claim(
        &self,
        id: ClaimId,
        schedule: &CompensationSchedule,
    ) -> Result<CompensationAssessment, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{Currency, HealthCheckResult};
    use domain_flight::FlightPort;

    /// In-memory mock implementation of ClaimsPort
    ///
    /// Reads flights through the given flight port so assessment sees the
    /// same flights as the rest of the test.
    pub struct MockClaimsPort {
        claims: Arc<RwLock<BTreeMap<ClaimId, Claim>>>,
        flights: Arc<dyn FlightPort>,
    }

    impl MockClaimsPort {
        pub fn new(flights: Arc<dyn FlightPort>) -> Self {
            Self {
                claims: Arc::default(),
                flights,
            }
        }

        /// Number of stored claims
        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }
    }

    impl DomainPort for MockClaimsPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimsPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-claims-port")
        }
    }

    #[async_trait]
    impl ClaimsPort for MockClaimsPort {
        async fn create_claim(&self, claim: NewClaim) -> Result<Claim, PortError> {
            let mut claims = self.claims.write().await;
            let next = claims.keys().next_back().map_or(1, |id| id.value() + 1);
            let stored = claim.into_claim(ClaimId::new(next), Currency::TND, Utc::now());
            claims.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
            self.claims
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id.value()))
        }

        async fn find_claim(
            &self,
            passenger_name: &str,
            flight_number: &str,
        ) -> Result<Option<Claim>, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .find(|c| c.matches(passenger_name, flight_number))
                .cloned())
        }

        async fn list_claims(&self) -> Result<Vec<Claim>, PortError> {
            Ok(self.claims.read().await.values().cloned().collect())
        }

        async fn assess_claim(
            &self,
            id: ClaimId,
            schedule: &CompensationSchedule,
        ) -> Result<CompensationAssessment, PortError> {
            let mut claims = self.claims.write().await;
            let claim = claims
                .get(&id)
                .ok_or_else(|| PortError::not_found("Claim", id.value()))?;
            let flight = self.flights.get_flight(&claim.flight_number).await?;

            let mut updated = claim.clone();
            let assessment = updated
                .assess(&flight, schedule)
                .map_err(|e| PortError::validation_field(e.to_string(), "departure.delay"))?;
            claims.insert(id, updated);
            Ok(assessment)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockClaimsPort;
    use super::*;
    use crate::claim::ClaimStatus;
    use domain_flight::{FlightPort, MockFlightPort, NewFlight};
    use std::sync::Arc;

    async fn port_with_flight(delay: f64) -> (MockClaimsPort, Arc<MockFlightPort>) {
        let mut flight = NewFlight::new("TU712");
        flight.departure.delay = Some(delay);
        let flights = Arc::new(MockFlightPort::with_flights(vec![flight]).await);
        (MockClaimsPort::new(flights.clone()), flights)
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let (port, _) = port_with_flight(0.0).await;
        let a = port.create_claim(NewClaim::new("A", "TU712").unwrap()).await.unwrap();
        let b = port.create_claim(NewClaim::new("B", "TU712").unwrap()).await.unwrap();
        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
    }

    #[tokio::test]
    async fn test_assess_persists_result() {
        let (port, _) = port_with_flight(200.0).await;
        let claim = port.create_claim(NewClaim::new("A", "TU712").unwrap()).await.unwrap();

        port.assess_claim(claim.id, &CompensationSchedule::standard()).await.unwrap();

        let stored = port.get_claim(claim.id).await.unwrap();
        assert_eq!(stored.status, ClaimStatus::Approved);
        assert_eq!(stored.amount.to_string(), "200 TND");
    }

    #[tokio::test]
    async fn test_assess_missing_flight_writes_nothing() {
        let (port, flights) = port_with_flight(200.0).await;
        let claim = port.create_claim(NewClaim::new("A", "TU712").unwrap()).await.unwrap();
        flights.delete_flight("TU712").await.unwrap();

        let err = port
            .assess_claim(claim.id, &CompensationSchedule::standard())
            .await
            .unwrap_err();
        assert_eq!(err.missing_entity(), Some("Flight"));
        assert_eq!(port.get_claim(claim.id).await.unwrap(), claim);
    }

    #[tokio::test]
    async fn test_find_claim_is_case_insensitive() {
        let (port, _) = port_with_flight(0.0).await;
        port.create_claim(NewClaim::new("Amira", "TU712").unwrap()).await.unwrap();

        assert!(port.find_claim(" AMIRA ", "tu712").await.unwrap().is_some());
        assert!(port.find_claim("Amira", "BJ100").await.unwrap().is_none());
    }
}
