//! Compensation application service

use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::ClaimId;
use domain_flight::FlightPort;

use crate::claim::{Claim, CompensationAssessment, NewClaim};
use crate::compensation::CompensationSchedule;
use crate::error::ClaimError;
use crate::ports::ClaimsPort;

/// How a passenger identifies a claim when checking its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimLookup {
    ById(ClaimId),
    ByPassenger {
        passenger_name: String,
        flight_number: String,
    },
}

impl ClaimLookup {
    /// Picks a lookup from optional query values
    ///
    /// A claim id wins when present. Otherwise both passenger name and flight
    /// number are required; blank values count as missing.
    pub fn from_parts(
        claim_id: Option<ClaimId>,
        passenger_name: Option<&str>,
        flight_number: Option<&str>,
    ) -> Result<Self, ClaimError> {
        if let Some(id) = claim_id {
            return Ok(ClaimLookup::ById(id));
        }
        let present = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        match (present(passenger_name), present(flight_number)) {
            (Some(passenger_name), Some(flight_number)) => Ok(ClaimLookup::ByPassenger {
                passenger_name,
                flight_number,
            }),
            _ => Err(ClaimError::MissingLookupKey),
        }
    }
}

/// A claim together with whether its flight is still on file
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimRecord {
    pub claim: Claim,
    pub flight_on_file: bool,
}

/// Claim submission, lookup and assessment
#[derive(Clone)]
pub struct CompensationService {
    claims: Arc<dyn ClaimsPort>,
    flights: Arc<dyn FlightPort>,
    schedule: Arc<CompensationSchedule>,
}

impl CompensationService {
    /// Creates a service pricing claims with the standard schedule
    pub fn new(claims: Arc<dyn ClaimsPort>, flights: Arc<dyn FlightPort>) -> Self {
        Self::with_schedule(claims, flights, CompensationSchedule::standard())
    }

    pub fn with_schedule(
        claims: Arc<dyn ClaimsPort>,
        flights: Arc<dyn FlightPort>,
        schedule: CompensationSchedule,
    ) -> Self {
        Self {
            claims,
            flights,
            schedule: Arc::new(schedule),
        }
    }

    /// The schedule claims are priced with
    pub fn schedule(&self) -> &CompensationSchedule {
        &self.schedule
    }

    /// Returns the underlying storage port
    pub fn port(&self) -> Arc<dyn ClaimsPort> {
        Arc::clone(&self.claims)
    }

    /// Files a pending claim for an existing flight
    #[instrument(skip(self, claim), fields(flight_number = %claim.flight_number))]
    pub async fn submit_claim(&self, claim: NewClaim) -> Result<Claim, ClaimError> {
        if !self.flights.exists(&claim.flight_number).await? {
            return Err(ClaimError::FlightNotFound(claim.flight_number));
        }
        let created = self.claims.create_claim(claim).await?;
        info!(claim_id = %created.id, "Claim submitted");
        Ok(created)
    }

    /// Looks up a claim for a passenger status check
    pub async fn claim_status(&self, lookup: ClaimLookup) -> Result<Claim, ClaimError> {
        match lookup {
            ClaimLookup::ById(id) => Ok(self.claims.get_claim(id).await?),
            ClaimLookup::ByPassenger { passenger_name, flight_number } => self
                .claims
                .find_claim(&passenger_name, &flight_number)
                .await?
                .ok_or_else(|| ClaimError::ClaimNotFound(format!("{} on {}", passenger_name, flight_number))),
        }
    }

    /// Prices a claim from its flight's delay and records the decision
    #[instrument(skip(self))]
    pub async fn assess(&self, id: ClaimId) -> Result<CompensationAssessment, ClaimError> {
        let assessment = self.claims.assess_claim(id, &self.schedule).await?;
        info!(
            claim_id = %assessment.claim_id,
            delay = assessment.delay.minutes(),
            tier = %assessment.tier,
            amount = %assessment.amount,
            status = %assessment.status,
            "Claim assessed"
        );
        Ok(assessment)
    }

    pub async fn list_claims(&self) -> Result<Vec<ClaimRecord>, ClaimError> {
        let claims = self.claims.list_claims().await?;
        let mut records = Vec::with_capacity(claims.len());
        for claim in claims {
            records.push(self.record(claim).await?);
        }
        Ok(records)
    }

    pub async fn get_claim(&self, id: ClaimId) -> Result<ClaimRecord, ClaimError> {
        let claim = self.claims.get_claim(id).await?;
        self.record(claim).await
    }

    async fn record(&self, claim: Claim) -> Result<ClaimRecord, ClaimError> {
        let flight_on_file = self.flights.exists(&claim.flight_number).await?;
        Ok(ClaimRecord { claim, flight_on_file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimStatus;
    use crate::ports::mock::MockClaimsPort;
    use domain_flight::{MockFlightPort, NewFlight};
    use rust_decimal_macros::dec;

    async fn service_with(flights: Vec<(&str, Option<f64>)>) -> (CompensationService, Arc<MockFlightPort>) {
        let flights = flights
            .into_iter()
            .map(|(number, delay)| {
                let mut flight = NewFlight::new(number);
                flight.departure.delay = delay;
                flight
            })
            .collect();
        let flight_port = Arc::new(MockFlightPort::with_flights(flights).await);
        let claims = Arc::new(MockClaimsPort::new(flight_port.clone()));
        (CompensationService::new(claims, flight_port.clone()), flight_port)
    }

    fn claim(name: &str, number: &str) -> NewClaim {
        NewClaim::new(name, number).unwrap()
    }

    #[tokio::test]
    async fn test_submit_requires_known_flight() {
        let (service, _) = service_with(vec![("TU712", Some(150.0))]).await;

        let created = service.submit_claim(claim("Amira", "TU712")).await.unwrap();
        assert_eq!(created.status, ClaimStatus::Pending);

        let err = service.submit_claim(claim("Amira", "BJ100")).await.unwrap_err();
        assert!(matches!(err, ClaimError::FlightNotFound(n) if n == "BJ100"));
    }

    #[tokio::test]
    async fn test_assess_150_minutes_approves_100() {
        let (service, _) = service_with(vec![("TU712", Some(150.0))]).await;
        let created = service.submit_claim(claim("Amira", "TU712")).await.unwrap();

        let result = service.assess(created.id).await.unwrap();
        assert_eq!(result.amount.amount(), dec!(100));
        assert_eq!(result.status, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_assess_30_minutes_denies() {
        let (service, _) = service_with(vec![("TU712", Some(30.0))]).await;
        let created = service.submit_claim(claim("Amira", "TU712")).await.unwrap();

        let result = service.assess(created.id).await.unwrap();
        assert!(result.amount.is_zero());
        assert_eq!(result.status, ClaimStatus::Denied);
    }

    #[tokio::test]
    async fn test_reassessment_is_idempotent() {
        let (service, _) = service_with(vec![("TU712", Some(245.0))]).await;
        let created = service.submit_claim(claim("Amira", "TU712")).await.unwrap();

        let first = service.assess(created.id).await.unwrap();
        let second = service.assess(created.id).await.unwrap();
        assert_eq!(first, second);

        let stored = service.claim_status(ClaimLookup::ById(created.id)).await.unwrap();
        assert_eq!(stored.amount.amount(), dec!(300));
    }

    #[tokio::test]
    async fn test_assess_unknown_claim_is_not_found() {
        let (service, _) = service_with(vec![("TU712", Some(150.0))]).await;

        let err = service.assess(ClaimId::new(999)).await.unwrap_err();
        assert!(matches!(err, ClaimError::ClaimNotFound(_)));
        assert!(service.list_claims().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assess_invalid_delay_writes_nothing() {
        let (service, _) = service_with(vec![("TU712", Some(-20.0))]).await;
        let created = service.submit_claim(claim("Amira", "TU712")).await.unwrap();

        let err = service.assess(created.id).await.unwrap_err();
        assert!(matches!(err, ClaimError::Unassessable(_)));

        let stored = service.claim_status(ClaimLookup::ById(created.id)).await.unwrap();
        assert_eq!(stored.status, ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_status_lookup_by_passenger() {
        let (service, _) = service_with(vec![("TU712", None)]).await;
        service.submit_claim(claim("Amira Ben Salah", "TU712")).await.unwrap();

        let lookup = ClaimLookup::from_parts(None, Some(" amira ben salah"), Some("tu712 ")).unwrap();
        let found = service.claim_status(lookup).await.unwrap();
        assert_eq!(found.passenger_name, "Amira Ben Salah");

        let missing = ClaimLookup::from_parts(None, Some("Someone"), Some("TU712")).unwrap();
        assert!(matches!(
            service.claim_status(missing).await.unwrap_err(),
            ClaimError::ClaimNotFound(_)
        ));
    }

    #[test]
    fn test_lookup_requires_a_key() {
        assert!(matches!(
            ClaimLookup::from_parts(None, Some("Amira"), None),
            Err(ClaimError::MissingLookupKey)
        ));
        assert!(matches!(
            ClaimLookup::from_parts(None, Some("  "), Some("TU712")),
            Err(ClaimError::MissingLookupKey)
        ));
        assert_eq!(
            ClaimLookup::from_parts(Some(ClaimId::new(3)), None, None).unwrap(),
            ClaimLookup::ById(ClaimId::new(3))
        );
    }

    #[tokio::test]
    async fn test_records_flag_deleted_flights() {
        let (service, flights) = service_with(vec![("TU712", None), ("BJ100", None)]).await;
        service.submit_claim(claim("A", "TU712")).await.unwrap();
        let orphan = service.submit_claim(claim("B", "BJ100")).await.unwrap();
        flights.delete_flight("BJ100").await.unwrap();

        let records = service.list_claims().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].flight_on_file);
        assert!(!records[1].flight_on_file);

        let record = service.get_claim(orphan.id).await.unwrap();
        assert!(!record.flight_on_file);
    }
}
