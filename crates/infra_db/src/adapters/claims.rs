//! PostgreSQL Claims Adapter
//!
//! Assessment runs as one transaction: the claim row is locked with
//! `SELECT ... FOR UPDATE`, the flight is read in the same transaction, and
//! the result is written before commit. Any early return drops the
//! transaction, which rolls it back.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{ClaimId, Currency, Money, PortError, DomainPort, HealthCheckable, HealthCheckResult};
use domain_claims::{
    Claim, ClaimStatus, ClaimsPort, CompensationAssessment, CompensationSchedule, NewClaim,
};

use crate::adapters::flights::row_to_flight;
use crate::adapters::{db_to_port_error, pool_health};
use crate::error::DatabaseError;
use crate::repositories::claims::{ClaimRow, ClaimsRepository};
use crate::repositories::flights::FlightRepository;

/// PostgreSQL-backed implementation of `ClaimsPort`
#[derive(Debug, Clone)]
pub struct PostgresClaimsAdapter {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimsAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimsAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimsAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        pool_health(&self.pool, "postgres-claims-adapter").await
    }
}

#[async_trait]
impl ClaimsPort for PostgresClaimsAdapter {
    #[instrument(skip(self, claim), fields(flight_number = %claim.flight_number))]
    async fn create_claim(&self, claim: NewClaim) -> Result<Claim, PortError> {
        let row = self
            .repository
            .insert(&claim.passenger_name, &claim.flight_number, Currency::TND.code())
            .await
            .map_err(db_to_port_error)?;
        row_to_claim(row)
    }

    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
        let row = self
            .repository
            .get_by_id(id.value())
            .await
            .map_err(|e| claim_error(e, id))?;
        row_to_claim(row)
    }

    async fn find_claim(
        &self,
        passenger_name: &str,
        flight_number: &str,
    ) -> Result<Option<Claim>, PortError> {
        self.repository
            .find_by_passenger(passenger_name, flight_number)
            .await
            .map_err(db_to_port_error)?
            .map(row_to_claim)
            .transpose()
    }

    async fn list_claims(&self) -> Result<Vec<Claim>, PortError> {
        self.repository
            .list_all()
            .await
            .map_err(db_to_port_error)?
            .into_iter()
            .map(row_to_claim)
            .collect()
    }

    #[instrument(skip(self, schedule))]
    async fn assess_claim(
        &self,
        id: ClaimId,
        schedule: &CompensationSchedule,
    ) -> Result<CompensationAssessment, PortError> {
        let mut tx = self.repository.begin().await.map_err(db_to_port_error)?;

        let row = ClaimsRepository::lock_by_id(&mut *tx, id.value())
            .await
            .map_err(db_to_port_error)?
            .ok_or_else(|| PortError::not_found("Claim", id.value()))?;
        let mut claim = row_to_claim(row)?;

        let flight = FlightRepository::fetch_by_number(&mut *tx, &claim.flight_number)
            .await
            .map_err(db_to_port_error)?
            .map(row_to_flight)
            .ok_or_else(|| PortError::not_found("Flight", &claim.flight_number))?;

        let assessment = claim
            .assess(&flight, schedule)
            .map_err(|e| PortError::validation_field(e.to_string(), "departure.delay"))?;

        ClaimsRepository::record_assessment(
            &mut *tx,
            claim.id.value(),
            claim.amount.amount(),
            claim.amount.currency().code(),
            claim.status.as_str(),
            claim.updated_at,
        )
        .await
        .map_err(db_to_port_error)?;

        tx.commit()
            .await
            .map_err(|e| db_to_port_error(DatabaseError::from(e)))?;
        debug!(status = %assessment.status, "Assessment committed");
        Ok(assessment)
    }
}

fn claim_error(e: DatabaseError, id: ClaimId) -> PortError {
    match e {
        DatabaseError::NotFound(_) => PortError::not_found("Claim", id.value()),
        other => db_to_port_error(other),
    }
}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    let currency: Currency = row.currency.parse().map_err(|e: core_kernel::MoneyError| {
        PortError::Transformation { message: e.to_string() }
    })?;
    let status: ClaimStatus = row
        .status
        .parse()
        .map_err(|e: domain_claims::ClaimError| PortError::Transformation { message: e.to_string() })?;

    Ok(Claim {
        id: ClaimId::new(row.id),
        passenger_name: row.passenger_name,
        flight_number: row.flight_number,
        amount: Money::new(row.amount, currency),
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
