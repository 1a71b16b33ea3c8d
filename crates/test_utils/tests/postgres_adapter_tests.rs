//! PostgreSQL adapter tests
//!
//! Each test starts its own container. Run with `cargo test -- --ignored`
//! on a machine with Docker.

use std::sync::Arc;

use core_kernel::{ClaimId, PortError};
use domain_admin::{AdminPort, AdminService, NewAdmin};
use domain_claims::{ClaimError, ClaimLookup, ClaimsPort, CompensationSchedule, CompensationService};
use domain_flight::{FlightPatch, FlightPort, FlightService};
use infra_db::{PostgresAdminAdapter, PostgresClaimsAdapter, PostgresFlightAdapter};
use test_utils::{
    assert_assessed, assert_claim_consistent, assert_pending, create_isolated_test_database,
    ClaimFixtures, FlightFixtures,
};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_flight_round_trip_and_duplicate() {
    let db = create_isolated_test_database().await.unwrap();
    let flights = PostgresFlightAdapter::new(db.pool().clone());

    let fixture = FlightFixtures::two_hours_late();
    let created = flights.create_flight(fixture.clone()).await.unwrap();
    assert_eq!(created.flight_number, "TU712");

    let fetched = flights.get_flight("TU712").await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.departure.scheduled, fixture.departure.scheduled);

    let err = flights.create_flight(fixture).await.unwrap_err();
    assert!(matches!(err, PortError::Conflict { .. }));

    let missing = flights.get_flight("XX000").await.unwrap_err();
    assert_eq!(missing.missing_entity(), Some("Flight"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_flight_update_and_delete() {
    let db = create_isolated_test_database().await.unwrap();
    let service = FlightService::new(Arc::new(PostgresFlightAdapter::new(db.pool().clone())));
    service.create_flight(FlightFixtures::on_time()).await.unwrap();

    let mut patch = FlightPatch::default();
    patch.departure.delay = Some(260.0);
    let updated = service.update_flight("BJ100", patch).await.unwrap();
    assert_eq!(updated.departure.delay, Some(260.0));
    assert_eq!(service.get_flight("BJ100").await.unwrap(), updated);

    service.delete_flight("BJ100").await.unwrap();
    assert!(service.stored_flights().await.unwrap().is_empty());
    assert!(service.delete_flight("BJ100").await.is_err());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_assessment_is_persisted_and_idempotent() {
    let db = create_isolated_test_database().await.unwrap();
    let flight_port = Arc::new(PostgresFlightAdapter::new(db.pool().clone()));
    flight_port.create_flight(FlightFixtures::three_hours_late()).await.unwrap();

    let claims = Arc::new(PostgresClaimsAdapter::new(db.pool().clone()));
    let service = CompensationService::new(claims.clone(), flight_port);

    let claim = service.submit_claim(ClaimFixtures::for_flight("TU514")).await.unwrap();
    assert_pending(&claim);

    let first = service.assess(claim.id).await.unwrap();
    let second = service.assess(claim.id).await.unwrap();
    assert_eq!(first, second);

    let stored = claims.get_claim(claim.id).await.unwrap();
    assert_assessed(&stored, 200);
    assert_claim_consistent(&stored, &CompensationSchedule::standard());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_assessment_failures_write_nothing() {
    let db = create_isolated_test_database().await.unwrap();
    let flight_port = Arc::new(PostgresFlightAdapter::new(db.pool().clone()));
    flight_port.create_flight(FlightFixtures::four_hours_late()).await.unwrap();

    let claims = Arc::new(PostgresClaimsAdapter::new(db.pool().clone()));
    let service = CompensationService::new(claims.clone(), flight_port.clone());
    let claim = service.submit_claim(ClaimFixtures::for_flight("AF1485")).await.unwrap();

    let unknown = service.assess(ClaimId::new(claim.id.value() + 100)).await.unwrap_err();
    assert!(matches!(unknown, ClaimError::ClaimNotFound(_)));

    flight_port.delete_flight("AF1485").await.unwrap();
    let orphan = service.assess(claim.id).await.unwrap_err();
    assert!(matches!(orphan, ClaimError::FlightNotFound(_)));

    assert_pending(&claims.get_claim(claim.id).await.unwrap());
    let record = service.get_claim(claim.id).await.unwrap();
    assert!(!record.flight_on_file);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_status_lookup_is_case_insensitive() {
    let db = create_isolated_test_database().await.unwrap();
    let flight_port = Arc::new(PostgresFlightAdapter::new(db.pool().clone()));
    flight_port.create_flight(FlightFixtures::two_hours_late()).await.unwrap();
    let service = CompensationService::new(
        Arc::new(PostgresClaimsAdapter::new(db.pool().clone())),
        flight_port,
    );
    let claim = service.submit_claim(ClaimFixtures::for_flight("TU712")).await.unwrap();

    let lookup = ClaimLookup::from_parts(None, Some("  AMIRA ben salah "), Some("tu712")).unwrap();
    assert_eq!(service.claim_status(lookup).await.unwrap().id, claim.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_admin_accounts() {
    let db = create_isolated_test_database().await.unwrap();
    let port = Arc::new(PostgresAdminAdapter::new(db.pool().clone()));
    let service = AdminService::new(port.clone());

    service.register("ops", "s3cret").await.unwrap();
    assert!(service.authenticate("ops", "s3cret").await.is_ok());
    assert!(service.authenticate("ops", "wrong").await.is_err());

    let duplicate = port.create_admin(NewAdmin::new("ops", "other").await.unwrap()).await.unwrap_err();
    assert!(matches!(duplicate, PortError::Conflict { .. }));
    assert!(port.find_by_username("nobody").await.unwrap().is_none());
}
