use domain_flight::{DelayMinutes, FlightError, FlightPatch, FlightStatus, NewFlight};
use proptest::prelude::*;
use test_utils::{
    delay_strategy, flight_strategy, invalid_delay_strategy, FlightBuilder, FlightFixtures, DEPARTURE,
};

fn stored(number: &str) -> domain_flight::Flight {
    FlightBuilder::new(number)
        .delay(45.0)
        .scheduled(*DEPARTURE)
        .build_stored(1)
}

#[test]
fn test_new_flight_trims_number() {
    let flight = NewFlight::new("  TU712 ");
    assert_eq!(flight.flight_number, "TU712");
    assert!(flight.validate().is_ok());
}

#[test]
fn test_blank_number_is_invalid() {
    assert!(matches!(
        NewFlight::new("   ").validate(),
        Err(FlightError::InvalidFlight(_))
    ));
}

#[test]
fn test_patch_leaves_absent_fields_alone() {
    let mut flight = stored("TU712");
    let before = flight.clone();

    flight.apply(FlightPatch::default()).unwrap();
    assert_eq!(flight, before);
}

#[test]
fn test_patch_updates_nested_fields() {
    let mut flight = stored("TU712");
    let mut patch = FlightPatch {
        flight_status: Some(FlightStatus::Landed),
        ..Default::default()
    };
    patch.departure.delay = Some(181.0);
    patch.arrival.iata = Some("CDG".to_string());

    flight.apply(patch).unwrap();
    assert_eq!(flight.flight_status, Some(FlightStatus::Landed));
    assert_eq!(flight.departure_delay().unwrap().minutes(), 181.0);
    assert_eq!(flight.arrival.iata.as_deref(), Some("CDG"));
    assert!(flight.departure.scheduled.is_some());
}

#[test]
fn test_patch_with_negative_delay_is_rejected_without_change() {
    let mut flight = stored("TU712");
    let mut patch = FlightPatch::default();
    patch.departure.delay = Some(-3.0);

    assert!(matches!(flight.apply(patch), Err(FlightError::InvalidDelay(_))));
    assert_eq!(flight.departure.delay, Some(45.0));
}

#[test]
fn test_stored_negative_delay_surfaces_as_error() {
    let mut flight = stored("TU712");
    flight.departure.delay = Some(-10.0);
    assert!(flight.departure_delay().is_err());
}

#[test]
fn test_missing_delay_counts_as_zero() {
    let flight = FlightFixtures::no_delay_reported().into_flight(core_kernel::FlightId::new(2));
    assert_eq!(flight.departure_delay().unwrap().minutes(), 0.0);
}

#[test]
fn test_negative_delay_fails_validation() {
    assert!(matches!(
        FlightFixtures::negative_delay().validate(),
        Err(FlightError::InvalidDelay(_))
    ));
}

#[test]
fn test_feed_entry_keeps_departure_details() {
    let entry = FlightBuilder::new("TU712")
        .delay(95.0)
        .scheduled(*DEPARTURE)
        .build_feed();
    let flight = entry.into_new_flight().unwrap();

    assert_eq!(flight.flight_number, "TU712");
    assert_eq!(flight.departure.delay, Some(95.0));
    assert_eq!(flight.departure.scheduled, Some(*DEPARTURE));
    assert_eq!(flight.flight_status, Some(FlightStatus::Scheduled));
}

#[test]
fn test_delay_deserialize_validates() {
    let ok: DelayMinutes = serde_json::from_str("150.5").unwrap();
    assert_eq!(ok.minutes(), 150.5);
    assert!(serde_json::from_str::<DelayMinutes>("-1").is_err());
}

proptest! {
    #[test]
    fn prop_non_negative_delays_are_accepted(minutes in delay_strategy()) {
        let delay = DelayMinutes::new(minutes).unwrap();
        prop_assert_eq!(delay.minutes(), minutes);
    }

    #[test]
    fn prop_invalid_delays_are_rejected(minutes in invalid_delay_strategy()) {
        prop_assert!(matches!(DelayMinutes::new(minutes), Err(FlightError::InvalidDelay(_))));
    }

    #[test]
    fn prop_stored_flight_reports_its_delay(flight in flight_strategy()) {
        let expected = flight.departure.delay;
        let stored = flight.into_flight(core_kernel::FlightId::new(7));
        prop_assert_eq!(Some(stored.departure_delay().unwrap().minutes()), expected);
    }
}
