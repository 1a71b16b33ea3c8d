//! Property-Based Test Generators
//!
//! Proptest strategies for delays, flight numbers and claim submissions.

use proptest::prelude::*;

use domain_claims::{CompensationTier, NewClaim};
use domain_flight::NewFlight;

/// Any valid delay, including very long ones
pub fn delay_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => 0.0f64..480.0,
        1 => 480.0f64..100_000.0,
        1 => Just(0.0),
    ]
}

/// Delays strictly inside one tier's band
pub fn delay_in_tier(tier: CompensationTier) -> BoxedStrategy<f64> {
    match tier {
        CompensationTier::None => (0.0f64..120.0).boxed(),
        CompensationTier::Low => (120.0f64..180.0).boxed(),
        CompensationTier::Mid => (180.0f64..240.0).boxed(),
        CompensationTier::High => (240.0f64..100_000.0).boxed(),
    }
}

/// Exact band edges and the values just below them
pub fn boundary_delay_strategy() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.0, 119.9, 119.99, 120.0, 179.99, 180.0, 239.99, 240.0])
}

/// Delays `DelayMinutes` must refuse
pub fn invalid_delay_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-100_000.0f64..-0.001),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

/// IATA-style flight numbers such as `TU712`
pub fn flight_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2}[0-9]{2,4}"
}

pub fn passenger_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,12} [A-Z][a-z]{1,12}"
}

/// Flights with a valid delay
pub fn flight_strategy() -> impl Strategy<Value = NewFlight> {
    (flight_number_strategy(), delay_strategy()).prop_map(|(number, delay)| {
        let mut flight = NewFlight::new(number);
        flight.departure.delay = Some(delay);
        flight
    })
}

pub fn new_claim_strategy() -> impl Strategy<Value = NewClaim> {
    (passenger_name_strategy(), flight_number_strategy()).prop_map(|(name, number)| NewClaim {
        passenger_name: name,
        flight_number: number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_flight::DelayMinutes;

    proptest! {
        #[test]
        fn generated_flights_are_valid(flight in flight_strategy()) {
            prop_assert!(flight.validate().is_ok());
        }

        #[test]
        fn invalid_delays_are_refused(delay in invalid_delay_strategy()) {
            prop_assert!(DelayMinutes::new(delay).is_err());
        }

        #[test]
        fn generated_claims_pass_validation(claim in new_claim_strategy()) {
            prop_assert!(NewClaim::new(claim.passenger_name, claim.flight_number).is_ok());
        }
    }
}
