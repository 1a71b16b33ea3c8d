//! Pre-built Test Fixtures
//!
//! Fixed flights and claims whose delays sit in known compensation tiers.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_claims::NewClaim;
use domain_flight::{FlightStatus, NewFlight};

use crate::builders::FlightBuilder;

/// Scheduled departure shared by the flight fixtures
pub static DEPARTURE: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 12, 1, 10, 30, 0).unwrap());

/// Fixture for compensation amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn tnd_300() -> Money {
        Money::new(dec!(300), Currency::TND)
    }
}

/// Fixture for flights, one per tier plus the awkward cases
pub struct FlightFixtures;

impl FlightFixtures {
    /// 30 minutes late; no compensation
    pub fn on_time() -> NewFlight {
        Self::departing("BJ100", 30.0)
    }

    /// 150 minutes late; low tier
    pub fn two_hours_late() -> NewFlight {
        Self::departing("TU712", 150.0)
    }

    /// 200 minutes late; mid tier
    pub fn three_hours_late() -> NewFlight {
        Self::departing("TU514", 200.0)
    }

    /// 245 minutes late; high tier
    pub fn four_hours_late() -> NewFlight {
        Self::departing("AF1485", 245.0)
    }

    /// No delay reported by the provider
    pub fn no_delay_reported() -> NewFlight {
        FlightBuilder::new("LH1321").scheduled(*DEPARTURE).build()
    }

    /// Delay that fails validation
    pub fn negative_delay() -> NewFlight {
        Self::departing("TU999", -20.0)
    }

    fn departing(number: &str, delay: f64) -> NewFlight {
        FlightBuilder::new(number)
            .status(FlightStatus::Active)
            .scheduled(*DEPARTURE)
            .delay(delay)
            .build()
    }
}

/// Fixture for claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A claim against `flight_number` by a fixed passenger
    pub fn for_flight(flight_number: &str) -> NewClaim {
        NewClaim::new("Amira Ben Salah", flight_number).expect("fixture claim is valid")
    }
}
