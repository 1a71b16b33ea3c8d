//! Test Data Builders
//!
//! Builders start from valid defaults; tests override only what they care
//! about.

use chrono::{DateTime, Duration, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::{ClaimId, Currency, FlightId, Money};
use domain_claims::{Claim, ClaimStatus};
use domain_flight::{FeedFlight, Flight, FlightStatus, NewFlight};

/// Builder for flights
#[derive(Debug, Clone)]
pub struct FlightBuilder {
    flight: NewFlight,
}

impl FlightBuilder {
    pub fn new(flight_number: &str) -> Self {
        let mut flight = NewFlight::new(flight_number);
        flight.flight_status = Some(FlightStatus::Scheduled);
        flight.departure.iata = Some("TUN".to_string());
        flight.departure.airport = Some("Tunis-Carthage International".to_string());
        flight.departure.timezone = Some("Africa/Tunis".to_string());
        flight.airline_name = Some(CompanyName().fake());
        Self { flight }
    }

    pub fn delay(mut self, minutes: f64) -> Self {
        self.flight.departure.delay = Some(minutes);
        self
    }

    pub fn status(mut self, status: FlightStatus) -> Self {
        self.flight.flight_status = Some(status);
        self
    }

    /// Sets the flight date, scheduled departure, and a scheduled arrival 2.5 hours later
    pub fn scheduled(mut self, departure: DateTime<Utc>) -> Self {
        self.flight.flight_date = Some(departure);
        self.flight.departure.scheduled = Some(departure);
        self.flight.arrival.scheduled = Some(departure + Duration::minutes(150));
        self
    }

    pub fn build(self) -> NewFlight {
        self.flight
    }

    /// Builds a stored flight with the given id
    pub fn build_stored(self, id: i64) -> Flight {
        self.flight.into_flight(FlightId::new(id))
    }

    /// Builds the same flight as a feed entry
    pub fn build_feed(self) -> FeedFlight {
        let f = self.flight;
        FeedFlight {
            flight_number: Some(f.flight_number),
            flight_date: f.flight_date,
            flight_status: f.flight_status.map(|s| s.as_str().to_string()),
            departure: f.departure,
            arrival: f.arrival,
            airline_name: f.airline_name,
        }
    }
}

/// Builder for claims
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    id: i64,
    passenger_name: String,
    flight_number: String,
    amount: Money,
    status: ClaimStatus,
    created_at: DateTime<Utc>,
}

impl ClaimBuilder {
    /// A pending claim by a random passenger
    pub fn new(flight_number: &str) -> Self {
        Self {
            id: 1,
            passenger_name: Name().fake(),
            flight_number: flight_number.to_string(),
            amount: Money::zero(Currency::TND),
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Marks the claim as already assessed with this payout
    pub fn assessed(mut self, amount: Money) -> Self {
        self.status = ClaimStatus::for_amount(&amount);
        self.amount = amount;
        self
    }

    pub fn build(self) -> Claim {
        Claim {
            id: ClaimId::new(self.id),
            passenger_name: self.passenger_name,
            flight_number: self.flight_number,
            amount: self.amount,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flight_builder_defaults_are_valid() {
        let flight = FlightBuilder::new("TU712").build();
        assert!(flight.validate().is_ok());
        assert_eq!(flight.departure.iata.as_deref(), Some("TUN"));
        assert!(flight.airline_name.is_some());
    }

    #[test]
    fn test_feed_entry_mirrors_flight() {
        let entry = FlightBuilder::new("TU712").delay(90.0).build_feed();
        let flight = entry.into_new_flight().unwrap();
        assert_eq!(flight.flight_number, "TU712");
        assert_eq!(flight.departure.delay, Some(90.0));
    }

    #[test]
    fn test_assessed_claim_status_follows_amount() {
        let approved = ClaimBuilder::new("TU712")
            .assessed(Money::new(dec!(200), Currency::TND))
            .build();
        assert_eq!(approved.status, ClaimStatus::Approved);

        let denied = ClaimBuilder::new("TU712").assessed(Money::zero(Currency::TND)).build();
        assert_eq!(denied.status, ClaimStatus::Denied);
    }
}
