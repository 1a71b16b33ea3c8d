//! External flight data feed port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{PortError, DomainPort, HealthCheckable};

use crate::flight::{ArrivalLeg, DepartureLeg, FlightStatus, NewFlight};

/// A departure as reported by an external flight data provider
///
/// Fields are optional because providers routinely omit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedFlight {
    pub flight_number: Option<String>,
    pub flight_date: Option<DateTime<Utc>>,
    pub flight_status: Option<String>,
    pub departure: DepartureLeg,
    pub arrival: ArrivalLeg,
    pub airline_name: Option<String>,
}

impl FeedFlight {
    /// Converts the feed entry into a storable flight
    ///
    /// Returns `None` when the entry has no usable flight number. A missing
    /// departure delay is recorded as zero.
    pub fn into_new_flight(self) -> Option<NewFlight> {
        let number = self.flight_number?.trim().to_string();
        if number.is_empty() {
            return None;
        }

        let mut departure = self.departure;
        departure.delay = Some(departure.delay.unwrap_or(0.0));

        Some(NewFlight {
            flight_number: number,
            flight_date: self.flight_date,
            flight_status: self.flight_status.as_deref().map(FlightStatus::parse),
            departure,
            arrival: self.arrival,
            airline_name: self.airline_name,
        })
    }
}

/// Port for pulling departures from an external provider
#[async_trait]
pub trait FlightFeed: DomainPort + HealthCheckable {
    /// Fetches the current departures from the given airport
    async fn fetch_departures(&self, departure_iata: &str) -> Result<Vec<FeedFlight>, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// Canned feed that returns a fixed set of departures or a fixed failure
    #[derive(Debug, Default, Clone)]
    pub struct MockFlightFeed {
        departures: Arc<RwLock<Vec<FeedFlight>>>,
        unavailable: bool,
    }

    impl MockFlightFeed {
        /// Feed that returns the given departures on every call
        pub fn with_departures(departures: Vec<FeedFlight>) -> Self {
            Self {
                departures: Arc::new(RwLock::new(departures)),
                unavailable: false,
            }
        }

        /// Feed whose every call fails as if the provider were down
        pub fn unavailable() -> Self {
            Self {
                departures: Arc::default(),
                unavailable: true,
            }
        }

        /// Replaces the departures returned by later calls
        pub async fn set_departures(&self, departures: Vec<FeedFlight>) {
            *self.departures.write().await = departures;
        }
    }

    impl DomainPort for MockFlightFeed {}

    #[async_trait]
    impl HealthCheckable for MockFlightFeed {
        async fn health_check(&self) -> HealthCheckResult {
            let mut result = HealthCheckResult::healthy("mock-flight-feed");
            if self.unavailable {
                result.status = AdapterHealth::Unhealthy;
            }
            result
        }
    }

    #[async_trait]
    impl FlightFeed for MockFlightFeed {
        async fn fetch_departures(&self, departure_iata: &str) -> Result<Vec<FeedFlight>, PortError> {
            if self.unavailable {
                return Err(PortError::ServiceUnavailable {
                    service: format!("mock feed for {}", departure_iata),
                });
            }
            Ok(self.departures.read().await.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_without_number_is_dropped() {
        let entry = FeedFlight::default();
        assert!(entry.into_new_flight().is_none());

        let blank = FeedFlight {
            flight_number: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.into_new_flight().is_none());
    }

    #[test]
    fn test_missing_delay_recorded_as_zero() {
        let entry = FeedFlight {
            flight_number: Some("TU712".to_string()),
            flight_status: Some("active".to_string()),
            ..Default::default()
        };

        let flight = entry.into_new_flight().unwrap();
        assert_eq!(flight.departure.delay, Some(0.0));
        assert_eq!(flight.flight_status, Some(FlightStatus::Active));
    }
}
