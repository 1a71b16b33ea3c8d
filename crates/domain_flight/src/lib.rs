//! Flight Domain
//!
//! This crate holds flight records and the departure delay that drives
//! passenger compensation, plus the ports used to store flights and to pull
//! departures from an external flight data provider.
//!
//! # Data Flow
//!
//! ```text
//! FlightFeed (Aviationstack) -> FlightService::refresh_from_feed -> FlightPort (PostgreSQL)
//! ```

pub mod flight;
pub mod error;
pub mod feed;
pub mod ports;
pub mod services;
pub mod adapters;

pub use flight::{
    Flight, NewFlight, FlightPatch, FlightStatus,
    DepartureLeg, ArrivalLeg, DelayMinutes, parse_timestamp,
};
pub use error::FlightError;
pub use feed::{FlightFeed, FeedFlight};
pub use ports::FlightPort;
pub use services::{FlightService, RefreshReport};
pub use adapters::{AviationstackFeed, AviationstackConfig};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockFlightPort;
#[cfg(any(test, feature = "mock"))]
pub use feed::mock::MockFlightFeed;
