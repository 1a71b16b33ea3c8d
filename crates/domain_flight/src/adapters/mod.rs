//! External adapters for the flight domain
//!
//! - **AviationstackFeed**: pulls departures from the Aviationstack REST API
//! - **MockFlightFeed**: canned feed for tests (re-exported from the feed module)
//!
//! ```rust,ignore
//! use domain_flight::adapters::{AviationstackConfig, AviationstackFeed};
//! use domain_flight::FlightFeed;
//! use std::sync::Arc;
//!
//! let feed = AviationstackFeed::new(AviationstackConfig::new("access-key"))?;
//! let feed: Arc<dyn FlightFeed> = Arc::new(feed);
//! ```

pub mod aviationstack;

pub use aviationstack::{AviationstackConfig, AviationstackFeed};
