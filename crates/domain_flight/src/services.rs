//! Flight application service

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::FlightError;
use crate::feed::FlightFeed;
use crate::flight::{Flight, FlightPatch, NewFlight};
use crate::ports::FlightPort;

/// Outcome of a feed refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Flights newly stored
    pub inserted: usize,
    /// Entries ignored: no flight number, already stored, or invalid
    pub skipped: usize,
}

/// Coordinates flight storage and the external feed
#[derive(Clone)]
pub struct FlightService {
    flights: Arc<dyn FlightPort>,
    feed: Option<Arc<dyn FlightFeed>>,
    departure_iata: String,
}

impl FlightService {
    /// Creates a service without an external feed
    pub fn new(flights: Arc<dyn FlightPort>) -> Self {
        Self {
            flights,
            feed: None,
            departure_iata: "TUN".to_string(),
        }
    }

    /// Attaches a feed polled for departures from `departure_iata`
    pub fn with_feed(mut self, feed: Arc<dyn FlightFeed>, departure_iata: impl Into<String>) -> Self {
        self.feed = Some(feed);
        self.departure_iata = departure_iata.into();
        self
    }

    /// Returns the underlying storage port
    pub fn port(&self) -> Arc<dyn FlightPort> {
        Arc::clone(&self.flights)
    }

    /// Pulls departures from the feed and stores the ones not seen before
    ///
    /// Existing flights are never overwritten by feed data.
    #[instrument(skip(self), fields(iata = %self.departure_iata))]
    pub async fn refresh_from_feed(&self) -> Result<RefreshReport, FlightError> {
        let Some(feed) = &self.feed else {
            return Ok(RefreshReport::default());
        };

        let entries = feed
            .fetch_departures(&self.departure_iata)
            .await
            .map_err(|e| {
                warn!(error = %e, "Flight feed request failed");
                FlightError::FeedUnavailable(e.to_string())
            })?;

        let mut report = RefreshReport::default();
        for entry in entries {
            let Some(flight) = entry.into_new_flight() else {
                report.skipped += 1;
                continue;
            };
            if let Err(e) = flight.validate() {
                warn!(flight_number = %flight.flight_number, error = %e, "Skipping invalid feed entry");
                report.skipped += 1;
                continue;
            }
            if self.flights.exists(&flight.flight_number).await? {
                report.skipped += 1;
                continue;
            }
            match self.flights.create_flight(flight).await {
                Ok(_) => report.inserted += 1,
                // Stored concurrently by another refresh
                Err(core_kernel::PortError::Conflict { .. }) => report.skipped += 1,
                Err(e) => return Err(e.into()),
            }
        }

        info!(inserted = report.inserted, skipped = report.skipped, "Flight feed refreshed");
        Ok(report)
    }

    /// Refreshes from the feed when one is configured, then lists every flight
    pub async fn list_flights(&self) -> Result<Vec<Flight>, FlightError> {
        self.refresh_from_feed().await?;
        Ok(self.flights.list_flights().await?)
    }

    /// Lists stored flights without contacting the feed
    pub async fn stored_flights(&self) -> Result<Vec<Flight>, FlightError> {
        Ok(self.flights.list_flights().await?)
    }

    pub async fn get_flight(&self, flight_number: &str) -> Result<Flight, FlightError> {
        Ok(self.flights.get_flight(flight_number).await?)
    }

    #[instrument(skip(self, flight), fields(flight_number = %flight.flight_number))]
    pub async fn create_flight(&self, flight: NewFlight) -> Result<Flight, FlightError> {
        flight.validate()?;
        let created = self.flights.create_flight(flight).await?;
        info!(flight_id = %created.id, "Flight created");
        Ok(created)
    }

    /// Applies a partial update to the flight with this number
    #[instrument(skip(self, patch))]
    pub async fn update_flight(&self, flight_number: &str, patch: FlightPatch) -> Result<Flight, FlightError> {
        let mut flight = self.flights.get_flight(flight_number).await?;
        flight.apply(patch)?;
        self.flights.save_flight(&flight).await?;
        info!(flight_id = %flight.id, "Flight updated");
        Ok(flight)
    }

    #[instrument(skip(self))]
    pub async fn delete_flight(&self, flight_number: &str) -> Result<(), FlightError> {
        self.flights.delete_flight(flight_number).await?;
        info!("Flight deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::mock::MockFlightFeed;
    use crate::feed::FeedFlight;
    use crate::ports::mock::MockFlightPort;

    fn feed_entry(number: Option<&str>, delay: Option<f64>) -> FeedFlight {
        let mut entry = FeedFlight {
            flight_number: number.map(str::to_string),
            flight_status: Some("scheduled".to_string()),
            ..Default::default()
        };
        entry.departure.delay = delay;
        entry
    }

    #[tokio::test]
    async fn test_refresh_inserts_unseen_and_skips_rest() {
        let port = Arc::new(MockFlightPort::with_flights(vec![NewFlight::new("TU712")]).await);
        let feed = MockFlightFeed::with_departures(vec![
            feed_entry(Some("TU712"), Some(200.0)),
            feed_entry(Some("BJ100"), None),
            feed_entry(None, Some(10.0)),
            feed_entry(Some("TU999"), Some(-5.0)),
        ]);
        let service = FlightService::new(port.clone()).with_feed(Arc::new(feed), "TUN");

        let report = service.refresh_from_feed().await.unwrap();
        assert_eq!(report, RefreshReport { inserted: 1, skipped: 3 });

        // Existing record untouched by feed data
        let existing = port.get_flight("TU712").await.unwrap();
        assert_eq!(existing.departure.delay, None);

        let added = port.get_flight("BJ100").await.unwrap();
        assert_eq!(added.departure.delay, Some(0.0));
    }

    #[tokio::test]
    async fn test_list_fails_when_feed_down() {
        let port = Arc::new(MockFlightPort::new());
        let service = FlightService::new(port).with_feed(Arc::new(MockFlightFeed::unavailable()), "TUN");

        let err = service.list_flights().await.unwrap_err();
        assert!(matches!(err, FlightError::FeedUnavailable(_)));
    }

    #[tokio::test]
    async fn test_list_without_feed_reads_store() {
        let port = Arc::new(MockFlightPort::with_flights(vec![NewFlight::new("TU712")]).await);
        let service = FlightService::new(port);

        assert_eq!(service.list_flights().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_and_invalid() {
        let service = FlightService::new(Arc::new(MockFlightPort::new()));
        service.create_flight(NewFlight::new("TU712")).await.unwrap();

        let dup = service.create_flight(NewFlight::new("TU712")).await.unwrap_err();
        assert!(matches!(dup, FlightError::DuplicateFlight(_)));

        let mut negative = NewFlight::new("BJ100");
        negative.departure.delay = Some(-1.0);
        let err = service.create_flight(negative).await.unwrap_err();
        assert!(matches!(err, FlightError::InvalidDelay(_)));
    }

    #[tokio::test]
    async fn test_update_changes_only_present_fields() {
        let mut flight = NewFlight::new("TU712");
        flight.airline_name = Some("Tunisair".to_string());
        let service = FlightService::new(Arc::new(MockFlightPort::with_flights(vec![flight]).await));

        let mut patch = FlightPatch::default();
        patch.departure.delay = Some(150.0);
        let updated = service.update_flight("TU712", patch).await.unwrap();

        assert_eq!(updated.departure.delay, Some(150.0));
        assert_eq!(updated.airline_name.as_deref(), Some("Tunisair"));
    }

    #[tokio::test]
    async fn test_missing_flight_maps_to_not_found() {
        let service = FlightService::new(Arc::new(MockFlightPort::new()));

        assert!(matches!(
            service.get_flight("XX1").await.unwrap_err(),
            FlightError::FlightNotFound(_)
        ));
        assert!(matches!(
            service.delete_flight("XX1").await.unwrap_err(),
            FlightError::FlightNotFound(_)
        ));
        assert!(matches!(
            service.update_flight("XX1", FlightPatch::default()).await.unwrap_err(),
            FlightError::FlightNotFound(_)
        ));
    }
}
