//! Aviationstack Adapter
//!
//! Pulls live departures from the Aviationstack REST API
//! (`GET /v1/flights?access_key=..&dep_iata=..`) and translates them into
//! [`FeedFlight`] values.
//!
//! # Error Handling
//!
//! Provider failures are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Body without a `data` array -> `PortError::Transformation`
//! - Other -> `PortError::Internal`

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use core_kernel::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};

use crate::feed::{FeedFlight, FlightFeed};
use crate::flight::{parse_timestamp, ArrivalLeg, DepartureLeg};

const ADAPTER_ID: &str = "aviationstack-feed";
const DEFAULT_BASE_URL: &str = "https://api.aviationstack.com";

/// Configuration for the Aviationstack adapter
#[derive(Debug, Clone)]
pub struct AviationstackConfig {
    /// Base URL without the `/v1` path, e.g. `https://api.aviationstack.com`
    pub base_url: String,
    /// Access key sent as the `access_key` query parameter
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AviationstackConfig {
    /// Configuration for the public endpoint with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }

    /// Overrides the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Flight feed backed by the Aviationstack API
#[derive(Debug, Clone)]
pub struct AviationstackFeed {
    client: Client,
    config: AviationstackConfig,
}

impl AviationstackFeed {
    /// Builds the HTTP client for the given configuration
    pub fn new(config: AviationstackConfig) -> Result<Self, PortError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn flights_url(&self) -> String {
        format!("{}/v1/flights", self.config.base_url.trim_end_matches('/'))
    }

    async fn decode_response(&self, resp: Response) -> Result<FlightsEnvelope, PortError> {
        let status = resp.status();
        if status.is_success() {
            return resp.json::<FlightsEnvelope>().await.map_err(|e| PortError::Transformation {
                message: format!("unreadable flight data: {}", e),
            });
        }

        let body = resp.text().await.unwrap_or_default();
        debug!(%status, body = %body, "Aviationstack request failed");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PortError::Unauthorized {
                message: "flight data provider rejected the access key".to_string(),
            }),
            StatusCode::TOO_MANY_REQUESTS => Err(PortError::RateLimited {
                retry_after_secs: 60,
            }),
            _ if status.is_server_error() => Err(PortError::ServiceUnavailable {
                service: format!("aviationstack ({})", status),
            }),
            _ => Err(PortError::internal(format!(
                "flight data provider returned {}",
                status
            ))),
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> PortError {
        if err.is_timeout() {
            PortError::Timeout {
                operation: "fetch_departures".to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            }
        } else {
            PortError::Connection {
                message: "failed to reach flight data provider".to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

impl DomainPort for AviationstackFeed {}

#[async_trait]
impl HealthCheckable for AviationstackFeed {
    /// Reports configuration health only; no request is spent on the
    /// provider's metered quota.
    async fn health_check(&self) -> HealthCheckResult {
        let mut result = HealthCheckResult::healthy(ADAPTER_ID);
        if self.config.api_key.is_empty() {
            result.status = AdapterHealth::Unhealthy;
            result.message = Some("access key is not configured".to_string());
        }
        result
    }
}

#[async_trait]
impl FlightFeed for AviationstackFeed {
    #[instrument(skip(self))]
    async fn fetch_departures(&self, departure_iata: &str) -> Result<Vec<FeedFlight>, PortError> {
        let started = Instant::now();
        let resp = self
            .client
            .get(self.flights_url())
            .query(&[
                ("access_key", self.config.api_key.as_str()),
                ("dep_iata", departure_iata),
            ])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let envelope = self.decode_response(resp).await?;
        let data = envelope.data.ok_or_else(|| PortError::Transformation {
            message: "response does not contain a data array".to_string(),
        })?;

        let flights: Vec<FeedFlight> = data.into_iter().map(FeedFlight::from).collect();
        debug!(
            count = flights.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched departures"
        );
        Ok(flights)
    }
}

#[derive(Debug, Deserialize)]
struct FlightsEnvelope {
    data: Option<Vec<AvsFlight>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AvsFlight {
    flight_date: Option<String>,
    flight_status: Option<String>,
    departure: Option<AvsDeparture>,
    arrival: Option<AvsArrival>,
    airline: Option<AvsName>,
    flight: Option<AvsFlightCode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AvsDeparture {
    airport: Option<String>,
    timezone: Option<String>,
    iata: Option<String>,
    delay: Option<f64>,
    scheduled: Option<String>,
    actual: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AvsArrival {
    airport: Option<String>,
    timezone: Option<String>,
    iata: Option<String>,
    scheduled: Option<String>,
    actual: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AvsName {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AvsFlightCode {
    iata: Option<String>,
}

/// Unparseable provider timestamps are dropped rather than failing the batch
fn lenient_timestamp(value: Option<String>) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = value?;
    match parse_timestamp(&raw) {
        Ok(ts) => ts,
        Err(_) => {
            warn!(value = %raw, "Ignoring unparseable timestamp from flight feed");
            None
        }
    }
}

impl From<AvsFlight> for FeedFlight {
    fn from(raw: AvsFlight) -> Self {
        let dep = raw.departure.unwrap_or_default();
        let arr = raw.arrival.unwrap_or_default();

        FeedFlight {
            flight_number: raw.flight.and_then(|f| f.iata),
            flight_date: lenient_timestamp(raw.flight_date),
            flight_status: raw.flight_status,
            departure: DepartureLeg {
                airport: dep.airport,
                timezone: dep.timezone,
                iata: dep.iata,
                delay: dep.delay,
                scheduled: lenient_timestamp(dep.scheduled),
                actual: lenient_timestamp(dep.actual),
            },
            arrival: ArrivalLeg {
                airport: arr.airport,
                timezone: arr.timezone,
                iata: arr.iata,
                scheduled: lenient_timestamp(arr.scheduled),
                actual: lenient_timestamp(arr.actual),
            },
            airline_name: raw.airline.and_then(|a| a.name),
        }
    }
}
