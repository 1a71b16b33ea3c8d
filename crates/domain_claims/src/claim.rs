//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, Currency, Money};
use domain_flight::{DelayMinutes, Flight};

use crate::compensation::{CompensationSchedule, CompensationTier};
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted, not yet assessed
    Pending,
    /// Assessed with a positive payout
    Approved,
    /// Assessed with no payout
    Denied,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Denied => "Denied",
        }
    }

    /// Status implied by an assessed payout
    pub fn for_amount(amount: &Money) -> Self {
        if amount.is_positive() {
            ClaimStatus::Approved
        } else {
            ClaimStatus::Denied
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ClaimStatus::Pending),
            "Approved" => Ok(ClaimStatus::Approved),
            "Denied" => Ok(ClaimStatus::Denied),
            other => Err(ClaimError::InvalidClaim(format!("unknown claim status '{}'", other))),
        }
    }
}

/// A passenger's compensation claim
///
/// The flight is referenced by flight number only; the flight may be deleted
/// after the claim was filed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub passenger_name: String,
    pub flight_number: String,
    /// Assessed payout; zero until assessed
    pub amount: Money,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Returns true if this claim was filed by the passenger for the flight
    ///
    /// Both values are compared trimmed and case-insensitively.
    pub fn matches(&self, passenger_name: &str, flight_number: &str) -> bool {
        self.passenger_name.trim().to_lowercase() == passenger_name.trim().to_lowercase()
            && self.flight_number.trim().to_lowercase() == flight_number.trim().to_lowercase()
    }

    /// Prices the claim against the flight's departure delay
    ///
    /// On success the claim's amount and status are overwritten. On failure
    /// the claim is left untouched.
    pub fn assess(
        &mut self,
        flight: &Flight,
        schedule: &CompensationSchedule,
    ) -> Result<CompensationAssessment, ClaimError> {
        let delay = flight
            .departure_delay()
            .map_err(|e| ClaimError::Unassessable(e.to_string()))?;
        let rule = schedule.rule_for(delay);

        self.amount = rule.amount;
        self.status = ClaimStatus::for_amount(&rule.amount);
        self.updated_at = Utc::now();

        Ok(CompensationAssessment {
            claim_id: self.id,
            flight_number: self.flight_number.clone(),
            delay,
            tier: rule.tier,
            amount: rule.amount,
            status: self.status,
        })
    }
}

/// Data for a claim that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClaim {
    pub passenger_name: String,
    pub flight_number: String,
}

impl NewClaim {
    /// Trims and validates the submitted values
    pub fn new(passenger_name: impl Into<String>, flight_number: impl Into<String>) -> Result<Self, ClaimError> {
        let passenger_name = passenger_name.into().trim().to_string();
        let flight_number = flight_number.into().trim().to_string();

        if passenger_name.is_empty() {
            return Err(ClaimError::InvalidClaim("passenger_name must not be empty".to_string()));
        }
        if flight_number.is_empty() {
            return Err(ClaimError::InvalidClaim("flight_number must not be empty".to_string()));
        }
        Ok(Self { passenger_name, flight_number })
    }

    /// Materialises a pending claim with a zero payout
    pub fn into_claim(self, id: ClaimId, currency: Currency, now: DateTime<Utc>) -> Claim {
        Claim {
            id,
            passenger_name: self.passenger_name,
            flight_number: self.flight_number,
            amount: Money::zero(currency),
            status: ClaimStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Result of pricing a claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompensationAssessment {
    pub claim_id: ClaimId,
    pub flight_number: String,
    pub delay: DelayMinutes,
    pub tier: CompensationTier,
    pub amount: Money,
    pub status: ClaimStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::FlightId;
    use domain_flight::NewFlight;
    use rust_decimal_macros::dec;

    fn pending_claim() -> Claim {
        NewClaim::new("Amira Ben Salah", "TU712")
            .unwrap()
            .into_claim(ClaimId::new(1), Currency::TND, Utc::now())
    }

    fn flight_with_delay(delay: Option<f64>) -> Flight {
        let mut flight = NewFlight::new("TU712");
        flight.departure.delay = delay;
        flight.into_flight(FlightId::new(1))
    }

    #[test]
    fn test_new_claim_is_pending_with_zero_amount() {
        let claim = pending_claim();
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert!(claim.amount.is_zero());
    }

    #[test]
    fn test_assess_approves_positive_payout() {
        let mut claim = pending_claim();
        let result = claim
            .assess(&flight_with_delay(Some(150.0)), &CompensationSchedule::standard())
            .unwrap();

        assert_eq!(result.amount.amount(), dec!(100));
        assert_eq!(result.tier, CompensationTier::Low);
        assert_eq!(claim.status, ClaimStatus::Approved);
    }

    #[test]
    fn test_assess_denies_short_delay() {
        let mut claim = pending_claim();
        claim
            .assess(&flight_with_delay(Some(30.0)), &CompensationSchedule::standard())
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Denied);
        assert!(claim.amount.is_zero());
    }

    #[test]
    fn test_assess_with_missing_delay_denies() {
        let mut claim = pending_claim();
        let result = claim
            .assess(&flight_with_delay(None), &CompensationSchedule::standard())
            .unwrap();
        assert_eq!(result.delay, DelayMinutes::zero());
        assert_eq!(claim.status, ClaimStatus::Denied);
    }

    #[test]
    fn test_assess_negative_delay_leaves_claim_untouched() {
        let mut claim = pending_claim();
        let before = claim.clone();

        let err = claim
            .assess(&flight_with_delay(Some(-5.0)), &CompensationSchedule::standard())
            .unwrap_err();
        assert!(matches!(err, ClaimError::Unassessable(_)));
        assert_eq!(claim, before);
    }

    #[test]
    fn test_matches_ignores_case_and_whitespace() {
        let claim = pending_claim();
        assert!(claim.matches("  amira ben salah ", "tu712"));
        assert!(!claim.matches("Amira", "TU712"));
    }

    #[test]
    fn test_new_claim_rejects_blank_fields() {
        assert!(NewClaim::new("  ", "TU712").is_err());
        assert!(NewClaim::new("Amira", "").is_err());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [ClaimStatus::Pending, ClaimStatus::Approved, ClaimStatus::Denied] {
            assert_eq!(status.as_str().parse::<ClaimStatus>().unwrap(), status);
        }
        assert!("pending".parse::<ClaimStatus>().is_err());
    }
}
