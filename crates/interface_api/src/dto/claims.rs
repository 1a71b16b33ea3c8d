//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimLookup, ClaimRecord, CompensationAssessment, CompensationRule, ClaimError};

/// Flight number shown for claims whose flight was deleted
pub const UNKNOWN_FLIGHT: &str = "Unknown";

/// Body of `POST /api/claims`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitClaimRequest {
    #[validate(length(min = 1, max = 100))]
    pub passenger_name: String,
    #[validate(length(min = 1, max = 20))]
    pub flight_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClaimSubmittedResponse {
    pub message: String,
    pub claim_id: i64,
    pub status: String,
}

/// Query of `GET /api/claims/status`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClaimStatusQuery {
    pub claim_id: Option<i64>,
    pub passenger_name: Option<String>,
    pub flight_number: Option<String>,
}

impl ClaimStatusQuery {
    pub fn lookup(&self) -> Result<ClaimLookup, ClaimError> {
        ClaimLookup::from_parts(
            self.claim_id.map(ClaimId::new),
            self.passenger_name.as_deref(),
            self.flight_number.as_deref(),
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClaimResponse {
    pub claim_id: i64,
    pub passenger_name: String,
    pub flight_number: String,
    pub claim_amount: Decimal,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            claim_id: claim.id.value(),
            passenger_name: claim.passenger_name,
            flight_number: claim.flight_number,
            claim_amount: claim.amount.amount(),
            currency: claim.amount.currency().code().to_string(),
            status: claim.status.as_str().to_string(),
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

impl From<ClaimRecord> for ClaimResponse {
    fn from(record: ClaimRecord) -> Self {
        let mut response = ClaimResponse::from(record.claim);
        if !record.flight_on_file {
            response.flight_number = UNKNOWN_FLIGHT.to_string();
        }
        response
    }
}

/// Result of `GET|POST /admin/claims/compensation/{claim_id}`
#[derive(Debug, Serialize, ToSchema)]
pub struct CompensationResponse {
    pub claim_id: i64,
    pub flight_number: String,
    /// Departure delay in minutes
    pub delay: f64,
    pub tier: String,
    /// Human-readable payout, e.g. `100 TND`
    pub eligible_compensation: String,
    pub amount: Decimal,
    pub status: String,
}

impl From<CompensationAssessment> for CompensationResponse {
    fn from(a: CompensationAssessment) -> Self {
        Self {
            claim_id: a.claim_id.value(),
            flight_number: a.flight_number,
            delay: a.delay.minutes(),
            tier: a.tier.as_str().to_string(),
            eligible_compensation: a.amount.to_string(),
            amount: a.amount.amount(),
            status: a.status.as_str().to_string(),
        }
    }
}

/// One row of the published compensation table
#[derive(Debug, Serialize, ToSchema)]
pub struct CompensationRuleResponse {
    pub tier: String,
    pub min_delay: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delay: Option<u32>,
    pub compensation: String,
    pub amount: Decimal,
}

impl From<&CompensationRule> for CompensationRuleResponse {
    fn from(rule: &CompensationRule) -> Self {
        Self {
            tier: rule.tier.as_str().to_string(),
            min_delay: rule.min_delay,
            max_delay: rule.max_delay,
            compensation: rule.amount.to_string(),
            amount: rule.amount.amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use domain_claims::{CompensationSchedule, NewClaim};

    #[test]
    fn test_record_for_deleted_flight_shows_unknown() {
        let claim = NewClaim::new("Amira", "BJ100")
            .unwrap()
            .into_claim(ClaimId::new(4), Currency::TND, Utc::now());
        let response = ClaimResponse::from(ClaimRecord { claim, flight_on_file: false });
        assert_eq!(response.flight_number, "Unknown");
        assert_eq!(response.status, "Pending");
    }

    #[test]
    fn test_rule_rows_follow_schedule() {
        let schedule = CompensationSchedule::standard();
        let rows: Vec<CompensationRuleResponse> = schedule.rules().iter().map(Into::into).collect();
        assert_eq!(rows[1].compensation, "100 TND");
        assert_eq!(rows[1].min_delay, 120);
        assert_eq!(rows[1].max_delay, Some(180));
        assert_eq!(rows[3].max_delay, None);
    }

    #[test]
    fn test_status_query_needs_a_key() {
        let query = ClaimStatusQuery {
            passenger_name: Some("Amira".into()),
            ..Default::default()
        };
        assert!(matches!(query.lookup(), Err(ClaimError::MissingLookupKey)));
    }
}
