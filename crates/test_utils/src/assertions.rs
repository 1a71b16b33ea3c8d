//! Custom Test Assertions
//!
//! Assertion helpers for claims and compensation amounts that print the
//! whole claim on failure.

use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_claims::{Claim, ClaimStatus, CompensationSchedule};

/// Asserts that a Money value is the given whole amount of dinars
pub fn assert_tnd(money: &Money, expected: i64) {
    assert_eq!(money.currency(), Currency::TND, "Expected TND, got {}", money);
    assert_eq!(
        money.amount(),
        Decimal::from(expected),
        "Expected {} TND, got {}",
        expected,
        money
    );
}

/// Asserts that a claim was assessed to `amount` TND with the matching status
pub fn assert_assessed(claim: &Claim, amount: i64) {
    assert_tnd(&claim.amount, amount);
    let expected = if amount > 0 { ClaimStatus::Approved } else { ClaimStatus::Denied };
    assert_eq!(claim.status, expected, "Unexpected status for {:?}", claim);
}

/// Asserts that a claim is still pending with nothing paid
pub fn assert_pending(claim: &Claim) {
    assert_eq!(claim.status, ClaimStatus::Pending, "Claim was modified: {:?}", claim);
    assert!(claim.amount.is_zero(), "Pending claim carries an amount: {:?}", claim);
}

/// Asserts the claim invariants
///
/// The amount is one of the schedule's payouts, and status is Approved
/// exactly when the amount is positive (Pending claims carry zero).
pub fn assert_claim_consistent(claim: &Claim, schedule: &CompensationSchedule) {
    let known = schedule.rules().iter().any(|r| r.amount == claim.amount);
    assert!(known, "Amount {} is not a scheduled payout: {:?}", claim.amount, claim);

    match claim.status {
        ClaimStatus::Approved => assert!(claim.amount.is_positive(), "Approved without payout: {:?}", claim),
        ClaimStatus::Denied | ClaimStatus::Pending => {
            assert!(claim.amount.is_zero(), "{} claim with payout: {:?}", claim.status, claim)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ClaimBuilder;
    use crate::fixtures::MoneyFixtures;

    #[test]
    fn test_consistent_claims_pass() {
        let schedule = CompensationSchedule::standard();
        let approved = ClaimBuilder::new("TU712").assessed(MoneyFixtures::tnd_300()).build();
        assert_claim_consistent(&approved, &schedule);
        assert_assessed(&approved, 300);

        let pending = ClaimBuilder::new("TU712").build();
        assert_claim_consistent(&pending, &schedule);
        assert_pending(&pending);
    }

    #[test]
    #[should_panic(expected = "not a scheduled payout")]
    fn test_unscheduled_amount_fails() {
        let claim = ClaimBuilder::new("TU712")
            .assessed(Money::new(Decimal::from(150), Currency::TND))
            .build();
        assert_claim_consistent(&claim, &CompensationSchedule::standard());
    }
}
