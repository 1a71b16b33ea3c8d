//! Compensation rule engine properties

use core_kernel::{Currency, Money};
use domain_claims::{
    compute_compensation, ClaimLookup, CompensationRule, CompensationSchedule, CompensationTier,
    ClaimStatus, NewClaim,
};
use domain_flight::DelayMinutes;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use test_utils::{boundary_delay_strategy, delay_in_tier, delay_strategy, new_claim_strategy};

fn delay(minutes: f64) -> DelayMinutes {
    DelayMinutes::new(minutes).unwrap()
}

#[test]
fn test_listing_covers_all_four_tiers_in_order() {
    let schedule = CompensationSchedule::standard();
    let tiers: Vec<_> = schedule.rules().iter().map(|r| r.tier).collect();
    assert_eq!(
        tiers,
        vec![CompensationTier::None, CompensationTier::Low, CompensationTier::Mid, CompensationTier::High]
    );

    let labels: Vec<_> = schedule.rules().iter().map(|r| r.amount.to_string()).collect();
    assert_eq!(labels, vec!["0 TND", "100 TND", "200 TND", "300 TND"]);
    assert_eq!(schedule.rules().last().unwrap().max_delay, None);
}

#[test]
fn test_status_follows_amount() {
    assert_eq!(ClaimStatus::for_amount(&Money::zero(Currency::TND)), ClaimStatus::Denied);
    assert_eq!(
        ClaimStatus::for_amount(&Money::from_major(100, Currency::TND)),
        ClaimStatus::Approved
    );
}

#[test]
fn test_custom_schedule_is_used_for_pricing() {
    let eur = |u| Money::from_major(u, Currency::EUR);
    let schedule = CompensationSchedule::new(vec![
        CompensationRule::new(CompensationTier::None, 0, Some(180), eur(0)),
        CompensationRule::new(CompensationTier::High, 180, None, eur(250)),
    ])
    .unwrap();

    assert!(schedule.compensation_for(delay(179.0)).is_zero());
    assert_eq!(schedule.compensation_for(delay(180.0)), eur(250));
    assert_eq!(schedule.currency(), Currency::EUR);
}

proptest! {
    #[test]
    fn prop_under_two_hours_pays_nothing(minutes in delay_in_tier(CompensationTier::None)) {
        prop_assert!(compute_compensation(delay(minutes)).is_zero());
    }

    #[test]
    fn prop_two_to_three_hours_pays_100(minutes in delay_in_tier(CompensationTier::Low)) {
        prop_assert_eq!(compute_compensation(delay(minutes)).amount(), dec!(100));
    }

    #[test]
    fn prop_three_to_four_hours_pays_200(minutes in delay_in_tier(CompensationTier::Mid)) {
        prop_assert_eq!(compute_compensation(delay(minutes)).amount(), dec!(200));
    }

    #[test]
    fn prop_four_hours_or_more_pays_300(minutes in delay_in_tier(CompensationTier::High)) {
        prop_assert_eq!(compute_compensation(delay(minutes)).amount(), dec!(300));
    }

    #[test]
    fn prop_payout_never_decreases_with_delay(a in delay_strategy(), b in delay_strategy()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_compensation(delay(low)).amount() <= compute_compensation(delay(high)).amount());
    }

    #[test]
    fn prop_exactly_one_rule_matches(minutes in delay_strategy()) {
        let schedule = CompensationSchedule::standard();
        let matching = schedule.rules().iter().filter(|r| r.contains(delay(minutes))).count();
        prop_assert_eq!(matching, 1);
    }

    #[test]
    fn prop_band_edges_belong_to_the_upper_tier(minutes in boundary_delay_strategy()) {
        let schedule = CompensationSchedule::standard();
        let rule = schedule.rule_for(delay(minutes));
        prop_assert!(minutes >= f64::from(rule.min_delay));
        prop_assert!(rule.max_delay.map_or(true, |max| minutes < f64::from(max)));
    }

    #[test]
    fn prop_submitted_claims_can_be_looked_up(claim in new_claim_strategy()) {
        let accepted = NewClaim::new(claim.passenger_name.clone(), claim.flight_number.clone()).unwrap();
        let lookup = ClaimLookup::from_parts(
            None,
            Some(&accepted.passenger_name),
            Some(&accepted.flight_number),
        )
        .unwrap();
        prop_assert!(matches!(lookup, ClaimLookup::ByPassenger { .. }), "expected ClaimLookup::ByPassenger");
    }
}
