//! Delay compensation rules
//!
//! The schedule is an ordered list of half-open delay bands. Each band has an
//! inclusive lower bound, an optional exclusive upper bound, and a fixed
//! payout. The standard schedule is:
//!
//! | Tier | Delay (minutes) | Payout  |
//! |------|-----------------|---------|
//! | none | [0, 120)        | 0 TND   |
//! | low  | [120, 180)      | 100 TND |
//! | mid  | [180, 240)      | 200 TND |
//! | high | [240, ∞)        | 300 TND |
//!
//! Both the published rule listing and the calculation read the same
//! schedule value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use core_kernel::{Currency, Money};
use domain_flight::DelayMinutes;

use crate::error::ClaimError;

/// Compensation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationTier {
    None,
    Low,
    Mid,
    High,
}

impl CompensationTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationTier::None => "none",
            CompensationTier::Low => "low",
            CompensationTier::Mid => "mid",
            CompensationTier::High => "high",
        }
    }
}

impl fmt::Display for CompensationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One band of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationRule {
    pub tier: CompensationTier,
    /// Inclusive lower bound in minutes
    pub min_delay: u32,
    /// Exclusive upper bound in minutes; `None` for the open-ended top band
    pub max_delay: Option<u32>,
    pub amount: Money,
}

impl CompensationRule {
    pub fn new(tier: CompensationTier, min_delay: u32, max_delay: Option<u32>, amount: Money) -> Self {
        Self { tier, min_delay, max_delay, amount }
    }

    /// Returns true if the delay falls inside this band
    pub fn contains(&self, delay: DelayMinutes) -> bool {
        let minutes = delay.minutes();
        minutes >= f64::from(self.min_delay)
            && self.max_delay.map_or(true, |max| minutes < f64::from(max))
    }
}

/// Ordered, gap-free set of compensation bands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompensationSchedule {
    rules: Vec<CompensationRule>,
}

impl CompensationSchedule {
    /// The schedule applied to every claim
    pub fn standard() -> Self {
        let tnd = |units| Money::from_major(units, Currency::TND);
        Self {
            rules: vec![
                CompensationRule::new(CompensationTier::None, 0, Some(120), tnd(0)),
                CompensationRule::new(CompensationTier::Low, 120, Some(180), tnd(100)),
                CompensationRule::new(CompensationTier::Mid, 180, Some(240), tnd(200)),
                CompensationRule::new(CompensationTier::High, 240, None, tnd(300)),
            ],
        }
    }

    /// Builds a schedule from custom bands
    ///
    /// Bands must start at zero, be contiguous and increasing, share one
    /// currency, and only the last band may be open-ended.
    pub fn new(rules: Vec<CompensationRule>) -> Result<Self, ClaimError> {
        let first = rules
            .first()
            .ok_or_else(|| ClaimError::InvalidSchedule("schedule has no rules".to_string()))?;
        if first.min_delay != 0 {
            return Err(ClaimError::InvalidSchedule(format!(
                "first rule starts at {} minutes instead of 0",
                first.min_delay
            )));
        }
        let currency = first.amount.currency();

        for (i, rule) in rules.iter().enumerate() {
            if rule.amount.currency() != currency {
                return Err(ClaimError::InvalidSchedule(format!(
                    "rule {} pays in {} but the schedule pays in {}",
                    rule.tier,
                    rule.amount.currency(),
                    currency
                )));
            }
            let is_last = i + 1 == rules.len();
            match (rule.max_delay, rules.get(i + 1)) {
                (Some(max), _) if max <= rule.min_delay => {
                    return Err(ClaimError::InvalidSchedule(format!(
                        "rule {} has an empty delay range",
                        rule.tier
                    )));
                }
                (Some(max), Some(next)) if next.min_delay != max => {
                    return Err(ClaimError::InvalidSchedule(format!(
                        "gap or overlap between {} and {}",
                        rule.tier, next.tier
                    )));
                }
                (None, _) if !is_last => {
                    return Err(ClaimError::InvalidSchedule(format!(
                        "only the last rule may be open-ended, found {}",
                        rule.tier
                    )));
                }
                (Some(_), None) => {
                    return Err(ClaimError::InvalidSchedule(
                        "last rule must be open-ended".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(Self { rules })
    }

    /// Bands in ascending delay order
    pub fn rules(&self) -> &[CompensationRule] {
        &self.rules
    }

    pub fn currency(&self) -> Currency {
        self.rules[0].amount.currency()
    }

    /// Returns the band a delay falls into
    pub fn rule_for(&self, delay: DelayMinutes) -> &CompensationRule {
        // Bands cover [0, ∞) without gaps, so the fallback is never taken
        self.rules
            .iter()
            .find(|rule| rule.contains(delay))
            .unwrap_or(&self.rules[0])
    }

    /// Returns the payout for a delay
    pub fn compensation_for(&self, delay: DelayMinutes) -> Money {
        self.rule_for(delay).amount
    }
}

impl Default for CompensationSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// Payout for a delay under the standard schedule
pub fn compute_compensation(delay: DelayMinutes) -> Money {
    static STANDARD: OnceLock<CompensationSchedule> = OnceLock::new();
    STANDARD
        .get_or_init(CompensationSchedule::standard)
        .compensation_for(delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn delay(minutes: f64) -> DelayMinutes {
        DelayMinutes::new(minutes).unwrap()
    }

    #[test]
    fn test_boundaries() {
        let cases = [
            (0.0, dec!(0)),
            (119.9, dec!(0)),
            (120.0, dec!(100)),
            (179.99, dec!(100)),
            (180.0, dec!(200)),
            (239.99, dec!(200)),
            (240.0, dec!(300)),
            (10_000.0, dec!(300)),
        ];
        for (minutes, expected) in cases {
            assert_eq!(compute_compensation(delay(minutes)).amount(), expected, "delay {}", minutes);
        }
    }

    #[test]
    fn test_standard_schedule_is_valid() {
        let standard = CompensationSchedule::standard();
        let rebuilt = CompensationSchedule::new(standard.rules().to_vec()).unwrap();
        assert_eq!(rebuilt, standard);
        assert_eq!(standard.currency(), Currency::TND);
    }

    #[test]
    fn test_rejects_gap() {
        let tnd = |u| Money::from_major(u, Currency::TND);
        let rules = vec![
            CompensationRule::new(CompensationTier::None, 0, Some(120), tnd(0)),
            CompensationRule::new(CompensationTier::Low, 130, None, tnd(100)),
        ];
        assert!(matches!(
            CompensationSchedule::new(rules),
            Err(ClaimError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_rejects_bounded_last_rule_and_empty() {
        let tnd = |u| Money::from_major(u, Currency::TND);
        let bounded = vec![CompensationRule::new(CompensationTier::None, 0, Some(120), tnd(0))];
        assert!(CompensationSchedule::new(bounded).is_err());
        assert!(CompensationSchedule::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_mixed_currency() {
        let rules = vec![
            CompensationRule::new(CompensationTier::None, 0, Some(120), Money::zero(Currency::TND)),
            CompensationRule::new(CompensationTier::High, 120, None, Money::from_major(250, Currency::EUR)),
        ];
        assert!(CompensationSchedule::new(rules).is_err());
    }
}
