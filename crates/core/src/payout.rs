//! Payout calculation for a single coverage rule.
//!
//! Turns a matched [`CoverageRule`] and a claimed amount into the amount payable by the insurer
//! and the patient's residual responsibility. Denials are ordinary results; only inputs that
//! should never have passed validation produce an [`EngineError`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::policy::{percent_in_range, CoverageRule};
use crate::restriction::Subject;
use crate::{EngineError, EngineResult};

/// Why a coverage rule refused to pay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialReason {
    NotCovered,
    EmergencyNotEligible,
    ReferralRequired,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DenialReason::NotCovered => "service is not covered",
            DenialReason::EmergencyNotEligible => "rule does not cover emergencies",
            DenialReason::ReferralRequired => "rule requires a referral",
        };
        f.write_str(text)
    }
}

/// Financial outcome of applying a coverage rule to a claimed amount.
///
/// `payable + patient_responsibility == claimed amount` always holds. A denied claim pays
/// nothing and leaves the full amount with the patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PayoutResult {
    pub payable: Decimal,
    pub patient_responsibility: Decimal,
    pub denial_reason: Option<DenialReason>,
}

impl PayoutResult {
    pub(crate) fn denied(claimed_amount: Decimal, reason: DenialReason) -> Self {
        Self {
            payable: Decimal::ZERO,
            patient_responsibility: claimed_amount,
            denial_reason: Some(reason),
        }
    }

    pub fn is_denied(&self) -> bool {
        self.denial_reason.is_some()
    }
}

/// Deductible actually applied to a claim: the larger of the rule's minimum and the policy's
/// deductible, when the caller supplies one.
pub fn effective_deductible(rule: &CoverageRule, policy_deductible: Option<Decimal>) -> Decimal {
    rule.minimum_deductible
        .max(policy_deductible.unwrap_or(Decimal::ZERO))
}

/// Computes payouts, rounding the final payable figure to the configured currency scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoutCalculator {
    minor_units: u32,
}

impl Default for PayoutCalculator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl PayoutCalculator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            minor_units: config.currency_minor_units(),
        }
    }

    /// Applies `rule` to `claimed_amount` for `subject`.
    ///
    /// Denial checks run in order (not covered, emergency, referral) and the first failing one
    /// wins. Otherwise the effective deductible is subtracted, the coverage percentage applied
    /// and the rule's cap enforced when positive. Rounding is round-half-up, applied once to the
    /// final payable figure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the inputs bypassed validation: a coverage percentage
    /// outside 0..=100 or a negative claimed amount, cap or deductible.
    pub fn compute(
        &self,
        rule: &CoverageRule,
        claimed_amount: Decimal,
        subject: &Subject,
        policy_deductible: Option<Decimal>,
    ) -> EngineResult<PayoutResult> {
        check_inputs(rule, claimed_amount, policy_deductible)?;

        if let Some(reason) = denial_reason(rule, subject) {
            tracing::debug!(rule_id = %rule.id, ?reason, "coverage rule denied payout");
            return Ok(PayoutResult::denied(claimed_amount, reason));
        }

        let deductible = effective_deductible(rule, policy_deductible);
        let billable = (claimed_amount - deductible).max(Decimal::ZERO);
        let raw_payable = billable
            .checked_mul(rule.coverage_percent)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(EngineError::Overflow {
                operation: "coverage percentage",
            })?;

        let capped = if rule.max_limit > Decimal::ZERO {
            raw_payable.min(rule.max_limit)
        } else {
            raw_payable
        };

        // Rounding up can overshoot a claim carrying more precision than the currency scale.
        let payable = capped
            .round_dp_with_strategy(self.minor_units, RoundingStrategy::MidpointAwayFromZero)
            .clamp(Decimal::ZERO, claimed_amount);

        Ok(PayoutResult {
            payable,
            patient_responsibility: claimed_amount - payable,
            denial_reason: None,
        })
    }
}

/// [`PayoutCalculator::compute`] with the default currency scale (two minor units).
pub fn compute_payout(
    rule: &CoverageRule,
    claimed_amount: Decimal,
    subject: &Subject,
    policy_deductible: Option<Decimal>,
) -> EngineResult<PayoutResult> {
    PayoutCalculator::default().compute(rule, claimed_amount, subject, policy_deductible)
}

fn denial_reason(rule: &CoverageRule, subject: &Subject) -> Option<DenialReason> {
    if !rule.covered {
        return Some(DenialReason::NotCovered);
    }
    if subject.is_emergency && !rule.emergency_eligible {
        return Some(DenialReason::EmergencyNotEligible);
    }
    if rule.requires_referral && !subject.has_referral {
        return Some(DenialReason::ReferralRequired);
    }
    None
}

fn check_inputs(
    rule: &CoverageRule,
    claimed_amount: Decimal,
    policy_deductible: Option<Decimal>,
) -> EngineResult<()> {
    if !percent_in_range(rule.coverage_percent) {
        return Err(EngineError::CoveragePercentOutOfRange(rule.coverage_percent));
    }

    let amounts = [
        ("claimed_amount", Some(claimed_amount)),
        ("max_limit", Some(rule.max_limit)),
        ("minimum_deductible", Some(rule.minimum_deductible)),
        ("policy_deductible", policy_deductible),
    ];
    for (field, value) in amounts {
        if let Some(value) = value.filter(|v| *v < Decimal::ZERO) {
            return Err(EngineError::NegativeAmount { field, value });
        }
    }

    Ok(())
}
