//! Claim assessment against a whole policy.
//!
//! Selects the coverage rule for a claim, checks the policy is in force, applies the payout
//! calculator with the policy deductible and enforces the policy's overall coverage limit.

use chrono::NaiveDate;
use coverage_types::CoverageRuleId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::payout::{DenialReason, PayoutCalculator};
use crate::policy::{CoverageType, Policy, PolicyStatus};
use crate::restriction::Subject;
use crate::{EngineError, EngineResult};

/// A claimed service to be assessed against a policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRequest {
    pub coverage_type: CoverageType,
    /// Narrows rule selection to a named service when present.
    pub service_name: Option<String>,
    pub claimed_amount: Decimal,
    pub service_date: NaiveDate,
    /// Amount the policy has already paid out on earlier claims.
    pub already_paid: Decimal,
}

/// Why a claim was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimDenial {
    PolicyNotActive(PolicyStatus),
    OutsideValidityWindow,
    NoMatchingRule,
    CoverageLimitExhausted,
    Rule(DenialReason),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClaimAssessment {
    /// Rule the claim was assessed under, if one matched.
    pub coverage_rule_id: Option<CoverageRuleId>,
    pub payable: Decimal,
    pub patient_responsibility: Decimal,
    pub denial: Option<ClaimDenial>,
}

impl ClaimAssessment {
    fn denied(
        coverage_rule_id: Option<CoverageRuleId>,
        claimed_amount: Decimal,
        denial: ClaimDenial,
    ) -> Self {
        tracing::debug!(?denial, "claim denied");
        Self {
            coverage_rule_id,
            payable: Decimal::ZERO,
            patient_responsibility: claimed_amount,
            denial: Some(denial),
        }
    }
}

/// Assesses `request` against `policy` for `subject`.
///
/// # Errors
///
/// Propagates [`EngineError`] faults from the payout calculator, and rejects a negative
/// `claimed_amount` or `already_paid` before any denial is considered.
pub fn assess_claim(
    policy: &Policy,
    request: &ClaimRequest,
    subject: &Subject,
    calculator: &PayoutCalculator,
) -> EngineResult<ClaimAssessment> {
    let amounts = [
        ("claimed_amount", request.claimed_amount),
        ("already_paid", request.already_paid),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(EngineError::NegativeAmount { field, value });
        }
    }

    let claimed = request.claimed_amount;

    if policy.status != PolicyStatus::Active {
        return Ok(ClaimAssessment::denied(
            None,
            claimed,
            ClaimDenial::PolicyNotActive(policy.status),
        ));
    }
    if !policy.covers_date(request.service_date) {
        return Ok(ClaimAssessment::denied(
            None,
            claimed,
            ClaimDenial::OutsideValidityWindow,
        ));
    }

    let Some(rule) = policy.find_rule(request.coverage_type, request.service_name.as_deref())
    else {
        return Ok(ClaimAssessment::denied(
            None,
            claimed,
            ClaimDenial::NoMatchingRule,
        ));
    };

    let payout = calculator.compute(rule, claimed, subject, Some(policy.deductible))?;
    if let Some(reason) = payout.denial_reason {
        return Ok(ClaimAssessment::denied(
            Some(rule.id),
            claimed,
            ClaimDenial::Rule(reason),
        ));
    }

    let mut payable = payout.payable;
    if policy.coverage_limit > Decimal::ZERO {
        let remaining = policy.coverage_limit - request.already_paid;
        if remaining <= Decimal::ZERO {
            return Ok(ClaimAssessment::denied(
                Some(rule.id),
                claimed,
                ClaimDenial::CoverageLimitExhausted,
            ));
        }
        payable = payable.min(remaining);
    }

    Ok(ClaimAssessment {
        coverage_rule_id: Some(rule.id),
        payable,
        patient_responsibility: claimed - payable,
        denial: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CoverageRule;
    use crate::restriction::Gender;
    use coverage_types::PolicyId;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn policy() -> Policy {
        let id = PolicyId::from_uuid(Uuid::from_u128(10));
        Policy {
            id,
            policy_no: "POL-1".into(),
            name: "Basic".into(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            coverage_limit: dec!(2000),
            deductible: dec!(100),
            status: PolicyStatus::Active,
            coverage_rules: vec![
                CoverageRule {
                    id: CoverageRuleId::from_uuid(Uuid::from_u128(11)),
                    policy_id: id,
                    service_name: "Consultation".into(),
                    coverage_type: CoverageType::Outpatient,
                    coverage_percent: dec!(80),
                    max_limit: dec!(0),
                    minimum_deductible: dec!(50),
                    amount: dec!(300),
                    emergency_eligible: true,
                    covered: true,
                    requires_referral: false,
                },
                CoverageRule {
                    id: CoverageRuleId::from_uuid(Uuid::from_u128(12)),
                    policy_id: id,
                    service_name: "Cosmetic".into(),
                    coverage_type: CoverageType::Dental,
                    coverage_percent: dec!(0),
                    max_limit: dec!(0),
                    minimum_deductible: dec!(0),
                    amount: dec!(800),
                    emergency_eligible: false,
                    covered: false,
                    requires_referral: false,
                },
            ],
        }
    }

    fn request(coverage_type: CoverageType, amount: Decimal) -> ClaimRequest {
        ClaimRequest {
            coverage_type,
            service_name: None,
            claimed_amount: amount,
            service_date: date(2024, 6, 1),
            already_paid: Decimal::ZERO,
        }
    }

    fn assess(policy: &Policy, request: &ClaimRequest) -> ClaimAssessment {
        let subject = Subject::new(Gender::Male, 52);
        assess_claim(policy, request, &subject, &PayoutCalculator::default()).expect("assessment")
    }

    #[test]
    fn applies_policy_deductible() {
        let result = assess(&policy(), &request(CoverageType::Outpatient, dec!(600)));

        assert_eq!(result.denial, None);
        assert_eq!(
            result.coverage_rule_id,
            Some(CoverageRuleId::from_uuid(Uuid::from_u128(11)))
        );
        assert_eq!(result.payable, dec!(400));
        assert_eq!(result.patient_responsibility, dec!(200));
    }

    #[test]
    fn inactive_or_out_of_window_policy_denies() {
        let mut policy = policy();
        let mut req = request(CoverageType::Outpatient, dec!(600));

        req.service_date = date(2025, 1, 1);
        assert_eq!(
            assess(&policy, &req).denial,
            Some(ClaimDenial::OutsideValidityWindow)
        );

        policy.status = PolicyStatus::Expired;
        let result = assess(&policy, &req);
        assert_eq!(
            result.denial,
            Some(ClaimDenial::PolicyNotActive(PolicyStatus::Expired))
        );
        assert_eq!(result.patient_responsibility, dec!(600));
    }

    #[test]
    fn missing_rule_denies() {
        let result = assess(&policy(), &request(CoverageType::Optical, dec!(90)));
        assert_eq!(result.denial, Some(ClaimDenial::NoMatchingRule));
        assert_eq!(result.coverage_rule_id, None);
    }

    #[test]
    fn rule_denial_is_forwarded() {
        let result = assess(&policy(), &request(CoverageType::Dental, dec!(800)));
        assert_eq!(
            result.denial,
            Some(ClaimDenial::Rule(DenialReason::NotCovered))
        );
        assert_eq!(result.payable, Decimal::ZERO);
    }

    #[test]
    fn remaining_policy_limit_caps_payout() {
        let mut req = request(CoverageType::Outpatient, dec!(600));
        req.already_paid = dec!(1900);
        let result = assess(&policy(), &req);
        assert_eq!(result.payable, dec!(100));
        assert_eq!(result.patient_responsibility, dec!(500));

        req.already_paid = dec!(2000);
        assert_eq!(
            assess(&policy(), &req).denial,
            Some(ClaimDenial::CoverageLimitExhausted)
        );
    }

    #[test]
    fn zero_policy_limit_is_unlimited() {
        let mut policy = policy();
        policy.coverage_limit = Decimal::ZERO;
        let mut req = request(CoverageType::Outpatient, dec!(600));
        req.already_paid = dec!(1000000);

        assert_eq!(assess(&policy, &req).payable, dec!(400));
    }

    #[test]
    fn negative_claim_is_a_fault_even_on_inactive_policy() {
        let mut policy = policy();
        policy.status = PolicyStatus::Inactive;
        let req = request(CoverageType::Outpatient, dec!(-10));
        let subject = Subject::new(Gender::Female, 30);

        let err = assess_claim(&policy, &req, &subject, &PayoutCalculator::default())
            .expect_err("fault");
        assert!(matches!(
            err,
            EngineError::NegativeAmount {
                field: "claimed_amount",
                ..
            }
        ));

        policy.status = PolicyStatus::Active;
        let mut req = req;
        req.service_date = date(2030, 1, 1);
        assert!(assess_claim(&policy, &req, &subject, &PayoutCalculator::default()).is_err());
    }

    #[test]
    fn negative_already_paid_is_a_fault() {
        let mut req = request(CoverageType::Outpatient, dec!(600));
        req.already_paid = dec!(-1);
        let subject = Subject::new(Gender::Female, 30);

        let err = assess_claim(&policy(), &req, &subject, &PayoutCalculator::default())
            .expect_err("fault");
        assert!(matches!(
            err,
            EngineError::NegativeAmount {
                field: "already_paid",
                ..
            }
        ));
    }
}
