//! Policies and their coverage rules.
//!
//! This module is model-level validation only. Persistence of policies belongs to the host.

use chrono::NaiveDate;
use coverage_types::{CoverageRuleId, PolicyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_COVERAGE_PERCENT;
use crate::validation::{require_non_negative, require_text};
use crate::{ParseEnumError, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Inactive,
    Expired,
}

/// Service category a coverage rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageType {
    Outpatient,
    Inpatient,
    Dental,
    Optical,
    Emergency,
    Lab,
    Xray,
}

impl std::str::FromStr for CoverageType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outpatient" => Ok(CoverageType::Outpatient),
            "inpatient" => Ok(CoverageType::Inpatient),
            "dental" => Ok(CoverageType::Dental),
            "optical" => Ok(CoverageType::Optical),
            "emergency" => Ok(CoverageType::Emergency),
            "lab" => Ok(CoverageType::Lab),
            "xray" | "x-ray" => Ok(CoverageType::Xray),
            other => Err(ParseEnumError::new("coverage type", other)),
        }
    }
}

/// A policy line item describing how much of a claimed service is reimbursed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRule {
    pub id: CoverageRuleId,
    pub policy_id: PolicyId,
    pub service_name: String,
    pub coverage_type: CoverageType,
    /// Share of the billable amount paid, 0..=100.
    pub coverage_percent: Decimal,
    /// Per-claim payout cap. Zero means the rule does not cap.
    pub max_limit: Decimal,
    pub minimum_deductible: Decimal,
    /// Reference list price of the service.
    pub amount: Decimal,
    pub emergency_eligible: bool,
    pub covered: bool,
    pub requires_referral: bool,
}

/// An insurance contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub policy_no: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Total payout cap across claims. Zero means unlimited.
    pub coverage_limit: Decimal,
    pub deductible: Decimal,
    pub status: PolicyStatus,
    pub coverage_rules: Vec<CoverageRule>,
}

impl Policy {
    /// `true` when the policy is active and `on` falls inside its validity window (inclusive).
    pub fn is_in_force(&self, on: NaiveDate) -> bool {
        self.status == PolicyStatus::Active && self.covers_date(on)
    }

    pub(crate) fn covers_date(&self, on: NaiveDate) -> bool {
        self.start_date <= on && on <= self.end_date
    }

    /// First rule, in collection order, for `coverage_type`.
    ///
    /// When `service_name` is given the rule's service name must also match, ignoring case and
    /// surrounding whitespace.
    pub fn find_rule(
        &self,
        coverage_type: CoverageType,
        service_name: Option<&str>,
    ) -> Option<&CoverageRule> {
        self.coverage_rules.iter().find(|rule| {
            rule.coverage_type == coverage_type
                && service_name.map_or(true, |name| {
                    rule.service_name.trim().eq_ignore_ascii_case(name.trim())
                })
        })
    }
}

pub fn validate_policy(policy: &Policy) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require_text(&mut errors, "policy_no", &policy.policy_no);
    require_text(&mut errors, "name", &policy.name);
    if policy.start_date > policy.end_date {
        errors.push(ValidationError::DateRange {
            start: policy.start_date,
            end: policy.end_date,
        });
    }
    require_non_negative(&mut errors, "coverage_limit", policy.coverage_limit);
    require_non_negative(&mut errors, "deductible", policy.deductible);

    for rule in &policy.coverage_rules {
        if rule.policy_id != policy.id {
            errors.push(ValidationError::ForeignCoverageRule {
                expected: policy.id,
                found: rule.policy_id,
            });
        }
    }

    errors
}

pub fn validate_coverage_rule(rule: &CoverageRule) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !percent_in_range(rule.coverage_percent) {
        errors.push(ValidationError::PercentOutOfRange(rule.coverage_percent));
    }
    require_non_negative(&mut errors, "amount", rule.amount);
    require_non_negative(&mut errors, "max_limit", rule.max_limit);
    require_non_negative(&mut errors, "minimum_deductible", rule.minimum_deductible);
    require_text(&mut errors, "service_name", &rule.service_name);

    errors
}

pub(crate) fn percent_in_range(percent: Decimal) -> bool {
    percent >= Decimal::ZERO && percent <= Decimal::from(MAX_COVERAGE_PERCENT)
}
