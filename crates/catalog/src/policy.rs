//! Policy wire models and translation helpers.
//!
//! Coverage rules are nested under their policy in `policies.yaml`; a rule's `policy_id` is taken
//! from the enclosing policy and is never written to disk.

use coverage_core::{CoverageRule, CoverageRuleId, CoverageType, Policy, PolicyId, PolicyStatus};
use serde::{Deserialize, Serialize};

use crate::{wire, CatalogWireError, CatalogWireResult};

/// Policy operations.
///
/// This is a zero-sized type used for namespacing policy file operations.
pub struct Policies;

impl Policies {
    /// Parse policies, including their coverage rules, from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogWireError`] if:
    /// - the YAML does not match the wire schema or contains unknown keys,
    /// - an identifier is not a valid UUID,
    /// - a date is not `YYYY-MM-DD`,
    /// - an amount or percentage is not a decimal.
    pub fn parse(yaml_text: &str) -> CatalogWireResult<Vec<Policy>> {
        let wire: Vec<PolicyWire> = wire::parse_yaml(yaml_text, "Policies")?;

        wire.into_iter()
            .enumerate()
            .map(|(index, policy)| policy_to_domain(policy, index))
            .collect()
    }

    /// Render policies as YAML text.
    pub fn render(policies: &[Policy]) -> CatalogWireResult<String> {
        let wire: Vec<PolicyWire> = policies.iter().map(policy_to_wire).collect();
        serde_yaml::to_string(&wire).map_err(|e| {
            CatalogWireError::Translation(format!("Failed to serialize policies: {e}"))
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PolicyWire {
    pub id: String,
    pub policy_no: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "zero")]
    pub coverage_limit: String,
    #[serde(default = "zero")]
    pub deductible: String,
    pub status: PolicyStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coverage_rules: Vec<CoverageRuleWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CoverageRuleWire {
    pub id: String,
    pub service_name: String,
    pub coverage_type: CoverageType,
    pub coverage_percent: String,
    #[serde(default = "zero")]
    pub max_limit: String,
    #[serde(default = "zero")]
    pub minimum_deductible: String,
    #[serde(default = "zero")]
    pub amount: String,
    #[serde(default)]
    pub emergency_eligible: bool,
    #[serde(default = "covered_by_default")]
    pub covered: bool,
    #[serde(default)]
    pub requires_referral: bool,
}

fn zero() -> String {
    "0".to_owned()
}

fn covered_by_default() -> bool {
    true
}

fn policy_to_domain(wire: PolicyWire, index: usize) -> CatalogWireResult<Policy> {
    let at = format!("policies[{index}]");
    let id = wire::id::<PolicyId>(&wire.id, &format!("{at}.id"))?;

    let coverage_rules = wire
        .coverage_rules
        .into_iter()
        .enumerate()
        .map(|(rule_index, rule)| {
            rule_to_domain(rule, id, &format!("{at}.coverage_rules[{rule_index}]"))
        })
        .collect::<CatalogWireResult<Vec<_>>>()?;

    Ok(Policy {
        id,
        policy_no: wire.policy_no,
        name: wire.name,
        start_date: wire::date(&wire.start_date, &format!("{at}.start_date"))?,
        end_date: wire::date(&wire.end_date, &format!("{at}.end_date"))?,
        coverage_limit: wire::decimal(&wire.coverage_limit, &format!("{at}.coverage_limit"))?,
        deductible: wire::decimal(&wire.deductible, &format!("{at}.deductible"))?,
        status: wire.status,
        coverage_rules,
    })
}

fn rule_to_domain(
    wire: CoverageRuleWire,
    policy_id: PolicyId,
    at: &str,
) -> CatalogWireResult<CoverageRule> {
    Ok(CoverageRule {
        id: wire::id::<CoverageRuleId>(&wire.id, &format!("{at}.id"))?,
        policy_id,
        service_name: wire.service_name,
        coverage_type: wire.coverage_type,
        coverage_percent: wire::decimal(&wire.coverage_percent, &format!("{at}.coverage_percent"))?,
        max_limit: wire::decimal(&wire.max_limit, &format!("{at}.max_limit"))?,
        minimum_deductible: wire::decimal(
            &wire.minimum_deductible,
            &format!("{at}.minimum_deductible"),
        )?,
        amount: wire::decimal(&wire.amount, &format!("{at}.amount"))?,
        emergency_eligible: wire.emergency_eligible,
        covered: wire.covered,
        requires_referral: wire.requires_referral,
    })
}

fn policy_to_wire(policy: &Policy) -> PolicyWire {
    PolicyWire {
        id: policy.id.to_string(),
        policy_no: policy.policy_no.clone(),
        name: policy.name.clone(),
        start_date: policy.start_date.format("%Y-%m-%d").to_string(),
        end_date: policy.end_date.format("%Y-%m-%d").to_string(),
        coverage_limit: policy.coverage_limit.to_string(),
        deductible: policy.deductible.to_string(),
        status: policy.status,
        coverage_rules: policy.coverage_rules.iter().map(rule_to_wire).collect(),
    }
}

fn rule_to_wire(rule: &CoverageRule) -> CoverageRuleWire {
    CoverageRuleWire {
        id: rule.id.to_string(),
        service_name: rule.service_name.clone(),
        coverage_type: rule.coverage_type,
        coverage_percent: rule.coverage_percent.to_string(),
        max_limit: rule.max_limit.to_string(),
        minimum_deductible: rule.minimum_deductible.to_string(),
        amount: rule.amount.to_string(),
        emergency_eligible: rule.emergency_eligible,
        covered: rule.covered,
        requires_referral: rule.requires_referral,
    }
}
