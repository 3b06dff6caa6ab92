//! Catalog provider seam.
//!
//! The engine never fetches catalog data itself. Hosts implement [`CatalogProvider`] over
//! whatever persistence they use; [`CatalogSnapshot`] is the in-memory implementation used by
//! the file-backed loader and by tests.

use coverage_types::{CoverageRuleId, PolicyId, PriceListEntryId, SpecializationId};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::policy::{validate_coverage_rule, validate_policy, Policy};
use crate::price_list::{validate_price_list_entry, PriceListEntry, ProviderType};
use crate::specialization::{validate_specialization, SpecializationCatalogEntry};
use crate::{CatalogError, CatalogResult, ValidationError};

/// Read access to the catalog the engine evaluates against.
pub trait CatalogProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_specializations(&self) -> Result<Vec<SpecializationCatalogEntry>, Self::Error>;

    fn list_price_list_entries(
        &self,
        provider_type: ProviderType,
    ) -> Result<Vec<PriceListEntry>, Self::Error>;

    /// Fetches a policy with its coverage rules populated.
    fn get_policy(&self, id: PolicyId) -> Result<Policy, Self::Error>;
}

/// Identifies the catalog entity a validation error belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "entity", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Specialization(SpecializationId),
    PriceListEntry(PriceListEntryId),
    Policy(PolicyId),
    CoverageRule(CoverageRuleId),
}

/// A validation error tagged with the entity it was found on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogViolation {
    pub entity: EntityRef,
    #[serde(serialize_with = "serialize_display")]
    pub error: ValidationError,
}

fn serialize_display<S>(error: &ValidationError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

/// An immutable, in-memory catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    specializations: Vec<SpecializationCatalogEntry>,
    price_list: Vec<PriceListEntry>,
    policies: Vec<Policy>,
}

impl CatalogSnapshot {
    pub fn new(
        specializations: Vec<SpecializationCatalogEntry>,
        price_list: Vec<PriceListEntry>,
        policies: Vec<Policy>,
    ) -> Self {
        Self {
            specializations,
            price_list,
            policies,
        }
    }

    pub fn specializations(&self) -> &[SpecializationCatalogEntry] {
        &self.specializations
    }

    pub fn price_list(&self) -> &[PriceListEntry] {
        &self.price_list
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn find_policy_by_number(&self, policy_no: &str) -> Option<&Policy> {
        let policy_no = policy_no.trim();
        self.policies
            .iter()
            .find(|policy| policy.policy_no.trim() == policy_no)
    }

    /// Looks up a specialization by id, for example to check a subject's specialization exists.
    pub fn find_specialization(
        &self,
        id: SpecializationId,
    ) -> CatalogResult<&SpecializationCatalogEntry> {
        self.specializations
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(CatalogError::SpecializationNotFound(id))
    }

    /// Validates every entity in the snapshot and returns all violations found.
    ///
    /// On top of the per-entity validators this reports a `policy_no` shared by several
    /// policies (once per number).
    pub fn validate(&self) -> Vec<CatalogViolation> {
        let mut violations = Vec::new();
        let mut push = |entity: EntityRef, errors: Vec<ValidationError>| {
            violations.extend(errors.into_iter().map(|error| CatalogViolation {
                entity: entity.clone(),
                error,
            }));
        };

        for specialization in &self.specializations {
            push(
                EntityRef::Specialization(specialization.id),
                validate_specialization(specialization),
            );
        }
        for entry in &self.price_list {
            push(
                EntityRef::PriceListEntry(entry.id),
                validate_price_list_entry(entry),
            );
        }

        let mut policy_numbers: BTreeMap<&str, usize> = BTreeMap::new();
        for policy in &self.policies {
            push(EntityRef::Policy(policy.id), validate_policy(policy));
            for rule in &policy.coverage_rules {
                push(EntityRef::CoverageRule(rule.id), validate_coverage_rule(rule));
            }

            let number = policy.policy_no.trim();
            if !number.is_empty() {
                let seen = policy_numbers.entry(number).or_default();
                *seen += 1;
                if *seen == 2 {
                    push(
                        EntityRef::Policy(policy.id),
                        vec![ValidationError::DuplicatePolicyNumber(number.to_owned())],
                    );
                }
            }
        }

        violations
    }
}

impl CatalogProvider for CatalogSnapshot {
    type Error = CatalogError;

    fn list_specializations(&self) -> CatalogResult<Vec<SpecializationCatalogEntry>> {
        Ok(self.specializations.clone())
    }

    fn list_price_list_entries(
        &self,
        provider_type: ProviderType,
    ) -> CatalogResult<Vec<PriceListEntry>> {
        Ok(self
            .price_list
            .iter()
            .filter(|entry| entry.provider_type == provider_type)
            .cloned()
            .collect())
    }

    fn get_policy(&self, id: PolicyId) -> CatalogResult<Policy> {
        self.policies
            .iter()
            .find(|policy| policy.id == id)
            .cloned()
            .ok_or(CatalogError::PolicyNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyStatus;
    use crate::restriction::RestrictionSet;
    use chrono::NaiveDate;
    use coverage_types::NonEmptyText;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn policy(n: u128, policy_no: &str) -> Policy {
        Policy {
            id: PolicyId::from_uuid(Uuid::from_u128(n)),
            policy_no: policy_no.into(),
            name: "Plan".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).expect("date"),
            coverage_limit: dec!(0),
            deductible: dec!(0),
            status: PolicyStatus::Active,
            coverage_rules: Vec::new(),
        }
    }

    fn price(n: u128, provider_type: ProviderType) -> PriceListEntry {
        PriceListEntry {
            id: PriceListEntryId::from_uuid(Uuid::from_u128(n)),
            provider_type,
            service_name: "CBC".into(),
            service_code: "LAB-CBC".into(),
            price: dec!(25),
            quantity: None,
            restriction: RestrictionSet::unrestricted(),
            service_details: BTreeMap::new(),
        }
    }

    #[test]
    fn provider_lists_by_type_and_finds_policies() {
        let snapshot = CatalogSnapshot::new(
            Vec::new(),
            vec![
                price(1, ProviderType::Lab),
                price(2, ProviderType::Radiology),
                price(3, ProviderType::Lab),
            ],
            vec![policy(10, "A-1")],
        );

        let labs = snapshot
            .list_price_list_entries(ProviderType::Lab)
            .expect("labs");
        assert_eq!(labs.len(), 2);
        assert!(labs.iter().all(|e| e.provider_type == ProviderType::Lab));

        let id = PolicyId::from_uuid(Uuid::from_u128(10));
        assert_eq!(snapshot.get_policy(id).expect("policy").policy_no, "A-1");
        assert_eq!(
            snapshot.find_policy_by_number(" A-1 ").map(|p| p.id),
            Some(id)
        );

        let missing = PolicyId::from_uuid(Uuid::from_u128(11));
        assert!(matches!(
            snapshot.get_policy(missing),
            Err(CatalogError::PolicyNotFound(found)) if found == missing
        ));
    }

    fn specialization(n: u128, name: &str) -> SpecializationCatalogEntry {
        SpecializationCatalogEntry::new(
            SpecializationId::from_uuid(Uuid::from_u128(n)),
            NonEmptyText::new(name).expect("text"),
            dec!(120),
        )
    }

    #[test]
    fn provider_lists_and_finds_specializations() {
        let snapshot = CatalogSnapshot::new(
            vec![specialization(1, "Cardiology"), specialization(2, "Dermatology")],
            Vec::new(),
            Vec::new(),
        );

        let listed = snapshot.list_specializations().expect("specializations");
        assert_eq!(listed, snapshot.specializations());

        let dermatology = SpecializationId::from_uuid(Uuid::from_u128(2));
        assert_eq!(
            snapshot
                .find_specialization(dermatology)
                .expect("found")
                .display_name
                .as_str(),
            "Dermatology"
        );

        let missing = SpecializationId::from_uuid(Uuid::from_u128(3));
        assert!(matches!(
            snapshot.find_specialization(missing),
            Err(CatalogError::SpecializationNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn validate_tags_violations_with_entities() {
        let mut bad_price = price(1, ProviderType::Lab);
        bad_price.quantity = Some(2);
        let mut specialization = SpecializationCatalogEntry::new(
            SpecializationId::from_uuid(Uuid::from_u128(5)),
            NonEmptyText::new("Pediatrics").expect("text"),
            dec!(-10),
        );
        specialization.restriction =
            RestrictionSet::unrestricted().with_age_window(Some(18), Some(0));

        let snapshot = CatalogSnapshot::new(
            vec![specialization],
            vec![bad_price],
            vec![policy(10, "DUP"), policy(11, "DUP"), policy(12, "DUP")],
        );

        let violations = snapshot.validate();

        let spec_ref = EntityRef::Specialization(SpecializationId::from_uuid(Uuid::from_u128(5)));
        assert_eq!(
            violations
                .iter()
                .filter(|v| v.entity == spec_ref)
                .count(),
            2
        );
        assert!(violations.contains(&CatalogViolation {
            entity: EntityRef::PriceListEntry(PriceListEntryId::from_uuid(Uuid::from_u128(1))),
            error: ValidationError::QuantityNotAllowed,
        }));
        let duplicates: Vec<_> = violations
            .iter()
            .filter(|v| matches!(v.error, ValidationError::DuplicatePolicyNumber(_)))
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(
            duplicates[0].entity,
            EntityRef::Policy(PolicyId::from_uuid(Uuid::from_u128(11)))
        );
    }

    #[test]
    fn violations_serialize_with_readable_messages() {
        let violation = CatalogViolation {
            entity: EntityRef::Policy(PolicyId::from_uuid(Uuid::from_u128(1))),
            error: ValidationError::Empty { field: "name" },
        };
        let json = serde_json::to_value(&violation).expect("serialize");
        assert_eq!(json["entity"]["entity"], "policy");
        assert_eq!(json["error"], "name cannot be empty");
    }
}
