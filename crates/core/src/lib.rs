//! # Coverage Core
//!
//! Coverage eligibility and price-list resolution engine.
//!
//! This crate contains pure, synchronous decision logic over an immutable catalog snapshot:
//! - Eligibility resolution of restricted catalog entries for a patient/provider subject
//! - Diagnosis → treatment aggregation across specializations
//! - Structural validation of specializations, price-list entries, policies and coverage rules
//! - Payout calculation for a coverage rule and claim assessment against a whole policy
//!
//! **No persistence or transport concerns**: loading catalogs from disk belongs in
//! `coverage-catalog`, and user-facing surfaces belong in the host binary. Nothing here mutates
//! its inputs or holds process-wide state, so evaluations may run concurrently against a shared
//! snapshot.

pub mod catalog;
pub mod claim;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod eligibility;
mod error;
pub mod payout;
pub mod policy;
pub mod price_list;
pub mod restriction;
pub mod specialization;
mod validation;

pub use catalog::{CatalogProvider, CatalogSnapshot, CatalogViolation, EntityRef};
pub use claim::{assess_claim, ClaimAssessment, ClaimDenial, ClaimRequest};
pub use config::EngineConfig;
pub use diagnosis::{
    build_global_map, suggest_treatments, validate_diagnosis_map, GlobalDiagnosisTreatmentMap,
};
pub use eligibility::{
    filter_catalog, ineligibility_reasons, is_eligible, Restricted, RestrictionDimension,
};
pub use error::{
    CatalogError, CatalogResult, EngineError, EngineResult, ParseEnumError, ValidationError,
};
pub use payout::{
    compute_payout, effective_deductible, DenialReason, PayoutCalculator, PayoutResult,
};
pub use policy::{
    validate_coverage_rule, validate_policy, CoverageRule, CoverageType, Policy, PolicyStatus,
};
pub use price_list::{
    entries_for_provider, validate_price_list_entry, PriceListEntry, ProviderType,
};
pub use restriction::{age_on, validate_restriction, Gender, RestrictionSet, Subject};
pub use specialization::{
    validate_specialization, DiagnosisTreatmentMap, SpecializationCatalogEntry,
};

pub use coverage_types::{
    CoverageRuleId, NonEmptyText, PolicyId, PriceListEntryId, SpecializationId,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_types_are_thread_safe() {
        assert_send_sync::<CatalogSnapshot>();
        assert_send_sync::<GlobalDiagnosisTreatmentMap>();
        assert_send_sync::<PayoutCalculator>();
        assert_send_sync::<Subject>();
    }
}
