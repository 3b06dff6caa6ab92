//! Specialization catalog wire models and translation helpers.
//!
//! Responsibilities:
//! - Define a strict wire model for `specializations.yaml`
//! - Translate between the wire model and [`SpecializationCatalogEntry`]
//!
//! Notes:
//! - Monetary amounts are quoted decimal strings so no value passes through binary floating point
//! - Diagnosis map values are written in sorted order

use coverage_core::{DiagnosisTreatmentMap, SpecializationCatalogEntry, SpecializationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::restriction::{self, RestrictionWire};
use crate::{wire, CatalogWireError, CatalogWireResult};

// ============================================================================
// Public Specializations operations
// ============================================================================

/// Specialization catalog operations.
///
/// This is a zero-sized type used for namespacing specialization file operations.
pub struct Specializations;

impl Specializations {
    /// Parse a specialization list from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogWireError`] if:
    /// - the YAML does not match the wire schema or contains unknown keys,
    /// - an identifier is not a valid UUID,
    /// - a display name, diagnosis or treatment label is blank,
    /// - the consultation price is not a decimal amount.
    pub fn parse(yaml_text: &str) -> CatalogWireResult<Vec<SpecializationCatalogEntry>> {
        let wire: Vec<SpecializationWire> = wire::parse_yaml(yaml_text, "Specializations")?;

        wire.into_iter()
            .enumerate()
            .map(|(index, entry)| wire_to_domain(entry, index))
            .collect()
    }

    /// Render specializations as YAML text.
    pub fn render(entries: &[SpecializationCatalogEntry]) -> CatalogWireResult<String> {
        let wire: Vec<SpecializationWire> = entries.iter().map(domain_to_wire).collect();
        serde_yaml::to_string(&wire).map_err(|e| {
            CatalogWireError::Translation(format!("Failed to serialize specializations: {e}"))
        })
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct SpecializationWire {
    pub id: String,
    pub display_name: String,
    pub consultation_price: String,
    #[serde(default, skip_serializing_if = "RestrictionWire::is_unrestricted")]
    pub restriction: RestrictionWire,
    #[serde(default)]
    pub diagnoses: Vec<String>,
    #[serde(default)]
    pub treatment_plans: Vec<String>,
    #[serde(default)]
    pub diagnosis_treatment_map: BTreeMap<String, Vec<String>>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(
    wire: SpecializationWire,
    index: usize,
) -> CatalogWireResult<SpecializationCatalogEntry> {
    let at = format!("specializations[{index}]");

    let mut diagnosis_treatment_map = DiagnosisTreatmentMap::new();
    for (diagnosis, treatments) in &wire.diagnosis_treatment_map {
        let field = format!("{at}.diagnosis_treatment_map");
        let diagnosis = wire::text(diagnosis, &field)?;
        let treatments = wire::texts(treatments, &field)?;
        diagnosis_treatment_map
            .entry(diagnosis)
            .or_default()
            .extend(treatments);
    }

    Ok(SpecializationCatalogEntry {
        id: wire::id::<SpecializationId>(&wire.id, &format!("{at}.id"))?,
        display_name: wire::text(&wire.display_name, &format!("{at}.display_name"))?,
        consultation_price: wire::decimal(
            &wire.consultation_price,
            &format!("{at}.consultation_price"),
        )?,
        restriction: restriction::wire_to_domain(wire.restriction, &at)?,
        diagnoses: wire::texts(&wire.diagnoses, &format!("{at}.diagnoses"))?,
        treatment_plans: wire::texts(&wire.treatment_plans, &format!("{at}.treatment_plans"))?,
        diagnosis_treatment_map,
    })
}

fn domain_to_wire(entry: &SpecializationCatalogEntry) -> SpecializationWire {
    SpecializationWire {
        id: entry.id.to_string(),
        display_name: entry.display_name.to_string(),
        consultation_price: entry.consultation_price.to_string(),
        restriction: restriction::domain_to_wire(&entry.restriction),
        diagnoses: entry.diagnoses.iter().map(ToString::to_string).collect(),
        treatment_plans: entry.treatment_plans.iter().map(ToString::to_string).collect(),
        diagnosis_treatment_map: entry
            .diagnosis_treatment_map
            .iter()
            .map(|(diagnosis, treatments)| {
                (
                    diagnosis.to_string(),
                    treatments.iter().map(ToString::to_string).collect(),
                )
            })
            .collect(),
    }
}
