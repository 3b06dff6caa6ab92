//! Doctor specialization catalog entries.

use coverage_types::{NonEmptyText, SpecializationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::diagnosis::validate_diagnosis_map;
use crate::eligibility::Restricted;
use crate::restriction::{validate_restriction, RestrictionSet};
use crate::validation::{require_non_negative, require_unique};
use crate::ValidationError;

/// Local diagnosis → treatment-plan associations of one specialization.
pub type DiagnosisTreatmentMap = BTreeMap<NonEmptyText, BTreeSet<NonEmptyText>>;

/// A doctor specialization offered in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationCatalogEntry {
    pub id: SpecializationId,
    pub display_name: NonEmptyText,
    pub consultation_price: Decimal,
    pub restriction: RestrictionSet,
    /// Diagnoses this specialization can record, in display order.
    pub diagnoses: Vec<NonEmptyText>,
    /// Treatment plans this specialization can prescribe, in display order.
    pub treatment_plans: Vec<NonEmptyText>,
    pub diagnosis_treatment_map: DiagnosisTreatmentMap,
}

impl SpecializationCatalogEntry {
    /// Creates an entry with no restriction, diagnoses or treatment plans.
    pub fn new(
        id: SpecializationId,
        display_name: NonEmptyText,
        consultation_price: Decimal,
    ) -> Self {
        Self {
            id,
            display_name,
            consultation_price,
            restriction: RestrictionSet::unrestricted(),
            diagnoses: Vec::new(),
            treatment_plans: Vec::new(),
            diagnosis_treatment_map: DiagnosisTreatmentMap::new(),
        }
    }

    /// Associates `treatments` with `diagnosis`, registering any label not yet listed.
    ///
    /// Keeps the entry consistent with [`validate_diagnosis_map`] by construction.
    pub fn map_diagnosis<I>(&mut self, diagnosis: NonEmptyText, treatments: I)
    where
        I: IntoIterator<Item = NonEmptyText>,
    {
        if !self.diagnoses.contains(&diagnosis) {
            self.diagnoses.push(diagnosis.clone());
        }

        let mapped = self.diagnosis_treatment_map.entry(diagnosis).or_default();
        for treatment in treatments {
            if !self.treatment_plans.contains(&treatment) {
                self.treatment_plans.push(treatment.clone());
            }
            mapped.insert(treatment);
        }
    }
}

impl Restricted for SpecializationCatalogEntry {
    fn restriction(&self) -> &RestrictionSet {
        &self.restriction
    }
}

/// Full validation of a specialization before it is saved.
///
/// Covers the consultation price, duplicate labels, the restriction set and the
/// diagnosis → treatment map consistency.
pub fn validate_specialization(entry: &SpecializationCatalogEntry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require_non_negative(&mut errors, "consultation_price", entry.consultation_price);
    require_unique(
        &mut errors,
        "diagnoses",
        entry.diagnoses.iter().map(NonEmptyText::as_str),
    );
    require_unique(
        &mut errors,
        "treatment_plans",
        entry.treatment_plans.iter().map(NonEmptyText::as_str),
    );
    errors.extend(validate_restriction(&entry.restriction));
    errors.extend(validate_diagnosis_map(entry));

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).expect("valid text")
    }

    fn cardiology() -> SpecializationCatalogEntry {
        SpecializationCatalogEntry::new(
            SpecializationId::from_uuid(Uuid::from_u128(1)),
            text("Cardiology"),
            dec!(150.00),
        )
    }

    #[test]
    fn map_diagnosis_registers_labels() {
        let mut entry = cardiology();
        entry.map_diagnosis(text("Hypertension"), [text("ACE inhibitor"), text("Diet")]);
        entry.map_diagnosis(text("Hypertension"), [text("Diet"), text("Exercise")]);

        assert_eq!(entry.diagnoses, vec![text("Hypertension")]);
        assert_eq!(
            entry.treatment_plans,
            vec![text("ACE inhibitor"), text("Diet"), text("Exercise")]
        );
        assert_eq!(entry.diagnosis_treatment_map["Hypertension"].len(), 3);
        assert!(validate_specialization(&entry).is_empty());
    }

    #[test]
    fn collects_every_violation() {
        let mut entry = cardiology();
        entry.consultation_price = dec!(-1);
        entry.diagnoses = vec![text("Angina"), text("Angina")];
        entry.restriction = RestrictionSet::unrestricted().with_age_window(Some(40), Some(30));
        entry
            .diagnosis_treatment_map
            .insert(text("Arrhythmia"), BTreeSet::from([text("Beta blocker")]));

        let errors = validate_specialization(&entry);

        assert_eq!(
            errors,
            vec![
                ValidationError::Negative {
                    field: "consultation_price",
                    value: dec!(-1)
                },
                ValidationError::Duplicate {
                    field: "diagnoses",
                    value: "Angina".into()
                },
                ValidationError::AgeRange { min: 40, max: 30 },
                ValidationError::UnknownDiagnosis("Arrhythmia".into()),
                ValidationError::UnknownTreatment {
                    diagnosis: "Arrhythmia".into(),
                    treatment: "Beta blocker".into()
                },
            ]
        );
    }
}
