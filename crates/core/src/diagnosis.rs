//! Diagnosis → treatment aggregation across specializations.
//!
//! Each specialization carries its own diagnosis → treatment-plan map. The global map is the
//! union of all of them and is only ever used as a suggestion source. It is recomputed from
//! whatever specialization list it is given; nothing is cached here.

use coverage_types::NonEmptyText;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::specialization::SpecializationCatalogEntry;
use crate::ValidationError;

/// Union of every specialization's diagnosis → treatment map.
///
/// Keys and treatment sets are kept in string order, so two maps built from the same
/// specializations compare equal regardless of input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GlobalDiagnosisTreatmentMap(BTreeMap<NonEmptyText, BTreeSet<NonEmptyText>>);

impl GlobalDiagnosisTreatmentMap {
    /// Sorted list of every diagnosis with at least one mapping.
    pub fn diagnoses(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(NonEmptyText::as_str)
    }

    /// Sorted treatments for `diagnosis`, or `None` if the diagnosis is unknown.
    pub fn treatments(&self, diagnosis: &str) -> Option<&BTreeSet<NonEmptyText>> {
        self.0.get(diagnosis.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Unions the local maps of every specialization.
pub fn build_global_map(
    specializations: &[SpecializationCatalogEntry],
) -> GlobalDiagnosisTreatmentMap {
    let mut global = BTreeMap::<NonEmptyText, BTreeSet<NonEmptyText>>::new();

    for specialization in specializations {
        for (diagnosis, treatments) in &specialization.diagnosis_treatment_map {
            global
                .entry(diagnosis.clone())
                .or_default()
                .extend(treatments.iter().cloned());
        }
    }

    tracing::trace!(
        specializations = specializations.len(),
        diagnoses = global.len(),
        "built global diagnosis map"
    );

    GlobalDiagnosisTreatmentMap(global)
}

/// Treatments suggested for `diagnosis`, sorted. Unknown diagnoses yield an empty list.
pub fn suggest_treatments<'a>(
    diagnosis: &str,
    global_map: &'a GlobalDiagnosisTreatmentMap,
) -> Vec<&'a str> {
    global_map
        .treatments(diagnosis)
        .map(|treatments| treatments.iter().map(NonEmptyText::as_str).collect())
        .unwrap_or_default()
}

/// Checks that a specialization's map only references its own diagnoses and treatment plans.
///
/// Reports a dangling key once and every treatment outside `treatment_plans`.
pub fn validate_diagnosis_map(specialization: &SpecializationCatalogEntry) -> Vec<ValidationError> {
    let diagnoses: BTreeSet<&str> = specialization
        .diagnoses
        .iter()
        .map(NonEmptyText::as_str)
        .collect();
    let treatment_plans: BTreeSet<&str> = specialization
        .treatment_plans
        .iter()
        .map(NonEmptyText::as_str)
        .collect();

    let mut errors = Vec::new();
    for (diagnosis, treatments) in &specialization.diagnosis_treatment_map {
        if !diagnoses.contains(diagnosis.as_str()) {
            errors.push(ValidationError::UnknownDiagnosis(diagnosis.to_string()));
        }
        for treatment in treatments {
            if !treatment_plans.contains(treatment.as_str()) {
                errors.push(ValidationError::UnknownTreatment {
                    diagnosis: diagnosis.to_string(),
                    treatment: treatment.to_string(),
                });
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverage_types::SpecializationId;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).expect("valid text")
    }

    fn specialization(n: u128, name: &str, map: &[(&str, &[&str])]) -> SpecializationCatalogEntry {
        let mut entry = SpecializationCatalogEntry::new(
            SpecializationId::from_uuid(Uuid::from_u128(n)),
            text(name),
            dec!(100),
        );
        for (diagnosis, treatments) in map {
            entry.map_diagnosis(text(diagnosis), treatments.iter().map(|t| text(t)));
        }
        entry
    }

    #[test]
    fn unions_sorts_and_deduplicates() {
        let a = specialization(1, "General", &[("Flu", &["Rest", "Fluids"])]);
        let b = specialization(2, "Infectious", &[("Flu", &["Fluids", "Antiviral"])]);

        let global = build_global_map(&[a, b]);

        assert_eq!(
            suggest_treatments("Flu", &global),
            vec!["Antiviral", "Fluids", "Rest"]
        );
        assert_eq!(global.len(), 1);
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let a = specialization(1, "General", &[("Flu", &["Rest"]), ("Cough", &["Syrup"])]);
        let b = specialization(
            2,
            "Pulmonology",
            &[("Cough", &["Inhaler"]), ("Asthma", &["Inhaler"])],
        );
        let c = specialization(3, "Infectious", &[("Flu", &["Antiviral"])]);

        let forward = build_global_map(&[a.clone(), b.clone(), c.clone()]);
        let reversed = build_global_map(&[c, b, a]);

        assert_eq!(forward, reversed);
        assert_eq!(
            forward.diagnoses().collect::<Vec<_>>(),
            vec!["Asthma", "Cough", "Flu"]
        );
    }

    #[test]
    fn rebuilding_same_input_is_identical() {
        let specs = vec![
            specialization(1, "General", &[("Flu", &["Rest", "Fluids"])]),
            specialization(2, "Dermatology", &[("Eczema", &["Emollient"])]),
        ];

        let first = build_global_map(&specs);
        let second = build_global_map(&specs);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("serialize"),
            serde_json::to_string(&second).expect("serialize")
        );
    }

    #[test]
    fn unknown_diagnosis_suggests_nothing() {
        let global = build_global_map(&[specialization(1, "General", &[("Flu", &["Rest"])])]);
        assert!(suggest_treatments("Migraine", &global).is_empty());
        assert!(suggest_treatments("", &global).is_empty());
        assert!(suggest_treatments("Flu", &GlobalDiagnosisTreatmentMap::default()).is_empty());
    }

    #[test]
    fn empty_specialization_list_gives_empty_map() {
        assert!(build_global_map(&[]).is_empty());
    }

    #[test]
    fn dangling_references_are_reported() {
        let mut entry = specialization(1, "General", &[("Flu", &["Rest"])]);
        entry
            .diagnosis_treatment_map
            .get_mut("Flu")
            .expect("mapped")
            .insert(text("Surgery"));
        entry
            .diagnosis_treatment_map
            .insert(text("Gout"), BTreeSet::from([text("Rest")]));

        assert_eq!(
            validate_diagnosis_map(&entry),
            vec![
                ValidationError::UnknownTreatment {
                    diagnosis: "Flu".into(),
                    treatment: "Surgery".into()
                },
                ValidationError::UnknownDiagnosis("Gout".into()),
            ]
        );
    }
}
