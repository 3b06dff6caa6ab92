//! Eligibility resolution.
//!
//! Decides whether a [`Subject`] may use a catalog entry guarded by a [`RestrictionSet`], and
//! filters whole catalogs down to the entries a subject may use.

use serde::Serialize;

use crate::restriction::{RestrictionSet, Subject};

/// Catalog entries that carry a restriction set.
pub trait Restricted {
    fn restriction(&self) -> &RestrictionSet;
}

impl Restricted for RestrictionSet {
    fn restriction(&self) -> &RestrictionSet {
        self
    }
}

impl<T: Restricted + ?Sized> Restricted for &T {
    fn restriction(&self) -> &RestrictionSet {
        (**self).restriction()
    }
}

/// A restriction dimension a subject failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionDimension {
    Gender,
    Age,
    Specialization,
}

fn gender_allowed(restriction: &RestrictionSet, subject: &Subject) -> bool {
    restriction.allowed_genders.is_empty() || restriction.allowed_genders.contains(&subject.gender)
}

fn age_allowed(restriction: &RestrictionSet, subject: &Subject) -> bool {
    restriction.min_age.map_or(true, |min| subject.age >= min)
        && restriction.max_age.map_or(true, |max| subject.age <= max)
}

fn specialization_allowed(restriction: &RestrictionSet, subject: &Subject) -> bool {
    if restriction.allowed_specialization_ids.is_empty() {
        return true;
    }
    subject
        .specialization_id
        .is_some_and(|id| restriction.allowed_specialization_ids.contains(&id))
}

/// Returns `true` when the subject passes every dimension of the restriction set.
pub fn is_eligible(restriction: &RestrictionSet, subject: &Subject) -> bool {
    gender_allowed(restriction, subject)
        && age_allowed(restriction, subject)
        && specialization_allowed(restriction, subject)
}

/// Lists every dimension the subject fails. Empty exactly when [`is_eligible`] holds.
pub fn ineligibility_reasons(
    restriction: &RestrictionSet,
    subject: &Subject,
) -> Vec<RestrictionDimension> {
    let mut reasons = Vec::new();
    if !gender_allowed(restriction, subject) {
        reasons.push(RestrictionDimension::Gender);
    }
    if !age_allowed(restriction, subject) {
        reasons.push(RestrictionDimension::Age);
    }
    if !specialization_allowed(restriction, subject) {
        reasons.push(RestrictionDimension::Specialization);
    }
    reasons
}

/// Keeps the entries the subject may use, in their original order.
///
/// Every entry is evaluated; callers typically need the full eligible set to populate a picker.
pub fn filter_catalog<'a, T: Restricted>(entries: &'a [T], subject: &Subject) -> Vec<&'a T> {
    let eligible: Vec<&T> = entries
        .iter()
        .filter(|entry| is_eligible(entry.restriction(), subject))
        .collect();

    tracing::trace!(
        total = entries.len(),
        eligible = eligible.len(),
        "filtered catalog entries"
    );

    eligible
}
