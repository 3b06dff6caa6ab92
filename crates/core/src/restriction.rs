//! Restriction sets and the subjects they are evaluated against.
//!
//! A [`RestrictionSet`] describes who may use a catalog entry along three independent
//! dimensions: gender, age window and provider specialization. An empty set (or an absent age
//! bound) means the dimension is unrestricted. It never means that nobody qualifies.

use chrono::{Datelike, NaiveDate};
use coverage_types::SpecializationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{ParseEnumError, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(ParseEnumError::new("gender", other)),
        }
    }
}

/// Declarative eligibility filter attached to a catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionSet {
    /// Genders allowed to use the entry. Empty means any gender.
    pub allowed_genders: BTreeSet<Gender>,
    /// Inclusive lower age bound.
    pub min_age: Option<u32>,
    /// Inclusive upper age bound.
    pub max_age: Option<u32>,
    /// Provider specializations under which the entry may be used. Empty means any (or none).
    pub allowed_specialization_ids: BTreeSet<SpecializationId>,
}

impl RestrictionSet {
    /// A restriction set that admits every subject.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed_genders.is_empty()
            && self.min_age.is_none()
            && self.max_age.is_none()
            && self.allowed_specialization_ids.is_empty()
    }

    pub fn with_genders(mut self, genders: impl IntoIterator<Item = Gender>) -> Self {
        self.allowed_genders = genders.into_iter().collect();
        self
    }

    pub fn with_age_window(mut self, min_age: Option<u32>, max_age: Option<u32>) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    pub fn with_specializations(
        mut self,
        ids: impl IntoIterator<Item = SpecializationId>,
    ) -> Self {
        self.allowed_specialization_ids = ids.into_iter().collect();
        self
    }
}

/// The patient/provider context an eligibility or payout decision is made for.
///
/// Built by the host from already-validated patient and provider records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub gender: Gender,
    pub age: u32,
    /// Specialization of the ordering/prescribing provider, if any.
    pub specialization_id: Option<SpecializationId>,
    pub is_emergency: bool,
    pub has_referral: bool,
}

impl Subject {
    /// A non-emergency subject without referral or provider specialization.
    pub fn new(gender: Gender, age: u32) -> Self {
        Self {
            gender,
            age,
            specialization_id: None,
            is_emergency: false,
            has_referral: false,
        }
    }

    pub fn with_specialization(mut self, id: SpecializationId) -> Self {
        self.specialization_id = Some(id);
        self
    }

    pub fn emergency(mut self, is_emergency: bool) -> Self {
        self.is_emergency = is_emergency;
        self
    }

    pub fn referral(mut self, has_referral: bool) -> Self {
        self.has_referral = has_referral;
        self
    }
}

/// Completed years of age on `on` for someone born on `birth_date`.
///
/// Returns `None` when `birth_date` is after `on`. A 29 February birthday is reached on
/// 1 March in non-leap years.
pub fn age_on(birth_date: NaiveDate, on: NaiveDate) -> Option<u32> {
    if birth_date > on {
        return None;
    }

    let mut years = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }

    u32::try_from(years).ok()
}

/// Structural checks on a restriction set.
pub fn validate_restriction(restriction: &RestrictionSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let (Some(min), Some(max)) = (restriction.min_age, restriction.max_age) {
        if min > max {
            errors.push(ValidationError::AgeRange { min, max });
        }
    }

    errors
}
