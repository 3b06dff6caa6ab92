//! Field-level validation helpers shared by the entity validators.
//!
//! Each helper pushes onto a caller-owned list instead of returning early, so an entity
//! validator can collect every violation in a single pass.

use crate::ValidationError;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

pub(crate) fn require_text(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Empty { field });
    }
}

pub(crate) fn require_non_negative(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: Decimal,
) {
    if value < Decimal::ZERO {
        errors.push(ValidationError::Negative { field, value });
    }
}

/// Reports every value that appears more than once, once per distinct value.
pub(crate) fn require_unique<'a, I>(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    values: I,
) where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for value in values {
        if !seen.insert(value) && reported.insert(value) {
            errors.push(ValidationError::Duplicate {
                field,
                value: value.to_owned(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blank_text_is_reported() {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", "  ");
        require_text(&mut errors, "policy_no", "P-1");
        assert_eq!(errors, vec![ValidationError::Empty { field: "name" }]);
    }

    #[test]
    fn negative_zero_is_not_negative() {
        let mut errors = Vec::new();
        require_non_negative(&mut errors, "price", -dec!(0.00));
        require_non_negative(&mut errors, "price", dec!(0));
        assert!(errors.is_empty());

        require_non_negative(&mut errors, "price", dec!(-0.01));
        assert_eq!(
            errors,
            vec![ValidationError::Negative {
                field: "price",
                value: dec!(-0.01)
            }]
        );
    }

    #[test]
    fn duplicates_reported_once_each() {
        let mut errors = Vec::new();
        require_unique(&mut errors, "diagnoses", ["Flu", "Cold", "Flu", "Flu"]);
        assert_eq!(
            errors,
            vec![ValidationError::Duplicate {
                field: "diagnoses",
                value: "Flu".into()
            }]
        );
    }
}
