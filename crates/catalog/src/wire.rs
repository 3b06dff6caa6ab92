//! Parsing helpers shared by the wire modules.

use chrono::NaiveDate;
use coverage_types::{IdError, NonEmptyText};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::str::FromStr;

use crate::{CatalogWireError, CatalogWireResult};

/// Deserialize `yaml_text` into `T`, reporting the failing path on schema mismatch.
///
/// `what` names the document in error messages (for example "Price list").
pub(crate) fn parse_yaml<T: DeserializeOwned>(yaml_text: &str, what: &str) -> CatalogWireResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    serde_path_to_error::deserialize::<_, T>(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        CatalogWireError::Translation(format!("{what} schema mismatch at {path}: {source}"))
    })
}

pub(crate) fn id<T>(value: &str, field: &str) -> CatalogWireResult<T>
where
    T: FromStr<Err = IdError>,
{
    value
        .parse::<T>()
        .map_err(|_| CatalogWireError::InvalidUuid(format!("Invalid UUID in {field}: {value}")))
}

pub(crate) fn decimal(value: &str, field: &str) -> CatalogWireResult<Decimal> {
    Decimal::from_str_exact(value.trim()).map_err(|e| {
        CatalogWireError::InvalidInput(format!("{field} is not a decimal amount ('{value}'): {e}"))
    })
}

pub(crate) fn date(value: &str, field: &str) -> CatalogWireResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CatalogWireError::InvalidInput(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

pub(crate) fn text(value: &str, field: &str) -> CatalogWireResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| CatalogWireError::InvalidInput(format!("{field} cannot be empty")))
}

pub(crate) fn texts(values: &[String], field: &str) -> CatalogWireResult<Vec<NonEmptyText>> {
    values.iter().map(|value| text(value, field)).collect()
}
