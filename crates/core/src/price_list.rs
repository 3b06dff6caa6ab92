//! Price lists of non-doctor providers (pharmacy, lab, radiology).

use coverage_types::PriceListEntryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::eligibility::Restricted;
use crate::restriction::{validate_restriction, RestrictionSet};
use crate::validation::{require_non_negative, require_text};
use crate::{EngineError, EngineResult, ParseEnumError, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Pharmacy,
    Doctor,
    Lab,
    Radiology,
}

impl ProviderType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderType::Pharmacy => "pharmacy",
            ProviderType::Doctor => "doctor",
            ProviderType::Lab => "lab",
            ProviderType::Radiology => "radiology",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pharmacy" => Ok(ProviderType::Pharmacy),
            "doctor" => Ok(ProviderType::Doctor),
            "lab" => Ok(ProviderType::Lab),
            "radiology" => Ok(ProviderType::Radiology),
            other => Err(ParseEnumError::new("provider type", other)),
        }
    }
}

/// A priced service on a provider's price list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListEntry {
    pub id: PriceListEntryId,
    pub provider_type: ProviderType,
    pub service_name: String,
    pub service_code: String,
    pub price: Decimal,
    /// Pack size for pharmacy items.
    pub quantity: Option<u32>,
    pub restriction: RestrictionSet,
    /// Provider-type-specific free-form attributes (dosage form, sample type, modality, ...).
    pub service_details: BTreeMap<String, String>,
}

impl PriceListEntry {
    /// Price multiplied by quantity; entries without a quantity count once.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] when the product leaves the decimal range.
    pub fn line_total(&self) -> EngineResult<Decimal> {
        self.price
            .checked_mul(Decimal::from(self.quantity.unwrap_or(1)))
            .ok_or(EngineError::Overflow {
                operation: "line total",
            })
    }
}

impl Restricted for PriceListEntry {
    fn restriction(&self) -> &RestrictionSet {
        &self.restriction
    }
}

/// Keeps the entries of one provider type, in their original order.
pub fn entries_for_provider(
    entries: &[PriceListEntry],
    provider_type: ProviderType,
) -> Vec<&PriceListEntry> {
    entries
        .iter()
        .filter(|entry| entry.provider_type == provider_type)
        .collect()
}

pub fn validate_price_list_entry(entry: &PriceListEntry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require_text(&mut errors, "service_name", &entry.service_name);
    require_text(&mut errors, "service_code", &entry.service_code);
    require_non_negative(&mut errors, "price", entry.price);

    if let Some(quantity) = entry.quantity {
        if quantity == 0 {
            errors.push(ValidationError::QuantityNotPositive);
        }
        if entry.provider_type != ProviderType::Pharmacy {
            errors.push(ValidationError::QuantityNotAllowed);
        }
    }

    errors.extend(validate_restriction(&entry.restriction));
    errors
}
