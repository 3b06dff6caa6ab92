//! Price list wire models and translation helpers.
//!
//! `price_list.yaml` holds the priced pharmacy, lab and radiology services. Each entry may carry
//! a restriction set and free-form service details (for example dosage form or body region).

use coverage_core::{PriceListEntry, PriceListEntryId, ProviderType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::restriction::{self, RestrictionWire};
use crate::{wire, CatalogWireError, CatalogWireResult};

/// Price list operations.
///
/// This is a zero-sized type used for namespacing price list file operations.
pub struct PriceList;

impl PriceList {
    /// Parse price list entries from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogWireError`] if the YAML does not match the wire schema, an identifier is
    /// not a UUID, or the price is not a decimal amount.
    pub fn parse(yaml_text: &str) -> CatalogWireResult<Vec<PriceListEntry>> {
        let wire: Vec<PriceListEntryWire> = wire::parse_yaml(yaml_text, "Price list")?;

        wire.into_iter()
            .enumerate()
            .map(|(index, entry)| wire_to_domain(entry, index))
            .collect()
    }

    /// Render price list entries as YAML text.
    pub fn render(entries: &[PriceListEntry]) -> CatalogWireResult<String> {
        let wire: Vec<PriceListEntryWire> = entries.iter().map(domain_to_wire).collect();
        serde_yaml::to_string(&wire).map_err(|e| {
            CatalogWireError::Translation(format!("Failed to serialize price list: {e}"))
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PriceListEntryWire {
    pub id: String,
    pub provider_type: ProviderType,
    pub service_name: String,
    #[serde(default)]
    pub service_code: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "RestrictionWire::is_unrestricted")]
    pub restriction: RestrictionWire,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_details: BTreeMap<String, String>,
}

fn wire_to_domain(wire: PriceListEntryWire, index: usize) -> CatalogWireResult<PriceListEntry> {
    let at = format!("price_list[{index}]");

    // Names are validated by the engine so that blank ones show up as catalog violations
    // rather than load failures.
    Ok(PriceListEntry {
        id: wire::id::<PriceListEntryId>(&wire.id, &format!("{at}.id"))?,
        provider_type: wire.provider_type,
        service_name: wire.service_name,
        service_code: wire.service_code,
        price: wire::decimal(&wire.price, &format!("{at}.price"))?,
        quantity: wire.quantity,
        restriction: restriction::wire_to_domain(wire.restriction, &at)?,
        service_details: wire.service_details,
    })
}

fn domain_to_wire(entry: &PriceListEntry) -> PriceListEntryWire {
    PriceListEntryWire {
        id: entry.id.to_string(),
        provider_type: entry.provider_type,
        service_name: entry.service_name.clone(),
        service_code: entry.service_code.clone(),
        price: entry.price.to_string(),
        quantity: entry.quantity,
        restriction: restriction::domain_to_wire(&entry.restriction),
        service_details: entry.service_details.clone(),
    }
}
