//! Wire representation of restriction sets, shared by specializations and price lists.
//!
//! An omitted or `null` list means the dimension is unrestricted, exactly like an empty list.

use coverage_core::{Gender, RestrictionSet, SpecializationId};
use serde::{Deserialize, Serialize};

use crate::wire;
use crate::CatalogWireResult;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct RestrictionWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_genders: Option<Vec<Gender>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_specialization_ids: Option<Vec<String>>,
}

impl RestrictionWire {
    pub(crate) fn is_unrestricted(&self) -> bool {
        self.allowed_genders.as_ref().map_or(true, Vec::is_empty)
            && self.min_age.is_none()
            && self.max_age.is_none()
            && self.allowed_specialization_ids.as_ref().map_or(true, Vec::is_empty)
    }
}

pub(crate) fn wire_to_domain(
    wire: RestrictionWire,
    owner: &str,
) -> CatalogWireResult<RestrictionSet> {
    let field = format!("{owner}.restriction.allowed_specialization_ids");
    let allowed_specialization_ids = wire
        .allowed_specialization_ids
        .unwrap_or_default()
        .iter()
        .map(|id| wire::id::<SpecializationId>(id, &field))
        .collect::<CatalogWireResult<_>>()?;

    Ok(RestrictionSet {
        allowed_genders: wire.allowed_genders.unwrap_or_default().into_iter().collect(),
        min_age: wire.min_age,
        max_age: wire.max_age,
        allowed_specialization_ids,
    })
}

pub(crate) fn domain_to_wire(restriction: &RestrictionSet) -> RestrictionWire {
    let allowed_genders: Vec<Gender> = restriction.allowed_genders.iter().copied().collect();
    let allowed_specialization_ids: Vec<String> = restriction
        .allowed_specialization_ids
        .iter()
        .map(ToString::to_string)
        .collect();

    RestrictionWire {
        allowed_genders: (!allowed_genders.is_empty()).then_some(allowed_genders),
        min_age: restriction.min_age,
        max_age: restriction.max_age,
        allowed_specialization_ids: (!allowed_specialization_ids.is_empty())
            .then_some(allowed_specialization_ids),
    }
}
