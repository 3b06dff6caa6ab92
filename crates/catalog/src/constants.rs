//! File names of a catalog directory.

/// Filename for the doctor specialization catalog.
pub const SPECIALIZATIONS_FILENAME: &str = "specializations.yaml";

/// Filename for the pharmacy/lab/radiology price list.
pub const PRICE_LIST_FILENAME: &str = "price_list.yaml";

/// Filename for policies and their coverage rules.
pub const POLICIES_FILENAME: &str = "policies.yaml";
