//! Constants used throughout the coverage core crate.

/// Minor units applied to monetary results when no configuration overrides it (cents).
pub const DEFAULT_CURRENCY_MINOR_UNITS: u32 = 2;

/// Upper bound accepted for the configured currency scale.
pub const MAX_CURRENCY_MINOR_UNITS: u32 = 8;

/// Upper bound of a coverage percentage.
pub const MAX_COVERAGE_PERCENT: u32 = 100;
