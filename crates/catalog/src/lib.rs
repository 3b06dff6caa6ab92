//! YAML wire/boundary support for coverage catalogs.
//!
//! This crate provides **wire models** and **format/translation helpers** for the on-disk catalog
//! the coverage engine evaluates against:
//! - `specializations.yaml`: doctor specializations with restrictions and diagnosis maps
//! - `price_list.yaml`: priced pharmacy, lab and radiology services
//! - `policies.yaml`: policies with their owned coverage rules
//!
//! Domain meaning lives in `coverage-core`. This crate handles strict parsing, rendering and
//! translation only; it does not validate business invariants (see
//! [`coverage_core::CatalogSnapshot::validate`]).

pub mod constants;
pub mod loader;
pub mod policy;
pub mod price_list;
mod restriction;
pub mod specialization;
mod wire;

// Re-export facades
pub use loader::load_catalog;
pub use policy::Policies;
pub use price_list::PriceList;
pub use specialization::Specializations;

/// Errors returned by the `coverage-catalog` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum CatalogWireError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

/// Type alias for Results that can fail with a [`CatalogWireError`].
pub type CatalogWireResult<T> = Result<T, CatalogWireError>;
