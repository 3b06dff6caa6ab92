use chrono::NaiveDate;
use coverage_types::{PolicyId, SpecializationId};
use rust_decimal::Decimal;

/// A structural violation of a catalog entity invariant.
///
/// Validators never stop at the first problem; they return every violation they find so the
/// caller can report them together.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: Decimal },
    #[error("coverage_percent must be between 0 and 100 (got {0})")]
    PercentOutOfRange(Decimal),
    #[error("min_age ({min}) is greater than max_age ({max})")]
    AgeRange { min: u32, max: u32 },
    #[error("start_date ({start}) is after end_date ({end})")]
    DateRange { start: NaiveDate, end: NaiveDate },
    #[error("diagnosis '{0}' is mapped but not listed in diagnoses")]
    UnknownDiagnosis(String),
    #[error("treatment '{treatment}' for diagnosis '{diagnosis}' is not listed in treatment_plans")]
    UnknownTreatment { diagnosis: String, treatment: String },
    #[error("{field} contains '{value}' more than once")]
    Duplicate { field: &'static str, value: String },
    #[error("quantity must be greater than zero")]
    QuantityNotPositive,
    #[error("quantity is only allowed on pharmacy price list entries")]
    QuantityNotAllowed,
    #[error("coverage rule belongs to policy {found}, expected {expected}")]
    ForeignCoverageRule { expected: PolicyId, found: PolicyId },
    #[error("policy_no '{0}' is used by more than one policy")]
    DuplicatePolicyNumber(String),
}

/// Faults raised when a caller hands the engine input that should have been rejected by
/// validation first. These are programming errors, distinct from [`ValidationError`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("coverage_percent {0} is outside 0..=100; validate the coverage rule first")]
    CoveragePercentOutOfRange(Decimal),
    #[error("{field} must not be negative (got {value}); validate inputs first")]
    NegativeAmount { field: &'static str, value: Decimal },
    #[error("{operation} overflowed the decimal range")]
    Overflow { operation: &'static str },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// An enumeration value that could not be parsed from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Errors returned by catalog providers.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("policy not found: {0}")]
    PolicyNotFound(PolicyId),
    #[error("specialization not found: {0}")]
    SpecializationNotFound(SpecializationId),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
