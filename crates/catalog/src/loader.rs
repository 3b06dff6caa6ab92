//! Loading a catalog directory into a [`CatalogSnapshot`].
//!
//! A catalog directory contains up to three files (see [`crate::constants`]). A missing file is
//! treated as an empty list so partial catalogs (for example a pharmacy-only price list) load.

use coverage_core::CatalogSnapshot;
use std::fs;
use std::path::Path;

use crate::constants::{POLICIES_FILENAME, PRICE_LIST_FILENAME, SPECIALIZATIONS_FILENAME};
use crate::{CatalogWireError, CatalogWireResult, Policies, PriceList, Specializations};

/// Reads and parses every catalog file under `dir`.
///
/// The snapshot is not validated; call [`CatalogSnapshot::validate`] on the result.
///
/// # Errors
///
/// Returns [`CatalogWireError::InvalidInput`] if `dir` is not a directory, and any read or parse
/// error of the individual files otherwise.
pub fn load_catalog(dir: &Path) -> CatalogWireResult<CatalogSnapshot> {
    if !dir.is_dir() {
        return Err(CatalogWireError::InvalidInput(format!(
            "catalog directory does not exist: {}",
            dir.display()
        )));
    }

    let specializations = match read_optional(dir, SPECIALIZATIONS_FILENAME)? {
        Some(text) => Specializations::parse(&text)?,
        None => Vec::new(),
    };
    let price_list = match read_optional(dir, PRICE_LIST_FILENAME)? {
        Some(text) => PriceList::parse(&text)?,
        None => Vec::new(),
    };
    let policies = match read_optional(dir, POLICIES_FILENAME)? {
        Some(text) => Policies::parse(&text)?,
        None => Vec::new(),
    };

    tracing::debug!(
        dir = %dir.display(),
        specializations = specializations.len(),
        price_list_entries = price_list.len(),
        policies = policies.len(),
        "catalog loaded"
    );

    Ok(CatalogSnapshot::new(specializations, price_list, policies))
}

fn read_optional(dir: &Path, filename: &str) -> CatalogWireResult<Option<String>> {
    let path = dir.join(filename);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "catalog file absent, using empty list");
        return Ok(None);
    }

    let text = fs::read_to_string(&path)?;
    // An empty file deserializes as YAML null rather than an empty sequence.
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SPECIALIZATIONS: &str = r#"- id: "a4f91c6d-3b2e-4c5f-9d7a-1e8b6c0a9f12"
  display_name: Cardiology
  consultation_price: "150"
  diagnoses: [Hypertension]
  treatment_plans: [ACE inhibitor]
  diagnosis_treatment_map:
    Hypertension: [ACE inhibitor]
"#;

    const POLICIES: &str = r#"- id: "5d1e7a9c-1b2f-4c3d-8e4f-6a7b8c9d0e1f"
  policy_no: P-1
  name: Basic
  start_date: "2024-01-01"
  end_date: "2024-12-31"
  status: active
"#;

    #[test]
    fn loads_present_files_and_defaults_missing_ones() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join(SPECIALIZATIONS_FILENAME), SPECIALIZATIONS)
            .expect("write specializations");
        fs::write(temp_dir.path().join(POLICIES_FILENAME), POLICIES).expect("write policies");

        let snapshot = load_catalog(temp_dir.path()).expect("load catalog");

        assert_eq!(snapshot.specializations().len(), 1);
        assert!(snapshot.price_list().is_empty());
        assert!(snapshot.find_policy_by_number("P-1").is_some());
        assert!(snapshot.validate().is_empty());
    }

    #[test]
    fn empty_file_is_an_empty_list() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join(PRICE_LIST_FILENAME), "\n").expect("write price list");

        let snapshot = load_catalog(temp_dir.path()).expect("load catalog");
        assert!(snapshot.price_list().is_empty());
    }

    #[test]
    fn missing_directory_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("nope");

        let err = load_catalog(&missing).expect_err("missing dir");
        assert!(matches!(err, CatalogWireError::InvalidInput(msg) if msg.contains("nope")));
    }

    #[test]
    fn parse_errors_propagate() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join(POLICIES_FILENAME), "- id: 1\n  unexpected: true\n")
            .expect("write policies");

        let err = load_catalog(temp_dir.path()).expect_err("bad policies");
        assert!(matches!(err, CatalogWireError::Translation(msg) if msg.contains("Policies")));
    }
}
