//! Common test utilities for integration tests.
//!
//! Provides helper functions for loading fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

/// Absolute path of a file in the `tests/fixtures/` directory.
pub fn fixture_path(path: &str) -> PathBuf {
    let mut fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fixture_path.push("tests");
    fixture_path.push("fixtures");
    fixture_path.push(path);
    fixture_path
}

/// Loads a fixture from the `tests/fixtures/` directory.
///
/// ## Panics
///
/// Panics if the fixture file cannot be read or does not exist.
pub fn load_fixture(path: &str) -> String {
    let fixture_path = fixture_path(path);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {:?}: {}",
            fixture_path.display(),
            e
        )
    })
}

/// Extracts the value of the first `id='...'` attribute in `html`.
pub fn first_single_quoted_id(html: &str) -> String {
    html.split("id='")
        .nth(1)
        .and_then(|rest| rest.split('\'').next())
        .unwrap_or_else(|| panic!("No id attribute in {html}"))
        .to_string()
}
