//! Error code catalog and lookup.
//!
//! Maps error codes (like "L-2-2") to their metadata. The catalog lives in
//! `error_catalog.json` next to this crate's manifest and is embedded at
//! compile time.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name ("scanner" or "tree")
    pub subsystem: String,

    /// Short title for the error
    pub title: String,

    /// Longer explanation shown by `laxml explain`
    pub message_template: String,

    /// When this error was introduced (version)
    pub since_version: String,
}

/// Global error catalog, loaded lazily from the embedded JSON.
///
/// # Panics
///
/// Panics on first access if the embedded JSON is invalid.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in laxml")
});

/// Look up error code information.
///
/// ```
/// use laxml_error_reporting::catalog::get_error_info;
///
/// let info = get_error_info("L-2-2").unwrap();
/// assert_eq!(info.title, "Unclosed Tag");
/// ```
pub fn get_error_info(code: &str) -> Option<&'static ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

/// Get the subsystem name for an error code.
pub fn get_subsystem(code: &str) -> Option<&'static str> {
    ERROR_CATALOG.get(code).map(|info| info.subsystem.as_str())
}

/// All catalog codes in sorted order.
pub fn all_codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = ERROR_CATALOG.keys().map(String::as_str).collect();
    codes.sort_unstable();
    codes
}
