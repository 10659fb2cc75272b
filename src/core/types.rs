//! Strongly-typed wrappers for catalog concepts
//!
//! Set abbreviations and card names travel through every stage of the import.
//! Wrapping them keeps a set code from being handed where a set name is
//! expected, which the raw catalog makes very easy to do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Set abbreviation (e.g., "THS", "M15", "C14")
///
/// This is the identity of a [`CardSet`](crate::core::CardSet).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetCode(String);

impl SetCode {
    /// Sentinel assigned to records whose set cannot be resolved
    pub const UNKNOWN: &'static str = "UNKNOWN";

    pub fn new(s: impl Into<String>) -> Self {
        SetCode(s.into())
    }

    pub fn unknown() -> Self {
        SetCode(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for SetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SetCode {
    fn from(s: String) -> Self {
        SetCode(s)
    }
}

impl From<&str> for SetCode {
    fn from(s: &str) -> Self {
        SetCode(s.to_string())
    }
}

/// Catalog value that may arrive either as a number or as a string
///
/// The upstream catalog is not consistent about `id` and `setNumber`, so both
/// shapes are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValue::Number(n) => write!(f, "{n}"),
            CatalogValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CatalogValue {
    fn from(n: i64) -> Self {
        CatalogValue::Number(n)
    }
}

impl From<&str> for CatalogValue {
    fn from(s: &str) -> Self {
        CatalogValue::Text(s.to_string())
    }
}
