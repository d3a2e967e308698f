//! Exercise catalog
//!
//! A small insertion-ordered set of known exercise names, seeded with
//! defaults on first use. Append-only: no delete or rename operation exists.
//! Persistence lives with the record store backend (table or flat file).

use crate::{Error, Result};
use serde::Serialize;

/// Seed list written the first time a catalog is loaded
pub const DEFAULT_EXERCISES: &[&str] = &[
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
    "Barbell Row",
    "Pull Up",
];

/// Outcome of a catalog add operation
///
/// `AlreadyExists` is a warning, not an error: the catalog is unchanged and
/// the caller may still reference the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogAdd {
    Added,
    AlreadyExists,
}

/// Normalize a catalog name: trim whitespace, reject empty
///
/// Duplicate detection elsewhere is case-sensitive exact match, so no case
/// folding happens here.
pub fn normalize_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("exercise name must not be empty".to_string()));
    }
    Ok(name.to_string())
}
