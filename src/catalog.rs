//! Static nutrient catalog
//!
//! Column and filter labels come from a JSON catalog bundled with the
//! application, loaded once and immutable for the process lifetime. Network
//! responses never mutate it. A catalog can also be loaded from a file on
//! disk, which is how tests exercise the parsing path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog JSON compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../assets/nutrients.json");

/// Errors that can occur when loading a nutrient catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog content is not a valid nutrient array
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One nutrient catalog entry
///
/// All fields are strings, matching the upstream catalog dump; `rank` is
/// numeric in practice but not guaranteed to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrient {
    /// Nutrient identifier, e.g. "1008"
    pub id: String,
    /// Display name, e.g. "Energy"
    pub name: String,
    /// Legacy nutrient number from the upstream database
    pub nutrient_nbr: String,
    /// Ordering value used for display grouping
    pub rank: String,
    /// Measurement unit, e.g. "KCAL"
    pub unit_name: String,
}

impl Nutrient {
    /// Numeric rank, when the catalog value parses as one
    pub fn rank_value(&self) -> Option<i64> {
        self.rank.parse().ok()
    }
}

/// Loads the catalog bundled with the application
///
/// The bundled file is compiled in, so a parse failure is a packaging defect;
/// it still surfaces as an error rather than a panic.
pub fn bundled() -> Result<Vec<Nutrient>, CatalogError> {
    Ok(serde_json::from_str(BUNDLED_CATALOG)?)
}

/// Loads a catalog from a JSON file on disk
pub fn from_file(path: &Path) -> Result<Vec<Nutrient>, CatalogError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
