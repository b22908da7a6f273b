//! Application configuration constants
//!
//! API endpoints, cache policy, pagination defaults and the static category
//! list and default nutrient selection used when the caller does not override
//! them.

use crate::catalog::Nutrient;

/// Base URL for the nutrition API
pub const BASE_URL: &str = "https://api.knyazev.site";

/// Path of the food list endpoint, relative to the base URL
pub const FOOD_LIST_PATH: &str = "/food/";

/// Path of the food item endpoint, relative to the base URL
pub const FOOD_ITEM_PATH: &str = "/food/item";

/// Timeout for network requests in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default time-to-live for cache entries in seconds
pub const CACHE_TTL_SECS: u64 = 300;

/// Maximum number of entries held by each response cache
pub const CACHE_CAPACITY: usize = 100;

/// Default page size used by the list endpoint
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// All food category identifiers known to the upstream database
///
/// The list endpoint has no "any category" wildcard; an unfiltered query is
/// expressed by sending every category explicitly.
pub const ALL_CATEGORIES: [&str; 5] = [
    "branded_food",
    "experimental_food",
    "foundation_food",
    "sr_legacy_food",
    "survey_fndds_food",
];

/// Default nutrient columns shown before the user picks their own selection
pub fn default_nutrients() -> Vec<Nutrient> {
    vec![
        Nutrient {
            id: "1008".to_string(),
            name: "Energy".to_string(),
            nutrient_nbr: "208".to_string(),
            rank: "300".to_string(),
            unit_name: "KCAL".to_string(),
        },
        Nutrient {
            id: "1003".to_string(),
            name: "Protein".to_string(),
            nutrient_nbr: "203".to_string(),
            rank: "600".to_string(),
            unit_name: "G".to_string(),
        },
        Nutrient {
            id: "1004".to_string(),
            name: "Total lipid (fat)".to_string(),
            nutrient_nbr: "204".to_string(),
            rank: "800".to_string(),
            unit_name: "G".to_string(),
        },
        Nutrient {
            id: "1005".to_string(),
            name: "Carbohydrate, by difference".to_string(),
            nutrient_nbr: "205".to_string(),
            rank: "1110".to_string(),
            unit_name: "G".to_string(),
        },
    ]
}
