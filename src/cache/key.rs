//! Deterministic cache keys derived from query parameters
//!
//! The same logical query must always map to the same key, and meaningfully
//! different queries must map to different keys: a collision would silently
//! serve cached rows for the wrong query. List and detail keys live in
//! distinct prefix namespaces so they can never collide with each other.

use crate::data::FoodQuery;

/// Builds the cache key for a list query
///
/// Every query field participates in the key. Callers expand the
/// all-categories sentinel before building the key, so the sentinel and the
/// explicit full category list share one cache slot.
pub fn list_key(query: &FoodQuery) -> String {
    format!(
        "foods_{}_{}_{}_{}_{}_{}",
        query.page,
        query.sort,
        query.sort_order.as_str(),
        query.types.join(","),
        query.search,
        query.nutrients.join(","),
    )
}

/// Builds the cache key for a detail query, scoped by the food's FDC id
pub fn detail_key(fdc_id: i64) -> String {
    format!("food_item_{}", fdc_id)
}
