//! Core data models for the nutrition viewer
//!
//! This module contains the types exchanged with the food API: list rows with
//! their dynamic nutrient columns, the full per-item nutrient breakdown, and
//! the query tuple that parameterizes list requests.

mod decode;

use serde::Deserialize;
use std::collections::HashMap;

/// One row in a food list result
///
/// Nutrient amounts arrive as top-level JSON keys of the form `n<nutrientId>`
/// and the key set follows the user's nutrient selection, so this type
/// carries its own `Deserialize` impl (see `decode`). `nutrient_values` only
/// ever contains keys that were present in the payload; a missing key means
/// the server had no value for that nutrient, not zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSummary {
    /// Human-readable food name
    pub description: String,
    /// Identifier in the upstream FoodData Central database, stable forever
    pub fdc_id: i64,
    /// Row identity within one response batch; not globally unique across pages
    pub id: i64,
    /// Amount per 100 g, keyed by `"n" + nutrientId`
    pub nutrient_values: HashMap<String, f64>,
}

/// Wire shape of the list endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct FoodListResponse {
    /// Rows for the requested page
    pub food: Vec<FoodSummary>,
    /// Total number of foods matching the query, for pagination
    pub count: i64,
}

/// Wire shape of the item endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct FoodDetailResponse {
    /// Identity and publication metadata
    pub common: FoodCommon,
    /// Full nutrient breakdown, in response order
    pub nutrients: Vec<FoodNutrient>,
}

/// Identity block of a food detail response
#[derive(Debug, Clone, Deserialize)]
pub struct FoodCommon {
    /// Identifier in the upstream FoodData Central database
    pub fdc_id: i64,
    /// Human-readable food name
    pub description: String,
    /// Upstream publication date; the wire format is not guaranteed parseable
    #[serde(default)]
    pub publication_date: Option<String>,
}

/// One nutrient row of a food detail response
#[derive(Debug, Clone, Deserialize)]
pub struct FoodNutrient {
    /// Nutrient identifier
    pub id: i64,
    /// Nutrient name, when the upstream record has one
    #[serde(default)]
    pub name: Option<String>,
    /// Measurement unit, e.g. "G" or "KCAL"
    #[serde(default)]
    pub unit_name: Option<String>,
    /// Ordering value used to bucket the nutrient into a display group
    #[serde(default)]
    pub rank: Option<i64>,
    /// Amount per 100 g
    #[serde(default)]
    pub amount: Option<f64>,
}

impl FoodDetailResponse {
    /// Nutrients belonging to the given display group, in response order
    pub fn nutrients_in(&self, group: NutrientGroup) -> impl Iterator<Item = &FoodNutrient> + '_ {
        self.nutrients
            .iter()
            .filter(move |n| NutrientGroup::from_rank(n.rank) == Some(group))
    }
}

/// Ranks below this bound are proximates
const PROXIMATES_RANK_LIMIT: i64 = 5200;
/// Ranks below this bound (and at or above the proximates limit) are minerals
const MINERALS_RANK_LIMIT: i64 = 6250;
/// Ranks at or above this bound belong to no display group
const GROUPED_RANK_LIMIT: i64 = 9600;

/// Display grouping for detail nutrients, bucketed by rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientGroup {
    Proximates,
    Minerals,
    VitaminsAndOther,
}

impl NutrientGroup {
    /// Maps a nutrient rank to its display group
    ///
    /// Returns `None` for ranks of 9600 and above and for missing ranks;
    /// those nutrients are excluded from all three sections.
    pub fn from_rank(rank: Option<i64>) -> Option<Self> {
        let rank = rank?;
        if rank < PROXIMATES_RANK_LIMIT {
            Some(Self::Proximates)
        } else if rank < MINERALS_RANK_LIMIT {
            Some(Self::Minerals)
        } else if rank < GROUPED_RANK_LIMIT {
            Some(Self::VitaminsAndOther)
        } else {
            None
        }
    }

    /// Section heading for the group
    pub fn title(&self) -> &'static str {
        match self {
            Self::Proximates => "Proximates",
            Self::Minerals => "Minerals",
            Self::VitaminsAndOther => "Vitamins and Other Components",
        }
    }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire representation used in request bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses the wire representation; returns `None` for anything else
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Parameter tuple for one list request
///
/// Constructed by the caller per request and never persisted. An empty
/// `types` list is the "all categories" sentinel; the repository expands it
/// to the full enumerated category list before building the request body and
/// the cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodQuery {
    /// Page number, starting at 1
    pub page: u32,
    /// Field the results are sorted by
    pub sort: String,
    /// Sort direction
    pub sort_order: SortOrder,
    /// Category filter; empty means all categories
    pub types: Vec<String>,
    /// Free-text search over food descriptions
    pub search: String,
    /// Nutrient ids to include as columns, in selection order
    pub nutrients: Vec<String>,
}

impl Default for FoodQuery {
    fn default() -> Self {
        Self {
            page: 1,
            sort: "id".to_string(),
            sort_order: SortOrder::Desc,
            types: Vec::new(),
            search: String::new(),
            nutrients: Vec::new(),
        }
    }
}
