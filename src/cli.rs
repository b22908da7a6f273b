//! Command-line interface parsing for nutriview
//!
//! This module handles parsing of CLI arguments using clap and translating
//! them into the repository's query types.

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::data::{FoodQuery, SortOrder};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified sort order is not recognized
    #[error("Invalid sort order: '{0}'. Valid orders: asc, desc")]
    InvalidSortOrder(String),
}

/// nutriview - Browse the FoodData Central nutrition database
#[derive(Parser, Debug)]
#[command(name = "nutriview")]
#[command(about = "Browse foods and nutrient values from the FoodData Central database")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List foods with paging, sorting, filtering and nutrient columns
    List {
        /// Page number to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Field to sort by
        #[arg(long, default_value = "id")]
        sort: String,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        order: String,

        /// Category filter; repeat for several, omit for all categories
        #[arg(long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Free-text search over food descriptions
        #[arg(long, default_value = "")]
        search: String,

        /// Nutrient id column; repeat for several, omit for the default set
        #[arg(long = "nutrient", value_name = "ID")]
        nutrients: Vec<String>,
    },

    /// Show the full nutrient breakdown for one food
    Show {
        /// FoodData Central id of the food
        fdc_id: i64,
    },

    /// Print the bundled nutrient catalog
    Nutrients,
}

/// Parses a sort order string argument into a SortOrder.
///
/// # Arguments
/// * `s` - The sort order string from CLI
///
/// # Returns
/// * `Ok(SortOrder)` if the string is "asc" or "desc"
/// * `Err(CliError::InvalidSortOrder)` otherwise
pub fn parse_sort_order(s: &str) -> Result<SortOrder, CliError> {
    SortOrder::from_str(s).ok_or_else(|| CliError::InvalidSortOrder(s.to_string()))
}

/// Builds a repository query from parsed `list` arguments.
///
/// An empty nutrient selection falls back to the default nutrient columns;
/// an empty category selection is kept as the all-categories sentinel, which
/// the repository expands.
pub fn build_list_query(
    page: u32,
    sort: String,
    order: &str,
    categories: Vec<String>,
    search: String,
    nutrients: Vec<String>,
) -> Result<FoodQuery, CliError> {
    let sort_order = parse_sort_order(order)?;
    let nutrients = if nutrients.is_empty() {
        crate::config::default_nutrients()
            .into_iter()
            .map(|n| n.id)
            .collect()
    } else {
        nutrients
    };
    Ok(FoodQuery {
        page,
        sort,
        sort_order,
        types: categories,
        search,
        nutrients,
    })
}
