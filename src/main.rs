//! nutriview - Browse the FoodData Central nutrition database
//!
//! A command-line viewer backed by a cached HTTP repository: list foods with
//! paging, sorting, category filters and user-selected nutrient columns, or
//! show the full nutrient breakdown for a single food.

use clap::Parser;

use nutriview::cli::{self, Cli, Command};
use nutriview::data::{FoodDetailResponse, FoodListResponse, NutrientGroup};
use nutriview::repository::FoodRepository;
use nutriview::{catalog, config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "nutriview=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let repository = FoodRepository::new();

    match cli.command {
        Command::List {
            page,
            sort,
            order,
            categories,
            search,
            nutrients,
        } => {
            let query = cli::build_list_query(page, sort, &order, categories, search, nutrients)?;
            let answer = repository.list_foods(&query).await?;
            print_food_list(&answer, &query.nutrients, query.page);
        }
        Command::Show { fdc_id } => {
            let item = repository.get_food_detail(fdc_id).await?;
            print_food_detail(&item);
        }
        Command::Nutrients => {
            for nutrient in catalog::bundled()? {
                println!(
                    "{:>6}  {:<45} {:<5} rank {}",
                    nutrient.id, nutrient.name, nutrient.unit_name, nutrient.rank
                );
            }
        }
    }

    Ok(())
}

/// Prints one page of list results with the requested nutrient columns
fn print_food_list(answer: &FoodListResponse, nutrient_ids: &[String], page: u32) {
    let pages = (answer.count as f64 / f64::from(config::DEFAULT_PAGE_SIZE)).ceil() as i64;
    println!("{} foods (page {} of {})", answer.count, page, pages.max(1));

    for food in &answer.food {
        let mut columns = String::new();
        for id in nutrient_ids {
            let key = format!("n{}", id);
            match food.nutrient_values.get(&key) {
                Some(amount) => columns.push_str(&format!("  {}={}", key, amount)),
                None => columns.push_str(&format!("  {}=-", key)),
            }
        }
        println!("{:>8}  {}{}", food.fdc_id, food.description, columns);
    }
}

/// Prints a detail response bucketed into the rank-based display sections
fn print_food_detail(item: &FoodDetailResponse) {
    println!("{}", item.common.description);
    println!("fdc_id: {}", item.common.fdc_id);
    if let Some(date) = &item.common.publication_date {
        println!("published: {}", date);
    }

    for group in [
        NutrientGroup::Proximates,
        NutrientGroup::Minerals,
        NutrientGroup::VitaminsAndOther,
    ] {
        let rows: Vec<_> = item.nutrients_in(group).collect();
        if rows.is_empty() {
            continue;
        }
        println!("\n{}", group.title());
        for nutrient in rows {
            let name = nutrient.name.as_deref().unwrap_or("");
            let unit = nutrient.unit_name.as_deref().unwrap_or("");
            // Negative readings are upstream noise; clamp to zero for display
            let amount = nutrient.amount.unwrap_or(0.0).max(0.0);
            println!("  {:<45} {:>10.2} {}", name, amount, unit);
        }
    }
}
