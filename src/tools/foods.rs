//! Food reference MCP Tools
//!
//! Searching and extending the food database, and previewing portions.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::Database;
use crate::metrics::{scale_portion, FoodPortion, FoodReference};
use crate::models::{FoodItem, FoodItemCreate};

/// Maximum rows a search may return
pub const MAX_SEARCH_LIMIT: i64 = 200;

/// How a tool call identifies a food reference
#[derive(Debug, Clone)]
pub enum FoodSelector {
    Id(i64),
    Name(String),
}

impl FoodSelector {
    /// Build a selector from optional id/name parameters; the id wins if both
    /// are given
    pub fn from_params(food_id: Option<i64>, food_name: Option<String>) -> Result<Self, String> {
        match (food_id, food_name) {
            (Some(id), _) => Ok(FoodSelector::Id(id)),
            (None, Some(name)) if !name.trim().is_empty() => Ok(FoodSelector::Name(name)),
            _ => Err("Provide either food_id or food_name".to_string()),
        }
    }
}

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub items: Vec<FoodItem>,
    pub total: usize,
}

/// Response for add_food_reference
#[derive(Debug, Serialize)]
pub struct AddFoodResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// Look up the food a selector points at
pub(crate) fn resolve_food(conn: &Connection, selector: &FoodSelector) -> Result<FoodItem, String> {
    let found = match selector {
        FoodSelector::Id(id) => FoodItem::get_by_id(conn, *id),
        FoodSelector::Name(name) => FoodItem::get_by_name(conn, name),
    }
    .map_err(|e| format!("Failed to look up food: {}", e))?;

    found.ok_or_else(|| match selector {
        FoodSelector::Id(id) => format!("Food reference not found: id {}", id),
        FoodSelector::Name(name) => format!("Food reference not found: '{}'", name),
    })
}

/// Resolve a food and scale it to `grams`
pub(crate) fn portion_for(conn: &Connection, selector: &FoodSelector, grams: f64) -> Result<FoodPortion, String> {
    let food = resolve_food(conn, selector)?;
    scale_portion(&food.reference, grams).map_err(|e| e.to_string())
}

/// Search the food database by name; an empty query lists all foods
pub fn search_foods(db: &Database, query: &str, limit: i64) -> Result<SearchFoodsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let limit = limit.clamp(1, MAX_SEARCH_LIMIT);

    let items = FoodItem::search(&conn, query, limit)
        .map_err(|e| format!("Failed to search foods: {}", e))?;

    Ok(SearchFoodsResponse {
        total: items.len(),
        items,
    })
}

/// Add a food to the reference database
pub fn add_food_reference(db: &Database, data: FoodItemCreate) -> Result<AddFoodResponse, String> {
    if data.reference.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    data.reference.validate().map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    if FoodItem::get_by_name(&conn, &data.reference.name)
        .map_err(|e| format!("Failed to check for duplicates: {}", e))?
        .is_some()
    {
        return Err(format!("A food named '{}' already exists", data.reference.name.trim()));
    }

    let item = FoodItem::create(&conn, &data).map_err(|e| format!("Failed to add food: {}", e))?;
    tracing::info!(id = item.id, name = %item.reference.name, "Food reference added");

    Ok(AddFoodResponse {
        id: item.id,
        name: item.reference.name,
        created_at: item.created_at,
    })
}

/// Preview the nutrients of a portion without logging it
pub fn calculate_portion(db: &Database, selector: FoodSelector, grams: f64) -> Result<FoodPortion, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    portion_for(&conn, &selector, grams)
}

/// Scale caller-supplied reference values, no database involved
pub fn calculate_custom_portion(reference: &FoodReference, grams: f64) -> Result<FoodPortion, String> {
    scale_portion(reference, grams).map_err(|e| e.to_string())
}
