//! FitTrack MCP Server Implementation
//!
//! Implements the MCP server with all FitTrack tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::metrics::FoodReference;
use crate::models::FoodItemCreate;
use crate::tools::dashboard;
use crate::tools::foods::{self, FoodSelector};
use crate::tools::logs;
use crate::tools::profile::{self, ProfileChanges, ProfileInput};
use crate::tools::status::StatusTracker;

/// FitTrack MCP Service
#[derive(Clone)]
pub struct FitTrackService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<FitTrackService>,
}

impl FitTrackService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool result as pretty JSON text
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Serialize an optional result, reporting `None` as an error body
fn json_or_not_found<T: Serialize>(value: Option<T>, what: &str, key: &str) -> Result<CallToolResult, McpError> {
    match value {
        Some(v) => json_result(&v),
        None => json_result(&serde_json::json!({ "error": format!("{} not found", what), "key": key })),
    }
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// "male" or "female"
    pub gender: String,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Goal: lose, maintain, or gain (default maintain)
    pub goal: Option<String>,
    /// Daily water target in ml (default 2000)
    pub daily_water_target: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
    pub daily_water_target: Option<i64>,
}

// ============================================================================
// Food Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    /// Part of the food name; empty lists all foods
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

fn default_search_limit() -> i64 { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodReferenceParams {
    pub name: String,
    pub kcal_per_100g: f64,
    #[serde(default)]
    pub proteins_per_100g: f64,
    #[serde(default)]
    pub carbs_per_100g: f64,
    #[serde(default)]
    pub fats_per_100g: f64,
    /// Free text, e.g. "B6, C"
    pub vitamins: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PortionParams {
    /// Food reference ID (takes precedence over food_name)
    pub food_id: Option<i64>,
    /// Exact food name, case-insensitive
    pub food_name: Option<String>,
    /// Grams eaten (must be > 0)
    pub grams: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleCustomPortionParams {
    pub name: String,
    pub kcal_per_100g: f64,
    pub proteins_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fats_per_100g: f64,
    pub grams: f64,
}

// ============================================================================
// Log Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    pub food_id: Option<i64>,
    pub food_name: Option<String>,
    pub grams: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveFoodLogParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Complete list of portions for the day; replaces existing entries
    pub entries: Vec<PortionParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogWaterParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Amount in milliliters
    pub amount_ml: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogSleepParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Hours slept (0-24)
    pub hours: f64,
    /// poor, fair, good, or excellent
    pub quality: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMoodParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// sad, neutral, happy, or excited
    pub mood: String,
    pub notes: Option<String>,
}

// ============================================================================
// Metric Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyBmiParams {
    pub bmi: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GoalProgressParams {
    pub consumed: f64,
    pub goal: f64,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl FitTrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitTrack service including build info, database status, and process information")]
    async fn fittrack_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        json_result(&status)
    }

    #[tool(description = "Get step-by-step instructions for logging food, water, sleep and mood. Call this when starting a logging session.")]
    fn logging_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LOGGING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LOGGING_INSTRUCTIONS)]))
    }

    // --- Profile ---

    #[tool(description = "Get the user's profile with BMI, BMI category and daily calorie target")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = profile::get_profile(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_or_not_found(result, "Profile", "profile")
    }

    #[tool(description = "Create or replace the profile. BMI and daily calorie target are computed automatically.")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let input = ProfileInput {
            name: p.name, age: p.age, gender: p.gender, height_cm: p.height_cm,
            weight_kg: p.weight_kg, goal: p.goal, daily_water_target: p.daily_water_target,
        };
        let result = profile::set_profile(&self.database, input).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Update selected profile fields. Derived values are recomputed.")]
    fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let changes = ProfileChanges {
            name: p.name, age: p.age, gender: p.gender, height_cm: p.height_cm,
            weight_kg: p.weight_kg, goal: p.goal, daily_water_target: p.daily_water_target,
        };
        let result = profile::update_profile(&self.database, changes).map_err(|e| McpError::internal_error(e, None))?;
        json_or_not_found(result, "Profile", "profile")
    }

    // --- Foods ---

    #[tool(description = "Search the food database by name. Values are per 100g.")]
    fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::search_foods(&self.database, &p.query, p.limit).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Add a food to the database with nutrient values per 100g")]
    fn add_food_reference(&self, Parameters(p): Parameters<AddFoodReferenceParams>) -> Result<CallToolResult, McpError> {
        let data = FoodItemCreate {
            reference: FoodReference {
                name: p.name,
                kcal_per_100g: p.kcal_per_100g,
                proteins_per_100g: p.proteins_per_100g,
                carbs_per_100g: p.carbs_per_100g,
                fats_per_100g: p.fats_per_100g,
            },
            vitamins: p.vitamins,
        };
        let result = foods::add_food_reference(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Calculate kcal and macros for a gram amount of a stored food, without logging it")]
    fn calculate_portion(&self, Parameters(p): Parameters<PortionParams>) -> Result<CallToolResult, McpError> {
        let selector = FoodSelector::from_params(p.food_id, p.food_name).map_err(|e| McpError::invalid_params(e, None))?;
        let result = foods::calculate_portion(&self.database, selector, p.grams).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Calculate kcal and macros for a gram amount of a food given its per-100g values directly")]
    fn scale_custom_portion(&self, Parameters(p): Parameters<ScaleCustomPortionParams>) -> Result<CallToolResult, McpError> {
        let reference = FoodReference {
            name: p.name,
            kcal_per_100g: p.kcal_per_100g,
            proteins_per_100g: p.proteins_per_100g,
            carbs_per_100g: p.carbs_per_100g,
            fats_per_100g: p.fats_per_100g,
        };
        let result = foods::calculate_custom_portion(&reference, p.grams).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Food Logs ---

    #[tool(description = "Log grams of a stored food for a date. Adds to the day's existing entries.")]
    fn log_food(&self, Parameters(p): Parameters<LogFoodParams>) -> Result<CallToolResult, McpError> {
        let selector = FoodSelector::from_params(p.food_id, p.food_name).map_err(|e| McpError::invalid_params(e, None))?;
        let result = logs::log_food(&self.database, &p.date, selector, p.grams).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Replace all food entries for a date. Nothing is saved if any entry is invalid.")]
    fn save_food_log(&self, Parameters(p): Parameters<SaveFoodLogParams>) -> Result<CallToolResult, McpError> {
        let items = p
            .entries
            .into_iter()
            .map(|e| FoodSelector::from_params(e.food_id, e.food_name).map(|s| (s, e.grams)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result = logs::save_food_log(&self.database, &p.date, items).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the food log for a date with entries and kcal/macro totals")]
    fn get_food_log(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = logs::get_food_log(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        json_or_not_found(result, "Food log", &p.date)
    }

    // --- Water ---

    #[tool(description = "Add a water intake in ml for a date. Intakes accumulate through the day.")]
    fn log_water(&self, Parameters(p): Parameters<LogWaterParams>) -> Result<CallToolResult, McpError> {
        let result = logs::log_water(&self.database, &p.date, p.amount_ml).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get water intake, goal and progress for a date")]
    fn get_water_log(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = logs::get_water_log(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Sleep & Mood ---

    #[tool(description = "Record sleep hours and quality for a date (replaces any earlier entry)")]
    fn log_sleep(&self, Parameters(p): Parameters<LogSleepParams>) -> Result<CallToolResult, McpError> {
        let result = logs::log_sleep(&self.database, &p.date, p.hours, &p.quality, p.notes)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the sleep log for a date")]
    fn get_sleep_log(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = logs::get_sleep_log(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        json_or_not_found(result, "Sleep log", &p.date)
    }

    #[tool(description = "Record the mood for a date (replaces any earlier entry)")]
    fn log_mood(&self, Parameters(p): Parameters<LogMoodParams>) -> Result<CallToolResult, McpError> {
        let result = logs::log_mood(&self.database, &p.date, &p.mood, p.notes)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the mood log for a date")]
    fn get_mood_log(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = logs::get_mood_log(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        json_or_not_found(result, "Mood log", &p.date)
    }

    // --- Dashboard & Metrics ---

    #[tool(description = "Get the daily overview: calorie and water progress, macros, sleep, mood and BMI category")]
    fn get_dashboard(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = dashboard::get_dashboard(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Classify a BMI value as Underweight, Normal, Overweight or Obese")]
    fn classify_bmi(&self, Parameters(p): Parameters<ClassifyBmiParams>) -> Result<CallToolResult, McpError> {
        let result = dashboard::classify_bmi_value(p.bmi).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Compute progress toward a goal: raw percent and percent clamped to 0-100")]
    fn goal_progress(&self, Parameters(p): Parameters<GoalProgressParams>) -> Result<CallToolResult, McpError> {
        json_result(&dashboard::goal_progress(p.consumed, p.goal))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitTrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fittrack".into(),
                version: crate::build_info::BuildInfo::current().full_version(),
                title: Some("FitTrack".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitTrack - food, water, sleep, mood and body metric tracking. \
                 IMPORTANT: Call logging_instructions before logging. \
                 Profile: get_profile/set_profile/update_profile (BMI and calorie target are computed). \
                 Foods (per 100g): search_foods, add_food_reference, calculate_portion, scale_custom_portion. \
                 Food logs: log_food, save_food_log, get_food_log. \
                 Water: log_water, get_water_log. Sleep: log_sleep, get_sleep_log. Mood: log_mood, get_mood_log. \
                 Overview: get_dashboard. Metrics: classify_bmi, goal_progress. Status: fittrack_status."
                    .into(),
            ),
        }
    }
}
