//! Daily log MCP Tools
//!
//! Food, water, sleep and mood logging. Every tool validates the date before
//! touching the database.

use serde::Serialize;

use crate::db::Database;
use crate::metrics::{progress_ratio, FoodPortion, GoalProgress};
use crate::models::{FoodLog, Mood, MoodLog, Profile, SleepLog, SleepQuality, WaterLog};
use crate::tools::foods::{portion_for, FoodSelector};
use crate::tools::validate_date;

/// Upper bound for a single water entry (5 liters)
pub const MAX_WATER_ENTRY_ML: i64 = 5000;

/// Response for log_food
#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub logged: FoodPortion,
    pub log: FoodLog,
}

/// Water log with progress toward its goal
#[derive(Debug, Serialize)]
pub struct WaterLogDetail {
    #[serde(flatten)]
    pub log: WaterLog,
    pub progress: GoalProgress,
}

impl From<WaterLog> for WaterLogDetail {
    fn from(log: WaterLog) -> Self {
        let progress = progress_ratio(log.total_intake as f64, log.goal_ml as f64);
        Self { log, progress }
    }
}

// ============================================================================
// Food
// ============================================================================

/// Append one portion of a reference food to a date's log
pub fn log_food(db: &Database, date: &str, selector: FoodSelector, grams: f64) -> Result<LogFoodResponse, String> {
    let date = validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let portion = portion_for(&conn, &selector, grams)?;
    let log = FoodLog::append(&conn, &date, &portion)
        .map_err(|e| format!("Failed to log food: {}", e))?;

    tracing::info!(date = %date, food = %portion.food_name, kcal = portion.nutrients.kcal, "Food logged");
    Ok(LogFoodResponse { logged: portion, log })
}

/// Replace a date's food log with the given portions
///
/// All portions are resolved before anything is written, so one bad entry
/// leaves the stored log unchanged.
pub fn save_food_log(db: &Database, date: &str, items: Vec<(FoodSelector, f64)>) -> Result<FoodLog, String> {
    let date = validate_date(date)?;

    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let portions = items
        .iter()
        .enumerate()
        .map(|(i, (selector, grams))| {
            portion_for(&conn, selector, *grams).map_err(|e| format!("Entry {}: {}", i + 1, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let log = FoodLog::save(&mut conn, &date, &portions)
        .map_err(|e| format!("Failed to save food log: {}", e))?;

    tracing::info!(date = %date, entries = log.entries.len(), "Food log saved");
    Ok(log)
}

pub fn get_food_log(db: &Database, date: &str) -> Result<Option<FoodLog>, String> {
    let date = validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    FoodLog::get_for_date(&conn, &date).map_err(|e| format!("Failed to get food log: {}", e))
}

// ============================================================================
// Water
// ============================================================================

/// Add a water intake for a date
pub fn log_water(db: &Database, date: &str, amount_ml: i64) -> Result<WaterLogDetail, String> {
    let date = validate_date(date)?;
    if amount_ml <= 0 || amount_ml > MAX_WATER_ENTRY_ML {
        return Err(format!(
            "amount_ml must be between 1 and {}, got {}",
            MAX_WATER_ENTRY_ML, amount_ml
        ));
    }

    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let goal_ml = Profile::water_target(&conn).map_err(|e| format!("Failed to get profile: {}", e))?;
    let logged_at = chrono::Utc::now().to_rfc3339();

    let log = WaterLog::add_intake(&mut conn, &date, amount_ml, goal_ml, &logged_at)
        .map_err(|e| format!("Failed to log water: {}", e))?;

    tracing::info!(date = %date, amount_ml, total = log.total_intake, "Water logged");
    Ok(log.into())
}

pub fn get_water_log(db: &Database, date: &str) -> Result<WaterLogDetail, String> {
    let date = validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let goal_ml = Profile::water_target(&conn).map_err(|e| format!("Failed to get profile: {}", e))?;
    let log = WaterLog::get_for_date(&conn, &date, goal_ml)
        .map_err(|e| format!("Failed to get water log: {}", e))?;
    Ok(log.into())
}

// ============================================================================
// Sleep
// ============================================================================

pub fn log_sleep(db: &Database, date: &str, hours: f64, quality: &str, notes: Option<String>) -> Result<SleepLog, String> {
    let date = validate_date(date)?;
    if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
        return Err(format!("hours must be between 0 and 24, got {}", hours));
    }
    let quality = SleepQuality::parse(quality).ok_or_else(|| {
        format!("Invalid sleep quality '{}': expected poor, fair, good or excellent", quality)
    })?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let log = SleepLog::save(&conn, &SleepLog {
        date,
        hours,
        quality,
        notes: notes.unwrap_or_default(),
    })
    .map_err(|e| format!("Failed to save sleep log: {}", e))?;

    tracing::info!(date = %log.date, hours = log.hours, "Sleep logged");
    Ok(log)
}

pub fn get_sleep_log(db: &Database, date: &str) -> Result<Option<SleepLog>, String> {
    let date = validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    SleepLog::get_for_date(&conn, &date).map_err(|e| format!("Failed to get sleep log: {}", e))
}

// ============================================================================
// Mood
// ============================================================================

pub fn log_mood(db: &Database, date: &str, mood: &str, notes: Option<String>) -> Result<MoodLog, String> {
    let date = validate_date(date)?;
    let mood = Mood::parse(mood)
        .ok_or_else(|| format!("Invalid mood '{}': expected sad, neutral, happy or excited", mood))?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let log = MoodLog::save(&conn, &MoodLog {
        date,
        mood,
        notes: notes.unwrap_or_default(),
    })
    .map_err(|e| format!("Failed to save mood log: {}", e))?;

    tracing::info!(date = %log.date, mood = log.mood.as_str(), "Mood logged");
    Ok(log)
}

pub fn get_mood_log(db: &Database, date: &str) -> Result<Option<MoodLog>, String> {
    let date = validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    MoodLog::get_for_date(&conn, &date).map_err(|e| format!("Failed to get mood log: {}", e))
}
