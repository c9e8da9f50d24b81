//! Dashboard and metric MCP Tools
//!
//! The daily overview plus direct access to BMI classification and goal
//! progress.

use serde::Serialize;

use crate::db::Database;
use crate::metrics::{
    classify_bmi, progress_ratio, BmiClassification, Goal, GoalProgress, Nutrients, DEFAULT_WATER_GOAL_ML,
};
use crate::models::{FoodLog, Mood, MoodLog, Profile, SleepLog, SleepQuality, WaterLog};
use crate::tools::validate_date;

#[derive(Debug, Serialize)]
pub struct DashboardUser {
    pub name: String,
    pub bmi: f64,
    pub bmi_classification: Option<BmiClassification>,
    pub daily_calorie_target: i64,
    pub goal: Goal,
}

#[derive(Debug, Serialize)]
pub struct DashboardFood {
    pub totals: Nutrients,
    pub entry_count: usize,
    /// Absent when no profile (and so no calorie target) exists
    pub calorie_progress: Option<GoalProgress>,
}

#[derive(Debug, Serialize)]
pub struct DashboardWater {
    pub total_intake: i64,
    pub goal_ml: i64,
    pub progress: GoalProgress,
}

#[derive(Debug, Serialize)]
pub struct DashboardSleep {
    pub hours: f64,
    pub quality: Option<SleepQuality>,
}

/// Everything the home screen shows for one date
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub date: String,
    pub user: Option<DashboardUser>,
    pub food: DashboardFood,
    pub water: DashboardWater,
    pub sleep: DashboardSleep,
    pub mood: Option<Mood>,
}

pub fn get_dashboard(db: &Database, date: &str) -> Result<Dashboard, String> {
    let date = validate_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = Profile::get(&conn).map_err(|e| format!("Failed to get profile: {}", e))?;
    let food_log = FoodLog::get_for_date(&conn, &date).map_err(|e| format!("Failed to get food log: {}", e))?;
    let water_goal = profile
        .as_ref()
        .map(|p| p.daily_water_target)
        .unwrap_or(DEFAULT_WATER_GOAL_ML);
    let water_log = WaterLog::get_for_date(&conn, &date, water_goal)
        .map_err(|e| format!("Failed to get water log: {}", e))?;
    let sleep_log = SleepLog::get_for_date(&conn, &date).map_err(|e| format!("Failed to get sleep log: {}", e))?;
    let mood_log = MoodLog::get_for_date(&conn, &date).map_err(|e| format!("Failed to get mood log: {}", e))?;

    let (totals, entry_count) = food_log
        .map(|log| (log.totals, log.entries.len()))
        .unwrap_or_default();

    let calorie_progress = profile
        .as_ref()
        .map(|p| progress_ratio(totals.kcal, p.daily_calorie_target as f64));

    let user = profile.map(|p| DashboardUser {
        bmi_classification: classify_bmi(p.bmi).ok(),
        name: p.name,
        bmi: p.bmi,
        daily_calorie_target: p.daily_calorie_target,
        goal: p.goal,
    });

    tracing::debug!(date = %date, kcal = totals.kcal, water = water_log.total_intake, "Dashboard built");

    Ok(Dashboard {
        user,
        food: DashboardFood {
            totals,
            entry_count,
            calorie_progress,
        },
        water: DashboardWater {
            progress: progress_ratio(water_log.total_intake as f64, water_log.goal_ml as f64),
            total_intake: water_log.total_intake,
            goal_ml: water_log.goal_ml,
        },
        sleep: DashboardSleep {
            hours: sleep_log.as_ref().map(|s| s.hours).unwrap_or(0.0),
            quality: sleep_log.map(|s| s.quality),
        },
        mood: mood_log.map(|m| m.mood),
        date,
    })
}

/// Classify an arbitrary BMI value
pub fn classify_bmi_value(bmi: f64) -> Result<BmiClassification, String> {
    classify_bmi(bmi).map_err(|e| e.to_string())
}

/// Progress of `consumed` against `goal`
pub fn goal_progress(consumed: f64, goal: f64) -> GoalProgress {
    if goal <= 0.0 {
        tracing::warn!(consumed, goal, "Non-positive goal, reporting 0% progress");
    }
    progress_ratio(consumed, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::metrics::BmiCategory;
    use crate::tools::foods::FoodSelector;
    use crate::tools::logs;
    use crate::tools::profile::{set_profile, ProfileInput};

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_empty_dashboard() {
        let db = setup();
        let dash = get_dashboard(&db, "2025-05-05").unwrap();

        assert!(dash.user.is_none());
        assert_eq!(dash.food.totals, Nutrients::zero());
        assert_eq!(dash.food.entry_count, 0);
        assert!(dash.food.calorie_progress.is_none());
        assert_eq!(dash.water.total_intake, 0);
        assert_eq!(dash.water.goal_ml, 2000);
        assert_eq!(dash.sleep.hours, 0.0);
        assert!(dash.sleep.quality.is_none());
        assert!(dash.mood.is_none());
    }

    #[test]
    fn test_full_dashboard() {
        let db = setup();
        set_profile(&db, ProfileInput {
            name: "Jo".to_string(),
            age: 25,
            gender: "female".to_string(),
            height_cm: 165.0,
            weight_kg: 60.0,
            goal: Some("maintain".to_string()),
            daily_water_target: Some(2500),
        })
        .unwrap();

        logs::log_food(&db, "2025-05-05", FoodSelector::Name("Salmon".to_string()), 200.0).unwrap();
        logs::log_water(&db, "2025-05-05", 1000).unwrap();
        logs::log_sleep(&db, "2025-05-05", 7.0, "good", None).unwrap();
        logs::log_mood(&db, "2025-05-05", "happy", None).unwrap();

        let dash = get_dashboard(&db, "2025-05-05").unwrap();
        let user = dash.user.unwrap();
        assert_eq!(user.name, "Jo");
        assert_eq!(user.daily_calorie_target, 2178);
        assert_eq!(user.bmi_classification.unwrap().category, BmiCategory::Normal);

        assert!((dash.food.totals.kcal - 416.0).abs() < 1e-9);
        let progress = dash.food.calorie_progress.unwrap();
        assert!((progress.raw_percent - 416.0 / 2178.0 * 100.0).abs() < 1e-9);

        assert_eq!(dash.water.goal_ml, 2500);
        assert_eq!(dash.water.progress.raw_percent, 40.0);
        assert_eq!(dash.sleep.quality, Some(SleepQuality::Good));
        assert_eq!(dash.mood, Some(Mood::Happy));
    }

    #[test]
    fn test_empty_day_uses_profile_water_target() {
        let db = setup();
        set_profile(&db, ProfileInput {
            name: "Sam".to_string(),
            age: 30,
            gender: "male".to_string(),
            height_cm: 175.0,
            weight_kg: 70.0,
            goal: None,
            daily_water_target: Some(3000),
        })
        .unwrap();

        let before = get_dashboard(&db, "2025-05-06").unwrap();
        assert_eq!(before.water.goal_ml, 3000);
        assert_eq!(before.water.total_intake, 0);

        logs::log_water(&db, "2025-05-06", 1).unwrap();
        let after = get_dashboard(&db, "2025-05-06").unwrap();
        assert_eq!(after.water.goal_ml, before.water.goal_ml);
    }

    #[test]
    fn test_goal_progress_tool() {
        let p = goal_progress(2500.0, 2000.0);
        assert_eq!(p.raw_percent, 125.0);
        assert_eq!(p.clamped_percent, 100.0);
        assert_eq!(goal_progress(10.0, 0.0).raw_percent, 0.0);
    }

    #[test]
    fn test_classify_bmi_value() {
        assert_eq!(classify_bmi_value(25.0).unwrap().label, "Overweight");
        assert!(classify_bmi_value(0.0).is_err());
    }
}
