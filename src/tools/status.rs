//! FitTrack Status Tool
//!
//! Runtime status of the service and the logging guide handed to assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{migrations, Database};
use crate::models::FoodItem;

/// Logging instructions for AI assistants
pub const LOGGING_INSTRUCTIONS: &str = r#"
# FitTrack Logging Instructions

## Dates

Every log tool takes a `date` in ISO format (`YYYY-MM-DD`). Resolve "today"
or "yesterday" to a concrete date before calling a tool.

## Profile

Call `get_profile` first. If it returns an error body, ask the user for name,
age, gender, height (cm), weight (kg) and goal (`lose`, `maintain`, `gain`)
and call `set_profile`. BMI and the daily calorie target are computed for
you; never pass them in.

Use `update_profile` when only some values change (for example a new
weight). Derived values are recomputed automatically.

## Food

Foods are stored **per 100 g**. To log food:

1. `search_foods` with part of the name.
2. If the food is missing, `add_food_reference` with per-100g values.
   Convert package labels first: `(value / package_grams) * 100`.
3. `log_food` with `food_id` (or exact `food_name`) and the eaten `grams`.

`calculate_portion` previews a portion without logging it.
`save_food_log` replaces the whole day, use it to correct a day at once.

## Water

`log_water` adds an intake in ml. Intakes accumulate over the day. The daily
goal comes from the profile (default 2000 ml).

## Sleep and Mood

- `log_sleep`: hours (0-24) and quality: poor, fair, good, excellent.
- `log_mood`: sad, neutral, happy, excited.

Both replace any earlier entry for the same date.

## Dashboard

`get_dashboard` returns the day at a glance: food totals with calorie
progress, water progress, sleep, mood and the BMI category.

Progress values come in two forms:
- `raw_percent` may exceed 100 (report this number to the user)
- `clamped_percent` is capped at 100 (for progress bars)
"#;

/// Runtime status of the FitTrack service
#[derive(Debug, Clone, Serialize)]
pub struct FitTrackStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: Option<i32>,
    pub needs_migration: Option<bool>,
    pub food_reference_count: Option<i64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Collect the current status; database fields are `None` if it cannot
    /// be queried
    pub fn get_status(&self, database: &Database) -> FitTrackStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let (schema_version, needs_migration, food_reference_count) = match database.get_conn() {
            Ok(conn) => (
                migrations::get_schema_version(&conn).ok(),
                migrations::needs_migration(&conn).ok(),
                FoodItem::count(&conn).ok(),
            ),
            Err(e) => {
                tracing::warn!("Status check could not reach the database: {}", e);
                (None, None, None)
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitTrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            needs_migration,
            food_reference_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
