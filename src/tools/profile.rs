//! Profile MCP Tools
//!
//! Tools for reading and updating the body profile. BMI and calorie target
//! are recomputed on every write.

use serde::Serialize;

use crate::db::Database;
use crate::metrics::{classify_bmi, BmiClassification, Gender, Goal, UserMetrics};
use crate::models::{Profile, ProfileSet};

/// Profile with its BMI classification
#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    #[serde(flatten)]
    pub profile: Profile,
    pub bmi_classification: Option<BmiClassification>,
}

impl From<Profile> for ProfileDetail {
    fn from(profile: Profile) -> Self {
        // Stored BMI is always positive; a failure just leaves it unclassified
        let bmi_classification = classify_bmi(profile.bmi).ok();
        Self {
            profile,
            bmi_classification,
        }
    }
}

/// Inputs for `set_profile`
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: Option<String>,
    pub daily_water_target: Option<i64>,
}

/// Partial profile changes for `update_profile`
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
    pub daily_water_target: Option<i64>,
}

fn validate_water_target(target: Option<i64>) -> Result<Option<i64>, String> {
    match target {
        Some(ml) if ml <= 0 => Err(format!("daily_water_target must be greater than 0, got {}", ml)),
        other => Ok(other),
    }
}

fn parse_goal(goal: Option<&str>) -> Result<Goal, String> {
    match goal {
        Some(g) => Goal::parse(g).map_err(|e| e.to_string()),
        None => Ok(Goal::default()),
    }
}

pub fn get_profile(db: &Database) -> Result<Option<ProfileDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = Profile::get(&conn).map_err(|e| format!("Failed to get profile: {}", e))?;
    Ok(profile.map(ProfileDetail::from))
}

/// Create or replace the profile
pub fn set_profile(db: &Database, input: ProfileInput) -> Result<ProfileDetail, String> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    let goal = parse_goal(input.goal.as_deref())?;
    let metrics = UserMetrics::derive(
        input.age,
        Gender::from_str(&input.gender),
        input.height_cm,
        input.weight_kg,
        goal,
    )
    .map_err(|e| e.to_string())?;
    let daily_water_target = validate_water_target(input.daily_water_target)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = Profile::set(&conn, &ProfileSet { name, metrics, daily_water_target })
        .map_err(|e| format!("Failed to save profile: {}", e))?;

    tracing::info!(
        bmi = profile.bmi,
        daily_calorie_target = profile.daily_calorie_target,
        "Profile saved"
    );
    Ok(profile.into())
}

/// Apply partial changes to an existing profile
///
/// Returns `None` when no profile has been set yet.
pub fn update_profile(db: &Database, changes: ProfileChanges) -> Result<Option<ProfileDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let current = match Profile::get(&conn).map_err(|e| format!("Failed to get profile: {}", e))? {
        Some(p) => p,
        None => return Ok(None),
    };

    let goal = match changes.goal.as_deref() {
        Some(g) => Goal::parse(g).map_err(|e| e.to_string())?,
        None => current.goal,
    };
    let gender = changes
        .gender
        .as_deref()
        .map(Gender::from_str)
        .unwrap_or(current.gender);
    let name = changes
        .name
        .map(|n| n.trim().to_string())
        .unwrap_or(current.name);
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }

    let metrics = UserMetrics::derive(
        changes.age.unwrap_or(current.age),
        gender,
        changes.height_cm.unwrap_or(current.height_cm),
        changes.weight_kg.unwrap_or(current.weight_kg),
        goal,
    )
    .map_err(|e| e.to_string())?;
    let daily_water_target = validate_water_target(changes.daily_water_target)?;

    let profile = Profile::set(&conn, &ProfileSet { name, metrics, daily_water_target })
        .map_err(|e| format!("Failed to update profile: {}", e))?;

    tracing::info!(bmi = profile.bmi, "Profile updated");
    Ok(Some(profile.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::metrics::BmiCategory;

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    fn input() -> ProfileInput {
        ProfileInput {
            name: "Sam".to_string(),
            age: 30,
            gender: "male".to_string(),
            height_cm: 175.0,
            weight_kg: 70.0,
            goal: Some("lose".to_string()),
            daily_water_target: None,
        }
    }

    #[test]
    fn test_set_profile_derives_metrics() {
        let db = setup();
        let detail = set_profile(&db, input()).unwrap();
        assert_eq!(detail.profile.bmi, 22.86);
        assert_eq!(detail.profile.daily_calorie_target, 2128);
        assert_eq!(detail.profile.daily_water_target, 2000);
        let class = detail.bmi_classification.unwrap();
        assert_eq!(class.category, BmiCategory::Normal);
    }

    #[test]
    fn test_set_profile_rejects_bad_input() {
        let db = setup();

        let mut bad = input();
        bad.height_cm = 0.0;
        assert!(set_profile(&db, bad).is_err());

        let mut bad = input();
        bad.goal = Some("bulk".to_string());
        assert!(set_profile(&db, bad).is_err());

        let mut bad = input();
        bad.daily_water_target = Some(0);
        assert!(set_profile(&db, bad).is_err());

        assert!(get_profile(&db).unwrap().is_none());
    }

    #[test]
    fn test_update_recomputes_derived_fields() {
        let db = setup();
        assert!(update_profile(&db, ProfileChanges::default()).unwrap().is_none());

        set_profile(&db, input()).unwrap();
        let updated = update_profile(&db, ProfileChanges {
            weight_kg: Some(95.0),
            goal: Some("maintain".to_string()),
            ..Default::default()
        })
        .unwrap()
        .unwrap();

        assert_eq!(updated.profile.name, "Sam");
        assert_eq!(updated.profile.bmi, 31.02);
        assert_eq!(updated.bmi_classification.unwrap().category, BmiCategory::Obese);
        assert!(updated.profile.daily_calorie_target > 2628);
    }
}
