//! Profile model
//!
//! Single-row body profile. BMI and calorie target are stored alongside the
//! measurements they are derived from.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::metrics::{Gender, Goal, UserMetrics, DEFAULT_WATER_GOAL_ML};

/// The user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: Goal,
    pub bmi: f64,
    pub daily_calorie_target: i64,
    pub daily_water_target: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating or replacing the profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSet {
    pub name: String,
    pub metrics: UserMetrics,
    pub daily_water_target: Option<i64>,
}

impl Profile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let goal: String = row.get("goal")?;
        Ok(Self {
            name: row.get("name")?,
            age: row.get("age")?,
            gender: Gender::from_str(&row.get::<_, String>("gender")?),
            height_cm: row.get("height_cm")?,
            weight_kg: row.get("weight_kg")?,
            // The CHECK constraint keeps this column in range
            goal: Goal::parse(&goal).unwrap_or_default(),
            bmi: row.get("bmi")?,
            daily_calorie_target: row.get("daily_calorie_target")?,
            daily_water_target: row.get("daily_water_target")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// The raw measurements and derived values as `UserMetrics`
    pub fn metrics(&self) -> UserMetrics {
        UserMetrics {
            age: self.age,
            gender: self.gender,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            goal: self.goal,
            bmi: self.bmi,
            daily_calorie_target: self.daily_calorie_target,
        }
    }

    /// Get the profile, if one has been set
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create or replace the profile (upsert)
    ///
    /// An omitted water target keeps the stored one, or the default for a new
    /// profile.
    pub fn set(conn: &Connection, data: &ProfileSet) -> DbResult<Self> {
        let m = &data.metrics;
        conn.execute(
            r#"
            INSERT INTO profile (
                id, name, age, gender, height_cm, weight_kg, goal,
                bmi, daily_calorie_target, daily_water_target
            ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, COALESCE(?9, ?10))
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                gender = excluded.gender,
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                goal = excluded.goal,
                bmi = excluded.bmi,
                daily_calorie_target = excluded.daily_calorie_target,
                daily_water_target = COALESCE(?9, profile.daily_water_target),
                updated_at = datetime('now')
            "#,
            params![
                data.name,
                m.age,
                m.gender.as_str(),
                m.height_cm,
                m.weight_kg,
                m.goal.as_str(),
                m.bmi,
                m.daily_calorie_target,
                data.daily_water_target,
                DEFAULT_WATER_GOAL_ML,
            ],
        )?;

        Self::get(conn)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Daily water target, falling back to the default when no profile exists
    pub fn water_target(conn: &Connection) -> DbResult<i64> {
        Ok(Self::get(conn)?
            .map(|p| p.daily_water_target)
            .unwrap_or(DEFAULT_WATER_GOAL_ML))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample(name: &str, weight_kg: f64, water: Option<i64>) -> ProfileSet {
        ProfileSet {
            name: name.to_string(),
            metrics: UserMetrics::derive(30, Gender::Male, 175.0, weight_kg, Goal::Maintain).unwrap(),
            daily_water_target: water,
        }
    }

    #[test]
    fn test_get_without_profile() {
        let conn = setup();
        assert!(Profile::get(&conn).unwrap().is_none());
        assert_eq!(Profile::water_target(&conn).unwrap(), DEFAULT_WATER_GOAL_ML);
    }

    #[test]
    fn test_set_then_replace() {
        let conn = setup();
        let first = Profile::set(&conn, &sample("Alex", 70.0, Some(2500))).unwrap();
        assert_eq!(first.name, "Alex");
        assert_eq!(first.bmi, 22.86);
        assert_eq!(first.daily_calorie_target, 2628);
        assert_eq!(first.daily_water_target, 2500);

        // Omitted water target keeps the stored value
        let second = Profile::set(&conn, &sample("Alex", 80.0, None)).unwrap();
        assert_eq!(second.weight_kg, 80.0);
        assert_eq!(second.bmi, 26.12);
        assert_eq!(second.daily_water_target, 2500);
        assert_eq!(second.metrics().gender, Gender::Male);
    }
}
