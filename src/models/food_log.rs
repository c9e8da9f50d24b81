//! Food log model
//!
//! One log per date holding the portions eaten that day. Totals are summed
//! from the entries on read.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::metrics::{FoodPortion, Nutrients};

/// A logged portion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: i64,
    #[serde(flatten)]
    pub portion: FoodPortion,
    pub created_at: String,
}

/// A day's food log with totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLog {
    pub id: i64,
    pub date: String,
    pub entries: Vec<FoodLogEntry>,
    pub totals: Nutrients,
    pub updated_at: String,
}

impl FoodLogEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            portion: FoodPortion {
                food_name: row.get("food_name")?,
                grams: row.get("grams")?,
                nutrients: Nutrients {
                    kcal: row.get("kcal")?,
                    proteins: row.get("proteins")?,
                    carbs: row.get("carbs")?,
                    fats: row.get("fats")?,
                },
            },
            created_at: row.get("created_at")?,
        })
    }

    fn insert(conn: &Connection, food_log_id: i64, portion: &FoodPortion) -> DbResult<()> {
        let n = &portion.nutrients;
        conn.execute(
            r#"
            INSERT INTO food_log_entries (food_log_id, food_name, grams, kcal, proteins, carbs, fats)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![food_log_id, portion.food_name, portion.grams, n.kcal, n.proteins, n.carbs, n.fats],
        )?;
        Ok(())
    }
}

impl FoodLog {
    /// Get the log id for a date, creating the log if needed
    fn ensure(conn: &Connection, date: &str) -> DbResult<i64> {
        conn.execute(
            r#"
            INSERT INTO food_logs (date) VALUES (?1)
            ON CONFLICT(date) DO UPDATE SET updated_at = datetime('now')
            "#,
            [date],
        )?;
        let id: i64 = conn.query_row("SELECT id FROM food_logs WHERE date = ?1", [date], |row| row.get(0))?;
        Ok(id)
    }

    /// Replace the entries for a date
    pub fn save(conn: &mut Connection, date: &str, portions: &[FoodPortion]) -> DbResult<Self> {
        let tx = conn.transaction()?;
        let id = Self::ensure(&tx, date)?;
        tx.execute("DELETE FROM food_log_entries WHERE food_log_id = ?1", [id])?;
        for portion in portions {
            FoodLogEntry::insert(&tx, id, portion)?;
        }
        tx.commit()?;

        Self::get_for_date(conn, date)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Add one portion to a date's log
    pub fn append(conn: &Connection, date: &str, portion: &FoodPortion) -> DbResult<Self> {
        let id = Self::ensure(conn, date)?;
        FoodLogEntry::insert(conn, id, portion)?;

        Self::get_for_date(conn, date)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get the log for a date with its entries and totals
    pub fn get_for_date(conn: &Connection, date: &str) -> DbResult<Option<Self>> {
        let header = conn.query_row(
            "SELECT id, updated_at FROM food_logs WHERE date = ?1",
            [date],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        );
        let (id, updated_at) = match header {
            Ok(h) => h,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut stmt = conn.prepare(
            "SELECT * FROM food_log_entries WHERE food_log_id = ?1 ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map([id], FoodLogEntry::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let totals: Nutrients = entries.iter().map(|e| e.portion.nutrients).sum();

        Ok(Some(Self {
            id,
            date: date.to_string(),
            entries,
            totals,
            updated_at,
        }))
    }

    /// Totals for a date, zero when nothing was logged
    pub fn totals_for_date(conn: &Connection, date: &str) -> DbResult<Nutrients> {
        Ok(Self::get_for_date(conn, date)?
            .map(|log| log.totals)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::metrics::{scale_portion, FoodReference};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn portion(name: &str, kcal_per_100g: f64, grams: f64) -> FoodPortion {
        let reference = FoodReference {
            name: name.to_string(),
            kcal_per_100g,
            proteins_per_100g: 10.0,
            carbs_per_100g: 20.0,
            fats_per_100g: 5.0,
        };
        scale_portion(&reference, grams).unwrap()
    }

    #[test]
    fn test_missing_log() {
        let conn = setup();
        assert!(FoodLog::get_for_date(&conn, "2025-01-09").unwrap().is_none());
        assert_eq!(FoodLog::totals_for_date(&conn, "2025-01-09").unwrap(), Nutrients::zero());
    }

    #[test]
    fn test_append_accumulates() {
        let conn = setup();
        FoodLog::append(&conn, "2025-01-09", &portion("Oats", 389.0, 50.0)).unwrap();
        let log = FoodLog::append(&conn, "2025-01-09", &portion("Milk", 42.0, 200.0)).unwrap();

        assert_eq!(log.entries.len(), 2);
        assert_eq!(log.entries[0].portion.food_name, "Oats");
        assert!((log.totals.kcal - (194.5 + 84.0)).abs() < 1e-9);
        assert!((log.totals.proteins - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_save_replaces_entries() {
        let mut conn = setup();
        FoodLog::append(&conn, "2025-01-09", &portion("Oats", 389.0, 50.0)).unwrap();

        let log = FoodLog::save(&mut conn, "2025-01-09", &[portion("Apple", 52.0, 150.0)]).unwrap();
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].portion.food_name, "Apple");
        assert!((log.totals.kcal - 78.0).abs() < 1e-9);

        // Other dates are untouched
        assert!(FoodLog::get_for_date(&conn, "2025-01-10").unwrap().is_none());
    }

    #[test]
    fn test_save_empty_clears_day() {
        let mut conn = setup();
        FoodLog::append(&conn, "2025-01-09", &portion("Oats", 389.0, 50.0)).unwrap();

        let log = FoodLog::save(&mut conn, "2025-01-09", &[]).unwrap();
        assert!(log.entries.is_empty());
        assert_eq!(log.totals, Nutrients::zero());
    }
}
