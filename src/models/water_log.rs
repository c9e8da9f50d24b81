//! Water log model
//!
//! Intake accumulates through the day as individual entries.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterEntry {
    pub amount_ml: i64,
    pub logged_at: String,
}

/// A day's water intake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterLog {
    pub date: String,
    pub total_intake: i64,
    pub goal_ml: i64,
    pub entries: Vec<WaterEntry>,
}

impl WaterEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            amount_ml: row.get("amount_ml")?,
            logged_at: row.get("logged_at")?,
        })
    }
}

impl WaterLog {
    /// Record an intake for a date
    ///
    /// The first intake of a day fixes that day's goal to `goal_ml`. The day
    /// row and the entry are written together, so a rejected entry leaves no
    /// day behind.
    pub fn add_intake(
        conn: &mut Connection,
        date: &str,
        amount_ml: i64,
        goal_ml: i64,
        logged_at: &str,
    ) -> DbResult<Self> {
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO water_logs (date, goal_ml) VALUES (?1, ?2)",
            params![date, goal_ml],
        )?;
        let log_id: i64 = tx.query_row(
            "SELECT id FROM water_logs WHERE date = ?1",
            [date],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO water_entries (water_log_id, amount_ml, logged_at) VALUES (?1, ?2, ?3)",
            params![log_id, amount_ml, logged_at],
        )?;
        tx.commit()?;

        Self::get_for_date(conn, date, goal_ml)
    }

    /// Get a date's water log
    ///
    /// A day with no entries reports zero intake against `fallback_goal_ml`,
    /// the goal its first entry would fix.
    pub fn get_for_date(conn: &Connection, date: &str, fallback_goal_ml: i64) -> DbResult<Self> {
        let header = conn.query_row(
            "SELECT id, goal_ml FROM water_logs WHERE date = ?1",
            [date],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        );
        let (id, goal_ml) = match header {
            Ok(h) => h,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Ok(Self {
                    date: date.to_string(),
                    total_intake: 0,
                    goal_ml: fallback_goal_ml,
                    entries: Vec::new(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut stmt = conn.prepare(
            "SELECT amount_ml, logged_at FROM water_entries WHERE water_log_id = ?1 ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map([id], WaterEntry::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            date: date.to_string(),
            total_intake: entries.iter().map(|e| e.amount_ml).sum(),
            goal_ml,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::metrics::DEFAULT_WATER_GOAL_ML;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_empty_day_uses_fallback_goal() {
        let conn = setup();
        let log = WaterLog::get_for_date(&conn, "2025-03-01", 3000).unwrap();
        assert_eq!(log.total_intake, 0);
        assert_eq!(log.goal_ml, 3000);
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_intake_accumulates() {
        let mut conn = setup();
        WaterLog::add_intake(&mut conn, "2025-03-01", 250, 2500, "2025-03-01T08:00:00+00:00").unwrap();
        let log = WaterLog::add_intake(&mut conn, "2025-03-01", 500, 3000, "2025-03-01T12:00:00+00:00").unwrap();

        assert_eq!(log.total_intake, 750);
        assert_eq!(log.entries.len(), 2);
        // Goal is fixed by the first entry of the day
        assert_eq!(log.goal_ml, 2500);
        assert_eq!(WaterLog::get_for_date(&conn, "2025-03-01", DEFAULT_WATER_GOAL_ML).unwrap().goal_ml, 2500);
    }

    #[test]
    fn test_rejected_intake_leaves_no_day() {
        let mut conn = setup();
        assert!(WaterLog::add_intake(&mut conn, "2025-03-01", 0, 2500, "2025-03-01T08:00:00+00:00").is_err());

        let days: i64 = conn
            .query_row("SELECT COUNT(*) FROM water_logs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(days, 0);

        let log = WaterLog::add_intake(&mut conn, "2025-03-01", 100, 3000, "2025-03-01T09:00:00+00:00").unwrap();
        assert_eq!(log.goal_ml, 3000);
        assert_eq!(log.total_intake, 100);
    }
}
