//! Sleep log model

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Self-reported sleep quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SleepQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Poor => "poor",
            SleepQuality::Fair => "fair",
            SleepQuality::Good => "good",
            SleepQuality::Excellent => "excellent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "poor" => Some(SleepQuality::Poor),
            "fair" => Some(SleepQuality::Fair),
            "good" => Some(SleepQuality::Good),
            "excellent" => Some(SleepQuality::Excellent),
            _ => None,
        }
    }
}

/// One night's sleep, keyed by the date it is logged against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepLog {
    pub date: String,
    pub hours: f64,
    pub quality: SleepQuality,
    pub notes: String,
}

impl SleepLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let quality: String = row.get("quality")?;
        Ok(Self {
            date: row.get("date")?,
            hours: row.get("hours")?,
            quality: SleepQuality::parse(&quality).unwrap_or(SleepQuality::Fair),
            notes: row.get("notes")?,
        })
    }

    /// Insert or replace the sleep log for `self.date`
    pub fn save(conn: &Connection, log: &SleepLog) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO sleep_logs (date, hours, quality, notes)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(date) DO UPDATE SET
                hours = excluded.hours,
                quality = excluded.quality,
                notes = excluded.notes
            "#,
            params![log.date, log.hours, log.quality.as_str(), log.notes],
        )?;

        Self::get_for_date(conn, &log.date)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_for_date(conn: &Connection, date: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM sleep_logs WHERE date = ?1")?;

        let result = stmt.query_row([date], Self::from_row);
        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
