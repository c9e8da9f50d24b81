//! Mood log model

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sad,
    Neutral,
    Happy,
    Excited,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Excited => "excited",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sad" => Some(Mood::Sad),
            "neutral" => Some(Mood::Neutral),
            "happy" => Some(Mood::Happy),
            "excited" => Some(Mood::Excited),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodLog {
    pub date: String,
    pub mood: Mood,
    pub notes: String,
}

impl MoodLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let mood: String = row.get("mood")?;
        Ok(Self {
            date: row.get("date")?,
            mood: Mood::parse(&mood).unwrap_or(Mood::Neutral),
            notes: row.get("notes")?,
        })
    }

    /// Insert or replace the mood for `log.date`
    pub fn save(conn: &Connection, log: &MoodLog) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO mood_logs (date, mood, notes)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(date) DO UPDATE SET
                mood = excluded.mood,
                notes = excluded.notes
            "#,
            params![log.date, log.mood.as_str(), log.notes],
        )?;

        Self::get_for_date(conn, &log.date)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_for_date(conn: &Connection, date: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM mood_logs WHERE date = ?1")?;

        let result = stmt.query_row([date], Self::from_row);
        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_save_and_get() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert!(MoodLog::get_for_date(&conn, "2025-02-02").unwrap().is_none());

        let saved = MoodLog::save(&conn, &MoodLog {
            date: "2025-02-02".to_string(),
            mood: Mood::Happy,
            notes: "Long walk".to_string(),
        })
        .unwrap();
        assert_eq!(saved.mood, Mood::Happy);
        assert_eq!(saved.notes, "Long walk");
    }
}
