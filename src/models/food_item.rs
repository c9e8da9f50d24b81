//! Food reference model
//!
//! Stored per-100g nutrient data that portions are scaled from.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::metrics::FoodReference;

/// A stored food reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    #[serde(flatten)]
    pub reference: FoodReference,
    pub vitamins: Option<String>,
    pub created_at: String,
}

/// Data for creating a new food reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemCreate {
    #[serde(flatten)]
    pub reference: FoodReference,
    pub vitamins: Option<String>,
}

impl FoodItem {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            reference: FoodReference {
                name: row.get("name")?,
                kcal_per_100g: row.get("kcal_per_100g")?,
                proteins_per_100g: row.get("proteins_per_100g")?,
                carbs_per_100g: row.get("carbs_per_100g")?,
                fats_per_100g: row.get("fats_per_100g")?,
            },
            vitamins: row.get("vitamins")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a new food reference
    pub fn create(conn: &Connection, data: &FoodItemCreate) -> DbResult<Self> {
        let r = &data.reference;
        conn.execute(
            r#"
            INSERT INTO food_references (
                name, kcal_per_100g, proteins_per_100g, carbs_per_100g, fats_per_100g, vitamins
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                r.name.trim(),
                r.kcal_per_100g,
                r.proteins_per_100g,
                r.carbs_per_100g,
                r.fats_per_100g,
                data.vitamins,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_references WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Exact name lookup, ignoring case
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_references WHERE name = ?1")?;

        let result = stmt.query_row([name.trim()], Self::from_row);
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Search by name substring; an empty query lists everything
    ///
    /// `%` and `_` in the query match literally.
    pub fn search(conn: &Connection, query: &str, limit: i64) -> DbResult<Vec<Self>> {
        let search_pattern = format!("%{}%", escape_like(query.trim()));
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM food_references
            WHERE name LIKE ?1 ESCAPE '\'
            ORDER BY name ASC
            LIMIT ?2
            "#,
        )?;

        let items = stmt
            .query_map(params![search_pattern, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM food_references", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Escape LIKE wildcards with a backslash
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
