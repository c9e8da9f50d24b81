//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::{params, Connection};

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Foods available before the user adds any of their own:
/// (name, kcal, proteins, carbs, fats, vitamins), all per 100g
const DEFAULT_FOODS: &[(&str, f64, f64, f64, f64, &str)] = &[
    ("Chicken Breast", 165.0, 31.0, 0.0, 3.6, "B6, B12"),
    ("Brown Rice", 111.0, 2.6, 23.0, 0.9, "B1, B3"),
    ("Broccoli", 34.0, 2.8, 7.0, 0.4, "C, K"),
    ("Banana", 89.0, 1.1, 23.0, 0.3, "B6, C"),
    ("Salmon", 208.0, 20.0, 0.0, 13.0, "D, B12"),
    ("Eggs", 155.0, 13.0, 1.1, 11.0, "A, D, B12"),
    ("Oats", 389.0, 17.0, 66.0, 7.0, "B1, B5"),
    ("Milk", 42.0, 3.4, 5.0, 1.0, "D, B12"),
    ("Apple", 52.0, 0.3, 14.0, 0.2, "C"),
    ("Sweet Potato", 86.0, 1.6, 20.0, 0.1, "A, C"),
];

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PROFILE
        -- Single-row body profile with derived metrics
        -- ============================================
        CREATE TABLE profile (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            gender TEXT NOT NULL CHECK(gender IN ('male', 'female')),
            height_cm REAL NOT NULL,
            weight_kg REAL NOT NULL,
            goal TEXT NOT NULL CHECK(goal IN ('lose', 'maintain', 'gain')) DEFAULT 'maintain',

            -- Derived from the fields above, rewritten on every change
            bmi REAL NOT NULL,
            daily_calorie_target INTEGER NOT NULL,

            daily_water_target INTEGER NOT NULL DEFAULT 2000,  -- ml
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- FOOD REFERENCES
        -- Nutrient content per 100g
        -- ============================================
        CREATE TABLE food_references (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            kcal_per_100g REAL NOT NULL,
            proteins_per_100g REAL NOT NULL DEFAULT 0,
            carbs_per_100g REAL NOT NULL DEFAULT 0,
            fats_per_100g REAL NOT NULL DEFAULT 0,
            vitamins TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- FOOD LOGS
        -- One log per date, one entry per logged portion
        -- ============================================
        CREATE TABLE food_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,           -- ISO date: "2025-01-09"
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE food_log_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_log_id INTEGER NOT NULL REFERENCES food_logs(id) ON DELETE CASCADE,
            food_name TEXT NOT NULL,
            grams REAL NOT NULL CHECK(grams > 0),
            kcal REAL NOT NULL,
            proteins REAL NOT NULL,
            carbs REAL NOT NULL,
            fats REAL NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_food_log_entries_log ON food_log_entries(food_log_id);

        -- ============================================
        -- WATER LOGS
        -- ============================================
        CREATE TABLE water_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,
            goal_ml INTEGER NOT NULL DEFAULT 2000
        );

        CREATE TABLE water_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            water_log_id INTEGER NOT NULL REFERENCES water_logs(id) ON DELETE CASCADE,
            amount_ml INTEGER NOT NULL CHECK(amount_ml > 0),
            logged_at TEXT NOT NULL             -- RFC 3339 UTC
        );

        CREATE INDEX idx_water_entries_log ON water_entries(water_log_id);

        -- ============================================
        -- SLEEP AND MOOD
        -- ============================================
        CREATE TABLE sleep_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,
            hours REAL NOT NULL CHECK(hours >= 0 AND hours <= 24),
            quality TEXT NOT NULL CHECK(quality IN ('poor', 'fair', 'good', 'excellent')),
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE mood_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,
            mood TEXT NOT NULL CHECK(mood IN ('sad', 'neutral', 'happy', 'excited')),
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    seed_food_references(conn)?;
    Ok(())
}

fn seed_food_references(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT OR IGNORE INTO food_references
            (name, kcal_per_100g, proteins_per_100g, carbs_per_100g, fats_per_100g, vitamins)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )?;

    for (name, kcal, proteins, carbs, fats, vitamins) in DEFAULT_FOODS {
        stmt.execute(params![name, kcal, proteins, carbs, fats, vitamins])?;
    }

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(!needs_migration(&conn).unwrap());
    }

    #[test]
    fn test_default_foods_seeded() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM food_references", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, DEFAULT_FOODS.len() as i64);
    }
}
