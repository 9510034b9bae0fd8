//! SQLite storage implementation
//!
//! Every operation opens its own connection, runs one statement and drops
//! the connection again. Nothing is cached between calls, and concurrent
//! writers from other processes are left to SQLite's file locking.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::metric::{Entry, HistoryPoint, Metric, round2};
use crate::profile::{PROFILE_ID, UserProfile, text_to_column};
use crate::timestamp;
use crate::Result;

/// SQLite-backed storage for entries and the user profile
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open a database file (creates it and its schema if missing)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self {
            path: path.to_path_buf(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create any missing tables. Safe to call repeatedly.
    pub fn initialize_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(&schema::schema_script())?;
        tracing::debug!("Schema ready at {}", self.path.display());
        Ok(())
    }

    // ========== Entry Operations ==========

    /// Insert an entry stamped with the database's current time
    pub fn add_entry(&self, metric: Metric, value: f64) -> Result<()> {
        let conn = self.connect()?;
        let sql = format!("INSERT INTO {} ({}) VALUES (?1)", metric.table(), metric.column());
        conn.execute(&sql, params![round2(value)])?;
        tracing::debug!("Added {} entry {:.2}", metric, round2(value));
        Ok(())
    }

    /// Insert an entry with an explicit creation timestamp
    pub fn add_entry_at(&self, metric: Metric, created_at: &NaiveDateTime, value: f64) -> Result<()> {
        let conn = self.connect()?;
        let sql = format!(
            "INSERT INTO {} (created_at, {}) VALUES (?1, ?2)",
            metric.table(),
            metric.column()
        );
        conn.execute(&sql, params![timestamp::to_storage_string(created_at), round2(value)])?;
        Ok(())
    }

    /// All entries for a metric with their ids, oldest first
    ///
    /// Ordering uses the decoded UTC timestamp (ties broken by id). The raw
    /// column can mix text layouts and integer epochs, which SQL would
    /// compare by storage class and bytes instead of by time.
    pub fn entries(&self, metric: Metric) -> Result<Vec<Entry>> {
        let conn = self.connect()?;
        let sql = format!("SELECT id, created_at, {} FROM {}", metric.column(), metric.table());
        let mut stmt = conn.prepare(&sql)?;

        let mut entries = stmt
            .query_map([], |row| Self::row_to_entry(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(entries)
    }

    /// All `(created_at, value)` pairs for a metric, oldest first
    pub fn history(&self, metric: Metric) -> Result<Vec<HistoryPoint>> {
        let points = self
            .entries(metric)?
            .into_iter()
            .map(HistoryPoint::from)
            .collect();
        Ok(points)
    }

    /// Delete an entry by id. Unknown ids are ignored.
    pub fn delete_entry(&self, metric: Metric, id: i64) -> Result<()> {
        let conn = self.connect()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", metric.table());
        let removed = conn.execute(&sql, [id])?;
        tracing::debug!("Deleted {} {} entry row(s) with id {}", removed, metric, id);
        Ok(())
    }

    /// Count entries for a metric
    pub fn count(&self, metric: Metric) -> Result<usize> {
        let conn = self.connect()?;
        let sql = format!("SELECT COUNT(*) FROM {}", metric.table());
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to an Entry
    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<Entry> {
        Ok(Entry {
            id: row.get(0)?,
            created_at: timestamp::column(row, 1)?,
            value: round2(row.get(2)?),
        })
    }

    // ========== Per-metric shorthands ==========

    pub fn add_weight(&self, weight: f64) -> Result<()> {
        self.add_entry(Metric::Weight, weight)
    }

    pub fn get_weight_history(&self) -> Result<Vec<HistoryPoint>> {
        self.history(Metric::Weight)
    }

    pub fn get_weight_entries(&self) -> Result<Vec<Entry>> {
        self.entries(Metric::Weight)
    }

    pub fn delete_weight(&self, id: i64) -> Result<()> {
        self.delete_entry(Metric::Weight, id)
    }

    pub fn add_water(&self, ounces: f64) -> Result<()> {
        self.add_entry(Metric::Water, ounces)
    }

    pub fn get_water_history(&self) -> Result<Vec<HistoryPoint>> {
        self.history(Metric::Water)
    }

    pub fn get_water_entries(&self) -> Result<Vec<Entry>> {
        self.entries(Metric::Water)
    }

    pub fn delete_water(&self, id: i64) -> Result<()> {
        self.delete_entry(Metric::Water, id)
    }

    pub fn add_distance(&self, miles: f64) -> Result<()> {
        self.add_entry(Metric::Distance, miles)
    }

    pub fn get_distance_history(&self) -> Result<Vec<HistoryPoint>> {
        self.history(Metric::Distance)
    }

    pub fn get_distance_entries(&self) -> Result<Vec<Entry>> {
        self.entries(Metric::Distance)
    }

    pub fn delete_distance(&self, id: i64) -> Result<()> {
        self.delete_entry(Metric::Distance, id)
    }

    // ========== Profile Operations ==========

    /// Load the profile, or `None` if it was never saved
    pub fn get_profile(&self) -> Result<Option<UserProfile>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT first_name, last_name, gender, age, height_inches FROM tbl_user_profile WHERE id = ?1",
            [PROFILE_ID],
            |row| {
                Ok(UserProfile {
                    first_name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    last_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    gender: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    age: row.get(3)?,
                    height_inches: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }

    /// Replace the profile row wholesale.
    ///
    /// Blank text fields are written as NULL, and anything the given profile
    /// leaves unset is cleared even if an earlier save had filled it in.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO tbl_user_profile (id, first_name, last_name, gender, age, height_inches)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                PROFILE_ID,
                text_to_column(&profile.first_name),
                text_to_column(&profile.last_name),
                text_to_column(&profile.gender),
                profile.age,
                profile.height_inches,
            ],
        )?;
        tracing::debug!("Saved user profile");
        Ok(())
    }

    // ========== Inspection ==========

    /// Names of the application tables present in the file
    pub fn table_names(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name LIKE 'tbl_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            weight: self.count(Metric::Weight)?,
            water: self.count(Metric::Water)?,
            distance: self.count(Metric::Distance)?,
            has_profile: self.get_profile()?.is_some(),
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub weight: usize,
    pub water: usize,
    pub distance: usize,
    pub has_profile: bool,
}

impl DbStats {
    pub fn count_for(&self, metric: Metric) -> usize {
        match metric {
            Metric::Weight => self.weight,
            Metric::Water => self.water,
            Metric::Distance => self.distance,
        }
    }
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Weight entries: {}", self.weight)?;
        writeln!(f, "  Water entries: {}", self.water)?;
        writeln!(f, "  Distance entries: {}", self.distance)?;
        writeln!(f, "  Profile saved: {}", if self.has_profile { "yes" } else { "no" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_schema_creates_tables() {
        let (_dir, store) = temp_store();
        let tables = store.table_names().unwrap();
        for name in schema::TABLE_NAMES {
            assert!(tables.iter().any(|t| t == name), "missing {name}");
        }
    }

    #[test]
    fn test_schema_init_is_idempotent() {
        let (_dir, store) = temp_store();
        store.initialize_schema().unwrap();
        store.initialize_schema().unwrap();
        assert_eq!(store.table_names().unwrap().len(), schema::TABLE_NAMES.len());
    }

    #[test]
    fn test_open_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("health.db");
        SqliteStore::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_add_and_list_entries() {
        let (_dir, store) = temp_store();
        store.add_weight(72.0).unwrap();

        let entries = store.get_weight_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].id >= 1);
        assert_eq!(entries[0].value, 72.0);
    }

    #[test]
    fn test_value_rounded_on_write() {
        let (_dir, store) = temp_store();
        store.add_water(16.456).unwrap();
        store.add_water(0.125).unwrap();

        let values: Vec<f64> = store.get_water_history().unwrap().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![16.46, 0.12]);
    }

    #[test]
    fn test_stored_value_is_rounded_in_file() {
        let (_dir, store) = temp_store();
        store.add_distance(2.675).unwrap();

        let conn = Connection::open(store.path()).unwrap();
        let raw: f64 = conn.query_row("SELECT miles FROM tbl_distance", [], |r| r.get(0)).unwrap();
        assert_eq!(raw, 2.67);
    }

    #[test]
    fn test_metrics_are_independent() {
        let (_dir, store) = temp_store();
        store.add_weight(70.0).unwrap();
        store.add_distance(2.5).unwrap();
        store.add_distance(1.0).unwrap();

        assert_eq!(store.count(Metric::Weight).unwrap(), 1);
        assert_eq!(store.count(Metric::Water).unwrap(), 0);
        assert_eq!(store.count(Metric::Distance).unwrap(), 2);
    }

    #[test]
    fn test_history_ordered_by_created_at() {
        let (_dir, store) = temp_store();
        store.add_entry_at(Metric::Weight, &at(12, 0), 71.0).unwrap();
        store.add_entry_at(Metric::Weight, &at(9, 0), 70.0).unwrap();
        store.add_entry_at(Metric::Weight, &at(18, 0), 72.0).unwrap();

        let history = store.get_weight_history().unwrap();
        let values: Vec<f64> = history.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![70.0, 71.0, 72.0]);
        assert_eq!(history[0].created_at, at(9, 0));
    }

    #[test]
    fn test_mixed_timestamp_layouts_sort_chronologically() {
        let (_dir, store) = temp_store();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO tbl_weight (created_at, weight) VALUES ('2024-01-15 10:00:00', 2)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO tbl_weight (created_at, weight) VALUES ('2024-01-15T09:00:00Z', 1)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO tbl_weight (created_at, weight) VALUES ('2024-01-15T13:00:00+02:00', 3)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO tbl_weight (created_at, weight) VALUES (?1, 4)",
            [at(12, 0).and_utc().timestamp()],
        )
        .unwrap();
        drop(conn);

        let history = store.get_weight_history().unwrap();
        let values: Vec<f64> = history.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(history.windows(2).all(|w| w[0].created_at <= w[1].created_at));

        let entry_values: Vec<f64> = store.get_weight_entries().unwrap().iter().map(|e| e.value).collect();
        assert_eq!(entry_values, values);
    }

    #[test]
    fn test_same_second_keeps_insertion_order() {
        let (_dir, store) = temp_store();
        for value in [3.0, 1.0, 2.0] {
            store.add_entry_at(Metric::Water, &at(8, 0), value).unwrap();
        }
        let values: Vec<f64> = store.get_water_history().unwrap().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_text_timestamps_in_both_formats() {
        let (_dir, store) = temp_store();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO tbl_weight (created_at, weight) VALUES ('2024-01-15 10:30:00', 70.5)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO tbl_water (created_at, ounces) VALUES ('2024-01-15T10:30:00Z', 8)",
            [],
        )
        .unwrap();
        drop(conn);

        assert_eq!(store.get_weight_history().unwrap()[0].created_at, at(10, 30));
        assert_eq!(store.get_water_entries().unwrap()[0].created_at, at(10, 30));
    }

    #[test]
    fn test_integer_timestamp() {
        let (_dir, store) = temp_store();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO tbl_distance (created_at, miles) VALUES (?1, 3.5)",
            [at(10, 30).and_utc().timestamp()],
        )
        .unwrap();
        drop(conn);

        assert_eq!(store.get_distance_history().unwrap()[0].created_at, at(10, 30));
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (_dir, store) = temp_store();
        store.add_weight(70.0).unwrap();
        store.delete_weight(9999).unwrap();
        assert_eq!(store.count(Metric::Weight).unwrap(), 1);
    }

    #[test]
    fn test_profile_absent_until_saved() {
        let (_dir, store) = temp_store();
        assert!(store.get_profile().unwrap().is_none());
    }

    #[test]
    fn test_profile_blank_text_stored_as_null() {
        let (_dir, store) = temp_store();
        store.save_profile(&UserProfile::new("Jane", "")).unwrap();

        let conn = Connection::open(store.path()).unwrap();
        let last: Option<String> = conn
            .query_row("SELECT last_name FROM tbl_user_profile WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(last, None);

        let loaded = store.get_profile().unwrap().unwrap();
        assert_eq!(loaded.last_name, "");
        assert_eq!(loaded.age, None);
        assert_eq!(loaded.height_inches, None);
    }

    #[test]
    fn test_stats() {
        let (_dir, store) = temp_store();
        store.add_water(8.0).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.count_for(Metric::Water), 1);
        assert!(!stats.has_profile);
        assert!(stats.to_string().contains("Water entries: 1"));
    }
}
