//! Copy entries between two databases with the same schema

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params};

use crate::metric::Metric;
use crate::storage::SqliteStore;
use crate::{Error, Result};

/// Number of rows copied per metric
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MigrationReport {
    pub copied: BTreeMap<Metric, usize>,
    /// Metrics whose table did not exist in the source
    pub missing: Vec<Metric>,
}

impl MigrationReport {
    pub fn copied_for(&self, metric: Metric) -> usize {
        self.copied.get(&metric).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.copied.values().sum()
    }
}

impl std::fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Migration Summary:")?;
        for metric in Metric::all() {
            let note = if self.missing.contains(metric) { " (no table in source)" } else { "" };
            writeln!(f, "  {}: {}{}", metric.label(), self.copied_for(*metric), note)?;
        }
        write!(f, "  Total: {}", self.total())
    }
}

/// Copy every weight, water and distance entry from `source` into `target`.
///
/// Rows keep their stored timestamp and value; ids are reassigned by the
/// target. A source table that does not exist counts as zero rows. The
/// target schema is created if needed. Profiles are not copied.
pub fn migrate(source: &Path, target: &Path) -> Result<MigrationReport> {
    if !source.exists() {
        return Err(Error::SourceNotFound(source.to_path_buf()));
    }

    let src = Connection::open_with_flags(source, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let store = SqliteStore::open(target)?;
    let mut dst = Connection::open(store.path())?;

    let mut report = MigrationReport::default();
    let tx = dst.transaction()?;

    for metric in Metric::all() {
        if !table_exists(&src, metric.table())? {
            tracing::warn!("Source has no {} table, skipping {}", metric.table(), metric);
            report.missing.push(*metric);
            report.copied.insert(*metric, 0);
            continue;
        }

        let rows = read_rows(&src, *metric)?;
        let insert = format!(
            "INSERT INTO {} (created_at, {}) VALUES (?1, ?2)",
            metric.table(),
            metric.column()
        );
        for (created_at, value) in &rows {
            tx.execute(&insert, params![created_at, value])?;
        }

        tracing::info!("Copied {} {} entries", rows.len(), metric);
        report.copied.insert(*metric, rows.len());
    }

    tx.commit()?;
    Ok(report)
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Raw `(created_at, value)` pairs, oldest first, exactly as stored
fn read_rows(conn: &Connection, metric: Metric) -> Result<Vec<(Value, Value)>> {
    let sql = format!(
        "SELECT created_at, {} FROM {} ORDER BY created_at",
        metric.column(),
        metric.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows: Vec<(Value, Value)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
