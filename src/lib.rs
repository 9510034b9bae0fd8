//! # Health Tracker
//!
//! Personal health metrics kept in a local SQLite file.
//!
//! Health Tracker provides:
//! - Timestamped weight, water and distance entries
//! - A single editable user profile
//! - Maintenance helpers for migration, backup and restore
//! - Terminal rendering of entries as a table or a line graph

pub mod config;
pub mod maintenance;
pub mod metric;
pub mod profile;
pub mod storage;
pub mod timestamp;
pub mod ui;
pub mod validate;

// Re-exports for convenient access
pub use metric::{Entry, HistoryPoint, Metric};
pub use profile::UserProfile;
pub use storage::SqliteStore;

use std::path::PathBuf;

/// Result type alias for Health Tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Health Tracker operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Source database not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Database not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("Backup file not found: {}", .0.display())]
    BackupNotFound(PathBuf),

    #[error("Backup file already exists: {}", .0.display())]
    BackupExists(PathBuf),
}
