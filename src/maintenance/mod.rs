//! Maintenance operations
//!
//! Jobs run against whole database files rather than single rows:
//! - copying entries from one database into another
//! - backing a database up and restoring it from a backup

pub mod backup;
pub mod migrate;

pub use backup::{RestoreReport, create_backup, next_safety_copy_path, restore_backup};
pub use migrate::{MigrationReport, migrate};
