//! Backup and restore by plain file copy
//!
//! Close any other process using the database before restoring; nothing
//! here coordinates with open connections.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Outcome of a restore
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RestoreReport {
    pub restored_from: PathBuf,
    pub target: PathBuf,
    /// Copy of the previous target, if there was one
    pub safety_copy: Option<PathBuf>,
}

/// Copy `database` to `backup`.
///
/// An existing backup is only replaced when `overwrite` is set.
pub fn create_backup(database: &Path, backup: &Path, overwrite: bool) -> Result<u64> {
    if !database.exists() {
        return Err(Error::DatabaseNotFound(database.to_path_buf()));
    }
    if backup.exists() && !overwrite {
        return Err(Error::BackupExists(backup.to_path_buf()));
    }

    let bytes = std::fs::copy(database, backup)?;
    tracing::info!("Backed up {} to {} ({} bytes)", database.display(), backup.display(), bytes);
    Ok(bytes)
}

/// Replace `target` with the contents of `backup`.
///
/// When `backup` is missing nothing is touched. Otherwise an existing target
/// is first copied aside to the first free `<target>.bak`, `<target>.bak.1`,
/// `<target>.bak.2`, ... name.
pub fn restore_backup(backup: &Path, target: &Path) -> Result<RestoreReport> {
    if !backup.exists() {
        return Err(Error::BackupNotFound(backup.to_path_buf()));
    }

    let safety_copy = if target.exists() {
        let aside = next_safety_copy_path(target);
        std::fs::copy(target, &aside)?;
        tracing::info!("Current database copied to {}", aside.display());
        Some(aside)
    } else {
        None
    };

    std::fs::copy(backup, target)?;
    tracing::info!("Restored {} from {}", target.display(), backup.display());

    Ok(RestoreReport {
        restored_from: backup.to_path_buf(),
        target: target.to_path_buf(),
        safety_copy,
    })
}

/// First of `<target>.bak`, `<target>.bak.1`, `<target>.bak.2`, ... that does not exist
pub fn next_safety_copy_path(target: &Path) -> PathBuf {
    let first = with_suffix(target, ".bak");
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| with_suffix(target, &format!(".bak.{n}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
