use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "Health Tracker";

pub const DEFAULT_DATABASE_FILE: &str = "health_tracker.db";

pub const DEFAULT_BACKUP_FILE: &str = "health_tracker_backup.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HealthTrackerConfig {
    pub database: Option<String>,
    pub backup: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("health-tracker.toml")
}

/// Backup file that sits next to the database
pub fn default_backup_path_for(database: &Path) -> PathBuf {
    match database.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(DEFAULT_BACKUP_FILE),
        _ => PathBuf::from(DEFAULT_BACKUP_FILE),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<HealthTrackerConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: HealthTrackerConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &HealthTrackerConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Pick the database path: explicit flag, then config file, then the default
pub fn resolve_database_path(flag: Option<&Path>, config: Option<&HealthTrackerConfig>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
}

/// Pick the backup path: explicit flag, then config file, then next to the database
pub fn resolve_backup_path(
    flag: Option<&Path>,
    config: Option<&HealthTrackerConfig>,
    database: &Path,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.backup.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_backup_path_for(database))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("health-tracker.toml");
        let config = HealthTrackerConfig {
            database: Some("data/health.db".to_string()),
            backup: None,
        };
        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();
    }

    #[test]
    fn test_database_precedence() {
        let config = HealthTrackerConfig {
            database: Some("from-config.db".to_string()),
            backup: None,
        };
        assert_eq!(
            resolve_database_path(Some(Path::new("flag.db")), Some(&config)),
            PathBuf::from("flag.db")
        );
        assert_eq!(resolve_database_path(None, Some(&config)), PathBuf::from("from-config.db"));
        assert_eq!(resolve_database_path(None, None), PathBuf::from(DEFAULT_DATABASE_FILE));
    }

    #[test]
    fn test_backup_defaults_next_to_database() {
        assert_eq!(
            resolve_backup_path(None, None, Path::new("data/health.db")),
            PathBuf::from("data").join(DEFAULT_BACKUP_FILE)
        );
        assert_eq!(
            resolve_backup_path(None, None, Path::new("health.db")),
            PathBuf::from(DEFAULT_BACKUP_FILE)
        );
    }
}
