use crate::{Context, OutputMode, emit_success};
use health_tracker::config::{self, APP_NAME, HealthTrackerConfig};
use health_tracker::maintenance;
use health_tracker::ui::{self, Icons, SortKey, TableBuilder, theme};
use health_tracker::validate::{self, ProfileForm};
use health_tracker::{Error, Metric, SqliteStore};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        println!(
            "{} {}",
            APP_NAME.bold().style(theme().accent.clone()),
            format!("Version {}", env!("CARGO_PKG_VERSION")).bold()
        );
    } else {
        let data = serde_json::json!({
            "name": APP_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}

pub fn run_init(ctx: &Context, write_config: bool, force: bool) -> anyhow::Result<()> {
    let store = SqliteStore::open(&ctx.database)?;
    let tables = store.table_names()?;

    if write_config {
        let cfg = HealthTrackerConfig {
            database: Some(ctx.database.display().to_string()),
            ..ctx.config.clone().unwrap_or_default()
        };
        config::write_config(&ctx.config_path, &cfg, force)?;
    }

    if ctx.output_mode.is_human() {
        ui::success(&format!("Database ready at {}", ctx.database.display()));
        ui::summary_row("Tables:", &tables.join(", "));
        if write_config {
            ui::summary_row("Config:", &ctx.config_path.display().to_string());
        }
    } else {
        let data = serde_json::json!({
            "database": ctx.database,
            "tables": tables,
            "config": write_config.then(|| ctx.config_path.clone()),
        });
        emit_success(ctx.output_mode, "init", data)?;
    }
    Ok(())
}

pub fn run_add(ctx: &Context, metric: Metric, raw: &str) -> anyhow::Result<()> {
    let value = validate::parse_entry_value(metric, raw)?;
    let store = SqliteStore::open(&ctx.database)?;
    store.add_entry(metric, value)?;

    let latest = store.entries(metric)?.into_iter().max_by_key(|e| e.id);

    if ctx.output_mode.is_human() {
        ui::success(&format!(
            "{} Added {} {:.2} {}",
            Icons::for_metric(metric),
            metric,
            value,
            metric.unit()
        ));
    } else {
        emit_success(ctx.output_mode, "add", serde_json::json!({ "metric": metric, "entry": latest }))?;
    }
    Ok(())
}

pub fn run_history(ctx: &Context, metric: Metric, width: usize, height: usize) -> anyhow::Result<()> {
    let store = SqliteStore::open(&ctx.database)?;
    let history = store.history(metric)?;

    if ctx.output_mode.is_human() {
        ui::header(Icons::CHART, &format!("{} history", metric.label()));
        let chart = ui::render_chart(metric, &history, width, height);
        println!("{}", chart.style(theme().series(metric)));
        if let (Some(first), Some(last)) = (history.first(), history.last()) {
            println!();
            ui::summary_row("Entries:", &history.len().to_string());
            ui::summary_row("First:", &format!("{:.2} {}", first.value, metric.unit()));
            ui::summary_row("Latest:", &format!("{:.2} {}", last.value, metric.unit()));
            ui::summary_row("Change:", &format!("{:+.2} {}", last.value - first.value, metric.unit()));
        }
    } else {
        emit_success(ctx.output_mode, "history", serde_json::json!({ "metric": metric, "points": history }))?;
    }
    Ok(())
}

pub fn run_entries(ctx: &Context, metric: Metric, sort: SortKey, desc: bool) -> anyhow::Result<()> {
    let store = SqliteStore::open(&ctx.database)?;
    let mut entries = store.entries(metric)?;
    ui::sort_entries(&mut entries, sort, desc);

    if ctx.output_mode.is_human() {
        if entries.is_empty() {
            println!("∅ No {} entries yet.", metric);
        } else {
            ui::header(Icons::for_metric(metric), &format!("{} entries", metric.label()));
            println!("{}", ui::entries_table(metric, &entries));
            println!("{}", ui::muted(&format!("{} row(s), sorted by {:?}", entries.len(), sort)));
        }
    } else {
        emit_success(ctx.output_mode, "entries", serde_json::json!({ "metric": metric, "entries": entries }))?;
    }
    Ok(())
}

pub fn run_delete(ctx: &Context, metric: Metric, id: i64) -> anyhow::Result<()> {
    let store = SqliteStore::open(&ctx.database)?;
    let existed = store.entries(metric)?.iter().any(|e| e.id == id);
    store.delete_entry(metric, id)?;

    if ctx.output_mode.is_human() {
        if existed {
            ui::success(&format!("{} Deleted {} entry {}", Icons::DEL, metric, id));
        } else {
            ui::warn(&format!("No {} entry with id {}; nothing deleted", metric, id));
        }
    } else {
        emit_success(
            ctx.output_mode,
            "delete",
            serde_json::json!({ "metric": metric, "id": id, "deleted": existed }),
        )?;
    }
    Ok(())
}

pub fn run_stats(ctx: &Context) -> anyhow::Result<()> {
    let store = SqliteStore::open(&ctx.database)?;
    let stats = store.stats()?;

    if ctx.output_mode.is_human() {
        ui::header(Icons::STATS, &format!("{} Statistics", APP_NAME));
        ui::info("Database", &ctx.database.display().to_string());
        let mut table = TableBuilder::new();
        for metric in Metric::all() {
            table.add_row(&format!("{} entries", metric.label()), &stats.count_for(*metric).to_string());
        }
        table.add_row("Profile saved", if stats.has_profile { "yes" } else { "no" });
        println!("{}", table.build());
    } else {
        emit_success(ctx.output_mode, "stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}

pub fn run_profile_show(ctx: &Context) -> anyhow::Result<()> {
    let store = SqliteStore::open(&ctx.database)?;
    let profile = store.get_profile()?;

    if !ctx.output_mode.is_human() {
        return emit_success(ctx.output_mode, "profile", serde_json::json!({ "profile": profile }));
    }

    match profile {
        None => {
            println!("∅ No profile saved yet.");
            println!("{}", ui::dim("Save one with: health-tracker profile set --first-name <NAME> ..."));
        }
        Some(profile) => {
            ui::header(Icons::PERSON, "User profile");
            let mut table = TableBuilder::new();
            table.add_row("First name", &profile.first_name);
            table.add_row("Last name", &profile.last_name);
            table.add_row("Gender", &profile.gender);
            table.add_row("Age", &profile.age.map(|a| a.to_string()).unwrap_or_default());
            table.add_row(
                "Height (in)",
                &profile.height_inches.map(|h| format!("{h}")).unwrap_or_default(),
            );
            println!("{}", table.build());
        }
    }
    Ok(())
}

pub fn run_profile_set(ctx: &Context, form: ProfileForm) -> anyhow::Result<()> {
    let profile = form.into_profile()?;
    let store = SqliteStore::open(&ctx.database)?;
    store.save_profile(&profile)?;

    if ctx.output_mode.is_human() {
        let name = profile.display_name();
        if name.is_empty() {
            ui::success("User profile saved.");
        } else {
            ui::success(&format!("User profile saved for {}.", name));
        }
    } else {
        emit_success(ctx.output_mode, "profile", serde_json::json!({ "profile": profile }))?;
    }
    Ok(())
}

pub fn run_migrate(ctx: &Context, source: &Path) -> anyhow::Result<()> {
    if ctx.output_mode.is_human() {
        ui::header(
            Icons::PACKAGE,
            &format!("Copying entries {} -> {}", source.display(), ctx.database.display()),
        );
    }

    let report = match maintenance::migrate(source, &ctx.database) {
        Err(Error::SourceNotFound(path)) => {
            ui::error(&format!("Source not found: {}", path.display()));
            anyhow::bail!("nothing copied");
        }
        other => other?,
    };

    if ctx.output_mode.is_human() {
        println!("{}", report);
        ui::success(&format!("Done. Copied {} entries", report.total()));
    } else {
        emit_success(ctx.output_mode, "migrate", serde_json::to_value(&report)?)?;
    }
    Ok(())
}

pub fn run_backup(ctx: &Context, output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let backup = config::resolve_backup_path(output.as_deref(), ctx.config.as_ref(), &ctx.database);
    let bytes = maintenance::create_backup(&ctx.database, &backup, force)?;

    if ctx.output_mode.is_human() {
        ui::success(&format!("Backed up {} to {}", ctx.database.display(), backup.display()));
        ui::summary_row("Size:", &format!("{} bytes", bytes));
    } else {
        emit_success(
            ctx.output_mode,
            "backup",
            serde_json::json!({ "database": ctx.database, "backup": backup, "bytes": bytes }),
        )?;
    }
    Ok(())
}

pub fn run_restore(ctx: &Context, backup: Option<PathBuf>) -> anyhow::Result<()> {
    let backup = config::resolve_backup_path(backup.as_deref(), ctx.config.as_ref(), &ctx.database);

    let report = match maintenance::restore_backup(&backup, &ctx.database) {
        Err(Error::BackupNotFound(path)) => {
            ui::error(&format!("Backup file not found: {}", path.display()));
            let create = format!(
                "health-tracker --database {} backup --output {}",
                ctx.database.display(),
                backup.display()
            );
            let place = format!("1. Copy your backup to {}", backup.display());
            ui::hint(&[
                "To restore:",
                place.as_str(),
                "2. Close any other program using the database, then run restore again.",
                "",
                "To create a backup of your current data:",
                create.as_str(),
            ]);
            anyhow::bail!("restore aborted; {} was not modified", ctx.database.display());
        }
        other => other?,
    };

    if ctx.output_mode.is_human() {
        if let Some(aside) = &report.safety_copy {
            ui::info("Current database copied to", &aside.display().to_string());
        }
        ui::success(&format!(
            "Restored {} from {}",
            report.target.display(),
            report.restored_from.display()
        ));
    } else {
        emit_success(ctx.output_mode, "restore", serde_json::to_value(&report)?)?;
    }
    Ok(())
}
