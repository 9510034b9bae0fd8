//! Health Tracker CLI - record and review weight, water and distance entries

mod commands;

use clap::{Parser, Subcommand};
use health_tracker::config::{self, HealthTrackerConfig};
use health_tracker::ui::SortKey;
use health_tracker::Metric;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "health-tracker")]
#[command(version)]
#[command(about = "Track weight, water intake and distance in a local SQLite file")]
#[command(long_about = r#"
Health Tracker keeps timestamped health entries in a local database:
  • Weight, water (ounces) and distance (miles) entries
  • A line graph or a sortable table per metric
  • One editable user profile
  • Migration, backup and restore of the database file

Example usage:
  health-tracker add weight 70.5
  health-tracker history weight
  health-tracker entries water --sort value --desc
  health-tracker delete weight 3
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and its tables if missing
    Init {
        /// Also write a config file pointing at the database
        #[arg(long)]
        write_config: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Record a new entry
    Add {
        /// weight, water or distance
        metric: Metric,

        /// Value in the metric's unit (lbs, oz or mi)
        value: String,
    },

    /// Show a metric's history as a line graph
    History {
        /// weight, water or distance
        metric: Metric,

        /// Plot width in columns
        #[arg(long, default_value = "60")]
        width: usize,

        /// Plot height in rows
        #[arg(long, default_value = "12")]
        height: usize,
    },

    /// List a metric's entries as a table
    Entries {
        /// weight, water or distance
        metric: Metric,

        /// Column to order by
        #[arg(short, long, value_enum, default_value_t = SortKey::Date)]
        sort: SortKey,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Delete an entry by id
    Delete {
        /// weight, water or distance
        metric: Metric,

        /// Entry id as shown by `entries`
        id: i64,
    },

    /// Show entry counts
    Stats,

    /// View or edit the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Copy all entries from another database into this one
    Migrate {
        /// Database to copy from
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Copy the database to a backup file
    Backup {
        /// Backup file (defaults to health_tracker_backup.db next to the database)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing backup
        #[arg(long)]
        force: bool,
    },

    /// Replace the database with a backup file
    Restore {
        /// Backup file (defaults to health_tracker_backup.db next to the database)
        #[arg(short, long)]
        backup: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show the saved profile
    Show,

    /// Save the profile. Replaces it entirely: omitted fields are cleared.
    Set {
        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long, default_value = "")]
        gender: String,

        /// Whole years, 0-150
        #[arg(long, default_value = "")]
        age: String,

        /// Height in inches, up to 120
        #[arg(long, default_value = "")]
        height: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Print the JSON success envelope for `command`
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

/// Settings shared by every command
pub struct Context {
    pub output_mode: OutputMode,
    pub database: PathBuf,
    pub config: Option<HealthTrackerConfig>,
    pub config_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(&config_path))?;
    let database = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref());
    tracing::debug!("Using database {}", database.display());

    let ctx = Context {
        output_mode: if cli.json { OutputMode::Json } else { OutputMode::Human },
        database,
        config: loaded,
        config_path,
    };

    match cli.command {
        Commands::Init { write_config, force } => commands::run_init(&ctx, write_config, force),
        Commands::Add { metric, value } => commands::run_add(&ctx, metric, &value),
        Commands::History { metric, width, height } => commands::run_history(&ctx, metric, width, height),
        Commands::Entries { metric, sort, desc } => commands::run_entries(&ctx, metric, sort, desc),
        Commands::Delete { metric, id } => commands::run_delete(&ctx, metric, id),
        Commands::Stats => commands::run_stats(&ctx),
        Commands::Profile { action } => match action {
            ProfileCommand::Show => commands::run_profile_show(&ctx),
            ProfileCommand::Set {
                first_name,
                last_name,
                gender,
                age,
                height,
            } => commands::run_profile_set(
                &ctx,
                health_tracker::validate::ProfileForm {
                    first_name,
                    last_name,
                    gender,
                    age,
                    height_inches: height,
                },
            ),
        },
        Commands::Migrate { source } => commands::run_migrate(&ctx, &source),
        Commands::Backup { output, force } => commands::run_backup(&ctx, output, force),
        Commands::Restore { backup } => commands::run_restore(&ctx, backup),
        Commands::Version => commands::run_version(ctx.output_mode),
    }
}
