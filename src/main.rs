//! Paddock CLI - rebuild the championship database from CSV results

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use paddock::config::{self, PaddockConfig};
use paddock::standings::Standings;
use paddock::storage::{schema, DbStats, SqliteStore};
use paddock::ui::{self, ConsoleSink, Icons};
use paddock::{RowPolicy, Season};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "paddock")]
#[command(version)]
#[command(about = "Formula 1 results loader - CSV race results into SQLite with championship standings")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = r#"
Paddock rebuilds a SQLite championship database from a folder of CSV files:
  • Teams, drivers and races are created on first reference
  • Reloading the same race/driver/team replaces the earlier result
  • Driver and constructor standings are printed at the end

Example usage:
  paddock
  paddock --data ./results --quiet
  paddock run --data ./results --database season.db --on-bad-row skip
  paddock standings --database season.db --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to paddock.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Run options, used when no subcommand is given
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the database from the CSV folder and print standings (default)
    Run(RunArgs),

    /// Print standings from an existing database
    Standings {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a starter config and schema file
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Path to the database file (recreated on every run)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the schema script
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Folder holding the CSV result files
    #[arg(long)]
    data: Option<PathBuf>,

    /// What to do with rows whose position is not an integer
    #[arg(long, value_enum)]
    on_bad_row: Option<RowPolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Hide per-entity creation notices
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging. User-facing notices go through the console sink,
    // so logs stay on stderr and are quiet unless asked for.
    let filter = if cli.verbose {
        EnvFilter::new(log_directive(true))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directive(false)))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())
        .context("failed to read config file")?
        .unwrap_or_default();

    match cli.command.unwrap_or(Commands::Run(cli.run)) {
        Commands::Run(args) => run(args, &file_config),
        Commands::Standings { database, format } => {
            let overrides = PaddockConfig { database, ..Default::default() };
            let settings = file_config.resolve(&overrides)?;
            let store = SqliteStore::open(&settings.database)
                .with_context(|| format!("failed to open {}", settings.database.display()))?;
            let standings = Season::new(&store).standings().all()?;
            emit_standings(&standings, format, None)
        }
        Commands::Init { force } => init(cli.config.as_deref(), force),
    }
}

/// Default log level when `RUST_LOG` is unset
fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn run(args: RunArgs, file_config: &PaddockConfig) -> anyhow::Result<()> {
    let overrides = PaddockConfig {
        database: args.database,
        schema: args.schema,
        data: args.data,
        on_bad_row: args.on_bad_row,
        points: None,
    };
    let settings = file_config.resolve(&overrides)?;
    let human = args.format == OutputFormat::Text;

    // Schema problems abort before the previous database is touched
    let schema_sql = schema::load_schema(&settings.schema)?;

    config::ensure_db_dir(&settings.database)?;
    let store = SqliteStore::create(&settings.database, &schema_sql)
        .with_context(|| format!("failed to create {}", settings.database.display()))?;

    if human {
        ui::header(Icons::FLAG, "Paddock - loading race results");
        ui::info("Data", &settings.data.display().to_string());
        ui::info("Database", &settings.database.display().to_string());
        ui::info("Bad rows", settings.on_bad_row.as_str());
        println!();
    }

    let season = Season::new(&store)
        .with_points(settings.points.clone())
        .with_row_policy(settings.on_bad_row);

    let mut sink = ConsoleSink::new(args.quiet || !human);
    let summary = season
        .ingest_directory(&settings.data, &mut sink)
        .with_context(|| format!("failed to load results from {}", settings.data.display()))?;
    let warnings = sink.warnings();
    tracing::info!(
        "Run complete: {} files, {} rows, {} skipped",
        summary.files_processed(),
        summary.rows_loaded(),
        summary.rows_skipped()
    );

    let standings = season.standings().all()?;
    let stats = store.stats()?;
    emit_standings(&standings, args.format, Some(&stats))?;

    if human {
        println!();
        ui::success(&format!(
            "Loaded {} rows from {} files",
            summary.rows_loaded(),
            summary.files_processed()
        ));
        if warnings > 0 {
            ui::warn(&format!("{} warning(s) during load", warnings));
        }
        ui::info("Database saved to", &settings.database.display().to_string());
    }
    Ok(())
}

fn emit_standings(standings: &Standings, format: OutputFormat, stats: Option<&DbStats>) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(standings)?);
        return Ok(());
    }

    ui::header(Icons::CAR, "Drivers' Championship");
    print_table(&ui::standings_table(&standings.drivers));
    ui::leader(&standings.drivers);

    ui::header(Icons::TROPHY, "Constructors' Championship");
    print_table(&ui::standings_table(&standings.constructors));
    ui::leader(&standings.constructors);

    if let Some(stats) = stats {
        ui::section(&format!(" {} Database ", Icons::STATS));
        println!(
            "{}",
            ui::stats_table(&[
                ("Teams", stats.teams.to_string()),
                ("Drivers", stats.drivers.to_string()),
                ("Races", stats.races.to_string()),
                ("Results", stats.results.to_string()),
            ])
        );
    }
    Ok(())
}

fn print_table(table: &str) {
    if table.is_empty() {
        println!("  {}", ui::dim("No results recorded."));
    } else {
        println!("{}", table);
    }
}

fn init(config_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_config_path);
    let starter = PaddockConfig::starter();
    config::write_config(&config_path, &starter, force)?;
    ui::success(&format!("Wrote {}", config_path.display()));

    let schema_path = PathBuf::from(config::DEFAULT_SCHEMA);
    if schema_path.exists() && !force {
        ui::warn(&format!("{} already exists, leaving it untouched", schema_path.display()));
    } else {
        std::fs::write(&schema_path, schema::DEFAULT_SCHEMA)?;
        ui::success(&format!("Wrote {}", schema_path.display()));
    }

    let data_dir = PathBuf::from(config::DEFAULT_DATA_DIR);
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        ui::success(&format!("Created {}/", data_dir.display()));
    }
    Ok(())
}
