use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tip_core::calculations::BillSplitWorksheet;
use tip_core::db::{DbConfig, MemoryRepositoryFactory, RepositoryRegistry};
use tip_core::{Removal, TipOptionSet, TipOptionsError, TipRepository};
use tip_db_sqlite::SqliteRepositoryFactory;

mod config;
mod display;
mod validate;

use config::CliConfig;
use validate::RawBillForm;

// Built-in fallbacks matching the calculator's initial form state.
const FALLBACK_TIP: &str = "15";
const FALLBACK_PEOPLE: &str = "1";
const FALLBACK_DATABASE: &str = "sqlite:tipsplit.db?mode=rwc";

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tip and bill-split calculator.
///
/// Computes the tip amount, total bill, and per-person share, and manages a
/// persisted list of custom tip percentages offered alongside the defaults
/// (10, 15, 18, 20, 25).
#[derive(Debug, Parser)]
#[command(name = "tipsplit", version, about, long_about = None)]
struct Cli {
    /// Database backend to use.
    #[arg(long, default_value = "sqlite")]
    backend: String,

    /// Database connection string; overrides the config file.
    /// For SQLite this is a path or URL, e.g. `sqlite:tipsplit.db?mode=rwc`
    /// or `:memory:`.
    #[arg(long)]
    db: Option<String>,

    /// Path to the TOML config file.
    #[arg(long, default_value = "tipsplit.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate the tip, total, and per-person share.
    Calc {
        /// Bill amount before tip.
        #[arg(long)]
        bill: String,

        /// Tip percentage. Falls back to the configured default, then 15.
        #[arg(long)]
        tip: Option<String>,

        /// Number of people splitting the bill. Defaults to 1.
        #[arg(long)]
        people: Option<String>,

        /// Round each person's share to the nearest dollar.
        #[arg(long)]
        round: bool,
    },

    /// Manage the list of selectable tip percentages.
    Tips {
        #[command(subcommand)]
        command: TipsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum TipsCommand {
    /// Show the current tip percentages.
    List,

    /// Add a custom tip percentage (0 to 100).
    Add { percentage: String },

    /// Remove a custom tip percentage. Defaults cannot be removed.
    Remove { percentage: String },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── repository wiring ───────────────────────────────────────────────────────

fn registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry.register(Box::new(MemoryRepositoryFactory));
    registry
}

async fn open_repository(
    cli: &Cli,
    config: &CliConfig,
) -> Result<Box<dyn TipRepository>> {
    let connection_string = cli
        .db
        .clone()
        .or_else(|| config.database.clone())
        .unwrap_or_else(|| FALLBACK_DATABASE.to_string());

    let db_config = DbConfig {
        backend: cli.backend.clone(),
        connection_string,
    };
    debug!(backend = %db_config.backend, "opening tip store");

    registry()
        .create(&db_config)
        .await
        .context("Failed to open the tip store")
}

/// Loads the option set, surfacing a load failure as a notice rather than
/// an error: the calculator stays usable with the defaults.
async fn load_options(repo: &dyn TipRepository) -> TipOptionSet {
    let loaded = TipOptionSet::initialize(repo).await;
    if loaded.load_error.is_some() {
        println!("Could not load saved custom tip percentages; starting from the defaults.");
    }
    loaded.set
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calc(
    config: &CliConfig,
    bill: String,
    tip: Option<String>,
    people: Option<String>,
    round: bool,
) -> Result<()> {
    let form = RawBillForm {
        bill_amount: bill,
        tip_percentage: tip
            .or_else(|| {
                config
                    .default_tip_percentage
                    .map(|value| value.normalize().to_string())
            })
            .unwrap_or_else(|| FALLBACK_TIP.to_string()),
        number_of_people: people.unwrap_or_else(|| FALLBACK_PEOPLE.to_string()),
        round_share: round,
    };

    let input = match validate::validate(&form) {
        Ok(input) => input,
        Err(errors) => {
            for error in &errors {
                eprintln!("  {error}");
            }
            bail!("invalid input");
        }
    };

    let result = BillSplitWorksheet::new().calculate(&input)?;
    display::print_results(&result);
    Ok(())
}

async fn run_tips_list(repo: &dyn TipRepository) -> Result<()> {
    let set = load_options(repo).await;
    display::print_options(&set);
    Ok(())
}

async fn run_tips_add(
    repo: &dyn TipRepository,
    percentage: &str,
) -> Result<()> {
    let Some(candidate) = validate::parse_percentage(percentage) else {
        bail!("Please enter a valid tip percentage between 0 and 100.");
    };

    let mut set = load_options(repo).await;
    match set.add(repo, candidate).await {
        Ok(()) => {
            println!("Added {}% to your custom tips.", candidate.normalize());
            display::print_options(&set);
            Ok(())
        }
        Err(TipOptionsError::OutOfRange(_)) => {
            bail!("Please enter a valid tip percentage between 0 and 100.")
        }
        Err(TipOptionsError::Duplicate(value)) => {
            bail!("{}% is already in your list.", value.normalize())
        }
        Err(err @ TipOptionsError::Persistence(_)) => {
            debug!("add failed: {err}");
            bail!("Could not save custom tip percentage.")
        }
        Err(err) => Err(err.into()),
    }
}

async fn run_tips_remove(
    repo: &dyn TipRepository,
    config: &CliConfig,
    percentage: &str,
) -> Result<()> {
    let Some(value) = validate::parse_percentage(percentage) else {
        bail!("Please enter a valid tip percentage.");
    };

    let mut set = load_options(repo).await;
    match set.remove(repo, value).await {
        Ok(Removal::Removed) => {
            println!("Removed {}% from your custom tips.", value.normalize());
            if config.default_tip_percentage == Some(value) {
                println!(
                    "Note: {}% was your configured default tip; calculations now fall back to {FALLBACK_TIP}%.",
                    value.normalize()
                );
            }
            display::print_options(&set);
            Ok(())
        }
        Ok(Removal::NotPresent) => {
            println!("{}% is not in your list; nothing to remove.", value.normalize());
            Ok(())
        }
        Err(TipOptionsError::NotRemovable(_)) => {
            bail!("Default tip percentages cannot be removed.")
        }
        Err(err @ TipOptionsError::Persistence(_)) => {
            debug!("remove failed: {err}");
            bail!("Could not update saved custom tips.")
        }
        Err(err) => Err(err.into()),
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)?;

    match &cli.command {
        Command::Calc {
            bill,
            tip,
            people,
            round,
        } => run_calc(&config, bill.clone(), tip.clone(), people.clone(), *round),
        Command::Tips { command } => {
            let repo = open_repository(&cli, &config).await?;
            match command {
                TipsCommand::List => run_tips_list(repo.as_ref()).await,
                TipsCommand::Add { percentage } => {
                    run_tips_add(repo.as_ref(), percentage).await
                }
                TipsCommand::Remove { percentage } => {
                    run_tips_remove(repo.as_ref(), &config, percentage).await
                }
            }
        }
    }
}
