mod calendar;
mod plan;
mod stats;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use triplan_core::{
    parse_human_date, parse_year_month, Config, FileImportRepository, FilePlanRepository, ImportService,
    PlanLoaderUseCase, PlanStore, YearMonth,
};

#[derive(Parser)]
#[command(name = "triplan")]
#[command(about = "Training plan calendar, countdown and mileage tracker", long_about = None)]
struct Cli {
    /// Data directory (defaults to ~/.triplan)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show yesterday, today and tomorrow (or around DATE: today, +3d, fri, 2025-10-01)
    Day {
        date: Option<String>,
        /// Print the day as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a month grid (YYYY-MM, defaults to the current month)
    Calendar { month: Option<String> },
    /// Print the plan week by week
    Plan,
    /// Show progress, countdown and accumulated distances
    Stats {
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List upcoming races with days remaining
    Races { date: Option<String> },
    /// Import an activity export (JSON)
    Import {
        file: Option<PathBuf>,
        /// Drop every cached activity first
        #[arg(long)]
        clear: bool,
    },
    /// Check the plan table for inconsistencies
    Validate,
    /// Open the Terminal User Interface
    Tui,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match input {
        Some(text) => parse_human_date(text, today),
        None => Ok(today),
    }
}

fn load_store(repo: &FilePlanRepository, config: &Config) -> Result<PlanStore> {
    let loader = PlanLoaderUseCase::new(repo);
    if config.strict_validation {
        return loader.load_strict();
    }
    Ok(loader.load()?.store)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.data_dir.clone())?;
    init_tracing(&config);

    let repo = FilePlanRepository::new(cli.data_dir.clone(), &config.plan_file)?;
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Day { date, json }) => {
            let store = load_store(&repo, &config)?;
            let date = resolve_date(date.as_deref(), today)?;
            let imports = ImportService::new(FileImportRepository::new(cli.data_dir.clone())?);
            stats::print_day(&store, date, &imports.activities()?, json)?;
        }
        Some(Commands::Calendar { month }) => {
            let store = load_store(&repo, &config)?;
            let month = match month {
                Some(m) => parse_year_month(&m)?,
                None => YearMonth::of(today),
            };
            print!("{}", calendar::render_month(&store, month, &config));
        }
        Some(Commands::Plan) => {
            let store = load_store(&repo, &config)?;
            plan::show_plan(&store, today);
        }
        Some(Commands::Stats { date, json }) => {
            let store = load_store(&repo, &config)?;
            let date = resolve_date(date.as_deref(), today)?;
            let imports = ImportService::new(FileImportRepository::new(cli.data_dir.clone())?);
            let snapshot = imports.snapshot(date, config.week_start)?;
            stats::print_dashboard(&store, date, snapshot.as_ref(), json)?;
        }
        Some(Commands::Races { date }) => {
            let store = load_store(&repo, &config)?;
            let date = resolve_date(date.as_deref(), today)?;
            plan::show_races(&store, date);
        }
        Some(Commands::Import { file, clear }) => {
            let imports = ImportService::new(FileImportRepository::new(cli.data_dir.clone())?);
            if clear {
                imports.clear()?;
                println!("Import cache cleared.");
            }
            match file {
                Some(path) => {
                    let json = fs::read_to_string(&path)
                        .map_err(|e| anyhow!("Could not read {}: {}", path.display(), e))?;
                    let added = imports.import_json(&json)?;
                    info!(added, file = %path.display(), "import finished");
                    println!("Imported {} new activit{}.", added, if added == 1 { "y" } else { "ies" });
                }
                None if !clear => println!("Error: an export file is required."),
                None => {}
            }
        }
        Some(Commands::Validate) => {
            let outcome = PlanLoaderUseCase::new(&repo).load()?;
            if outcome.issues.is_empty() {
                println!(
                    "Plan OK: {} entries, {} weeks, {} races.",
                    outcome.store.len(),
                    outcome.store.total_weeks(),
                    outcome.store.race_events().len()
                );
            } else {
                println!("Found {} issue(s) in {}:", outcome.issues.len(), repo.path().display());
                for issue in &outcome.issues {
                    println!("  - {}", issue);
                }
                std::process::exit(1);
            }
        }
        Some(Commands::Tui) | None => {
            let store = load_store(&repo, &config)?;
            if store.is_empty() {
                warn!(path = %repo.path().display(), "plan is empty");
            }
            tui::run(store, repo, config, cli.data_dir)?;
        }
    }
    Ok(())
}
