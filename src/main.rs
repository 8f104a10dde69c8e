//! Vacancy Harvest CLI - fetch hh.ru vacancies, then query them interactively

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vacancy_harvest::config::{self, AppConfig};
use vacancy_harvest::ingest::ingest;
use vacancy_harvest::menu::Menu;
use vacancy_harvest::ui::{self, Icons, Spinner};
use vacancy_harvest::{HhClient, VacancyStore};

#[derive(Parser)]
#[command(name = "vacancy-harvest")]
#[command(version)]
#[command(about = "Fetch hh.ru vacancies into SQLite and query them from a menu")]
#[command(long_about = r#"
Fetches vacancies from the hh.ru public API, stores them as companies and
vacancies in SQLite, then opens an interactive menu:
  1  all vacancies
  2  vacancy count per company
  3  average salary
  4  keyword search
  5  vacancies paid above average
  6  exit

Settings are read from vacancies.toml when present:
  [database]
  path = "vacancies.db"
  [api]
  pages = 5
  employer_id = "1740"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip fetching and only query the existing database
    #[arg(long)]
    skip_fetch: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the menu
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    config::ensure_db_dir(&config.database.path)?;

    ui::header("Vacancy Harvest");
    ui::status(
        Icons::DATABASE,
        "Database",
        &config.database.path.display().to_string(),
    );

    let mut store = VacancyStore::open(&config.database.path)?;
    store.create_schema()?;

    if cli.skip_fetch {
        ui::info("Fetch", "skipped");
    } else {
        fetch_and_store(&mut store, &config)?;
    }

    let stdin = std::io::stdin();
    Menu::new(stdin.lock(), std::io::stdout()).run(store)?;
    ui::success("Database closed");
    Ok(())
}

fn fetch_and_store(store: &mut VacancyStore, config: &AppConfig) -> anyhow::Result<()> {
    let client = HhClient::new(&config.api)?;
    let employer_id = config.api.employer_id.as_deref();

    ui::status(Icons::GLOBE, "Source", &client.vacancies_url());
    if let Some(id) = employer_id {
        ui::info("Employer", id);
    }

    let spinner = Spinner::new(&format!(
        "Fetching up to {} pages of vacancies...",
        config.api.pages
    ));
    let report = ingest(store, &client, employer_id, config.api.pages)?;
    spinner.finish_and_clear();

    if report.fetched == 0 {
        ui::warn("No vacancies fetched; querying existing data");
    }

    let stats = store.stats()?;
    ui::section("Ingestion summary");
    println!(
        "{}",
        ui::stats_table(&[
            ("Fetched", report.fetched.to_string()),
            ("New companies", report.companies_created.to_string()),
            ("Vacancies stored", report.vacancies_stored.to_string()),
            ("Companies in database", stats.companies.to_string()),
            ("Vacancies in database", stats.vacancies.to_string()),
        ])
    );
    tracing::info!("{}", stats.to_string().trim_end());
    Ok(())
}
