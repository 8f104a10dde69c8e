//! # Vacancy Harvest
//!
//! Pulls job vacancies from the hh.ru public API into SQLite and answers a
//! handful of aggregate questions about them.
//!
//! Vacancy Harvest provides:
//! - A blocking, paginated API client with a pluggable page source
//! - Normalization of raw API records into companies and vacancies
//! - SQLite-backed storage with company deduplication by name
//! - An interactive query menu over the stored data

pub mod api;
pub mod config;
pub mod ingest;
pub mod menu;
pub mod storage;
pub mod ui;
pub mod vacancy;

// Re-exports for convenient access
pub use api::{HhClient, PageSource, RawVacancy};
pub use config::AppConfig;
pub use storage::VacancyStore;
pub use vacancy::{CompanyCount, NewVacancy, VacancyListing};

/// Result type alias for Vacancy Harvest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Vacancy Harvest operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Company '{0}' was neither inserted nor found")]
    UnresolvedCompany(String),
}
