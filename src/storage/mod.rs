//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - companies(id, name UNIQUE)
//! - vacancies(id, title, salary_min, salary_max, company_id -> companies.id, url)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, VacancyStore};
