//! SQLite storage implementation

use std::path::Path;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OptionalExtension, params};
use crate::Result;
use crate::vacancy::{CompanyCount, NewVacancy, VacancyListing};
use super::schema;

/// Shared projection for every vacancy listing query
const LISTING_SELECT: &str = r#"
SELECT v.title, v.salary_min, v.salary_max, v.url, c.name
FROM vacancies v
JOIN companies c ON v.company_id = c.id
"#;

/// SQLite-backed storage for companies and vacancies.
///
/// Owns one connection from `open` until `close`; every write commits
/// immediately.
pub struct VacancyStore {
    conn: Connection,
}

impl VacancyStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening vacancy database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        // SQLite's LIKE only folds ASCII; titles are mostly Cyrillic.
        conn.create_scalar_function(
            "casefold",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let value: Option<String> = ctx.get(0)?;
                Ok(value.map(|v| v.to_lowercase()))
            },
        )?;
        Ok(Self { conn })
    }

    /// Create both tables if they are missing
    pub fn create_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Company Operations ==========

    /// Insert a company unless the name is already taken.
    ///
    /// Returns the new row id, or `None` when a company with this exact
    /// name already existed.
    pub fn insert_company(&self, name: &str) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "INSERT INTO companies (name) VALUES (?1) ON CONFLICT(name) DO NOTHING RETURNING id",
                [name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Look up a company id by exact name
    pub fn company_id(&self, name: &str) -> Result<Option<i64>> {
        self.conn
            .query_row("SELECT id FROM companies WHERE name = ?1", [name], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    // ========== Vacancy Operations ==========

    /// Insert vacancies in one transaction. No deduplication is done.
    pub fn insert_vacancies_bulk(&mut self, records: &[NewVacancy]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                r#"
                INSERT INTO vacancies (title, salary_min, salary_max, url, company_id)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for record in records {
                stmt.execute(params![
                    record.title,
                    record.salary_min,
                    record.salary_max,
                    record.url,
                    record.company_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Every vacancy with its company name, in engine order
    pub fn list_all_vacancies(&self) -> Result<Vec<VacancyListing>> {
        self.query_listings(LISTING_SELECT, [])
    }

    /// Vacancy count per company name, including companies with none
    pub fn count_vacancies_by_company(&self) -> Result<Vec<CompanyCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.name, COUNT(v.id)
            FROM companies c
            LEFT JOIN vacancies v ON c.id = v.company_id
            GROUP BY c.name
            "#,
        )?;

        let counts = stmt
            .query_map([], |row| {
                Ok(CompanyCount {
                    company_name: row.get(0)?,
                    vacancies: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }

    /// Mean midpoint salary over vacancies with both bounds set.
    ///
    /// `None` when no vacancy qualifies.
    pub fn average_salary(&self) -> Result<Option<f64>> {
        let avg: Option<f64> = self.conn.query_row(
            r#"
            SELECT AVG((salary_min + salary_max) / 2.0)
            FROM vacancies
            WHERE salary_min IS NOT NULL AND salary_max IS NOT NULL
            "#,
            [],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// Case-insensitive substring search on the title
    pub fn search_by_keyword(&self, keyword: &str) -> Result<Vec<VacancyListing>> {
        let sql = format!(
            "{} WHERE casefold(v.title) LIKE '%' || casefold(?1) || '%'",
            LISTING_SELECT
        );
        self.query_listings(&sql, [keyword])
    }

    /// Vacancies whose midpoint salary is strictly above `threshold`.
    ///
    /// A null bound makes the midpoint null, so such rows never match.
    pub fn search_above_salary(&self, threshold: f64) -> Result<Vec<VacancyListing>> {
        let sql = format!(
            "{} WHERE (v.salary_min + v.salary_max) / 2.0 > ?1",
            LISTING_SELECT
        );
        self.query_listings(&sql, [threshold])
    }

    fn query_listings<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<VacancyListing>> {
        let mut stmt = self.conn.prepare(sql)?;
        let listings = stmt
            .query_map(params, |row| self.row_to_listing(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(listings)
    }

    /// Helper to convert a row to a VacancyListing
    fn row_to_listing(&self, row: &rusqlite::Row) -> rusqlite::Result<VacancyListing> {
        Ok(VacancyListing {
            title: row.get(0)?,
            salary_min: row.get(1)?,
            salary_max: row.get(2)?,
            url: row.get(3)?,
            company_name: row.get(4)?,
        })
    }

    // ========== Housekeeping ==========

    /// Count all companies
    pub fn count_companies(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count all vacancies
    pub fn count_vacancies(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM vacancies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            companies: self.count_companies()?,
            vacancies: self.count_vacancies()?,
        })
    }

    /// Release the connection. The store cannot be used afterwards.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub companies: usize,
    pub vacancies: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Companies: {}", self.companies)?;
        writeln!(f, "  Vacancies: {}", self.vacancies)
    }
}
