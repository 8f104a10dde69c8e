//! Database schema definitions

/// SQL to create the companies table
pub const CREATE_COMPANIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the vacancies table
/// `company_id` references `companies(id)`; enforced once `foreign_keys` is on
pub const CREATE_VACANCIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vacancies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    salary_min INTEGER,
    salary_max INTEGER,
    company_id INTEGER,
    url TEXT,
    FOREIGN KEY (company_id) REFERENCES companies(id)
)
"#;

pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_vacancies_company ON vacancies(company_id)",
];

/// All schema creation statements, in dependency order
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_COMPANIES_TABLE, CREATE_VACANCIES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
