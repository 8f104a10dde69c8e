//! Vacancy types
//!
//! Raw API records are normalized exactly once, into a `NormalizedVacancy`
//! carrying every placeholder default. Storage only ever sees normalized data.

use crate::api::RawVacancy;
use std::fmt;

pub const UNKNOWN_COMPANY: &str = "unknown";
pub const UNSPECIFIED_TITLE: &str = "not specified";
pub const NO_LINK: &str = "no link";

/// A fetched vacancy with defaults applied, not yet tied to a company row
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVacancy {
    pub company_name: String,
    pub title: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub url: String,
}

impl NormalizedVacancy {
    /// Bind this vacancy to a stored company
    pub fn into_new_vacancy(self, company_id: i64) -> NewVacancy {
        NewVacancy {
            title: self.title,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            url: Some(self.url),
            company_id,
        }
    }
}

impl From<RawVacancy> for NormalizedVacancy {
    fn from(raw: RawVacancy) -> Self {
        let company_name = raw
            .employer
            .and_then(|e| e.name)
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());
        let (salary_min, salary_max) = raw
            .salary
            .map(|s| (s.from, s.to))
            .unwrap_or((None, None));

        Self {
            company_name,
            title: raw.name.unwrap_or_else(|| UNSPECIFIED_TITLE.to_string()),
            salary_min,
            salary_max,
            url: raw.alternate_url.unwrap_or_else(|| NO_LINK.to_string()),
        }
    }
}

/// Row to insert into `vacancies`
#[derive(Debug, Clone, PartialEq)]
pub struct NewVacancy {
    pub title: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub url: Option<String>,
    pub company_id: i64,
}

impl NewVacancy {
    pub fn new(title: impl Into<String>, company_id: i64) -> Self {
        Self {
            title: title.into(),
            salary_min: None,
            salary_max: None,
            url: None,
            company_id,
        }
    }

    pub fn with_salary(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.salary_min = min;
        self.salary_max = max;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A stored vacancy joined with its company name
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyListing {
    pub title: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub url: Option<String>,
    pub company_name: String,
}

fn or_dash(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for VacancyListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vacancy: {}, from {} to {}, link: {}, company: {}",
            self.title,
            or_dash(self.salary_min),
            or_dash(self.salary_max),
            self.url.as_deref().unwrap_or(NO_LINK),
            self.company_name
        )
    }
}

/// Number of vacancies stored for one company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCount {
    pub company_name: String,
    pub vacancies: i64,
}

impl fmt::Display for CompanyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Company: {}, vacancies: {}", self.company_name, self.vacancies)
    }
}
