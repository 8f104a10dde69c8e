//! API Client - hh.ru vacancy search
//!
//! Issues sequential, blocking page requests against `{base}/vacancies` and
//! flattens the results into raw records.

pub mod client;
pub mod types;

pub use client::{HhClient, PageError, PageSource, PAGE_SIZE, fetch_vacancies};
pub use types::{RawEmployer, RawSalary, RawVacancy, VacanciesPage};
