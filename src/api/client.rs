//! Blocking hh.ru client and the pagination loop

use super::types::{RawVacancy, VacanciesPage};
use crate::config::ApiConfig;
use crate::Result;
use reqwest::StatusCode;
use reqwest::blocking::Client;

/// Fixed page size requested from the API
pub const PAGE_SIZE: usize = 100;

/// Why a single page could not be fetched
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that can hand back one page of raw vacancies.
///
/// `HhClient` talks to the real API; tests script pages directly.
pub trait PageSource {
    fn fetch_page(
        &self,
        employer_id: Option<&str>,
        page: u32,
    ) -> std::result::Result<Vec<RawVacancy>, PageError>;
}

/// Walk pages `0..pages` in order and collect their items.
///
/// Stops at the first empty page, the first short page (fewer than
/// `PAGE_SIZE` items, kept), or the first failed page. A failure is logged
/// and whatever was already collected is returned.
pub fn fetch_vacancies<S: PageSource + ?Sized>(
    source: &S,
    employer_id: Option<&str>,
    pages: u32,
) -> Vec<RawVacancy> {
    let employer_id = employer_id.filter(|id| !id.is_empty());
    let mut all = Vec::new();

    for page in 0..pages {
        let items = match source.fetch_page(employer_id, page) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(page, "Vacancy request failed: {}", e);
                break;
            }
        };

        if items.is_empty() {
            tracing::info!("No vacancies on page {}", page + 1);
            break;
        }

        let last_page = items.len() < PAGE_SIZE;
        tracing::debug!(page, count = items.len(), "Fetched vacancy page");
        all.extend(items);

        if last_page {
            break;
        }
    }

    all
}

/// Client for `GET {base}/vacancies`
pub struct HhClient {
    client: Client,
    base_url: String,
}

impl HhClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn vacancies_url(&self) -> String {
        format!("{}/vacancies", self.base_url)
    }

    /// Fetch up to `pages` pages of vacancies, optionally for one employer
    pub fn fetch(&self, employer_id: Option<&str>, pages: u32) -> Vec<RawVacancy> {
        fetch_vacancies(self, employer_id, pages)
    }
}

impl PageSource for HhClient {
    fn fetch_page(
        &self,
        employer_id: Option<&str>,
        page: u32,
    ) -> std::result::Result<Vec<RawVacancy>, PageError> {
        let mut query = vec![
            ("per_page", PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(id) = employer_id {
            query.push(("employer_id", id.to_string()));
        }

        let resp = self.client.get(self.vacancies_url()).query(&query).send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().unwrap_or_default();
            return Err(PageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page: VacanciesPage = resp.json()?;
        Ok(page.items)
    }
}
