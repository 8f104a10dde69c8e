//! Ingestion - fetch, normalize, store
//!
//! Each vacancy is written as soon as its company is resolved, so an
//! interrupted run keeps everything stored before the failure.

use crate::api::{PageSource, RawVacancy, fetch_vacancies};
use crate::storage::VacancyStore;
use crate::vacancy::NormalizedVacancy;
use crate::{Error, Result};

/// What one ingestion run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub fetched: usize,
    pub companies_created: usize,
    pub vacancies_stored: usize,
}

/// Fetch vacancies from `source` and store them
pub fn ingest<S: PageSource + ?Sized>(
    store: &mut VacancyStore,
    source: &S,
    employer_id: Option<&str>,
    pages: u32,
) -> Result<IngestReport> {
    let raw = fetch_vacancies(source, employer_id, pages);
    tracing::info!("Fetched {} vacancies", raw.len());
    store_vacancies(store, raw)
}

/// Normalize raw records and persist them one at a time
pub fn store_vacancies(store: &mut VacancyStore, raw: Vec<RawVacancy>) -> Result<IngestReport> {
    let mut report = IngestReport {
        fetched: raw.len(),
        ..Default::default()
    };

    for record in raw {
        let vacancy = NormalizedVacancy::from(record);
        let (company_id, created) = resolve_company(store, &vacancy.company_name)?;
        if created {
            report.companies_created += 1;
        }

        report.vacancies_stored += store.insert_vacancies_bulk(&[vacancy.into_new_vacancy(company_id)])?;
    }

    Ok(report)
}

/// Insert the company or, when the name is already taken, look up its id.
///
/// The flag is true when a new row was created.
fn resolve_company(store: &VacancyStore, name: &str) -> Result<(i64, bool)> {
    if let Some(id) = store.insert_company(name)? {
        tracing::debug!(company = name, id, "Created company");
        return Ok((id, true));
    }

    match store.company_id(name)? {
        Some(id) => Ok((id, false)),
        None => Err(Error::UnresolvedCompany(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PageError, RawEmployer, RawSalary};
    use crate::vacancy::{NO_LINK, UNKNOWN_COMPANY, UNSPECIFIED_TITLE};

    struct FixedPages(Vec<Vec<RawVacancy>>);

    impl PageSource for FixedPages {
        fn fetch_page(
            &self,
            _employer_id: Option<&str>,
            page: u32,
        ) -> std::result::Result<Vec<RawVacancy>, PageError> {
            Ok(self.0.get(page as usize).cloned().unwrap_or_default())
        }
    }

    fn raw(title: &str, company: &str, salary: Option<(i64, i64)>) -> RawVacancy {
        RawVacancy {
            name: Some(title.to_string()),
            salary: salary.map(|(from, to)| RawSalary {
                from: Some(from),
                to: Some(to),
                currency: None,
            }),
            alternate_url: Some(format!("https://hh.ru/{}", title)),
            employer: Some(RawEmployer {
                id: None,
                name: Some(company.to_string()),
            }),
        }
    }

    fn store() -> VacancyStore {
        let store = VacancyStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        store
    }

    #[test]
    fn test_repeat_company_reuses_existing_row() {
        let mut store = store();
        let report = store_vacancies(
            &mut store,
            vec![
                raw("Engineer", "Acme", Some((100, 200))),
                raw("Tester", "Acme", None),
                raw("Designer", "Globex", None),
            ],
        )
        .unwrap();

        assert_eq!(
            report,
            IngestReport { fetched: 3, companies_created: 2, vacancies_stored: 3 }
        );

        let mut counts = store.count_vacancies_by_company().unwrap();
        counts.sort_by(|a, b| a.company_name.cmp(&b.company_name));
        assert_eq!(counts[0].company_name, "Acme");
        assert_eq!(counts[0].vacancies, 2);
        assert_eq!(counts[1].vacancies, 1);
    }

    #[test]
    fn test_defaults_reach_storage() {
        let mut store = store();
        store_vacancies(&mut store, vec![RawVacancy::default()]).unwrap();

        let all = store.list_all_vacancies().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, UNSPECIFIED_TITLE);
        assert_eq!(all[0].company_name, UNKNOWN_COMPANY);
        assert_eq!(all[0].url.as_deref(), Some(NO_LINK));
        assert_eq!(all[0].salary_min, None);
        assert_eq!(all[0].salary_max, None);
    }

    #[test]
    fn test_second_run_duplicates_vacancies_not_companies() {
        let mut store = store();
        let source = FixedPages(vec![vec![raw("Engineer", "Acme", None)]]);

        ingest(&mut store, &source, None, 5).unwrap();
        let second = ingest(&mut store, &source, None, 5).unwrap();

        assert_eq!(second.companies_created, 0);
        assert_eq!(store.count_companies().unwrap(), 1);
        assert_eq!(store.count_vacancies().unwrap(), 2);
    }

    #[test]
    fn test_ingest_empty_source() {
        let mut store = store();
        let report = ingest(&mut store, &FixedPages(Vec::new()), None, 3).unwrap();
        assert_eq!(report, IngestReport::default());
    }
}
