//! Wire types for the hh.ru `/vacancies` endpoint.
//!
//! Every field the normalizer reads is optional here; defaults are applied
//! later, in `vacancy::NormalizedVacancy::from`.

use serde::Deserialize;

/// One page of search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacanciesPage {
    #[serde(default)]
    pub items: Vec<RawVacancy>,
    pub found: Option<u64>,
    pub pages: Option<u32>,
}

/// A vacancy as returned by the API, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawVacancy {
    pub name: Option<String>,
    pub salary: Option<RawSalary>,
    pub alternate_url: Option<String>,
    pub employer: Option<RawEmployer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSalary {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEmployer {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_with_sparse_items() {
        let body = r#"{
            "found": 2,
            "pages": 1,
            "items": [
                {
                    "name": "Rust Developer",
                    "salary": {"from": 200000, "to": null, "currency": "RUR"},
                    "alternate_url": "https://hh.ru/vacancy/1",
                    "employer": {"id": "1740", "name": "Yandex"}
                },
                {"name": "Intern", "salary": null}
            ]
        }"#;

        let page: VacanciesPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        let salary = first.salary.as_ref().unwrap();
        assert_eq!(salary.from, Some(200000));
        assert_eq!(salary.to, None);
        assert_eq!(first.employer.as_ref().unwrap().name.as_deref(), Some("Yandex"));

        let second = &page.items[1];
        assert!(second.salary.is_none());
        assert!(second.employer.is_none());
        assert!(second.alternate_url.is_none());
    }

    #[test]
    fn test_decode_page_without_items() {
        let page: VacanciesPage = serde_json::from_str(r#"{"found": 0}"#).unwrap();
        assert!(page.items.is_empty());
    }
}
