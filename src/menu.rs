//! Interactive query menu
//!
//! Reads one choice per line and prints query results until the user exits
//! or input ends. The store is closed when the loop finishes.

use std::io::{BufRead, Write};
use owo_colors::OwoColorize;
use crate::Result;
use crate::storage::VacancyStore;
use crate::ui::{theme, Icons};
use crate::vacancy::VacancyListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AllVacancies,
    CountByCompany,
    AverageSalary,
    SearchKeyword,
    AboveAverage,
    Exit,
}

impl MenuChoice {
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::AllVacancies,
            MenuChoice::CountByCompany,
            MenuChoice::AverageSalary,
            MenuChoice::SearchKeyword,
            MenuChoice::AboveAverage,
            MenuChoice::Exit,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::AllVacancies => "1",
            MenuChoice::CountByCompany => "2",
            MenuChoice::AverageSalary => "3",
            MenuChoice::SearchKeyword => "4",
            MenuChoice::AboveAverage => "5",
            MenuChoice::Exit => "6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AllVacancies => "All vacancies",
            MenuChoice::CountByCompany => "Vacancies per company",
            MenuChoice::AverageSalary => "Average salary",
            MenuChoice::SearchKeyword => "Vacancies by keyword",
            MenuChoice::AboveAverage => "Vacancies with above-average salary",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::all().iter().copied().find(|c| c.key() == input)
    }
}

pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Serve queries until exit or end of input, then close the store
    pub fn run(&mut self, store: VacancyStore) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter option number: ")? else {
                break;
            };

            let keep_going = match MenuChoice::parse(&line) {
                Some(choice) => self.dispatch(&store, choice)?,
                None => {
                    let msg = format!("{} Invalid choice: '{}'", Icons::CROSS, line.trim());
                    writeln!(self.output, "{}", msg.style(theme().error.clone()))?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        tracing::debug!("Closing vacancy database");
        store.close()
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "Choose an action:".style(theme().header.clone()))?;
        for choice in MenuChoice::all() {
            writeln!(self.output, "{}: {}", choice.key(), choice.label())?;
        }
        Ok(())
    }

    /// Print `label` and read one line; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced, so a garbled line is just
    /// another unrecognized choice.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Run one query. Returns false on exit or when input ran out mid-query.
    fn dispatch(&mut self, store: &VacancyStore, choice: MenuChoice) -> Result<bool> {
        tracing::debug!(?choice, "Menu dispatch");
        match choice {
            MenuChoice::AllVacancies => {
                let listings = store.list_all_vacancies()?;
                self.print_listings(&listings)?;
            }
            MenuChoice::CountByCompany => {
                for count in store.count_vacancies_by_company()? {
                    writeln!(self.output, "{}", count)?;
                }
            }
            MenuChoice::AverageSalary => match store.average_salary()? {
                Some(avg) => writeln!(self.output, "Average salary: {:.2}", avg)?,
                None => self.no_salary_data()?,
            },
            MenuChoice::SearchKeyword => {
                let Some(keyword) = self.prompt("Enter keyword: ")? else {
                    return Ok(false);
                };
                let listings = store.search_by_keyword(&keyword)?;
                self.print_listings(&listings)?;
            }
            MenuChoice::AboveAverage => match store.average_salary()? {
                Some(avg) => {
                    let listings = store.search_above_salary(avg)?;
                    self.print_listings(&listings)?;
                }
                None => self.no_salary_data()?,
            },
            MenuChoice::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn print_listings(&mut self, listings: &[VacancyListing]) -> Result<()> {
        if listings.is_empty() {
            writeln!(self.output, "{} No vacancies found.", Icons::CROSS)?;
        }
        for listing in listings {
            writeln!(self.output, "{}", listing)?;
        }
        Ok(())
    }

    fn no_salary_data(&mut self) -> Result<()> {
        writeln!(self.output, "{} No vacancies with a full salary range.", Icons::WARN)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vacancy::NewVacancy;
    use std::io::Cursor;

    fn seeded_store() -> VacancyStore {
        let mut store = VacancyStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        let a = store.insert_company("A").unwrap().unwrap();
        let b = store.insert_company("B").unwrap().unwrap();
        store
            .insert_vacancies_bulk(&[
                NewVacancy::new("Junior Rust Engineer", a)
                    .with_salary(Some(50), Some(150))
                    .with_url("http://a"),
                NewVacancy::new("Senior Go Engineer", b)
                    .with_salary(Some(200), Some(400))
                    .with_url("http://b"),
            ])
            .unwrap();
        store
    }

    fn run_with(input: &str, store: VacancyStore) -> String {
        let mut out = Vec::new();
        Menu::new(Cursor::new(input.to_string()), &mut out).run(store).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AllVacancies));
        assert_eq!(MenuChoice::parse(" 6 \n"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_list_all_then_exit() {
        let out = run_with("1\n6\n", seeded_store());
        assert!(out.contains("Vacancy: Junior Rust Engineer, from 50 to 150, link: http://a, company: A"));
        assert!(out.contains("company: B"));
        assert_eq!(out.matches("Choose an action:").count(), 2);
    }

    #[test]
    fn test_counts_and_average() {
        let out = run_with("2\n3\n6\n", seeded_store());
        assert!(out.contains("Company: A, vacancies: 1"));
        assert!(out.contains("Company: B, vacancies: 1"));
        assert!(out.contains("Average salary: 200.00"));
    }

    #[test]
    fn test_keyword_and_above_average() {
        let out = run_with("4\nrust\n5\n6\n", seeded_store());
        assert!(out.contains("Enter keyword: "));
        assert_eq!(out.matches("Junior Rust Engineer").count(), 1);
        assert_eq!(out.matches("Senior Go Engineer").count(), 1);
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let out = run_with("abc\n6\n", seeded_store());
        assert!(out.contains("Invalid choice: 'abc'"));
        assert_eq!(out.matches("Choose an action:").count(), 2);
    }

    #[test]
    fn test_empty_store_reports_missing_salary() {
        let store = VacancyStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        let out = run_with("3\n5\n1\n", store);
        assert_eq!(out.matches("No vacancies with a full salary range.").count(), 2);
        assert!(out.contains("No vacancies found."));
    }

    #[test]
    fn test_non_utf8_choice_is_reported() {
        let mut out = Vec::new();
        let input = Cursor::new(vec![0xff, 0xfe, b'\n', b'6', b'\n']);
        Menu::new(input, &mut out).run(seeded_store()).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Invalid choice"));
        assert_eq!(out.matches("Choose an action:").count(), 2);
    }

    #[test]
    fn test_keyword_keeps_surrounding_spaces() {
        let out = run_with("4\n Go \n6\n", seeded_store());
        assert_eq!(out.matches("Senior Go Engineer").count(), 1);

        let out = run_with("4\n Rust\n6\n", seeded_store());
        assert_eq!(out.matches("Junior Rust Engineer").count(), 1);

        let out = run_with("4\nEngineer \n6\n", seeded_store());
        assert!(!out.contains("Junior Rust Engineer"));
        assert!(out.contains("No vacancies found."));
    }

    #[test]
    fn test_exit_goes_through_dispatch() {
        let store = seeded_store();
        let mut out = Vec::new();
        let mut menu = Menu::new(Cursor::new(String::new()), &mut out);
        assert!(!menu.dispatch(&store, MenuChoice::Exit).unwrap());
        assert!(menu.dispatch(&store, MenuChoice::AverageSalary).unwrap());
    }

    #[test]
    fn test_end_of_input_exits() {
        let out = run_with("", seeded_store());
        assert_eq!(out.matches("Choose an action:").count(), 1);

        let out = run_with("4\n", seeded_store());
        assert!(out.contains("Enter keyword: "));
    }
}
