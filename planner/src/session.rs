//! # session
//!
//! why: turn each user action into exactly one status the user sees
//! relations: drives menu-core's MenuBuilder and menu-storage's MenuLogStore
//! what: Status, Session with select / preview / print / save

use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use menu_core::clock::now_in;
use menu_core::selection::parse_assignment;
use menu_core::{printable, Category, MenuBuilder, Preview, Selection, ValidationError};
use menu_storage::{HttpSheetClient, MenuLogStore, SheetClient};
use tracing::{error, info};

/// Outcome of one user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success(String),
    /// recovered locally, nothing was written
    Warning(String),
    /// the action did not take effect
    Error(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Status::Success(m) | Status::Warning(m) | Status::Error(m) => m,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Status::Success(_) => "ok",
            Status::Warning(_) => "warning",
            Status::Error(_) => "error",
        };
        write!(f, "{tag}: {}", self.message())
    }
}

impl From<ValidationError> for Status {
    fn from(e: ValidationError) -> Self {
        Status::Warning(e.to_string())
    }
}

/// categories a catalog listing covers: one by key, or all of them
pub fn listed_categories(key: Option<&str>) -> Result<Vec<Category>, Status> {
    match key {
        Some(key) => Ok(vec![key.parse::<Category>()?]),
        None => Ok(Category::ALL.to_vec()),
    }
}

/// A printable menu ready to be written out
#[derive(Debug, Clone)]
pub struct Printable {
    pub file_name: String,
    pub html: String,
}

/// One planner session: form state plus the log it saves into
pub struct Session<C = HttpSheetClient> {
    builder: MenuBuilder,
    store: MenuLogStore<C>,
    timezone: Tz,
}

impl<C: SheetClient> Session<C> {
    pub fn new(builder: MenuBuilder, store: MenuLogStore<C>, timezone: Tz) -> Self {
        Self {
            builder,
            store,
            timezone,
        }
    }

    pub fn builder(&self) -> &MenuBuilder {
        &self.builder
    }

    pub fn store(&self) -> &MenuLogStore<C> {
        &self.store
    }

    /// warnings raised while the catalogs were loaded
    pub fn catalog_warnings(&self) -> Vec<Status> {
        self.builder
            .catalogs()
            .warnings
            .iter()
            .map(|w| Status::Warning(w.to_string()))
            .collect()
    }

    pub fn select(&mut self, category: Category, selection: Selection) -> Result<(), Status> {
        self.builder.select(category, selection).map_err(Status::from)
    }

    /// apply `category=dish` assignments in order; every rejected one becomes a warning
    pub fn select_all<S: AsRef<str>>(&mut self, assignments: &[S]) -> Vec<Status> {
        assignments
            .iter()
            .filter_map(|raw| {
                parse_assignment(raw.as_ref())
                    .and_then(|(category, selection)| self.builder.select(category, selection))
                    .err()
                    .map(Status::from)
            })
            .collect()
    }

    pub fn preview(&self) -> Preview {
        self.builder.build_preview()
    }

    pub fn printable(&self) -> Printable {
        self.printable_at(now_in(self.timezone))
    }

    pub fn printable_at(&self, at: DateTime<Tz>) -> Printable {
        Printable {
            file_name: printable::file_name(&at),
            html: printable::render(&self.preview(), &at),
        }
    }

    /// save the current menu, stamped now in the planner's zone
    pub fn save(&mut self) -> Status {
        let at = now_in(self.timezone);
        self.save_at(at)
    }

    pub fn save_at(&mut self, at: DateTime<Tz>) -> Status {
        let preview = self.preview();
        if preview.is_empty() {
            return ValidationError::EmptyPreview.into();
        }

        let id = self.store.next_id();
        let entry = match preview.to_entry(id, &at) {
            Ok(entry) => entry,
            Err(e) => return e.into(),
        };

        match self.store.append(&entry) {
            Ok(()) => {
                info!(id, "menu saved");
                Status::Success(format!("saved to {} (id={id})", self.store.location()))
            }
            Err(e) => {
                error!(error = %e, "menu save failed");
                Status::Error(format!("save failed: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use menu_core::clock::DEFAULT_TIMEZONE;
    use menu_core::{Catalog, CatalogSet, Dish};
    use menu_storage::{CsvLog, InMemorySheets, LogBackend, SheetsLog, DEFAULT_WORKSHEET};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn catalogs() -> CatalogSet {
        let dish = |name: &str| Dish {
            dish_name_hebrew: name.into(),
            ..Default::default()
        };
        let mut set = CatalogSet::default();
        set.insert(Category::FishDishes, Catalog::new(vec![dish("Fish")]));
        set.insert(Category::Soups, Catalog::new(vec![dish("Soup")]));
        set
    }

    fn at() -> DateTime<Tz> {
        DEFAULT_TIMEZONE.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn remote_session(sheets: &InMemorySheets, dir: &std::path::Path) -> Session<InMemorySheets> {
        let store = MenuLogStore::remote(
            CsvLog::new(dir),
            SheetsLog::new(sheets.clone(), "doc", DEFAULT_WORKSHEET),
        );
        Session::new(MenuBuilder::new(catalogs()), store, DEFAULT_TIMEZONE)
    }

    #[test]
    fn unknown_catalog_key_is_a_warning() {
        assert_eq!(
            listed_categories(Some("desserts")),
            Err(Status::Warning("unknown category 'desserts'".into()))
        );
        assert_eq!(listed_categories(Some("soups")), Ok(vec![Category::Soups]));
        assert_eq!(listed_categories(None).unwrap().len(), Category::ALL.len());
    }

    #[test]
    fn empty_save_makes_no_backend_call() {
        let dir = tempdir().unwrap();
        let sheets = InMemorySheets::new();
        let mut session = remote_session(&sheets, dir.path());

        let status = session.save_at(at());

        assert_eq!(status, Status::Warning("nothing to save, build a menu first".into()));
        assert_eq!(sheets.call_count(), 0);
    }

    #[test]
    fn save_appends_one_entry_in_category_order() {
        let dir = tempdir().unwrap();
        let mut session: Session<InMemorySheets> = Session::new(
            MenuBuilder::new(catalogs()),
            MenuLogStore::local(CsvLog::new(dir.path())),
            DEFAULT_TIMEZONE,
        );
        assert!(session.select_all(&["soups=Soup", "fish_dishes=Fish"]).is_empty());

        let status = session.save_at(at());

        assert!(matches!(status, Status::Success(ref m) if m.contains("id=1")));
        let log = CsvLog::new(dir.path()).load_log().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].dishes, "Fish, Soup");
        assert_eq!(log[0].at_date, "2024-01-01 12:00:00");
    }

    #[test]
    fn remote_failure_becomes_error_status() {
        let dir = tempdir().unwrap();
        let sheets = InMemorySheets::new();
        let mut session = remote_session(&sheets, dir.path());
        session.select(Category::Soups, Selection::parse("Soup")).unwrap();
        sheets.fail_with("invalid credentials");

        let status = session.save_at(at());

        assert!(status.is_error());
        assert!(status.message().contains("invalid credentials"));
    }

    #[test]
    fn rejected_selections_are_warnings() {
        let dir = tempdir().unwrap();
        let sheets = InMemorySheets::new();
        let mut session = remote_session(&sheets, dir.path());

        let warnings = session.select_all(&["soups=Pizza", "desserts=Cake", "soups"]);

        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| matches!(w, Status::Warning(_))));
        assert!(session.preview().is_empty());
    }

    #[test]
    fn printable_names_file_after_time() {
        let dir = tempdir().unwrap();
        let sheets = InMemorySheets::new();
        let mut session = remote_session(&sheets, dir.path());
        session.select(Category::Soups, Selection::parse("Soup")).unwrap();

        let printable = session.printable_at(at());

        assert_eq!(printable.file_name, "menu_20240101_1200.html");
        assert!(printable.html.contains("<td>Soup</td>"));
        assert_eq!(sheets.call_count(), 0);
    }
}
