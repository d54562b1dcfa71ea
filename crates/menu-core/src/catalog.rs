//! # catalog
//!
//! why: load the read-only dish lists each category offers
//! relations: keyed by category.rs, consulted by builder.rs for options and notes
//! what: Dish record, Catalog, CatalogLoader with empty-on-failure semantics

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::CatalogError;
use crate::selection::SENTINEL;

/// columns every catalog file must carry
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "id",
    "dish_name_hebrew",
    "ingredients",
    "gross_yield_per_person",
    "gross_yield_per_gn1_1",
    "preparation_method",
    "notes",
];

/// One selectable dish
///
/// values are kept as the text found in the file. trailing cells missing
/// from a short row read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Dish {
    pub id: String,
    pub dish_name_hebrew: String,
    pub ingredients: String,
    pub gross_yield_per_person: String,
    pub gross_yield_per_gn1_1: String,
    pub preparation_method: String,
    pub notes: String,
}

/// the dishes of one category, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub dishes: Vec<Dish>,
}

impl Catalog {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// first dish whose display name matches exactly
    pub fn find(&self, name: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.dish_name_hebrew == name)
    }

    /// choices offered for this category: the sentinel, then every named dish
    pub fn options(&self) -> Vec<String> {
        std::iter::once(SENTINEL.to_string())
            .chain(
                self.dishes
                    .iter()
                    .filter(|d| !d.dish_name_hebrew.trim().is_empty())
                    .map(|d| d.dish_name_hebrew.clone()),
            )
            .collect()
    }
}

/// Result of loading one catalog file
///
/// a failed load still yields a catalog (empty) so the form keeps working.
#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub warning: Option<CatalogError>,
}

/// catalogs for every category, plus the warnings raised while loading them
#[derive(Debug, Default)]
pub struct CatalogSet {
    catalogs: BTreeMap<Category, Catalog>,
    pub warnings: Vec<CatalogError>,
}

impl CatalogSet {
    pub fn insert(&mut self, category: Category, catalog: Catalog) {
        self.catalogs.insert(category, catalog);
    }

    pub fn get(&self, category: Category) -> Option<&Catalog> {
        self.catalogs.get(&category)
    }
}

/// reads `<data_dir>/<category_key>.csv` files
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    data_dir: PathBuf,
}

impl CatalogLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, category: Category) -> PathBuf {
        self.data_dir.join(format!("{}.csv", category.key()))
    }

    /// load one category; never fails, see [`CatalogLoad`]
    pub fn load(&self, category: Category) -> CatalogLoad {
        let path = self.path_for(category);
        if !path.exists() {
            debug!(path = %path.display(), "catalog file absent, using empty catalog");
            return CatalogLoad {
                catalog: Catalog::default(),
                warning: None,
            };
        }

        match read_catalog(&path) {
            Ok(catalog) => CatalogLoad {
                catalog,
                warning: None,
            },
            Err(e) => {
                warn!(category = %category, "{e}");
                CatalogLoad {
                    catalog: Catalog::default(),
                    warning: Some(e),
                }
            }
        }
    }

    /// load every category in display order
    pub fn load_all(&self) -> CatalogSet {
        let mut set = CatalogSet::default();
        for category in Category::ALL {
            let load = self.load(category);
            set.insert(category, load.catalog);
            set.warnings.extend(load.warning);
        }
        set
    }
}

fn read_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let unreadable = |source: csv::Error| CatalogError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;

    // headers may carry stray whitespace around names
    let headers: csv::StringRecord = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(str::trim)
        .collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut dishes = Vec::new();
    for record in reader.records() {
        let record = record.map_err(unreadable)?;
        if record.len() > headers.len() {
            return Err(CatalogError::TooManyFields {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                found: record.len(),
                expected: headers.len(),
            });
        }
        dishes.push(record.deserialize::<Dish>(Some(&headers)).map_err(unreadable)?);
    }

    Ok(Catalog::new(dishes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "id,dish_name_hebrew,ingredients,gross_yield_per_person,gross_yield_per_gn1_1,preparation_method,notes";

    #[test]
    fn absent_file_is_an_empty_catalog_without_warning() {
        let dir = tempdir().unwrap();
        let load = CatalogLoader::new(dir.path()).load(Category::Soups);

        assert!(load.catalog.is_empty());
        assert!(load.warning.is_none());
    }

    #[test]
    fn well_formed_file_loads_in_order() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("soups.csv"),
            format!("{HEADER}\n1,מרק עדשים,עדשים,0.3,40,בישול,חריף\n2,מרק ירקות,ירקות,0.3,40,בישול,\n"),
        )
        .unwrap();

        let load = CatalogLoader::new(dir.path()).load(Category::Soups);

        assert!(load.warning.is_none());
        assert_eq!(load.catalog.dishes.len(), 2);
        assert_eq!(load.catalog.dishes[0].dish_name_hebrew, "מרק עדשים");
        assert_eq!(load.catalog.dishes[0].notes, "חריף");
        assert_eq!(load.catalog.dishes[1].notes, "");
    }

    #[test]
    fn options_start_with_sentinel_and_skip_blank_names() {
        let catalog = Catalog::new(vec![
            Dish {
                dish_name_hebrew: "Rice".into(),
                ..Default::default()
            },
            Dish::default(),
        ]);
        assert_eq!(catalog.options(), vec!["-".to_string(), "Rice".to_string()]);
    }

    #[test]
    fn missing_column_is_named_in_warning() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("fish_dishes.csv"),
            "id,dish_name_hebrew,ingredients,gross_yield_per_person,gross_yield_per_gn1_1,preparation_method\n1,x,y,1,2,z\n",
        )
        .unwrap();

        let load = CatalogLoader::new(dir.path()).load(Category::FishDishes);

        assert!(load.catalog.is_empty());
        match load.warning {
            Some(CatalogError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["notes"])
            }
            other => panic!("unexpected warning: {other:?}"),
        }
    }

    #[test]
    fn short_row_fills_missing_cells_with_empty_text() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("soups.csv"),
            format!("{HEADER}\n1,Lentil,lentils,0.3,40,boil,spicy\n2,Veg,veg,0.3,40,boil\n"),
        )
        .unwrap();

        let load = CatalogLoader::new(dir.path()).load(Category::Soups);

        assert!(load.warning.is_none());
        assert_eq!(load.catalog.dishes.len(), 2);
        assert_eq!(load.catalog.dishes[1].preparation_method, "boil");
        assert_eq!(load.catalog.dishes[1].notes, "");
    }
}
