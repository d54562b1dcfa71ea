//! # builder
//!
//! why: turn the per-category form state into a menu and then into a log entry
//! relations: reads catalog.rs, holds selection.rs values, emits entry.rs records
//! what: MenuBuilder form state, Preview rows, empty-preview rejection

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::catalog::CatalogSet;
use crate::category::Category;
use crate::clock::format_timestamp;
use crate::entry::MenuLogEntry;
use crate::error::ValidationError;
use crate::selection::Selection;

static NO_SELECTION: Selection = Selection::None;

/// One line of the menu preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    /// 1-based position in the preview
    pub number: usize,
    pub category: Category,
    pub dish_name: String,
    /// notes from the catalog, empty when the catalog has none
    pub notes: String,
}

/// The menu as it would be printed and saved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub rows: Vec<PreviewRow>,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn dish_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.dish_name.as_str()).collect()
    }

    /// serialize a confirmed preview into exactly one log entry
    ///
    /// an empty preview is rejected here so no store is ever asked to save it.
    pub fn to_entry(&self, id: u64, at: &DateTime<Tz>) -> Result<MenuLogEntry, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPreview);
        }
        Ok(MenuLogEntry::from_dishes(
            id,
            &self.dish_names(),
            format_timestamp(at),
        ))
    }
}

/// Form state: one selection per category
///
/// every category starts at the sentinel.
#[derive(Debug)]
pub struct MenuBuilder {
    catalogs: CatalogSet,
    choices: BTreeMap<Category, Selection>,
}

impl MenuBuilder {
    pub fn new(catalogs: CatalogSet) -> Self {
        let choices = Category::ALL
            .into_iter()
            .map(|c| (c, Selection::None))
            .collect();
        Self { catalogs, choices }
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn selection(&self, category: Category) -> &Selection {
        self.choices.get(&category).unwrap_or(&NO_SELECTION)
    }

    /// set the choice for a category; a dish must be offered by that category's catalog
    pub fn select(
        &mut self,
        category: Category,
        selection: Selection,
    ) -> Result<(), ValidationError> {
        if let Selection::Dish(name) = &selection {
            let offered = self
                .catalogs
                .get(category)
                .is_some_and(|catalog| catalog.find(name).is_some());
            if !offered {
                return Err(ValidationError::UnknownDish {
                    category: category.key().to_string(),
                    dish: name.clone(),
                });
            }
        }
        self.choices.insert(category, selection);
        Ok(())
    }

    /// reset a category back to the sentinel
    pub fn clear(&mut self, category: Category) {
        self.choices.insert(category, Selection::None);
    }

    /// chosen dishes in category display order; sentinel categories are omitted
    pub fn build_preview(&self) -> Preview {
        let rows = Category::ALL
            .into_iter()
            .filter_map(|category| {
                let name = self.selection(category).dish()?;
                let notes = self
                    .catalogs
                    .get(category)
                    .and_then(|catalog| catalog.find(name))
                    .map(|dish| dish.notes.trim().to_string())
                    .unwrap_or_default();
                Some((category, name.to_string(), notes))
            })
            .enumerate()
            .map(|(i, (category, dish_name, notes))| PreviewRow {
                number: i + 1,
                category,
                dish_name,
                notes,
            })
            .collect();

        Preview { rows }
    }
}
