//! # error
//!
//! why: classify the recoverable failures of the form layer
//! relations: CatalogError from catalog.rs, ValidationError from builder.rs and category.rs
//! what: CatalogError, ValidationError

use std::path::PathBuf;

use thiserror::Error;

/// a catalog file that could not be used; the caller substitutes an empty catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file {path} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("catalog file {path} is missing columns: {missing:?}")]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("catalog file {path} line {line} has {found} fields, the header has {expected}")]
    TooManyFields {
        path: PathBuf,
        line: u64,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("nothing to save, build a menu first")]
    EmptyPreview,

    #[error("'{dish}' is not in the {category} catalog")]
    UnknownDish { category: String, dish: String },

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("selection must look like CATEGORY=DISH, got '{0}'")]
    MalformedSelection(String),
}
