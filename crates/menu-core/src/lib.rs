//! # menu-core
//!
//! why: hold the form side of the menu planner in plain, storage-free rust
//! relations: used by menu-storage for the entry type, by menu-planner for the whole form
//! what: log entry record, categories, catalog loading, menu builder, printable sheet

pub mod builder;
pub mod catalog;
pub mod category;
pub mod clock;
pub mod entry;
pub mod error;
pub mod printable;
pub mod selection;

pub use builder::{MenuBuilder, Preview, PreviewRow};
pub use catalog::{Catalog, CatalogLoad, CatalogLoader, CatalogSet, Dish};
pub use category::Category;
pub use entry::{MenuLogEntry, LOG_HEADER};
pub use error::{CatalogError, ValidationError};
pub use selection::{Selection, SENTINEL};
