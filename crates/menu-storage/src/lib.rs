//! # menu-storage
//!
//! why: durably record finalized menus in whichever log the kitchen uses
//! relations: stores menu-core entries, opened by menu-planner at startup
//! what: LogBackend trait, CsvLog, SheetsLog, InMemorySheets for testing, MenuLogStore

pub mod error;
pub mod local;
pub mod memory;
pub mod remote;
pub mod sheets;
pub mod store;

pub use error::StoreError;
pub use local::{CsvLog, LOG_FILE_NAME};
pub use memory::InMemorySheets;
pub use remote::{SheetsLog, DEFAULT_WORKSHEET};
pub use sheets::{HttpSheetClient, SheetClient, ValueInputOption};
pub use store::{Backend, MenuLogStore, SheetsConfig, StoreConfig};

use menu_core::MenuLogEntry;

/// trait for an append-only menu log
///
/// this abstraction allows the same store code to work with:
/// - a csv file (local)
/// - a spreadsheet worksheet (remote)
pub trait LogBackend {
    /// one more than the highest id in the log, 1 for an empty log
    fn next_id(&self) -> Result<u64, StoreError>;

    /// durably add one entry after every existing one
    fn append(&mut self, entry: &MenuLogEntry) -> Result<(), StoreError>;

    /// every entry in insertion order
    fn load_log(&self) -> Result<Vec<MenuLogEntry>, StoreError>;

    /// human-readable description of where entries are kept
    fn location(&self) -> String;
}
