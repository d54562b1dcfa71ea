//! # menu-planner
//!
//! why: the kitchen-facing front end of the menu planner
//! relations: composes menu-core (form) and menu-storage (log) behind a cli
//! what: configuration, per-action session with status messages, terminal output

pub mod cli;
pub mod config;
pub mod output;
pub mod session;

pub use config::{ConfigError, PlannerConfig};
pub use session::{listed_categories, Printable, Session, Status};
