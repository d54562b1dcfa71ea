//! # entry
//!
//! why: define the one record the menu log ever stores
//! relations: produced by builder.rs from a preview, persisted via menu-storage
//! what: MenuLogEntry struct, log column header, dish joining

use serde::{Deserialize, Serialize};

/// column names of the menu log, in storage order
pub const LOG_HEADER: [&str; 3] = ["id", "dishes", "at_date"];

/// delimiter between dish names in the `dishes` column
pub const DISH_DELIMITER: &str = ", ";

/// A single finalized menu in the log
///
/// entries are immutable once appended. unknown columns found next to these
/// three are ignored when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLogEntry {
    /// advisory identifier, expected to increase but not enforced
    pub id: u64,
    /// display names joined with ", " in category order
    pub dishes: String,
    /// `YYYY-MM-DD HH:MM:SS` in the planner's fixed timezone
    pub at_date: String,
}

impl MenuLogEntry {
    /// Create a new entry from already-joined fields
    pub fn new(id: u64, dishes: impl Into<String>, at_date: impl Into<String>) -> Self {
        Self {
            id,
            dishes: dishes.into(),
            at_date: at_date.into(),
        }
    }

    /// Create an entry from individual dish names
    pub fn from_dishes<S: AsRef<str>>(id: u64, dishes: &[S], at_date: impl Into<String>) -> Self {
        let joined = dishes
            .iter()
            .map(|d| d.as_ref())
            .collect::<Vec<&str>>()
            .join(DISH_DELIMITER);
        Self::new(id, joined, at_date)
    }

    /// the log row in column order
    pub fn to_row(&self) -> [String; 3] {
        [self.id.to_string(), self.dishes.clone(), self.at_date.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dishes_joins_with_comma_space() {
        let entry = MenuLogEntry::from_dishes(5, &["Soup", "Fish"], "2024-01-01 12:00:00");
        assert_eq!(entry.dishes, "Soup, Fish");
        assert_eq!(entry.id, 5);
    }

    #[test]
    fn from_no_dishes_is_empty_string() {
        let entry = MenuLogEntry::from_dishes::<&str>(1, &[], "2024-01-01 12:00:00");
        assert_eq!(entry.dishes, "");
    }

    #[test]
    fn row_follows_header_order() {
        let entry = MenuLogEntry::new(3, "Rice", "2024-02-02 08:30:00");
        assert_eq!(entry.to_row(), ["3".to_string(), "Rice".into(), "2024-02-02 08:30:00".into()]);
    }
}
