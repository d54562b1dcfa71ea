//! # remote
//!
//! why: keep the menu log in a shared spreadsheet worksheet
//! relations: implements LogBackend from lib.rs over any SheetClient from sheets.rs
//! what: SheetsLog, worksheet bootstrap, record id filtering

use std::collections::BTreeMap;

use menu_core::{MenuLogEntry, LOG_HEADER};
use serde_json::Value;
use tracing::{debug, info};

use crate::sheets::{a1_range, SheetClient, ValueInputOption};
use crate::{LogBackend, StoreError};

/// worksheet used when none is configured
pub const DEFAULT_WORKSHEET: &str = "MENUS_LOG";

/// rows and columns a new log worksheet is created with
pub const INITIAL_ROWS: u32 = 1000;
pub const INITIAL_COLS: u32 = 3;

/// one data row keyed by header cell
type Record = BTreeMap<String, Value>;

/// spreadsheet-worksheet log
///
/// the document is addressed by its stable id, the worksheet by title. the
/// worksheet is created on first append, never by a read.
#[derive(Debug, Clone)]
pub struct SheetsLog<C> {
    client: C,
    spreadsheet_id: String,
    worksheet: String,
}

impl<C: SheetClient> SheetsLog<C> {
    pub fn new(client: C, spreadsheet_id: impl Into<String>, worksheet: impl Into<String>) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
        }
    }

    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    fn document(&self) -> Result<&str, StoreError> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(StoreError::NotConfigured("spreadsheet id is empty".into()));
        }
        Ok(&self.spreadsheet_id)
    }

    fn worksheet_exists(&self) -> Result<bool, StoreError> {
        let titles = self.client.worksheet_titles(self.document()?)?;
        Ok(titles.iter().any(|t| t == &self.worksheet))
    }

    /// data rows as header-keyed records; short rows read as empty strings
    fn records(&self) -> Result<Vec<Record>, StoreError> {
        let mut rows = self
            .client
            .get_values(self.document()?, &self.worksheet)?
            .into_iter();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let header: Vec<String> = header.iter().map(cell_text).collect();

        Ok(rows
            .map(|row| {
                header
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let cell = row
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| Value::String(String::new()));
                        (name.clone(), cell)
                    })
                    .collect()
            })
            .collect())
    }

    fn create_worksheet(&self) -> Result<(), StoreError> {
        let document = self.document()?;
        self.client
            .add_worksheet(document, &self.worksheet, INITIAL_ROWS, INITIAL_COLS)?;
        let header: Vec<Value> = LOG_HEADER.iter().map(|h| Value::from(*h)).collect();
        self.client
            .update_values(document, &a1_range(&self.worksheet, "A1:C1"), vec![header])?;
        info!(worksheet = %self.worksheet, "created menu log worksheet");
        Ok(())
    }
}

impl<C: SheetClient> LogBackend for SheetsLog<C> {
    fn next_id(&self) -> Result<u64, StoreError> {
        if !self.worksheet_exists()? {
            return Ok(1);
        }
        let records = self.records()?;
        if records.is_empty() {
            return Ok(1);
        }
        let max = records
            .iter()
            .filter_map(|r| r.get("id").and_then(record_id))
            .max()
            .unwrap_or(0);
        Ok(max.saturating_add(1))
    }

    fn append(&mut self, entry: &MenuLogEntry) -> Result<(), StoreError> {
        if !self.worksheet_exists()? {
            self.create_worksheet()?;
        }
        let row = vec![
            Value::from(entry.id),
            Value::from(entry.dishes.as_str()),
            Value::from(entry.at_date.as_str()),
        ];
        self.client.append_row(
            self.document()?,
            &self.worksheet,
            row,
            ValueInputOption::UserEntered,
        )?;
        info!(id = entry.id, worksheet = %self.worksheet, "menu appended to spreadsheet");
        Ok(())
    }

    fn load_log(&self) -> Result<Vec<MenuLogEntry>, StoreError> {
        if !self.worksheet_exists()? {
            return Ok(Vec::new());
        }
        let log = self
            .records()?
            .into_iter()
            .filter_map(|record| {
                let Some(id) = record.get("id").and_then(record_id) else {
                    debug!(?record, "skipping spreadsheet row without an id");
                    return None;
                };
                let text = |key: &str| record.get(key).map(cell_text).unwrap_or_default();
                Some(MenuLogEntry::new(id, text("dishes"), text("at_date")))
            })
            .collect();
        Ok(log)
    }

    fn location(&self) -> String {
        format!("spreadsheet worksheet {}", self.worksheet)
    }
}

/// ids are non-negative integers, as numbers or as all-digit text
fn record_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_accepts_numbers_and_digit_strings() {
        assert_eq!(record_id(&json!(7)), Some(7));
        assert_eq!(record_id(&json!("12")), Some(12));
        assert_eq!(record_id(&json!("")), None);
        assert_eq!(record_id(&json!("1a")), None);
        assert_eq!(record_id(&json!(-3)), None);
        assert_eq!(record_id(&json!(2.5)), None);
        assert_eq!(record_id(&json!(null)), None);
    }

    #[test]
    fn cell_text_renders_numbers_plainly() {
        assert_eq!(cell_text(&json!(5)), "5");
        assert_eq!(cell_text(&json!("a")), "a");
        assert_eq!(cell_text(&json!(null)), "");
    }
}
