//! # memory
//!
//! why: exercise the remote log without a network or credentials
//! relations: implements SheetClient from sheets.rs, used by remote.rs and store.rs tests
//! what: InMemorySheets with shared state, failure injection, call accounting

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::sheets::{split_a1, SheetClient, ValueInputOption};
use crate::StoreError;

#[derive(Debug, Default, Clone, PartialEq)]
struct Worksheet {
    rows: u32,
    cols: u32,
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Default)]
struct SheetState {
    worksheets: BTreeMap<String, Worksheet>,
    failure: Option<String>,
    calls: usize,
    appends: Vec<ValueInputOption>,
}

/// in-memory spreadsheet document for testing
///
/// clones share one document, so a test can keep a handle after moving a
/// clone into a store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySheets {
    state: Rc<RefCell<SheetState>>,
}

impl InMemorySheets {
    /// create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// add a worksheet holding `values`, header row first
    pub fn with_worksheet(self, title: &str, values: Vec<Vec<Value>>) -> Self {
        self.state.borrow_mut().worksheets.insert(
            title.to_string(),
            Worksheet {
                rows: 1000,
                cols: 3,
                values,
            },
        );
        self
    }

    /// make every following call fail with `reason`
    pub fn fail_with(&self, reason: &str) {
        self.state.borrow_mut().failure = Some(reason.to_string());
    }

    pub fn recover(&self) {
        self.state.borrow_mut().failure = None;
    }

    /// number of calls made, failed ones included
    pub fn call_count(&self) -> usize {
        self.state.borrow().calls
    }

    /// input option of every successful append, in order
    pub fn append_options(&self) -> Vec<ValueInputOption> {
        self.state.borrow().appends.clone()
    }

    pub fn values(&self, title: &str) -> Option<Vec<Vec<Value>>> {
        self.state
            .borrow()
            .worksheets
            .get(title)
            .map(|ws| ws.values.clone())
    }

    /// (rows, cols) a worksheet was created with
    pub fn size(&self, title: &str) -> Option<(u32, u32)> {
        self.state
            .borrow()
            .worksheets
            .get(title)
            .map(|ws| (ws.rows, ws.cols))
    }

    fn enter(&self) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        state.calls += 1;
        match &state.failure {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

fn missing_range(title: &str) -> StoreError {
    StoreError::Status {
        status: 400,
        body: format!("Unable to parse range: {title}"),
    }
}

/// 1-based row of the first cell in `A1:C1` style notation
fn start_row(cells: &str) -> usize {
    let first = cells.split(':').next().unwrap_or("");
    first
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .unwrap_or(1)
}

impl SheetClient for InMemorySheets {
    fn worksheet_titles(&self, _spreadsheet_id: &str) -> Result<Vec<String>, StoreError> {
        self.enter()?;
        Ok(self.state.borrow().worksheets.keys().cloned().collect())
    }

    fn add_worksheet(
        &self,
        _spreadsheet_id: &str,
        title: &str,
        rows: u32,
        cols: u32,
    ) -> Result<(), StoreError> {
        self.enter()?;
        let mut state = self.state.borrow_mut();
        if state.worksheets.contains_key(title) {
            return Err(StoreError::Status {
                status: 400,
                body: format!("A sheet with the name \"{title}\" already exists."),
            });
        }
        state.worksheets.insert(
            title.to_string(),
            Worksheet {
                rows,
                cols,
                values: Vec::new(),
            },
        );
        Ok(())
    }

    fn update_values(
        &self,
        _spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<(), StoreError> {
        self.enter()?;
        let (title, cells) = split_a1(range).ok_or_else(|| missing_range(range))?;
        let mut state = self.state.borrow_mut();
        let sheet = state
            .worksheets
            .get_mut(&title)
            .ok_or_else(|| missing_range(range))?;

        let start = start_row(cells).saturating_sub(1);
        for (offset, row) in values.into_iter().enumerate() {
            let index = start + offset;
            if sheet.values.len() <= index {
                sheet.values.resize(index + 1, Vec::new());
            }
            sheet.values[index] = row;
        }
        Ok(())
    }

    fn append_row(
        &self,
        _spreadsheet_id: &str,
        worksheet: &str,
        row: Vec<Value>,
        input: ValueInputOption,
    ) -> Result<(), StoreError> {
        self.enter()?;
        let mut state = self.state.borrow_mut();
        let sheet = state
            .worksheets
            .get_mut(worksheet)
            .ok_or_else(|| missing_range(worksheet))?;
        sheet.values.push(row);
        state.appends.push(input);
        Ok(())
    }

    fn get_values(
        &self,
        _spreadsheet_id: &str,
        worksheet: &str,
    ) -> Result<Vec<Vec<Value>>, StoreError> {
        self.enter()?;
        self.values(worksheet).ok_or_else(|| missing_range(worksheet))
    }
}
