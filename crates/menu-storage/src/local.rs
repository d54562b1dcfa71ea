//! # local
//!
//! why: keep the menu log in a flat csv file next to the catalogs
//! relations: implements LogBackend from lib.rs, also the fallback id source for store.rs
//! what: CsvLog with whole-file rewrite appends and lenient id scanning

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use menu_core::{MenuLogEntry, LOG_HEADER};
use tracing::{debug, info};

use crate::{LogBackend, StoreError};

/// file name of the log inside the data directory
pub const LOG_FILE_NAME: &str = "menus.csv";

/// csv-file log
///
/// stores the log in `<dir>/menus.csv`:
/// - header `id,dishes,at_date`
/// - one row per saved menu
///
/// every append reads the whole file and writes it back. the write goes through
/// a temp file and a rename so a crash cannot leave half a file, but two
/// processes appending at once still race and the last writer wins.
#[derive(Debug, Clone)]
pub struct CsvLog {
    /// directory holding the log file, created on first append
    dir: PathBuf,
}

impl CsvLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// get the path to the log file
    pub fn path(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!("{LOG_FILE_NAME}.tmp"))
    }

    /// highest id in the file, `None` when there is no usable id column
    ///
    /// a single non-blank cell that is not an id makes the whole column unusable.
    fn max_id(&self) -> Result<Option<u64>, StoreError> {
        let mut reader = reader_for(&self.path())?;
        let Some(col) = reader.headers()?.iter().position(|h| h.trim() == "id") else {
            return Ok(None);
        };

        let mut max = None;
        for record in reader.records() {
            let record = record?;
            let cell = record.get(col).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            match parse_id(cell) {
                Some(id) => max = max.max(Some(id)),
                None => {
                    debug!(cell, "unparsable id in local log");
                    return Ok(None);
                }
            }
        }
        Ok(max)
    }

    /// header and rows exactly as stored
    fn read_rows(&self) -> Result<(csv::StringRecord, Vec<csv::StringRecord>), StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok((LOG_HEADER.iter().copied().collect(), Vec::new()));
        }

        let mut reader = reader_for(&path)?;
        let headers = reader.headers()?.clone();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok((headers, rows))
    }

    fn write_rows(
        &self,
        headers: &csv::StringRecord,
        rows: &[csv::StringRecord],
    ) -> Result<(), StoreError> {
        let temp_path = self.temp_path();
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&temp_path)?;
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row)?;
        }
        let file = writer
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()))?;
        file.sync_all()?;
        fs::rename(&temp_path, self.path())?;
        Ok(())
    }
}

impl LogBackend for CsvLog {
    /// `max(id) + 1`, or 1 when the file is absent, empty or its ids are unusable
    fn next_id(&self) -> Result<u64, StoreError> {
        if !self.path().exists() {
            return Ok(1);
        }
        match self.max_id() {
            Ok(Some(max)) => Ok(max.saturating_add(1)),
            Ok(None) => Ok(1),
            Err(e) => {
                debug!(error = %e, "local log unreadable, starting ids at 1");
                Ok(1)
            }
        }
    }

    fn append(&mut self, entry: &MenuLogEntry) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        // load existing log
        let (mut headers, mut rows) = self.read_rows()?;
        for column in LOG_HEADER {
            if !headers.iter().any(|h| h.trim() == column) {
                headers.push_field(column);
            }
        }
        for row in &mut rows {
            while row.len() < headers.len() {
                row.push_field("");
            }
        }

        // append new entry by column name
        let values = entry.to_row();
        let new_row: csv::StringRecord = headers
            .iter()
            .map(|h| {
                LOG_HEADER
                    .iter()
                    .position(|column| *column == h.trim())
                    .map_or("", |i| values[i].as_str())
            })
            .collect();
        rows.push(new_row);

        // write entire log
        self.write_rows(&headers, &rows)?;
        info!(id = entry.id, path = %self.path().display(), "menu appended to local log");
        Ok(())
    }

    fn load_log(&self) -> Result<Vec<MenuLogEntry>, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = reader_for(&path)?;
        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);
        let Some(id_col) = column("id") else {
            return Ok(Vec::new());
        };
        let (dishes_col, at_col) = (column("dishes"), column("at_date"));
        let cell = |record: &csv::StringRecord, col: Option<usize>| {
            col.and_then(|c| record.get(c)).unwrap_or("").to_string()
        };

        // rows without a usable id are not menus
        let mut log = Vec::new();
        for record in reader.records() {
            let record = record?;
            let Some(id) = record.get(id_col).map(str::trim).and_then(parse_id) else {
                continue;
            };
            log.push(MenuLogEntry::new(
                id,
                cell(&record, dishes_col),
                cell(&record, at_col),
            ));
        }
        Ok(log)
    }

    fn location(&self) -> String {
        self.path().display().to_string()
    }
}

fn reader_for(path: &Path) -> Result<csv::Reader<fs::File>, StoreError> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?)
}

/// ids are unsigned integers; integral floats such as `3.0` are accepted too
fn parse_id(cell: &str) -> Option<u64> {
    if let Ok(id) = cell.parse::<u64>() {
        return Some(id);
    }
    let value = cell.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_id_accepts_integers_and_integral_floats() {
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id("3.0"), Some(3));
        assert_eq!(parse_id("3.5"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("abc"), None);
    }

    #[test]
    fn absent_log_starts_at_one() {
        let dir = tempdir().unwrap();
        let log = CsvLog::new(dir.path());
        assert_eq!(log.next_id().unwrap(), 1);
    }

    #[test]
    fn append_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let mut log = CsvLog::new(&data);

        log.append(&MenuLogEntry::new(1, "Rice", "2024-01-01 12:00:00"))
            .unwrap();

        assert!(data.join(LOG_FILE_NAME).exists());
        assert_eq!(log.next_id().unwrap(), 2);
    }

    #[test]
    fn unparsable_id_column_starts_at_one() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILE_NAME), "id,dishes,at_date\n4,a,b\nfour,c,d\n").unwrap();
        assert_eq!(CsvLog::new(dir.path()).next_id().unwrap(), 1);
    }

    #[test]
    fn missing_id_column_starts_at_one() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILE_NAME), "dishes,at_date\na,b\n").unwrap();
        assert_eq!(CsvLog::new(dir.path()).next_id().unwrap(), 1);
    }

    #[test]
    fn blank_id_cells_are_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILE_NAME), "id,dishes,at_date\n4,a,b\n,c,d\n").unwrap();
        assert_eq!(CsvLog::new(dir.path()).next_id().unwrap(), 5);
    }

    #[test]
    fn load_log_skips_rows_without_an_id() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(LOG_FILE_NAME),
            "id,dishes,at_date\n4,a,b\n,c,d\n3.0,e,f\n",
        )
        .unwrap();
        let log = CsvLog::new(dir.path());

        assert_eq!(log.next_id().unwrap(), 5);
        assert_eq!(
            log.load_log().unwrap(),
            vec![MenuLogEntry::new(4, "a", "b"), MenuLogEntry::new(3, "e", "f")]
        );
    }

    #[test]
    fn append_fills_columns_by_header_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILE_NAME), "at_date,note,id,dishes
").unwrap();
        let mut log = CsvLog::new(dir.path());

        log.append(&MenuLogEntry::new(1, "Rice", "2024-01-01 12:00:00"))
            .unwrap();

        assert_eq!(
            fs::read_to_string(log.path()).unwrap(),
            "at_date,note,id,dishes\n2024-01-01 12:00:00,,1,Rice\n"
        );
    }
}
