//! # store
//!
//! why: give callers one log to talk to, whichever backend the deployment chose
//! relations: wraps local.rs and remote.rs, built from config by menu-planner
//! what: Backend selection, StoreConfig, MenuLogStore with best-effort ids and loud appends

use std::path::PathBuf;
use std::time::Duration;

use menu_core::MenuLogEntry;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::local::CsvLog;
use crate::remote::{SheetsLog, DEFAULT_WORKSHEET};
use crate::sheets::{HttpSheetClient, SheetClient, DEFAULT_API_BASE};
use crate::{LogBackend, StoreError};

/// The log target, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// csv file in the data directory
    Local,
    /// spreadsheet worksheet
    Remote,
}

fn default_worksheet() -> String {
    DEFAULT_WORKSHEET.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// spreadsheet section of the configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// selects the remote backend
    #[serde(default)]
    pub enabled: bool,

    /// stable id of the spreadsheet document
    #[serde(default)]
    pub spreadsheet_id: String,

    #[serde(default = "default_worksheet")]
    pub sheet_name: String,

    /// bearer token minted from the service-account credential
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            spreadsheet_id: String::new(),
            sheet_name: default_worksheet(),
            access_token: String::new(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// everything the store needs to pick and open its backend
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub sheets: SheetsConfig,
}

impl StoreConfig {
    pub fn backend(&self) -> Backend {
        if self.sheets.enabled {
            Backend::Remote
        } else {
            Backend::Local
        }
    }
}

/// The menu log
///
/// the local csv log is always present: it is the local backend, and the
/// fallback id source when the remote backend cannot be read.
///
/// neither backend locks anything. two planners saving at the same time can
/// both compute the same next id and both append it.
#[derive(Debug)]
pub struct MenuLogStore<C = HttpSheetClient> {
    backend: Backend,
    local: CsvLog,
    remote: Option<SheetsLog<C>>,
}

impl MenuLogStore<HttpSheetClient> {
    /// open the backend selected by `config`
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let local = CsvLog::new(&config.data_dir);
        match config.backend() {
            Backend::Local => Ok(Self::local(local)),
            Backend::Remote => {
                let sheets = &config.sheets;
                let client = HttpSheetClient::new(
                    sheets.api_base.as_str(),
                    sheets.access_token.as_str(),
                    Duration::from_secs(sheets.timeout_secs),
                )?;
                Ok(Self::remote(
                    local,
                    SheetsLog::new(
                        client,
                        sheets.spreadsheet_id.as_str(),
                        sheets.sheet_name.as_str(),
                    ),
                ))
            }
        }
    }
}

impl<C: SheetClient> MenuLogStore<C> {
    pub fn local(local: CsvLog) -> Self {
        Self {
            backend: Backend::Local,
            local,
            remote: None,
        }
    }

    pub fn remote(local: CsvLog, remote: SheetsLog<C>) -> Self {
        Self {
            backend: Backend::Remote,
            local,
            remote: Some(remote),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.backend == Backend::Remote
    }

    /// where entries land, for status messages
    pub fn location(&self) -> String {
        match &self.remote {
            Some(remote) => remote.location(),
            None => self.local.location(),
        }
    }

    /// next advisory id; never fails
    ///
    /// a remote read failure of any kind falls back to the local log.
    pub fn next_id(&self) -> u64 {
        let Some(remote) = &self.remote else {
            return self.local_next_id();
        };
        match remote.next_id() {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "remote log unreadable, assigning id from local log");
                self.local_next_id()
            }
        }
    }

    fn local_next_id(&self) -> u64 {
        self.local.next_id().unwrap_or(1)
    }

    /// append to the active backend only; a remote failure is never redirected locally
    pub fn append(&mut self, entry: &MenuLogEntry) -> Result<(), StoreError> {
        match &mut self.remote {
            Some(remote) => remote.append(entry),
            None => self.local.append(entry),
        }
    }

    pub fn load_log(&self) -> Result<Vec<MenuLogEntry>, StoreError> {
        match &self.remote {
            Some(remote) => remote.load_log(),
            None => self.local.load_log(),
        }
    }
}
