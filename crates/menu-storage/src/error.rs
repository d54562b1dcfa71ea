//! # error
//!
//! why: carry the cause of any store failure up to the point where it becomes a status message
//! relations: returned by every backend in local.rs, remote.rs, sheets.rs
//! what: StoreError

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),

    #[error("log file is not valid csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("spreadsheet service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("spreadsheet authorization failed: {0}")]
    Auth(String),

    #[error("unexpected spreadsheet response: {0}")]
    MalformedResponse(String),

    #[error("remote log is not configured: {0}")]
    NotConfigured(String),

    #[error("spreadsheet service unavailable: {0}")]
    Unavailable(String),
}
