//! # sheets
//!
//! why: talk to the spreadsheet service that hosts the shared menu log
//! relations: SheetClient is driven by remote.rs, faked by memory.rs in tests
//! what: SheetClient trait, value input modes, a1 ranges, blocking google sheets v4 client

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::StoreError;

/// default endpoint of the google sheets v4 api
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// How the service treats written cell values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// stored as literal text
    Raw,
    /// parsed as if typed by a user, so numbers stay numbers
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// trait for the worksheet operations the log needs
///
/// this abstraction allows the same log code to work with:
/// - the real spreadsheet service (HttpSheetClient)
/// - in-memory worksheets (testing)
pub trait SheetClient {
    /// titles of every worksheet in the document
    fn worksheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, StoreError>;

    /// add an empty worksheet sized `rows` x `cols`
    fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        cols: u32,
    ) -> Result<(), StoreError>;

    /// overwrite the cells of an a1 range with literal values
    fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<(), StoreError>;

    /// add one row below the last filled row of a worksheet
    fn append_row(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        row: Vec<Value>,
        input: ValueInputOption,
    ) -> Result<(), StoreError>;

    /// every filled row of a worksheet, header first, unformatted values
    fn get_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
    ) -> Result<Vec<Vec<Value>>, StoreError>;
}

/// `'title'!cells` with quotes in the title doubled
pub fn a1_range(worksheet: &str, cells: &str) -> String {
    format!("'{}'!{}", worksheet.replace('\'', "''"), cells)
}

/// split an a1 range back into worksheet title and cell part
pub fn split_a1(range: &str) -> Option<(String, &str)> {
    let (title, cells) = range.rsplit_once('!')?;
    let title = title
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .map(|t| t.replace("''", "'"))
        .unwrap_or_else(|| title.to_string());
    Some((title, cells))
}

// -- google sheets v4 over http --

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// blocking client for the google sheets v4 rest api
///
/// authenticates with a bearer access token minted outside this program.
/// no retries; the request timeout is the only limit applied.
#[derive(Debug, Clone)]
pub struct HttpSheetClient {
    http: Client,
    api_base: String,
    access_token: String,
}

impl HttpSheetClient {
    pub fn new(
        api_base: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn document_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/spreadsheets/{}",
            self.api_base,
            urlencoding::encode(spreadsheet_id)
        )
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/values/{}",
            self.document_url(spreadsheet_id),
            urlencoding::encode(range)
        )
    }

    /// `PUT .../values/{range}` writing literal values
    fn update_request(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> RequestBuilder {
        let body = json!({ "range": range, "majorDimension": "ROWS", "values": values });
        self.http
            .put(self.values_url(spreadsheet_id, range))
            .query(&[("valueInputOption", ValueInputOption::Raw.as_str())])
            .json(&body)
    }

    /// `POST .../values/{range}:append` inserting one row after the table
    fn append_request(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        row: Vec<Value>,
        input: ValueInputOption,
    ) -> RequestBuilder {
        let url = format!(
            "{}:append",
            self.values_url(spreadsheet_id, &a1_range(worksheet, "A:C"))
        );
        let body = json!({ "majorDimension": "ROWS", "values": [row] });
        self.http
            .post(url)
            .query(&[
                ("valueInputOption", input.as_str()),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        if self.access_token.trim().is_empty() {
            return Err(StoreError::Auth("no access token configured".into()));
        }

        let response = request.bearer_auth(&self.access_token).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        if matches!(
            status,
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN
        ) {
            Err(StoreError::Auth(format!("{status}: {body}")))
        } else {
            Err(StoreError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl SheetClient for HttpSheetClient {
    fn worksheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, StoreError> {
        let url = self.document_url(spreadsheet_id);
        debug!(%url, "listing worksheets");
        let meta: SpreadsheetMeta = self
            .send(
                self.http
                    .get(url)
                    .query(&[("fields", "sheets.properties.title")]),
            )?
            .json()
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;

        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        cols: u32,
    ) -> Result<(), StoreError> {
        let url = format!("{}:batchUpdate", self.document_url(spreadsheet_id));
        debug!(%url, title, "adding worksheet");
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": rows, "columnCount": cols }
                    }
                }
            }]
        });
        self.send(self.http.post(url).json(&body))?;
        Ok(())
    }

    fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<(), StoreError> {
        debug!(range, "updating range");
        self.send(self.update_request(spreadsheet_id, range, values))?;
        Ok(())
    }

    fn append_row(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        row: Vec<Value>,
        input: ValueInputOption,
    ) -> Result<(), StoreError> {
        debug!(worksheet, "appending row");
        self.send(self.append_request(spreadsheet_id, worksheet, row, input))?;
        Ok(())
    }

    fn get_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
    ) -> Result<Vec<Vec<Value>>, StoreError> {
        let url = self.values_url(spreadsheet_id, &a1_range(worksheet, "A:C"));
        debug!(%url, "reading rows");
        let range: ValueRange = self
            .send(self.http.get(url).query(&[
                ("valueRenderOption", "UNFORMATTED_VALUE"),
                ("majorDimension", "ROWS"),
            ]))?
            .json()
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
        Ok(range.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a1_range_quotes_title() {
        assert_eq!(a1_range("MENUS_LOG", "A1:C1"), "'MENUS_LOG'!A1:C1");
        assert_eq!(a1_range("chef's log", "A:C"), "'chef''s log'!A:C");
    }

    #[test]
    fn split_a1_reverses_a1_range() {
        let range = a1_range("chef's log", "A1:C1");
        assert_eq!(split_a1(&range), Some(("chef's log".to_string(), "A1:C1")));
        assert_eq!(split_a1("Sheet1!B2"), Some(("Sheet1".to_string(), "B2")));
        assert_eq!(split_a1("no range"), None);
    }

    #[test]
    fn empty_token_fails_before_any_request() {
        let client =
            HttpSheetClient::new("http://127.0.0.1:9", "", Duration::from_secs(1)).unwrap();
        let err = client.worksheet_titles("doc").unwrap_err();
        assert!(matches!(err, StoreError::Auth(_)));
    }

    #[test]
    fn value_input_option_wire_names() {
        assert_eq!(ValueInputOption::Raw.as_str(), "RAW");
        assert_eq!(ValueInputOption::UserEntered.as_str(), "USER_ENTERED");
    }

    fn client() -> HttpSheetClient {
        HttpSheetClient::new(DEFAULT_API_BASE, "token", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn append_posts_user_entered_rows_after_the_table() {
        let request = client()
            .append_request("doc", "MENUS_LOG", vec![json!(1)], ValueInputOption::UserEntered)
            .build()
            .unwrap();

        assert_eq!(*request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/doc/values/\
             %27MENUS_LOG%27%21A%3AC:append\
             ?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS"
        );
    }

    #[test]
    fn header_write_puts_raw_values() {
        let request = client()
            .update_request("doc", &a1_range("MENUS_LOG", "A1:C1"), vec![vec![json!("id")]])
            .build()
            .unwrap();

        assert_eq!(*request.method(), reqwest::Method::PUT);
        assert_eq!(
            request.url().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/doc/values/\
             %27MENUS_LOG%27%21A1%3AC1?valueInputOption=RAW"
        );
    }
}
