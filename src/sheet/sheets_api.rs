use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use url::{ParseError, Url};

use super::{RawTable, SheetSource};
use crate::errors::SourceError;
use crate::file_utils::FileManager;

/// Base URL of the Google Sheets v4 API
pub const DEFAULT_SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Credential file contents
///
/// Either a plain API key (sheet shared by link) or an OAuth access token.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetCredentials {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    /// Present in raw service-account key files
    #[serde(default, rename = "type")]
    pub key_type: Option<String>,
}

impl SheetCredentials {
    /// Load and check a credential file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)
            .map_err(|e| SourceError::Credentials(format!("{:#}", e)))?;
        let credentials: Self = serde_json::from_str(&content)?;

        if credentials.api_key.is_none() && credentials.access_token.is_none() {
            let hint = match credentials.key_type.as_deref() {
                Some("service_account") => "service account keys must be exchanged for an access_token first",
                _ => "expected an 'api_key' or 'access_token' field",
            };
            return Err(SourceError::Credentials(format!("{:?}: {}", path, hint)));
        }

        Ok(credentials)
    }
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// A sheet read through the `values` endpoint
#[derive(Debug, Clone)]
pub struct SheetsApiSource {
    spreadsheet_id: String,
    range: String,
    credentials_path: PathBuf,
    endpoint: String,
    timeout: Duration,
}

impl SheetsApiSource {
    pub fn new<P: AsRef<Path>>(spreadsheet_id: &str, range: &str, credentials_path: P, timeout: Duration) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            credentials_path: credentials_path.as_ref().to_path_buf(),
            endpoint: DEFAULT_SHEETS_ENDPOINT.to_string(),
            timeout,
        }
    }

    /// Use a different API base URL
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// `<endpoint>/<spreadsheet_id>/values/<range>`
    pub fn values_url(&self) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.endpoint)?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Url(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&self.range);
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "FORMATTED_VALUE");
        Ok(url)
    }

    /// Turn the `values` matrix into a table, first row being the header
    fn table_from_values(mut values: Vec<Vec<String>>) -> Result<RawTable, SourceError> {
        if values.is_empty() {
            return Err(SourceError::Empty("the API returned no values".to_string()));
        }
        let headers = values.remove(0);
        Ok(RawTable::new(headers, values))
    }
}

impl SheetSource for SheetsApiSource {
    fn fetch(&self) -> Result<RawTable, SourceError> {
        let credentials = SheetCredentials::load(&self.credentials_path)?;
        let mut url = self.values_url()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let request = match (&credentials.access_token, &credentials.api_key) {
            (Some(token), _) => client.get(url).bearer_auth(token),
            (None, Some(key)) => {
                url.query_pairs_mut().append_pair("key", key);
                client.get(url)
            }
            (None, None) => {
                return Err(SourceError::Credentials(format!(
                    "{:?}: no 'api_key' or 'access_token'",
                    self.credentials_path
                )));
            }
        };

        let response: ValuesResponse = request.send()?.error_for_status()?.json()?;
        debug!("Sheets API returned {} rows", response.values.len());

        Self::table_from_values(response.values)
    }

    fn describe(&self) -> String {
        format!("Google Sheet {} ({})", self.spreadsheet_id, self.range)
    }
}
