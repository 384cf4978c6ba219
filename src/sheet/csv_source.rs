use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use csv::ReaderBuilder;
use log::debug;

use super::{RawTable, SheetSource};
use crate::errors::SourceError;

/// Parse CSV data with a header row into a raw table
///
/// Records may have fewer or more cells than the header.
pub fn parse_csv<R: Read>(input: R) -> Result<RawTable, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(SourceError::Empty("no header row".to_string()));
    }

    let rows = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()?;

    debug!("Parsed CSV with {} columns and {} rows", headers.len(), rows.len());
    Ok(RawTable::new(headers, rows))
}

/// A CSV export on the local filesystem
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SheetSource for CsvFileSource {
    fn fetch(&self) -> Result<RawTable, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        parse_csv(file)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

/// A CSV export fetched over HTTP, such as a published sheet link
#[derive(Debug, Clone)]
pub struct CsvUrlSource {
    url: String,
    timeout: Duration,
}

impl CsvUrlSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }
}

impl SheetSource for CsvUrlSource {
    fn fetch(&self) -> Result<RawTable, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let body = client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;

        parse_csv(body.as_bytes())
    }

    fn describe(&self) -> String {
        format!("CSV export {}", self.url)
    }
}
