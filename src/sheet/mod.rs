/*!
 * Sheet sources: where the raw video table comes from.
 *
 * - `csv_source`: a CSV export, either on disk or behind a URL
 * - `sheets_api`: the Google Sheets v4 `values` endpoint
 *
 * All sources produce a `RawTable` (header row + string cells), which is
 * turned into `RawRecord`s by column name.
 */

use log::debug;

use crate::errors::{SourceError, ValidationError};
use crate::models::{RawRecord, ALL_COLUMNS, REQUIRED_COLUMNS};

pub mod csv_source;
pub mod sheets_api;

pub use csv_source::{CsvFileSource, CsvUrlSource};
pub use sheets_api::SheetsApiSource;

/// A read-only provider of the raw sheet
pub trait SheetSource {
    /// Fetch the whole sheet
    fn fetch(&self) -> Result<RawTable, SourceError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Header plus string cells, as read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map rows to records by header name
    ///
    /// Cells are trimmed and empty cells become `None`. Unknown columns are
    /// ignored, short rows count as empty in their missing cells and blank
    /// rows are skipped.
    pub fn into_records(self) -> Result<Vec<RawRecord>, ValidationError> {
        let headers: Vec<String> = self
            .headers
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(ValidationError::MissingColumn { column });
            }
        }

        let ignored: Vec<&String> = headers
            .iter()
            .filter(|header| !ALL_COLUMNS.contains(&header.as_str()))
            .collect();
        if !ignored.is_empty() {
            debug!("Ignoring unknown columns: {:?}", ignored);
        }

        let records = self
            .rows
            .into_iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|cell| !cell.trim().is_empty()))
            .map(|(index, cells)| {
                // Header is row 1
                let mut record = RawRecord {
                    row: index + 2,
                    ..RawRecord::default()
                };
                for (header, cell) in headers.iter().zip(cells) {
                    let value = cell.trim();
                    if value.is_empty() {
                        continue;
                    }
                    if let Some(slot) = record.slot_mut(header) {
                        *slot = Some(value.to_string());
                    }
                }
                record
            })
            .collect();

        Ok(records)
    }
}
