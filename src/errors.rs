/*!
 * Error types for the vidcatalog pipeline.
 *
 * Two families are fatal by construction:
 * - `ValidationError`: column-level problems (empty, duplicate, wrongly typed cells)
 * - `ParseError`: row-level problems (dates, durations, codes, slugs)
 *
 * `SourceError` covers getting the sheet in the first place, and `PipelineError`
 * wraps everything a full run can fail with.
 */

use std::fmt;

use thiserror::Error;

/// A spreadsheet row that violated a column rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffendingRow {
    /// Row number in the sheet (the header is row 1)
    pub row: usize,
    /// Record id, when the row has one
    pub id: Option<String>,
    /// Offending cell value, `None` for empty cells
    pub value: Option<String>,
}

impl fmt::Display for OffendingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.row)?;
        if let Some(id) = &self.id {
            write!(f, " (id={})", id)?;
        }
        match &self.value {
            Some(value) => write!(f, ": {:?}", value),
            None => write!(f, ": <empty>"),
        }
    }
}

fn format_rows(rows: &[OffendingRow]) -> String {
    rows.iter()
        .map(|row| format!("  {}", row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Column-level validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The sheet header lacks a required column
    #[error("Missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// Empty cells in a column that must always be filled
    #[error("Empty values in critical column '{column}'\n{}", format_rows(.rows))]
    EmptyValues {
        column: &'static str,
        rows: Vec<OffendingRow>,
    },

    /// The same value appears in more than one row of a unique column
    #[error("Duplicate values in unique column '{column}'\n{}", format_rows(.rows))]
    DuplicateValues {
        column: &'static str,
        rows: Vec<OffendingRow>,
    },

    /// Something other than `yes`/`no` in a flag column
    #[error("Bad values in yes/no column '{column}'\n{}", format_rows(.rows))]
    NotYesNo {
        column: &'static str,
        rows: Vec<OffendingRow>,
    },

    /// Non-integer values in an integer column
    #[error("Invalid value(s) in integer column '{column}'\n{}", format_rows(.rows))]
    NotInteger {
        column: &'static str,
        rows: Vec<OffendingRow>,
    },
}

impl ValidationError {
    /// Column the failure refers to
    pub fn column(&self) -> &'static str {
        match self {
            Self::MissingColumn { column }
            | Self::EmptyValues { column, .. }
            | Self::DuplicateValues { column, .. }
            | Self::NotYesNo { column, .. }
            | Self::NotInteger { column, .. } => column,
        }
    }

    /// Offending rows, empty for header-level failures
    pub fn rows(&self) -> &[OffendingRow] {
        match self {
            Self::MissingColumn { .. } => &[],
            Self::EmptyValues { rows, .. }
            | Self::DuplicateValues { rows, .. }
            | Self::NotYesNo { rows, .. }
            | Self::NotInteger { rows, .. } => rows,
        }
    }
}

/// Row-level parse failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to parse duration for row id == {id} ({value}), expected HH:MM:SS")]
    Duration { id: String, value: String },

    #[error("Failed to parse created for row id == {id} ({value}), expected YYYY/MM/DD")]
    Created { id: String, value: String },

    #[error("Invalid slug in row id == {id} ({value}), expected [0-9a-z_]+")]
    Slug { id: String, value: String },

    #[error("Unknown language in row id == {id} ({value})")]
    Language { id: String, value: String },

    #[error("Unknown country code in row id == {id} ({value})")]
    Country { id: String, value: String },
}

/// Errors raised while fetching the raw sheet
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid credentials: {0}")]
    Credentials(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sheet is empty: {0}")]
    Empty(String),
}

/// Everything a full pipeline run can fail with
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Filesystem error: {0:#}")]
    Filesystem(#[from] anyhow::Error),
}
