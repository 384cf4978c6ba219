/*!
 * Record shapes flowing through the pipeline.
 *
 * A `RawRecord` is one spreadsheet row with every cell trimmed and empty cells
 * turned into `None`. A `ValidatedRecord` is the same row after the validation
 * service has coerced every column into its proper type.
 */

use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

pub const COL_ID: &str = "id";
pub const COL_TITLE: &str = "title";
pub const COL_SLUG: &str = "slug";
pub const COL_RELEASE_YEAR: &str = "release_year";
pub const COL_CREATED: &str = "created";
pub const COL_DURATION: &str = "duration";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_LANGUAGE: &str = "language";
pub const COL_COUNTRY: &str = "country";
pub const COL_EXPORT: &str = "export";
pub const COL_FREE_ACCESS: &str = "free_access";
pub const COL_SAW: &str = "saw";
pub const COL_EVENTS: &str = "events";
pub const COL_PEOPLE: &str = "people";
pub const COL_SPONSORS: &str = "sponsors";
pub const COL_PRODUCTION: &str = "production";
pub const COL_DIRECTION: &str = "direction";
pub const COL_LINK_TRAILER: &str = "link_trailer";
pub const COL_LINK_STREAM: &str = "link_stream";
pub const COL_LINK_OFFICIAL: &str = "link_official";

/// Every column the pipeline reads
pub const ALL_COLUMNS: [&str; 20] = [
    COL_ID,
    COL_TITLE,
    COL_SLUG,
    COL_RELEASE_YEAR,
    COL_CREATED,
    COL_DURATION,
    COL_DESCRIPTION,
    COL_LANGUAGE,
    COL_COUNTRY,
    COL_EXPORT,
    COL_FREE_ACCESS,
    COL_SAW,
    COL_EVENTS,
    COL_PEOPLE,
    COL_SPONSORS,
    COL_PRODUCTION,
    COL_DIRECTION,
    COL_LINK_TRAILER,
    COL_LINK_STREAM,
    COL_LINK_OFFICIAL,
];

/// Columns the sheet header must contain
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_ID,
    COL_TITLE,
    COL_SLUG,
    COL_RELEASE_YEAR,
    COL_CREATED,
    COL_DESCRIPTION,
    COL_FREE_ACCESS,
    COL_EXPORT,
];

/// The comma-separated multi-value columns, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListColumn {
    Events,
    People,
    Sponsors,
    Production,
    Direction,
}

impl ListColumn {
    pub const ALL: [ListColumn; 5] = [
        ListColumn::Events,
        ListColumn::People,
        ListColumn::Sponsors,
        ListColumn::Production,
        ListColumn::Direction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Events => COL_EVENTS,
            Self::People => COL_PEOPLE,
            Self::Sponsors => COL_SPONSORS,
            Self::Production => COL_PRODUCTION,
            Self::Direction => COL_DIRECTION,
        }
    }
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One spreadsheet row as read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Row number in the sheet (the header is row 1)
    pub row: usize,
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub release_year: Option<String>,
    pub created: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub export: Option<String>,
    pub free_access: Option<String>,
    pub saw: Option<String>,
    pub events: Option<String>,
    pub people: Option<String>,
    pub sponsors: Option<String>,
    pub production: Option<String>,
    pub direction: Option<String>,
    pub link_trailer: Option<String>,
    pub link_stream: Option<String>,
    pub link_official: Option<String>,
}

impl RawRecord {
    /// Mutable slot for a column, `None` for unknown column names
    pub fn slot_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        let slot = match column {
            COL_ID => &mut self.id,
            COL_TITLE => &mut self.title,
            COL_SLUG => &mut self.slug,
            COL_RELEASE_YEAR => &mut self.release_year,
            COL_CREATED => &mut self.created,
            COL_DURATION => &mut self.duration,
            COL_DESCRIPTION => &mut self.description,
            COL_LANGUAGE => &mut self.language,
            COL_COUNTRY => &mut self.country,
            COL_EXPORT => &mut self.export,
            COL_FREE_ACCESS => &mut self.free_access,
            COL_SAW => &mut self.saw,
            COL_EVENTS => &mut self.events,
            COL_PEOPLE => &mut self.people,
            COL_SPONSORS => &mut self.sponsors,
            COL_PRODUCTION => &mut self.production,
            COL_DIRECTION => &mut self.direction,
            COL_LINK_TRAILER => &mut self.link_trailer,
            COL_LINK_STREAM => &mut self.link_stream,
            COL_LINK_OFFICIAL => &mut self.link_official,
            _ => return None,
        };
        Some(slot)
    }

    /// Cell value for a column
    pub fn get(&self, column: &str) -> Option<&str> {
        let value = match column {
            COL_ID => &self.id,
            COL_TITLE => &self.title,
            COL_SLUG => &self.slug,
            COL_RELEASE_YEAR => &self.release_year,
            COL_CREATED => &self.created,
            COL_DURATION => &self.duration,
            COL_DESCRIPTION => &self.description,
            COL_LANGUAGE => &self.language,
            COL_COUNTRY => &self.country,
            COL_EXPORT => &self.export,
            COL_FREE_ACCESS => &self.free_access,
            COL_SAW => &self.saw,
            COL_EVENTS => &self.events,
            COL_PEOPLE => &self.people,
            COL_SPONSORS => &self.sponsors,
            COL_PRODUCTION => &self.production,
            COL_DIRECTION => &self.direction,
            COL_LINK_TRAILER => &self.link_trailer,
            COL_LINK_STREAM => &self.link_stream,
            COL_LINK_OFFICIAL => &self.link_official,
            _ => return None,
        };
        value.as_deref()
    }

    /// Id used in row-level error messages
    pub fn id_or_row(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("<row {}>", self.row))
    }
}

/// A row after type coercion
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub id: String,
    pub title: String,
    /// Lower-case filesystem slug
    pub slug: String,
    /// Web slug, `_` replaced by `-`
    pub slug_web: String,
    pub release_year: i32,
    pub created: NaiveDate,
    pub duration: Option<Duration>,
    pub description: String,
    pub language: Option<String>,
    pub country: Option<String>,
    pub free_access: bool,
    pub events: Option<Vec<String>>,
    pub people: Option<Vec<String>>,
    pub sponsors: Option<Vec<String>>,
    pub production: Option<Vec<String>>,
    pub direction: Option<Vec<String>>,
    pub link_trailer: Option<String>,
    pub link_stream: Option<String>,
    pub link_official: Option<String>,
}

impl ValidatedRecord {
    /// Items of a list column, `None` when the cell was empty
    pub fn list(&self, column: ListColumn) -> Option<&[String]> {
        let items = match column {
            ListColumn::Events => &self.events,
            ListColumn::People => &self.people,
            ListColumn::Sponsors => &self.sponsors,
            ListColumn::Production => &self.production,
            ListColumn::Direction => &self.direction,
        };
        items.as_deref()
    }

    pub fn has_links(&self) -> bool {
        self.link_trailer.is_some() || self.link_stream.is_some() || self.link_official.is_some()
    }
}
