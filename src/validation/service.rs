/*!
 * Validation service that turns raw sheet rows into validated records.
 *
 * Columns are handled one at a time in a fixed order, with row-level parsing
 * interleaved. The first failing column or row aborts the whole run.
 */

use log::{debug, info, warn};

use crate::errors::PipelineError;
use crate::models::{
    ListColumn, RawRecord, ValidatedRecord, COL_CREATED, COL_DESCRIPTION, COL_EXPORT,
    COL_FREE_ACCESS, COL_ID, COL_RELEASE_YEAR, COL_SLUG, COL_TITLE,
};
use crate::normalizer;

use super::columns::{is_yes, require_integer, require_non_empty, require_unique, require_yes_no};

/// Outcome of cleaning a sheet
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// Validated rows marked for export, in sheet order
    pub records: Vec<ValidatedRecord>,
    /// Number of rows dropped because `export` was `no`
    pub skipped: usize,
}

/// Validates and normalizes raw sheet rows
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Run every column rule and row parser over `raw`
    pub fn clean(&self, raw: Vec<RawRecord>) -> Result<CleanedTable, PipelineError> {
        let total = raw.len();

        // Only the export flag is checked before non-exported rows are dropped
        require_yes_no(&raw, COL_EXPORT)?;
        let mut rows: Vec<RawRecord> = raw
            .into_iter()
            .filter(|record| is_yes(record.export.as_deref()))
            .collect();
        let skipped = total - rows.len();
        debug!("Keeping {} of {} rows marked for export", rows.len(), total);

        require_non_empty(&rows, COL_ID)?;
        require_unique(&rows, COL_ID)?;

        require_non_empty(&rows, COL_TITLE)?;
        require_unique(&rows, COL_TITLE)?;

        require_non_empty(&rows, COL_RELEASE_YEAR)?;
        require_integer(&rows, COL_RELEASE_YEAR)?;

        require_non_empty(&rows, COL_SLUG)?;
        for record in rows.iter_mut() {
            record.slug = record.slug.as_deref().map(normalizer::normalize_slug);
        }
        require_unique(&rows, COL_SLUG)?;
        let slugs_web = rows
            .iter()
            .map(|record| normalizer::slug_web(&record.id_or_row(), record.slug.as_deref().unwrap_or_default()))
            .collect::<Result<Vec<_>, _>>()?;

        require_non_empty(&rows, COL_CREATED)?;
        let created = rows
            .iter()
            .map(|record| normalizer::parse_created(&record.id_or_row(), record.created.as_deref().unwrap_or_default()))
            .collect::<Result<Vec<_>, _>>()?;

        let durations = rows
            .iter()
            .map(|record| normalizer::parse_duration(&record.id_or_row(), record.duration.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        let languages = rows
            .iter()
            .map(|record| normalizer::parse_language(&record.id_or_row(), record.language.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        let countries = rows
            .iter()
            .map(|record| normalizer::parse_country(&record.id_or_row(), record.country.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        require_non_empty(&rows, COL_DESCRIPTION)?;

        require_non_empty(&rows, COL_FREE_ACCESS)?;
        require_yes_no(&rows, COL_FREE_ACCESS)?;

        let records: Vec<ValidatedRecord> = rows
            .into_iter()
            .zip(slugs_web)
            .zip(created)
            .zip(durations)
            .zip(languages)
            .zip(countries)
            .map(|(((((record, slug_web), created), duration), language), country)| {
                Self::assemble(record, slug_web, created, duration, language, country)
            })
            .collect();

        for record in records.iter().filter(|record| !record.has_links()) {
            warn!("No video link for id == {} ({})", record.id, record.title);
        }

        info!("Validated {} records ({} not exported)", records.len(), skipped);

        Ok(CleanedTable { records, skipped })
    }

    fn assemble(
        record: RawRecord,
        slug_web: String,
        created: chrono::NaiveDate,
        duration: Option<std::time::Duration>,
        language: Option<String>,
        country: Option<String>,
    ) -> ValidatedRecord {
        let events = normalizer::split_list(ListColumn::Events, record.events.as_deref());
        let people = normalizer::split_list(ListColumn::People, record.people.as_deref());
        let sponsors = normalizer::split_list(ListColumn::Sponsors, record.sponsors.as_deref());
        let production = normalizer::split_list(ListColumn::Production, record.production.as_deref());
        let direction = normalizer::split_list(ListColumn::Direction, record.direction.as_deref());
        let free_access = is_yes(record.free_access.as_deref());

        // Presence and integer type of these columns were checked above
        let release_year = record
            .release_year
            .as_deref()
            .and_then(|value| value.parse::<i32>().ok())
            .unwrap_or_default();

        ValidatedRecord {
            id: record.id.unwrap_or_default(),
            title: record.title.unwrap_or_default(),
            slug: record.slug.unwrap_or_default(),
            slug_web,
            release_year,
            created,
            duration,
            description: record.description.unwrap_or_default(),
            language,
            country,
            free_access,
            events,
            people,
            sponsors,
            production,
            direction,
            link_trailer: record.link_trailer,
            link_stream: record.link_stream,
            link_official: record.link_official,
        }
    }
}
