/*!
 * Row-level normalization of raw cells.
 *
 * Every function takes the row id explicitly so failures can point at the
 * offending row. Absent cells stay absent wherever the column is optional.
 */

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;
use crate::language_utils;
use crate::models::ListColumn;

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-z_]+$").expect("slug pattern is valid"));

/// Short event codes used in the sheet and their display names
const EVENT_ALIASES: [(&str, &str); 13] = [
    ("diag", "La Diagonale des Fous"),
    ("barkley", "The Barkley Marathons"),
    ("ws100", "Western States 100"),
    ("templiers", "Festival des Templiers"),
    ("hardrock", "Hardrock 100"),
    ("pct", "Pacific Crest Trail"),
    ("bgr", "Bob Graham Round"),
    ("at", "Appalachian Trail"),
    ("mds", "Marathon des Sables"),
    ("badwater", "Badwater 135"),
    ("transcon", "US Transcontinental"),
    ("leadville", "Leadville 100"),
    ("gr20", "GR 20"),
];

/// Display name for a list token, when the column has an alias for it
pub fn alias_for(column: ListColumn, token: &str) -> Option<&'static str> {
    let aliases: &[(&str, &str)] = match column {
        ListColumn::Events => &EVENT_ALIASES,
        _ => &[],
    };

    aliases
        .iter()
        .find(|(code, _)| *code == token)
        .map(|(_, name)| *name)
}

/// Parse an optional `HH:MM:SS` duration
pub fn parse_duration(id: &str, raw: Option<&str>) -> Result<Option<Duration>, ParseError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let invalid = || ParseError::Duration {
        id: id.to_string(),
        value: raw.to_string(),
    };

    let time = NaiveTime::parse_from_str(raw, "%H:%M:%S").map_err(|_| invalid())?;
    // chrono reads `:60` as a leap second, seconds stop at 59 here
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }

    let seconds = u64::from(time.hour()) * 3600 + u64::from(time.minute()) * 60 + u64::from(time.second());
    Ok(Some(Duration::from_secs(seconds)))
}

/// Format a duration back to `HH:MM:SS`
pub fn format_duration(duration: &Duration) -> String {
    let total = duration.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Parse a strict `YYYY/MM/DD` creation date
pub fn parse_created(id: &str, raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw, "%Y/%m/%d").map_err(|_| ParseError::Created {
        id: id.to_string(),
        value: raw.to_string(),
    })
}

/// Lower-case a filesystem slug
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase()
}

/// Derive the web slug, failing unless the slug is `[0-9a-z_]+`
pub fn slug_web(id: &str, slug: &str) -> Result<String, ParseError> {
    if !SLUG_PATTERN.is_match(slug) {
        return Err(ParseError::Slug {
            id: id.to_string(),
            value: slug.to_string(),
        });
    }

    Ok(slug.replace('_', "-"))
}

/// Split a comma-separated cell into unique, trimmed, display-mapped items
///
/// Items differing only in case count once, the first in sorted order is kept.
pub fn split_list(column: ListColumn, raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?;

    let tokens: BTreeSet<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    let mut seen: HashSet<String> = HashSet::with_capacity(tokens.len());
    let mut items: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let name = alias_for(column, token).unwrap_or(token);
        if seen.insert(name.to_lowercase()) {
            items.push(name.to_string());
        }
    }

    Some(items)
}

/// Resolve an optional two-letter country code to its name
pub fn parse_country(id: &str, raw: Option<&str>) -> Result<Option<String>, ParseError> {
    let Some(code) = raw else {
        return Ok(None);
    };

    language_utils::country_name(code)
        .map(|name| Some(name.to_string()))
        .ok_or_else(|| ParseError::Country {
            id: id.to_string(),
            value: code.to_string(),
        })
}

/// Resolve an optional language code to its name
pub fn parse_language(id: &str, raw: Option<&str>) -> Result<Option<String>, ParseError> {
    let Some(code) = raw else {
        return Ok(None);
    };

    language_utils::language_name(code)
        .map(|name| Some(name.to_string()))
        .ok_or_else(|| ParseError::Language {
            id: id.to_string(),
            value: code.to_string(),
        })
}
