/*!
 * Articles: the per-video records handed to the content writer.
 *
 * An `Article` is a validated record plus everything derived for the site:
 * era category, summary, tags, authors and an embeddable player reference.
 */

use std::time::Duration;

use chrono::NaiveDate;
use url::Url;

use crate::keywords::KeywordTables;
use crate::models::{ListColumn, ValidatedRecord};

/// Default summary length in characters, placeholder included
pub const DEFAULT_SUMMARY_LENGTH: usize = 200;

/// Appended to shortened summaries
pub const SUMMARY_PLACEHOLDER: &str = "...";

/// Five-year era bucket derived from the release year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    UpTo1999,
    From2000To2004,
    From2005To2009,
    From2010To2014,
    From2015,
}

impl Category {
    /// Bucket a release year; intervals are half-open
    pub fn from_year(year: i32) -> Self {
        if year < 2000 {
            Self::UpTo1999
        } else if year < 2005 {
            Self::From2000To2004
        } else if year < 2010 {
            Self::From2005To2009
        } else if year < 2015 {
            Self::From2010To2014
        } else {
            Self::From2015
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo1999 => "x-1999",
            Self::From2000To2004 => "2000-2004",
            Self::From2005To2009 => "2005-2009",
            Self::From2010To2014 => "2010-2014",
            Self::From2015 => "2015-x",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One video page
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// Filesystem slug, names the output file
    pub slug_fs: String,
    pub slug_web: String,
    pub created: NaiveDate,
    pub release_year: i32,
    pub category: Option<Category>,
    pub duration: Option<Duration>,
    pub production: Option<Vec<String>>,
    pub direction: Option<Vec<String>>,
    pub sponsors: Option<Vec<String>>,
    pub people: Option<Vec<String>>,
    pub events: Option<Vec<String>>,
    pub description: String,
    pub summary: String,
    pub free_access: bool,
    pub language: Option<String>,
    pub country: Option<String>,
    pub link_trailer: Option<String>,
    pub link_stream: Option<String>,
    pub link_official: Option<String>,
    /// `youtube:<id>` or `vimeo:<id>`
    pub player: Option<String>,
    /// Same as `direction`
    pub authors: Option<Vec<String>>,
    pub tags: Vec<String>,
}

/// Builds articles from validated records and keyword tables
pub struct ArticleBuilder<'a> {
    keywords: &'a KeywordTables,
    summary_length: usize,
}

impl<'a> ArticleBuilder<'a> {
    pub fn new(keywords: &'a KeywordTables, summary_length: usize) -> Self {
        Self {
            keywords,
            summary_length,
        }
    }

    pub fn build_all(&self, records: &[ValidatedRecord]) -> Vec<Article> {
        records.iter().map(|record| self.build(record)).collect()
    }

    pub fn build(&self, record: &ValidatedRecord) -> Article {
        let player = [&record.link_stream, &record.link_trailer]
            .into_iter()
            .flatten()
            .find_map(|link| player_reference(link));

        Article {
            id: record.id.clone(),
            title: record.title.clone(),
            slug_fs: record.slug.clone(),
            slug_web: record.slug_web.clone(),
            created: record.created,
            release_year: record.release_year,
            category: Some(Category::from_year(record.release_year)),
            duration: record.duration,
            production: record.production.clone(),
            direction: record.direction.clone(),
            sponsors: record.sponsors.clone(),
            people: record.people.clone(),
            events: record.events.clone(),
            description: record.description.clone(),
            summary: shorten(&record.description, self.summary_length, SUMMARY_PLACEHOLDER),
            free_access: record.free_access,
            language: record.language.clone(),
            country: record.country.clone(),
            link_trailer: record.link_trailer.clone(),
            link_stream: record.link_stream.clone(),
            link_official: record.link_official.clone(),
            player,
            authors: record.direction.clone(),
            tags: self.tags_for(record),
        }
    }

    /// Tag-flagged items of every list column, in declaration order
    fn tags_for(&self, record: &ValidatedRecord) -> Vec<String> {
        let mut tags = Vec::new();

        for column in ListColumn::ALL {
            let (Some(items), Some(table)) = (record.list(column), self.keywords.get(column)) else {
                continue;
            };
            tags.extend(items.iter().filter(|item| table.is_tag(item)).cloned());
        }

        tags
    }
}

/// Collapse whitespace and cut `text` at a word boundary to fit `width` characters
///
/// When the text does not fit, words are kept while they leave room for
/// `placeholder`. If not even the first word fits, only the placeholder is returned.
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");

    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut result = String::new();
    let mut length = 0;

    for word in words {
        let word_length = word.chars().count();
        let needed = if result.is_empty() { word_length } else { word_length + 1 };
        if length + needed > budget {
            break;
        }
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
        length += needed;
    }

    result.push_str(placeholder);
    result
}

/// Embeddable player reference for a YouTube or Vimeo link
pub fn player_reference(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    match host {
        "youtube.com" => {
            let from_query = url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.to_string());
            let id = from_query.or_else(|| {
                let mut segments = url.path_segments()?;
                match segments.next()? {
                    "embed" | "shorts" | "live" => segments.next().map(str::to_string),
                    _ => None,
                }
            })?;
            (!id.is_empty()).then(|| format!("youtube:{}", id))
        }
        "youtu.be" => {
            let id = url.path_segments()?.next()?;
            (!id.is_empty()).then(|| format!("youtube:{}", id))
        }
        "vimeo.com" | "player.vimeo.com" => {
            let id = url
                .path_segments()?
                .find(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))?;
            Some(format!("vimeo:{}", id))
        }
        _ => None,
    }
}
