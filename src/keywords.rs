/*!
 * Keyword tables for the multi-value columns.
 *
 * Each list column gets its own table counting how many records mention each
 * distinct value. Values mentioned often enough become tags. A Levenshtein
 * scan reports near-duplicate values for manual review; nothing is merged.
 */

use std::collections::HashMap;

use log::{debug, warn};
use serde::Serialize;

use crate::models::{ListColumn, ValidatedRecord};

/// Minimum number of records a value must appear in to become a tag
pub const TAG_MIN_COUNT: usize = 2;

/// Maximum edit distance reported by the similarity scan
pub const DEFAULT_SIMILARITY_THRESHOLD: usize = 3;

/// Occurrence data for one distinct value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    /// Display name, the first spelling encountered
    pub name: String,
    pub count: usize,
    pub is_tag: bool,
}

/// Distinct values of one list column
#[derive(Debug, Clone)]
pub struct KeywordTable {
    column: ListColumn,
    entries: Vec<KeywordEntry>,
    index: HashMap<String, usize>,
}

fn keyword_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl KeywordTable {
    /// Count every value of `column` across `records`
    pub fn from_records(column: ListColumn, records: &[ValidatedRecord], tag_min_count: usize) -> Self {
        let mut entries: Vec<KeywordEntry> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for item in records.iter().filter_map(|record| record.list(column)).flatten() {
            let key = keyword_key(item);
            match index.get(&key) {
                Some(&position) => entries[position].count += 1,
                None => {
                    index.insert(key, entries.len());
                    entries.push(KeywordEntry {
                        name: item.trim().to_string(),
                        count: 1,
                        is_tag: false,
                    });
                }
            }
        }

        for entry in entries.iter_mut() {
            entry.is_tag = entry.count >= tag_min_count;
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (keyword_key(&entry.name), position))
            .collect();

        Self { column, entries, index }
    }

    pub fn column(&self) -> ListColumn {
        self.column
    }

    /// Entries ordered by count, then name
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    /// Look up a value, ignoring case and surrounding whitespace
    pub fn get(&self, name: &str) -> Option<&KeywordEntry> {
        self.index
            .get(&keyword_key(name))
            .map(|&position| &self.entries[position])
    }

    pub fn is_tag(&self, name: &str) -> bool {
        self.get(name).is_some_and(|entry| entry.is_tag)
    }

    pub fn tag_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_tag).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs of values within `threshold` edits of each other
    pub fn similar_pairs(&self, threshold: usize) -> Vec<SimilarPair> {
        let names: Vec<&str> = self.entries.iter().map(|entry| entry.name.as_str()).collect();
        find_similar(&names, threshold)
    }
}

/// The keyword tables of all list columns
#[derive(Debug, Clone)]
pub struct KeywordTables {
    tables: Vec<KeywordTable>,
}

impl KeywordTables {
    /// Table for a column
    pub fn get(&self, column: ListColumn) -> Option<&KeywordTable> {
        self.tables.iter().find(|table| table.column == column)
    }

    /// Tables in list-column declaration order
    pub fn iter(&self) -> impl Iterator<Item = &KeywordTable> {
        self.tables.iter()
    }
}

/// Two values close enough to be worth a manual look
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarPair {
    pub left: String,
    pub right: String,
    pub distance: usize,
}

/// Settings for keyword extraction
#[derive(Debug, Clone, Copy)]
pub struct KeywordSettings {
    pub tag_min_count: usize,
    pub similarity_threshold: usize,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self {
            tag_min_count: TAG_MIN_COUNT,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// Build the keyword tables and log the similarity report
pub fn extract_keywords(records: &[ValidatedRecord], settings: &KeywordSettings) -> KeywordTables {
    let tables: Vec<KeywordTable> = ListColumn::ALL
        .iter()
        .map(|&column| KeywordTable::from_records(column, records, settings.tag_min_count))
        .collect();

    for table in &tables {
        debug!(
            "Column '{}': {} distinct values, {} tags",
            table.column(),
            table.len(),
            table.tag_count()
        );

        let similar = table.similar_pairs(settings.similarity_threshold);
        if !similar.is_empty() {
            warn!(
                "Found similar \"{}\" keywords. You may want to review these:",
                table.column()
            );
            for pair in &similar {
                warn!("* {}\t{}\t{}", pair.distance, pair.left, pair.right);
            }
        }
    }

    KeywordTables { tables }
}

/// Every pair of `names` within `threshold` edits, closest first
pub fn find_similar(names: &[&str], threshold: usize) -> Vec<SimilarPair> {
    let mut pairs = Vec::new();

    for (i, left) in names.iter().enumerate() {
        for right in &names[i + 1..] {
            let distance = levenshtein_distance(left, right);
            if distance <= threshold {
                pairs.push(SimilarPair {
                    left: left.to_string(),
                    right: right.to_string(),
                    distance,
                });
            }
        }
    }

    // Stable, so ties keep table order
    pairs.sort_by_key(|pair| pair.distance);
    pairs
}

/// Calculate Levenshtein distance between two strings
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Two rows are enough
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr_row[0] = i;

        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr_row[j] = (prev_row[j] + 1)                  // deletion
                .min(curr_row[j - 1] + 1)                    // insertion
                .min(prev_row[j - 1] + cost);                // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
