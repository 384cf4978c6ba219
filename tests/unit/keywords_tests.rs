/*!
 * Tests for keyword tables and tag selection
 */

use vidcatalog::keywords::{extract_keywords, KeywordSettings, KeywordTable, TAG_MIN_COUNT};
use vidcatalog::models::ListColumn;
use vidcatalog::normalizer::split_list;
use crate::common::validated_record;

#[test]
fn test_from_records_shouldCountRecordsPerValue() {
    let records = vec![
        validated_record("1", &["Hardrock 100"], &["Kilian Jornet"]),
        validated_record("2", &["Hardrock 100", "Leadville 100"], &[]),
    ];

    let table = KeywordTable::from_records(ListColumn::Events, &records, TAG_MIN_COUNT);

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("Hardrock 100").map(|entry| entry.count), Some(2));
    assert_eq!(table.get("Leadville 100").map(|entry| entry.count), Some(1));
}

#[test]
fn test_is_tag_withMinimumCount_shouldOnlyFlagRepeatedValues() {
    let records = vec![
        validated_record("1", &["Hardrock 100"], &[]),
        validated_record("2", &["Hardrock 100", "Leadville 100"], &[]),
    ];

    let table = KeywordTable::from_records(ListColumn::Events, &records, 2);

    assert!(table.is_tag("Hardrock 100"));
    assert!(!table.is_tag("Leadville 100"));
    assert!(!table.is_tag("Never mentioned"));
    assert_eq!(table.tag_count(), 1);
}

#[test]
fn test_get_withDifferentCase_shouldMatchSameEntry() {
    let records = vec![
        validated_record("1", &["Hardrock 100"], &[]),
        validated_record("2", &["hardrock 100"], &[]),
    ];

    let table = KeywordTable::from_records(ListColumn::Events, &records, 2);

    assert_eq!(table.len(), 1);
    // First spelling wins
    assert_eq!(table.entries()[0].name, "Hardrock 100");
    assert!(table.is_tag("HARDROCK 100"));
}

#[test]
fn test_entries_shouldOrderByCountThenName() {
    let records = vec![
        validated_record("1", &["Zegama", "Badwater 135"], &[]),
        validated_record("2", &["Zegama", "Andorra"], &[]),
    ];

    let table = KeywordTable::from_records(ListColumn::Events, &records, 2);
    let names: Vec<&str> = table.entries().iter().map(|entry| entry.name.as_str()).collect();

    assert_eq!(names, vec!["Zegama", "Andorra", "Badwater 135"]);
}

#[test]
fn test_extract_keywords_shouldBuildOneTablePerListColumn() {
    let records = vec![validated_record("1", &["Hardrock 100"], &["Kilian Jornet"])];

    let tables = extract_keywords(&records, &KeywordSettings::default());
    let columns: Vec<ListColumn> = tables.iter().map(|table| table.column()).collect();

    assert_eq!(columns, ListColumn::ALL.to_vec());
    assert!(tables.get(ListColumn::Sponsors).is_some_and(|table| table.is_empty()));
    assert_eq!(tables.get(ListColumn::People).map(|table| table.len()), Some(1));
}

#[test]
fn test_similar_pairs_withNearDuplicates_shouldReportButNotMerge() {
    let records = vec![
        validated_record("1", &[], &["Kilian Jornet"]),
        validated_record("2", &[], &["Kilian Jornett"]),
    ];

    let table = KeywordTable::from_records(ListColumn::People, &records, 2);
    let pairs = table.similar_pairs(3);

    assert_eq!(table.len(), 2);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].distance, 1);
    // Neither spelling reaches the tag threshold on its own
    assert_eq!(table.tag_count(), 0);
}

#[test]
fn test_similar_pairs_withZeroThreshold_shouldReportNothing() {
    let records = vec![validated_record("1", &["Hardrock 100", "Hardrock 10"], &[])];

    let table = KeywordTable::from_records(ListColumn::Events, &records, 2);

    assert!(table.similar_pairs(0).is_empty());
}

#[test]
fn test_from_records_withCaseVariantsInOneRecord_shouldNotBecomeTag() {
    let mut record = validated_record("1", &[], &[]);
    record.people = split_list(ListColumn::People, Some("Kilian Jornet, kilian jornet"));
    let records = vec![record];

    let table = KeywordTable::from_records(ListColumn::People, &records, TAG_MIN_COUNT);

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("kilian jornet").map(|entry| entry.count), Some(1));
    assert!(!table.is_tag("Kilian Jornet"));
}
