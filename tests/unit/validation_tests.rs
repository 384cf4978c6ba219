/*!
 * Tests for column rules and the validation service
 */

use std::time::Duration;

use vidcatalog::errors::{ParseError, PipelineError, ValidationError};
use vidcatalog::models::RawRecord;
use vidcatalog::validation::columns::{require_integer, require_non_empty, require_unique, require_yes_no};
use vidcatalog::validation::ValidationService;
use crate::common::raw_record;

fn expect_validation(result: Result<impl std::fmt::Debug, PipelineError>) -> ValidationError {
    match result {
        Err(PipelineError::Validation(error)) => error,
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

fn expect_parse(result: Result<impl std::fmt::Debug, PipelineError>) -> ParseError {
    match result {
        Err(PipelineError::Parse(error)) => error,
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_require_unique_withDuplicates_shouldReportEveryRow() {
    let records = vec![
        raw_record(2, "1", "A", "a"),
        raw_record(3, "1", "B", "b"),
        raw_record(4, "2", "C", "c"),
    ];

    let error = require_unique(&records, "id").unwrap_err();

    assert_eq!(error.column(), "id");
    let rows: Vec<usize> = error.rows().iter().map(|row| row.row).collect();
    assert_eq!(rows, vec![2, 3]);
}

#[test]
fn test_require_non_empty_withEmptyCell_shouldNameTheRow() {
    let mut record = raw_record(5, "9", "A", "a");
    record.description = None;

    let error = require_non_empty(&[record], "description").unwrap_err();

    assert!(matches!(error, ValidationError::EmptyValues { column: "description", .. }));
    assert_eq!(error.rows()[0].id.as_deref(), Some("9"));
    assert!(error.to_string().contains("row 5"));
}

#[test]
fn test_require_yes_no_withOtherValue_shouldFail() {
    let mut record = raw_record(2, "1", "A", "a");
    record.free_access = Some("Yes".to_string());

    assert!(matches!(
        require_yes_no(&[record], "free_access"),
        Err(ValidationError::NotYesNo { .. })
    ));
}

#[test]
fn test_require_integer_withDecimal_shouldFail() {
    let mut record = raw_record(2, "1", "A", "a");
    record.release_year = Some("2012.5".to_string());

    assert!(matches!(
        require_integer(&[record], "release_year"),
        Err(ValidationError::NotInteger { .. })
    ));
}

#[test]
fn test_clean_withExportNo_shouldDropRowBeforeOtherChecks() {
    let mut draft = raw_record(3, "1", "A", "a");
    draft.export = Some("no".to_string());
    // Would fail every later rule if it were kept
    draft.created = Some("garbage".to_string());
    let records = vec![raw_record(2, "1", "Kept", "kept"), draft];

    let cleaned = ValidationService::new().clean(records).unwrap();

    assert_eq!(cleaned.records.len(), 1);
    assert_eq!(cleaned.records[0].title, "Kept");
    assert_eq!(cleaned.skipped, 1);
}

#[test]
fn test_clean_withMissingExportFlag_shouldFail() {
    let mut record = raw_record(2, "1", "A", "a");
    record.export = None;

    let error = expect_validation(ValidationService::new().clean(vec![record]));
    assert_eq!(error.column(), "export");
}

#[test]
fn test_clean_withDuplicateId_shouldFail() {
    let records = vec![raw_record(2, "1", "A", "a"), raw_record(3, "1", "B", "b")];

    let error = expect_validation(ValidationService::new().clean(records));
    assert!(matches!(error, ValidationError::DuplicateValues { column: "id", .. }));
}

#[test]
fn test_clean_withDuplicateTitle_shouldFail() {
    let records = vec![raw_record(2, "1", "Same", "a"), raw_record(3, "2", "Same", "b")];

    let error = expect_validation(ValidationService::new().clean(records));
    assert!(matches!(error, ValidationError::DuplicateValues { column: "title", .. }));
}

#[test]
fn test_clean_withSlugsDifferingOnlyInCase_shouldFail() {
    let records = vec![raw_record(2, "1", "A", "Trail"), raw_record(3, "2", "B", "trail")];

    let error = expect_validation(ValidationService::new().clean(records));
    assert!(matches!(error, ValidationError::DuplicateValues { column: "slug", .. }));
}

#[test]
fn test_clean_withInvalidSlug_shouldFailWithParseError() {
    let records = vec![raw_record(2, "1", "A", "GR 20")];

    let error = expect_parse(ValidationService::new().clean(records));
    assert_eq!(
        error,
        ParseError::Slug {
            id: "1".to_string(),
            value: "gr 20".to_string(),
        }
    );
}

#[test]
fn test_clean_withEmptyReleaseYear_shouldFailBeforeSlug() {
    let mut record = raw_record(2, "1", "A", "GR 20");
    record.release_year = None;

    let error = expect_validation(ValidationService::new().clean(vec![record]));
    assert_eq!(error.column(), "release_year");
}

#[test]
fn test_clean_withBadDuration_shouldFail() {
    let mut record = raw_record(2, "1", "A", "a");
    record.duration = Some("bad".to_string());

    assert!(matches!(
        expect_parse(ValidationService::new().clean(vec![record])),
        ParseError::Duration { .. }
    ));
}

#[test]
fn test_clean_withFreeAccessOutsideYesNo_shouldFail() {
    let mut record = raw_record(2, "1", "A", "a");
    record.free_access = Some("sometimes".to_string());

    let error = expect_validation(ValidationService::new().clean(vec![record]));
    assert!(matches!(error, ValidationError::NotYesNo { column: "free_access", .. }));
}

#[test]
fn test_clean_withValidRow_shouldCoerceEveryColumn() {
    let record = RawRecord {
        duration: Some("00:52:00".to_string()),
        language: Some("gr".to_string()),
        country: Some("gr".to_string()),
        free_access: Some("yes".to_string()),
        people: Some("B, A, B".to_string()),
        ..raw_record(2, "7", "Olympus", "Mount_Olympus")
    };

    let cleaned = ValidationService::new().clean(vec![record]).unwrap();
    let validated = &cleaned.records[0];

    assert_eq!(validated.slug, "mount_olympus");
    assert_eq!(validated.slug_web, "mount-olympus");
    assert_eq!(validated.release_year, 2012);
    assert_eq!(validated.duration, Some(Duration::from_secs(52 * 60)));
    assert_eq!(validated.language.as_deref(), Some("Greek"));
    assert_eq!(validated.country.as_deref(), Some("Greece"));
    assert!(validated.free_access);
    assert_eq!(validated.people, Some(vec!["A".to_string(), "B".to_string()]));
    assert_eq!(validated.events, None);
}

#[test]
fn test_clean_withRecordWithoutLinks_shouldStillSucceed() {
    let mut record = raw_record(2, "1", "A", "a");
    record.link_stream = None;

    let cleaned = ValidationService::new().clean(vec![record]).unwrap();
    assert!(!cleaned.records[0].has_links());
}
