/*!
 * Tests for error types and conversions
 */

use vidcatalog::errors::{OffendingRow, ParseError, PipelineError, SourceError, ValidationError};

#[test]
fn test_offendingRow_withIdAndValue_shouldDisplayBoth() {
    let row = OffendingRow {
        row: 12,
        id: Some("7".to_string()),
        value: Some("maybe".to_string()),
    };
    assert_eq!(row.to_string(), "row 12 (id=7): \"maybe\"");
}

#[test]
fn test_offendingRow_withEmptyCell_shouldSayEmpty() {
    let row = OffendingRow {
        row: 3,
        id: None,
        value: None,
    };
    assert_eq!(row.to_string(), "row 3: <empty>");
}

#[test]
fn test_validationError_duplicateValues_shouldListEveryRow() {
    let error = ValidationError::DuplicateValues {
        column: "slug",
        rows: vec![
            OffendingRow { row: 2, id: Some("1".to_string()), value: Some("a".to_string()) },
            OffendingRow { row: 5, id: Some("4".to_string()), value: Some("a".to_string()) },
        ],
    };
    let display = error.to_string();

    assert!(display.contains("Duplicate values in unique column 'slug'"));
    assert!(display.contains("row 2 (id=1)"));
    assert!(display.contains("row 5 (id=4)"));
    assert_eq!(error.rows().len(), 2);
}

#[test]
fn test_validationError_missingColumn_shouldHaveNoRows() {
    let error = ValidationError::MissingColumn { column: "export" };
    assert_eq!(error.column(), "export");
    assert!(error.rows().is_empty());
    assert!(error.to_string().contains("export"));
}

#[test]
fn test_parseError_shouldNameRowAndValue() {
    let error = ParseError::Country {
        id: "3".to_string(),
        value: "XX".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("id == 3"));
    assert!(display.contains("XX"));
}

#[test]
fn test_pipelineError_fromValidationError_shouldWrap() {
    let error: PipelineError = ValidationError::MissingColumn { column: "id" }.into();
    assert!(matches!(error, PipelineError::Validation(_)));
    assert!(error.to_string().starts_with("Validation error:"));
}

#[test]
fn test_pipelineError_fromSourceError_shouldWrap() {
    let error: PipelineError = SourceError::Empty("no header row".to_string()).into();
    assert!(matches!(error, PipelineError::Source(_)));
    assert!(error.to_string().contains("no header row"));
}

#[test]
fn test_pipelineError_fromAnyhow_shouldBeFilesystemError() {
    let error: PipelineError = anyhow::anyhow!("disk full").into();
    assert!(matches!(error, PipelineError::Filesystem(_)));
    assert!(error.to_string().contains("disk full"));
}
