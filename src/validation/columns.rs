/*!
 * Column rules over raw records.
 *
 * Each rule scans one column of the whole table, collects every offending row
 * and fails with a `ValidationError` naming the column.
 */

use std::collections::HashMap;

use log::debug;

use crate::errors::{OffendingRow, ValidationError};
use crate::models::RawRecord;

fn offending(record: &RawRecord, column: &str) -> OffendingRow {
    OffendingRow {
        row: record.row,
        id: record.id.clone(),
        value: record.get(column).map(str::to_string),
    }
}

/// Every row must have a value in `column`
pub fn require_non_empty(records: &[RawRecord], column: &'static str) -> Result<(), ValidationError> {
    let rows: Vec<OffendingRow> = records
        .iter()
        .filter(|record| record.get(column).is_none())
        .map(|record| offending(record, column))
        .collect();

    if !rows.is_empty() {
        return Err(ValidationError::EmptyValues { column, rows });
    }

    debug!("Column '{}' has no empty values", column);
    Ok(())
}

/// No two rows may share a value in `column`; every duplicated row is reported
pub fn require_unique(records: &[RawRecord], column: &'static str) -> Result<(), ValidationError> {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for value in records.iter().filter_map(|record| record.get(column)) {
        *occurrences.entry(value).or_insert(0) += 1;
    }

    let rows: Vec<OffendingRow> = records
        .iter()
        .filter(|record| {
            record
                .get(column)
                .is_some_and(|value| occurrences.get(value).copied().unwrap_or(0) > 1)
        })
        .map(|record| offending(record, column))
        .collect();

    if !rows.is_empty() {
        return Err(ValidationError::DuplicateValues { column, rows });
    }

    debug!("Column '{}' values are unique", column);
    Ok(())
}

/// Every row must hold exactly `yes` or `no` in `column`
pub fn require_yes_no(records: &[RawRecord], column: &'static str) -> Result<(), ValidationError> {
    let rows: Vec<OffendingRow> = records
        .iter()
        .filter(|record| !matches!(record.get(column), Some("yes") | Some("no")))
        .map(|record| offending(record, column))
        .collect();

    if !rows.is_empty() {
        return Err(ValidationError::NotYesNo { column, rows });
    }

    Ok(())
}

/// Every present value in `column` must be an integer
pub fn require_integer(records: &[RawRecord], column: &'static str) -> Result<(), ValidationError> {
    let rows: Vec<OffendingRow> = records
        .iter()
        .filter(|record| {
            record
                .get(column)
                .is_some_and(|value| value.parse::<i32>().is_err())
        })
        .map(|record| offending(record, column))
        .collect();

    if !rows.is_empty() {
        return Err(ValidationError::NotInteger { column, rows });
    }

    Ok(())
}

/// Interpret a cell already checked by `require_yes_no`
pub fn is_yes(value: Option<&str>) -> bool {
    value == Some("yes")
}
