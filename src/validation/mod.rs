/*!
 * Validation of the raw sheet.
 *
 * - `columns`: column-wide rules (non-empty, unique, yes/no, integer)
 * - `service`: runs the rules and row parsers in order, producing validated records
 */

pub mod columns;
pub mod service;

// Re-export main types
pub use service::{CleanedTable, ValidationService};
