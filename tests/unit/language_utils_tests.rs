/*!
 * Tests for language and country code utilities
 */

use vidcatalog::language_utils::{country_name, language_name};

#[test]
fn test_country_name_withAlpha2Code_shouldReturnIsoName() {
    assert_eq!(country_name("FR"), Some("France"));
}

#[test]
fn test_country_name_withLowercaseCode_shouldStillResolve() {
    assert_eq!(country_name("fr"), country_name("FR"));
    assert_eq!(country_name(" fr "), Some("France"));
}

#[test]
fn test_country_name_withUnknownCode_shouldReturnNone() {
    assert_eq!(country_name("XX"), None);
    assert_eq!(country_name(""), None);
    assert_eq!(country_name("F"), None);
}

#[test]
fn test_language_name_withSheetCodes_shouldResolve() {
    assert_eq!(language_name("en"), Some("English"));
    assert_eq!(language_name("gr"), Some("Greek"));
}

#[test]
fn test_language_name_withIsoCodeOutsideTable_shouldReturnNone() {
    // Greek is `gr` in the sheet, not the ISO `el`
    assert_eq!(language_name("el"), None);
    assert_eq!(language_name("FR"), None);
}
