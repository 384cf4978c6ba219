use isocountry::CountryCode;

// @module: Language and country code utilities
//
// The sheet uses short language codes that are not all ISO 639-1 (`gr` for
// Greek), so languages resolve through a fixed table. Countries are ISO 3166-1
// alpha-2 codes.

/// Get the display name for a sheet language code
pub fn language_name(code: &str) -> Option<&'static str> {
    match code.trim() {
        "fr" => Some("French"),
        "en" => Some("English"),
        "gr" => Some("Greek"),
        _ => None,
    }
}

/// Get the ISO 3166 country name for a two-letter code
pub fn country_name(code: &str) -> Option<&'static str> {
    let normalized_code = code.trim().to_uppercase();

    if normalized_code.len() != 2 {
        return None;
    }

    CountryCode::for_alpha2(&normalized_code)
        .ok()
        .map(|country| country.name())
}
