/*!
 * Tests for article assembly
 */

use vidcatalog::article::{player_reference, shorten, ArticleBuilder, Category, DEFAULT_SUMMARY_LENGTH};
use vidcatalog::keywords::{extract_keywords, KeywordSettings};
use crate::common::validated_record;

#[test]
fn test_category_from_year_atBoundaries_shouldUseHalfOpenBuckets() {
    assert_eq!(Category::from_year(1999), Category::UpTo1999);
    assert_eq!(Category::from_year(2000), Category::From2000To2004);
    assert_eq!(Category::from_year(2004), Category::From2000To2004);
    assert_eq!(Category::from_year(2005), Category::From2005To2009);
    assert_eq!(Category::from_year(2009), Category::From2005To2009);
    assert_eq!(Category::from_year(2010), Category::From2010To2014);
    assert_eq!(Category::from_year(2014), Category::From2010To2014);
    assert_eq!(Category::from_year(2015), Category::From2015);
}

#[test]
fn test_category_as_str_shouldMatchDirectoryNames() {
    assert_eq!(Category::from_year(1980).to_string(), "x-1999");
    assert_eq!(Category::from_year(2012).as_str(), "2010-2014");
    assert_eq!(Category::from_year(2030).as_str(), "2015-x");
}

#[test]
fn test_build_withSingleOccurrenceValue_shouldNotTagIt() {
    let records = vec![
        validated_record("1", &["Hardrock 100", "Leadville 100"], &["Kilian Jornet"]),
        validated_record("2", &["Hardrock 100"], &["Kilian Jornet"]),
    ];
    let keywords = extract_keywords(&records, &KeywordSettings::default());
    let builder = ArticleBuilder::new(&keywords, DEFAULT_SUMMARY_LENGTH);

    let article = builder.build(&records[0]);

    // Events come before people
    assert_eq!(article.tags, vec!["Hardrock 100", "Kilian Jornet"]);
    assert!(!article.tags.contains(&"Leadville 100".to_string()));
    // The single-occurrence value is still listed in its own field
    assert_eq!(
        article.events,
        Some(vec!["Hardrock 100".to_string(), "Leadville 100".to_string()])
    );
}

#[test]
fn test_build_shouldCarryRecordFields() {
    let mut record = validated_record("9", &[], &[]);
    record.direction = Some(vec!["Jane Doe".to_string()]);
    record.link_trailer = Some("https://youtu.be/xyz789".to_string());
    let records = vec![record];
    let keywords = extract_keywords(&records, &KeywordSettings::default());

    let article = ArticleBuilder::new(&keywords, DEFAULT_SUMMARY_LENGTH).build(&records[0]);

    assert_eq!(article.slug_fs, "video_9");
    assert_eq!(article.slug_web, "video-9");
    assert_eq!(article.category, Some(Category::From2015));
    assert_eq!(article.authors, article.direction);
    assert_eq!(article.summary, "A video.");
    assert_eq!(article.player.as_deref(), Some("youtube:xyz789"));
    assert!(article.tags.is_empty());
}

#[test]
fn test_build_withLongDescription_shouldShortenSummary() {
    let mut record = validated_record("1", &[], &[]);
    record.description = "word ".repeat(100);
    let records = vec![record];
    let keywords = extract_keywords(&records, &KeywordSettings::default());

    let article = ArticleBuilder::new(&keywords, 30).build(&records[0]);

    assert!(article.summary.ends_with("..."));
    assert!(article.summary.chars().count() <= 30);
    assert_eq!(article.description, records[0].description);
}

#[test]
fn test_shorten_withExactFit_shouldNotAddPlaceholder() {
    assert_eq!(shorten("abc def", 7, "..."), "abc def");
}

#[test]
fn test_player_reference_withKnownHosts_shouldExtractIds() {
    assert_eq!(
        player_reference("https://www.youtube.com/watch?v=abc123&t=10").as_deref(),
        Some("youtube:abc123")
    );
    assert_eq!(
        player_reference("https://www.youtube.com/embed/abc123").as_deref(),
        Some("youtube:abc123")
    );
    assert_eq!(player_reference("https://vimeo.com/123456").as_deref(), Some("vimeo:123456"));
    assert_eq!(
        player_reference("https://player.vimeo.com/video/987").as_deref(),
        Some("vimeo:987")
    );
}

#[test]
fn test_player_reference_withOtherLinks_shouldReturnNone() {
    assert_eq!(player_reference("https://example.com/watch?v=abc"), None);
    assert_eq!(player_reference("not a url"), None);
    assert_eq!(player_reference("https://vimeo.com/channels/staffpicks"), None);
}

#[test]
fn test_build_withStreamAndTrailer_shouldPreferStream() {
    let mut record = validated_record("1", &[], &[]);
    record.link_trailer = Some("https://youtu.be/trailer".to_string());
    record.link_stream = Some("https://vimeo.com/42".to_string());
    let records = vec![record];
    let keywords = extract_keywords(&records, &KeywordSettings::default());

    let article = ArticleBuilder::new(&keywords, DEFAULT_SUMMARY_LENGTH).build(&records[0]);

    assert_eq!(article.player.as_deref(), Some("vimeo:42"));
}
