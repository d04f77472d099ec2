/*!
 * Tests for FFMETADATA1 document generation
 */

use shears::chapters::Chapter;
use shears::errors::ChapterError;
use shears::metadata::{GlobalMetadata, render_document};

fn chapter(timecode: &str, title: &str) -> Chapter {
    Chapter::new(timecode, title).unwrap()
}

/// Test the end-boundary rule: every chapter ends one millisecond before the
/// next one starts, except the last which ends at the total duration exactly
#[test]
fn test_render_document_withTwoChapters_shouldDeriveEndBoundaries() {
    let chapters = [chapter("0:00", "Intro"), chapter("1:00", "Verse")];
    let doc = render_document(&chapters, 90_000, &GlobalMetadata::default()).unwrap();

    assert!(doc.contains("START=0\n"));
    assert!(doc.contains("END=59999\n"));
    assert!(doc.contains("START=60000\n"));
    assert!(doc.contains("END=90000\n"));
}

/// Test the exact document layout against a golden string
#[test]
fn test_render_document_withChaptersAndMetadata_shouldMatchGoldenOutput() {
    let chapters = [chapter("0:00", "Intro"), chapter("1:00", "Verse")];
    let metadata = GlobalMetadata {
        title: "My Movie".to_string(),
        artist: "Someone".to_string(),
        date: "2023".to_string(),
    };
    let doc = render_document(&chapters, 90_000, &metadata).unwrap();

    let expected = "\
;FFMETADATA1
title=My Movie
date=2023
artist=Someone

[CHAPTER]
TIMEBASE=1/1000
# Chapter 1 starts at 0:00
START=0
# Chapter 1 ends at 1:00 (minus 1 millisecond)
END=59999
title=Intro

[CHAPTER]
TIMEBASE=1/1000
# Chapter 2 starts at 1:00
START=60000
# Chapter 2 ends at 00:01:30 (minus 1 millisecond)
END=90000
title=Verse

";
    assert_eq!(doc, expected);
}

/// Test that a duration equal to the last start is rejected
#[test]
fn test_render_document_withDurationEqualToLastStart_shouldReturnDurationError() {
    let chapters = [chapter("0:00", "Intro"), chapter("01:40:00", "End")];
    let err = render_document(&chapters, 6_000_000, &GlobalMetadata::default()).unwrap_err();

    assert_eq!(
        err,
        ChapterError::Duration {
            duration_ms: 6_000_000,
            last_start_ms: 6_000_000,
        }
    );
}

/// Test that a duration below the last start is rejected
#[test]
fn test_render_document_withDurationBelowLastStart_shouldReturnDurationError() {
    let chapters = [chapter("10:00", "Too late")];
    assert!(render_document(&chapters, 1_000, &GlobalMetadata::default()).is_err());
}

/// Test that empty metadata fields are omitted entirely, not written blank
#[test]
fn test_render_document_withPartialMetadata_shouldOmitEmptyFields() {
    let chapters = [chapter("0:00", "Intro")];
    let metadata = GlobalMetadata {
        title: "Only a title".to_string(),
        artist: String::new(),
        date: String::new(),
    };
    let doc = render_document(&chapters, 10_000, &metadata).unwrap();

    assert!(doc.contains("title=Only a title\n"));
    assert!(!doc.contains("artist="));
    assert!(!doc.contains("date="));
}

/// Test that global metadata values are escaped like chapter titles
#[test]
fn test_render_document_withReservedCharsInMetadata_shouldEscapeThem() {
    let metadata = GlobalMetadata {
        title: "Movie: The Sequel".to_string(),
        artist: String::new(),
        date: String::new(),
    };
    let doc = render_document(&[], 0, &metadata).unwrap();
    assert!(doc.contains("title=Movie\\: The Sequel\n"));
}

/// Test a metadata-only document with zero chapters
#[test]
fn test_render_document_withNoChapters_shouldEmitHeaderAndGlobalsOnly() {
    let metadata = GlobalMetadata {
        title: "Bare".to_string(),
        artist: "Author".to_string(),
        date: "1999".to_string(),
    };
    let doc = render_document(&[], 0, &metadata).unwrap();

    assert_eq!(doc, ";FFMETADATA1\ntitle=Bare\ndate=1999\nartist=Author\n\n");
    assert!(!doc.contains("[CHAPTER]"));
}

/// Test that the writer is deterministic: same input, byte-identical output
#[test]
fn test_render_document_withSameInput_shouldBeIdempotent() {
    let chapters = [chapter("0:00", "Intro"), chapter("2:00", "Outro")];
    let metadata = GlobalMetadata {
        title: "My Movie".to_string(),
        artist: String::new(),
        date: "2023".to_string(),
    };

    let first = render_document(&chapters, 300_000, &metadata).unwrap();
    let second = render_document(&chapters, 300_000, &metadata).unwrap();
    assert_eq!(first, second);
}

/// Test that validation failure yields no partial output at all
#[test]
fn test_render_document_withInvalidDuration_shouldProduceNoOutput() {
    let chapters = [chapter("0:00", "Intro"), chapter("5:00", "Too far")];
    let result = render_document(&chapters, 100_000, &GlobalMetadata::default());
    assert!(matches!(result, Err(ChapterError::Duration { .. })));
}

/// Test the end comment of the final chapter restates the formatted duration
#[test]
fn test_render_document_withFinalChapter_shouldRestateDurationTimecode() {
    let chapters = [chapter("0:00", "All of it")];
    let doc = render_document(&chapters, 3_723_456, &GlobalMetadata::default()).unwrap();

    // sub-second remainder truncated by the formatter
    assert!(doc.contains("# Chapter 1 ends at 01:02:03 (minus 1 millisecond)\n"));
    assert!(doc.contains("END=3723456\n"));
}
