use std::fmt::Write as _;

use crate::chapters::{Chapter, escape_metadata_value};
use crate::errors::ChapterError;
use crate::timecode;

// @module: FFMETADATA1 document generation

/// Optional global tags written ahead of the chapter blocks.
///
/// Empty fields are omitted from the document entirely, never written as
/// blank values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalMetadata {
    /// Movie title
    pub title: String,

    /// Author, written as the `artist` tag
    pub artist: String,

    /// Release year, written as the `date` tag
    pub date: String,
}

impl GlobalMetadata {
    /// True when every field is empty and no global tag line would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty() && self.date.is_empty()
    }
}

/// Render the FFMETADATA1 document for a chapter list sorted ascending by
/// start offset.
///
/// Chapter *i* ends one millisecond before chapter *i+1* starts; the final
/// chapter ends at the total media duration exactly, with no minus-one
/// adjustment. Validation happens before any text is produced, so a failure
/// never yields a partial document. The output is deterministic: identical
/// input gives byte-identical text.
pub fn render_document(
    chapters: &[Chapter],
    duration_ms: u64,
    metadata: &GlobalMetadata,
) -> Result<String, ChapterError> {
    // Chapters may never start at or after the end of the media
    if let Some(last) = chapters.last() {
        if duration_ms <= last.start_ms {
            return Err(ChapterError::Duration {
                duration_ms,
                last_start_ms: last.start_ms,
            });
        }
    }

    let mut doc = String::new();
    doc.push_str(";FFMETADATA1\n");

    if !metadata.title.is_empty() {
        let _ = writeln!(doc, "title={}", escape_metadata_value(&metadata.title));
    }
    if !metadata.date.is_empty() {
        let _ = writeln!(doc, "date={}", escape_metadata_value(&metadata.date));
    }
    if !metadata.artist.is_empty() {
        let _ = writeln!(doc, "artist={}", escape_metadata_value(&metadata.artist));
    }
    doc.push('\n');

    for (i, chapter) in chapters.iter().enumerate() {
        // The end boundary restated in the comment is the next chapter's
        // timecode as the user wrote it, or the formatted total duration
        // for the final chapter
        let (end_ms, end_label) = match chapters.get(i + 1) {
            Some(next) => (next.start_ms - 1, next.timecode.clone()),
            None => (duration_ms, timecode::format_timecode(duration_ms)),
        };

        let _ = writeln!(doc, "[CHAPTER]");
        let _ = writeln!(doc, "TIMEBASE=1/1000");
        let _ = writeln!(doc, "# Chapter {} starts at {}", i + 1, chapter.timecode);
        let _ = writeln!(doc, "START={}", chapter.start_ms);
        let _ = writeln!(doc, "# Chapter {} ends at {} (minus 1 millisecond)", i + 1, end_label);
        let _ = writeln!(doc, "END={}", end_ms);
        let _ = writeln!(doc, "title={}", chapter.title);
        doc.push('\n');
    }

    Ok(doc)
}
