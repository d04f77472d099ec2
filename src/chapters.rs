use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ChapterError;
use crate::timecode;

// @module: Chapter list parsing and manipulation

// @const: Timecode regex, leftmost match wins; the three-field form is
// tried first so "1:02:03" is not truncated to "1:02"
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+:\d+:\d+|\d+:\d+)").unwrap()
});

/// A named point in a media timeline.
///
/// Only the start boundary is stored; the end boundary is derived by the
/// metadata writer from the next chapter (or the total media duration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Timecode text as the user wrote it, kept for document comments
    pub timecode: String,

    /// Start offset in milliseconds
    pub start_ms: u64,

    /// Chapter title with metadata-reserved characters escaped
    pub title: String,
}

impl Chapter {
    /// Build a chapter from a raw timecode and an unescaped title.
    pub fn new(timecode: &str, title: &str) -> Result<Self, ChapterError> {
        let start_ms = timecode::parse_timecode(timecode)?;
        Ok(Chapter {
            timecode: timecode.to_string(),
            start_ms,
            title: escape_metadata_value(title),
        })
    }
}

/// Escape the characters reserved by the FFMETADATA format
/// (`:`, `=`, `;`, `#`, `\`) with a preceding backslash.
pub fn escape_metadata_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ':' | '=' | ';' | '#' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Extract `(timecode, escaped title)` pairs from raw chapter-source lines.
///
/// Each line is searched for the leftmost timecode token; lines without one
/// (blank lines, comments) are skipped silently. The token is removed from
/// the line's whitespace-delimited words and the remaining words, rejoined
/// with single spaces, form the title. Pairs are returned in encounter
/// order: sorting is an explicit separate step, see [`ChapterList::sorted`].
pub fn parse_chapter_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Chapter>, ChapterError> {
    let mut timecodes: Vec<String> = Vec::new();
    let mut titles: Vec<String> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        let Some(found) = TIMECODE_REGEX.find(line) else {
            continue;
        };
        let token = found.as_str();

        // Drop the first word equal to the matched token; everything else
        // keeps its relative order
        let mut removed = false;
        let words: Vec<&str> = line
            .split_whitespace()
            .filter(|word| {
                if !removed && *word == token {
                    removed = true;
                    false
                } else {
                    true
                }
            })
            .collect();

        timecodes.push(token.to_string());
        titles.push(escape_metadata_value(&words.join(" ")));
    }

    // Structurally impossible given the loop above, but the invariant must
    // fail loudly rather than silently truncate
    if timecodes.len() != titles.len() {
        return Err(ChapterError::Structural {
            timecodes: timecodes.len(),
            titles: titles.len(),
        });
    }

    timecodes
        .into_iter()
        .zip(titles)
        .map(|(tc, title)| {
            let start_ms = timecode::parse_timecode(&tc)?;
            Ok(Chapter {
                timecode: tc,
                start_ms,
                title,
            })
        })
        .collect()
}

/// An ordered sequence of chapters with unique start offsets.
///
/// A list is constructed fresh from an input source on each invocation and
/// treated as immutable once handed to the metadata writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterList {
    chapters: Vec<Chapter>,
}

impl ChapterList {
    /// Create an empty chapter list.
    pub fn new() -> Self {
        ChapterList { chapters: Vec::new() }
    }

    /// Parse raw text lines into a chapter list in encounter order.
    ///
    /// Duplicate start offsets follow the interactive policy: the newer
    /// entry replaces the older one.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, ChapterError> {
        let mut list = ChapterList::new();
        for chapter in parse_chapter_lines(lines)? {
            list.insert(chapter);
        }
        Ok(list)
    }

    /// Add a chapter. A chapter starting at an already-present offset
    /// replaces the older entry, so start offsets stay unique.
    pub fn insert(&mut self, chapter: Chapter) {
        if let Some(existing) = self
            .chapters
            .iter_mut()
            .find(|c| c.start_ms == chapter.start_ms)
        {
            *existing = chapter;
        } else {
            self.chapters.push(chapter);
        }
    }

    /// Consume the list and return it sorted ascending by start offset.
    pub fn sorted(mut self) -> Self {
        self.chapters.sort_by_key(|c| c.start_ms);
        self
    }

    /// Reject chapters whose title ended up empty.
    pub fn ensure_titles(&self) -> Result<(), ChapterError> {
        for chapter in &self.chapters {
            if chapter.title.is_empty() {
                return Err(ChapterError::EmptyTitle {
                    timecode: chapter.timecode.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// The chapters in their current order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn last(&self) -> Option<&Chapter> {
        self.chapters.last()
    }
}
