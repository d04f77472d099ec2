use crate::errors::TimecodeError;

// @module: Timecode parsing and formatting

/// Parse a timecode string into milliseconds.
///
/// Exactly two shapes are accepted: `HH:MM:SS` (three colon-separated
/// integer fields) and `MM:SS` (two fields, hours implicitly zero). Field
/// magnitudes are not bounded: a minute field of 90 simply means ninety
/// minutes, the arithmetic absorbs it.
pub fn parse_timecode(text: &str) -> Result<u64, TimecodeError> {
    let fields: Vec<&str> = text.split(':').collect();

    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (parse_field(h, text)?, parse_field(m, text)?, parse_field(s, text)?),
        [m, s] => (0, parse_field(m, text)?, parse_field(s, text)?),
        _ => {
            return Err(TimecodeError::Format {
                text: text.to_string(),
            });
        }
    };

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000)
}

// Any non-integer field invalidates the whole timecode, reported with the
// full offending text rather than the fragment.
fn parse_field(field: &str, full_text: &str) -> Result<u64, TimecodeError> {
    field.parse::<u64>().map_err(|_| TimecodeError::Format {
        text: full_text.to_string(),
    })
}

/// Format milliseconds as a zero-padded `HH:MM:SS` timecode.
///
/// Sub-second remainder is truncated, not rounded, so
/// `parse_timecode(format_timecode(x))` equals `x - (x % 1000)`.
pub fn format_timecode(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
