use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The subtitle language tag embedded in the container is the ISO 639-2/T
/// (3-letter) form. Users may supply 2-letter ISO 639-1 codes or the
/// bibliographic 639-2/B variants still common in existing files; both are
/// normalized here.
/// ISO 639-2/B codes that differ from the 639-2/T form
const PART2B_ALIASES: &[(&str, &str)] = &[
    ("alb", "sqi"), // Albanian
    ("arm", "hye"), // Armenian
    ("baq", "eus"), // Basque
    ("bur", "mya"), // Burmese
    ("chi", "zho"), // Chinese
    ("cze", "ces"), // Czech
    ("dut", "nld"), // Dutch
    ("fre", "fra"), // French
    ("geo", "kat"), // Georgian
    ("ger", "deu"), // German
    ("gre", "ell"), // Greek
    ("ice", "isl"), // Icelandic
    ("mac", "mkd"), // Macedonian
    ("may", "msa"), // Malay
    ("per", "fas"), // Persian
    ("rum", "ron"), // Romanian
    ("slo", "slk"), // Slovak
    ("wel", "cym"), // Welsh
];

/// Normalize a 2- or 3-letter ISO 639 code to ISO 639-2/T (3-letter) format.
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some((_, part2t)) = PART2B_ALIASES.iter().find(|(b, _)| *b == normalized_code) {
            return Ok((*part2t).to_string());
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// English name of a language code, used in log output.
pub fn get_language_name(code: &str) -> Result<String> {
    let part2t = normalize_to_part2t(code)?;
    Language::from_639_3(&part2t)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}
