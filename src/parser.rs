use crate::error::{ChordError, Result};
use crate::pitch::PitchClass;

/// A chord name split into its root and its raw quality suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChordName {
    pub root: PitchClass,
    /// Everything after the root with non-alphanumeric characters removed.
    /// Not validated against the known qualities.
    pub suffix: String,
}

/// Length in bytes of the root token at the start of `name`: one letter
/// A-G (either case) and every `#`/`b` mark directly after it.
/// Returns 0 when the name does not start with a note letter.
pub fn root_token_len(name: &str) -> usize {
    let mut chars = name.char_indices();
    match chars.next() {
        Some((_, c)) if matches!(c.to_ascii_uppercase(), 'A'..='G') => {}
        _ => return 0,
    }
    for (idx, c) in chars {
        if c != '#' && c != 'b' {
            return idx;
        }
    }
    name.len()
}

/// Strip everything but ASCII letters and digits
fn clean_suffix(rest: &str) -> String {
    rest.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Split a chord name into root and quality suffix.
///
/// Fails with `InvalidPitch` when there is no root token. An unknown
/// suffix is kept as-is; catalog lookups decide whether it means anything.
pub fn parse_chord_name(name: &str) -> Result<ParsedChordName> {
    let trimmed = name.trim();
    let len = root_token_len(trimmed);
    if len == 0 {
        return Err(ChordError::InvalidPitch(trimmed.to_string()));
    }

    let root = PitchClass::parse(&trimmed[..len])?;
    Ok(ParsedChordName {
        root,
        suffix: clean_suffix(&trimmed[len..]),
    })
}

/// The quality suffix of a chord name, or `None` when the root is invalid
pub fn parse_quality(name: &str) -> Option<String> {
    parse_chord_name(name).ok().map(|parsed| parsed.suffix)
}
