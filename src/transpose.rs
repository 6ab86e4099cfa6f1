//! Chord-name transposition.
//!
//! Only the root moves. The quality suffix is carried over exactly as the
//! parser produced it, known or not.

use crate::error::Result;
use crate::parser::parse_chord_name;

/// Shift a chord name's root by `steps` semitones (any sign, wrapped mod 12)
/// and keep its suffix.
///
/// ```
/// use chordshift::transpose::transpose;
///
/// assert_eq!(transpose("G7", 5).unwrap(), "C7");
/// assert_eq!(transpose("Bbm7", 2).unwrap(), "Cm7");
/// ```
pub fn transpose(name: &str, steps: i32) -> Result<String> {
    let parsed = parse_chord_name(name)?;
    let root = parsed.root.transpose(steps);
    Ok(format!("{}{}", root, parsed.suffix))
}

/// Transpose every name, stopping at the first invalid one
pub fn transpose_all<'a, I>(names: I, steps: i32) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(|name| transpose(name, steps)).collect()
}
