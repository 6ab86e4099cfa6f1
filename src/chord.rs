//! Chord qualities and the `Chord` value type.
//!
//! A chord is a root pitch class plus one of a closed set of qualities. Its
//! notes are not computed from intervals; they come from the catalog.

use std::fmt;

use crate::catalog::ChordCatalog;
use crate::error::Result;
use crate::parser::parse_chord_name;
use crate::pitch::PitchClass;

/// The closed set of chord qualities, in catalog dictionary order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Fifth,
    Seventh,
    Augmented,
    Diminished,
    MinorSeventh,
    Major,
    MajorSeventh,
    Minor,
    Sus2,
    Sus4,
}

impl ChordQuality {
    /// Dictionary order used for lookups and picker population
    pub const ALL: [ChordQuality; 10] = [
        ChordQuality::Fifth,
        ChordQuality::Seventh,
        ChordQuality::Augmented,
        ChordQuality::Diminished,
        ChordQuality::MinorSeventh,
        ChordQuality::Major,
        ChordQuality::MajorSeventh,
        ChordQuality::Minor,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
    ];

    /// Canonical suffix written after the root in catalog names
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Fifth => "5",
            ChordQuality::Seventh => "7",
            ChordQuality::Augmented => "aug",
            ChordQuality::Diminished => "dim",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::Major => "",
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::Minor => "min",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
        }
    }

    /// Human-readable name for pickers
    pub fn label(self) -> &'static str {
        match self {
            ChordQuality::Fifth => "fifth",
            ChordQuality::Seventh => "seventh",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Diminished => "diminished",
            ChordQuality::MinorSeventh => "minor seventh",
            ChordQuality::Major => "major",
            ChordQuality::MajorSeventh => "major seventh",
            ChordQuality::Minor => "minor",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
        }
    }

    /// Resolve a suffix to a quality. Canonical tokens match first, then
    /// the common aliases (`m` for minor, `maj`/`M` for major).
    pub fn from_suffix(suffix: &str) -> Option<ChordQuality> {
        if let Some(quality) = ChordQuality::ALL.into_iter().find(|q| q.suffix() == suffix) {
            return Some(quality);
        }
        match suffix {
            "m" => Some(ChordQuality::Minor),
            "maj" | "M" => Some(ChordQuality::Major),
            _ => None,
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A root plus a quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl Chord {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self { root, quality }
    }

    /// Parse a chord name.
    ///
    /// A bad root is an error; a well-formed name with an unknown quality
    /// suffix is `Ok(None)`.
    pub fn parse(name: &str) -> Result<Option<Chord>> {
        let parsed = parse_chord_name(name)?;
        let quality = ChordQuality::from_suffix(&parsed.suffix);
        Ok(quality.map(|quality| Chord::new(parsed.root, quality)))
    }

    /// Canonical catalog name, e.g. `C#m7`
    pub fn name(&self) -> String {
        format!("{}{}", self.root, self.quality.suffix())
    }

    /// Same quality, root shifted by `steps` semitones
    pub fn transpose(self, steps: i32) -> Chord {
        Chord::new(self.root.transpose(steps), self.quality)
    }

    /// Voicing notes from the catalog
    pub fn notes(&self, catalog: &ChordCatalog) -> &'static [PitchClass] {
        catalog.notes_for(self.quality, self.root)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_round_trip() {
        for quality in ChordQuality::ALL {
            assert_eq!(ChordQuality::from_suffix(quality.suffix()), Some(quality));
        }
    }

    #[test]
    fn test_minor_aliases() {
        assert_eq!(ChordQuality::from_suffix("m"), Some(ChordQuality::Minor));
        assert_eq!(ChordQuality::from_suffix("min"), Some(ChordQuality::Minor));
        assert_eq!(ChordQuality::from_suffix("m7"), Some(ChordQuality::MinorSeventh));
        assert_eq!(ChordQuality::from_suffix("maj7"), Some(ChordQuality::MajorSeventh));
        assert_eq!(ChordQuality::from_suffix("add9"), None);
    }

    #[test]
    fn test_parse_chord() {
        assert_eq!(
            Chord::parse("C#m7"),
            Ok(Some(Chord::new(PitchClass::CSharp, ChordQuality::MinorSeventh)))
        );
        assert_eq!(Chord::parse("G"), Ok(Some(Chord::new(PitchClass::G, ChordQuality::Major))));
        assert_eq!(Chord::parse("Gadd9"), Ok(None));
        assert!(Chord::parse("H7").is_err());
    }

    #[test]
    fn test_name_and_transpose() {
        let chord = Chord::new(PitchClass::G, ChordQuality::Seventh);
        assert_eq!(chord.name(), "G7");
        assert_eq!(chord.transpose(5).name(), "C7");
        assert_eq!(chord.transpose(-7).to_string(), "C7");
    }

    #[test]
    fn test_notes_from_catalog() {
        let catalog = ChordCatalog::standard();
        let chord = Chord::new(PitchClass::A, ChordQuality::Minor);
        assert_eq!(chord.notes(&catalog), &[PitchClass::A, PitchClass::C, PitchClass::E]);
    }
}
