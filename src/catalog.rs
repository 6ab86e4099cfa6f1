//! The chord catalog: one dictionary per quality, each mapping all twelve
//! roots to their voicing notes.
//!
//! The tables are written out per root rather than derived from intervals.
//! Every dictionary is closed under transposition, which the tests check.

use tracing::warn;

use crate::chord::{Chord, ChordQuality};
use crate::pitch::PitchClass;
use crate::pitch::PitchClass::*;

/// Voicing notes for one quality, indexed by root semitone (C=0)
#[derive(Debug)]
pub struct Dictionary {
    pub quality: ChordQuality,
    notes: [&'static [PitchClass]; 12],
}

impl Dictionary {
    pub fn notes(&self, root: PitchClass) -> &'static [PitchClass] {
        self.notes[root.semitone() as usize]
    }

    /// Catalog name for the given root, e.g. `F#sus2`
    pub fn name(&self, root: PitchClass) -> String {
        Chord::new(root, self.quality).name()
    }
}

const FIFTHS: [&[PitchClass]; 12] = [
    &[C, G],
    &[CSharp, GSharp],
    &[D, A],
    &[DSharp, ASharp],
    &[E, B],
    &[F, C],
    &[FSharp, CSharp],
    &[G, D],
    &[GSharp, DSharp],
    &[A, E],
    &[ASharp, F],
    &[B, FSharp],
];

const SEVENTHS: [&[PitchClass]; 12] = [
    &[C, E, G, ASharp],
    &[CSharp, F, GSharp, B],
    &[D, FSharp, A, C],
    &[DSharp, G, ASharp, CSharp],
    &[E, GSharp, B, D],
    &[F, A, C, DSharp],
    &[FSharp, ASharp, CSharp, E],
    &[G, B, D, F],
    &[GSharp, C, DSharp, FSharp],
    &[A, CSharp, E, G],
    &[ASharp, D, F, GSharp],
    &[B, DSharp, FSharp, A],
];

const AUGMENTED: [&[PitchClass]; 12] = [
    &[C, E, GSharp],
    &[CSharp, F, A],
    &[D, FSharp, ASharp],
    &[DSharp, G, B],
    &[E, GSharp, C],
    &[F, A, CSharp],
    &[FSharp, ASharp, D],
    &[G, B, DSharp],
    &[GSharp, C, E],
    &[A, CSharp, F],
    &[ASharp, D, FSharp],
    &[B, DSharp, G],
];

const DIMINISHED: [&[PitchClass]; 12] = [
    &[C, DSharp, FSharp],
    &[CSharp, E, G],
    &[D, F, GSharp],
    &[DSharp, FSharp, A],
    &[E, G, ASharp],
    &[F, GSharp, B],
    &[FSharp, A, C],
    &[G, ASharp, CSharp],
    &[GSharp, B, D],
    &[A, C, DSharp],
    &[ASharp, CSharp, E],
    &[B, D, F],
];

const MINOR_SEVENTHS: [&[PitchClass]; 12] = [
    &[C, DSharp, G, ASharp],
    &[CSharp, E, GSharp, B],
    &[D, F, A, C],
    &[DSharp, FSharp, ASharp, CSharp],
    &[E, G, B, D],
    &[F, GSharp, C, DSharp],
    &[FSharp, A, CSharp, E],
    &[G, ASharp, D, F],
    &[GSharp, B, DSharp, FSharp],
    &[A, C, E, G],
    &[ASharp, CSharp, F, GSharp],
    &[B, D, FSharp, A],
];

const MAJORS: [&[PitchClass]; 12] = [
    &[C, E, G],
    &[CSharp, F, GSharp],
    &[D, FSharp, A],
    &[DSharp, G, ASharp],
    &[E, GSharp, B],
    &[F, A, C],
    &[FSharp, ASharp, CSharp],
    &[G, B, D],
    &[GSharp, C, DSharp],
    &[A, CSharp, E],
    &[ASharp, D, F],
    &[B, DSharp, FSharp],
];

const MAJOR_SEVENTHS: [&[PitchClass]; 12] = [
    &[C, E, G, B],
    &[CSharp, F, GSharp, C],
    &[D, FSharp, A, CSharp],
    &[DSharp, G, ASharp, D],
    &[E, GSharp, B, DSharp],
    &[F, A, C, E],
    &[FSharp, ASharp, CSharp, F],
    &[G, B, D, FSharp],
    &[GSharp, C, DSharp, G],
    &[A, CSharp, E, GSharp],
    &[ASharp, D, F, A],
    &[B, DSharp, FSharp, ASharp],
];

const MINORS: [&[PitchClass]; 12] = [
    &[C, DSharp, G],
    &[CSharp, E, GSharp],
    &[D, F, A],
    &[DSharp, FSharp, ASharp],
    &[E, G, B],
    &[F, GSharp, C],
    &[FSharp, A, CSharp],
    &[G, ASharp, D],
    &[GSharp, B, DSharp],
    &[A, C, E],
    &[ASharp, CSharp, F],
    &[B, D, FSharp],
];

const SUS2: [&[PitchClass]; 12] = [
    &[C, D, G],
    &[CSharp, DSharp, GSharp],
    &[D, E, A],
    &[DSharp, F, ASharp],
    &[E, FSharp, B],
    &[F, G, C],
    &[FSharp, GSharp, CSharp],
    &[G, A, D],
    &[GSharp, ASharp, DSharp],
    &[A, B, E],
    &[ASharp, C, F],
    &[B, CSharp, FSharp],
];

const SUS4: [&[PitchClass]; 12] = [
    &[C, F, G],
    &[CSharp, FSharp, GSharp],
    &[D, G, A],
    &[DSharp, GSharp, ASharp],
    &[E, A, B],
    &[F, ASharp, C],
    &[FSharp, B, CSharp],
    &[G, C, D],
    &[GSharp, CSharp, DSharp],
    &[A, D, E],
    &[ASharp, DSharp, F],
    &[B, E, FSharp],
];

static DICTIONARIES: [Dictionary; 10] = [
    Dictionary { quality: ChordQuality::Fifth, notes: FIFTHS },
    Dictionary { quality: ChordQuality::Seventh, notes: SEVENTHS },
    Dictionary { quality: ChordQuality::Augmented, notes: AUGMENTED },
    Dictionary { quality: ChordQuality::Diminished, notes: DIMINISHED },
    Dictionary { quality: ChordQuality::MinorSeventh, notes: MINOR_SEVENTHS },
    Dictionary { quality: ChordQuality::Major, notes: MAJORS },
    Dictionary { quality: ChordQuality::MajorSeventh, notes: MAJOR_SEVENTHS },
    Dictionary { quality: ChordQuality::Minor, notes: MINORS },
    Dictionary { quality: ChordQuality::Sus2, notes: SUS2 },
    Dictionary { quality: ChordQuality::Sus4, notes: SUS4 },
];

/// Roots in picker order: by letter, natural before sharp
const PICKER_ROOTS: [PitchClass; 12] = [
    A, ASharp, B, C, CSharp, D, DSharp, E, F, FSharp, G, GSharp,
];

/// Read-only view over the chord dictionaries, checked in a fixed order
#[derive(Debug, Clone, Copy)]
pub struct ChordCatalog {
    dictionaries: &'static [Dictionary],
}

impl Default for ChordCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChordCatalog {
    /// The built-in catalog with all ten qualities
    pub fn standard() -> Self {
        Self {
            dictionaries: &DICTIONARIES,
        }
    }

    /// Dictionaries in lookup order: fifths, sevenths, augmented,
    /// diminished, minor sevenths, majors, major sevenths, minors, sus2, sus4
    pub fn dictionaries(&self) -> impl Iterator<Item = &'static Dictionary> {
        self.dictionaries.iter()
    }

    pub fn dictionary(&self, quality: ChordQuality) -> Option<&'static Dictionary> {
        self.dictionaries.iter().find(|d| d.quality == quality)
    }

    pub fn notes_for(&self, quality: ChordQuality, root: PitchClass) -> &'static [PitchClass] {
        self.dictionary(quality).map(|d| d.notes(root)).unwrap_or(&[])
    }

    /// Resolve a chord name to a catalog chord.
    ///
    /// Canonical suffixes are tried in dictionary order before any alias, so
    /// `Cm7` lands in minor sevenths rather than minors.
    /// Returns `None` for an invalid root or an unknown suffix.
    pub fn resolve(&self, name: &str) -> Option<Chord> {
        let parsed = crate::parser::parse_chord_name(name).ok()?;
        ChordQuality::from_suffix(&parsed.suffix).map(|quality| Chord::new(parsed.root, quality))
    }

    /// Voicing notes for a chord name, or `None` when the catalog has no
    /// such chord
    pub fn lookup(&self, name: &str) -> Option<&'static [PitchClass]> {
        self.resolve(name).map(|chord| self.notes_for(chord.quality, chord.root))
    }

    /// Every catalog name with the given root, one per dictionary, in
    /// dictionary order. Used to fill a root's chord picker.
    pub fn names_with_root(&self, root: PitchClass) -> Vec<String> {
        self.dictionaries.iter().map(|d| d.name(root)).collect()
    }

    /// All twelve names of one quality, ordered by root letter
    pub fn entries(&self, quality: ChordQuality) -> Vec<String> {
        match self.dictionary(quality) {
            Some(d) => PICKER_ROOTS.iter().map(|&root| d.name(root)).collect(),
            None => Vec::new(),
        }
    }

    /// Which of the twelve keyboard keys to light up for a chord.
    /// All false when the chord is not in the catalog.
    pub fn highlight_mask(&self, name: &str) -> [bool; 12] {
        let mut mask = [false; 12];
        match self.lookup(name) {
            Some(notes) => {
                for note in notes {
                    mask[note.semitone() as usize] = true;
                }
            }
            None => warn!("Chord not found: {}", name),
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_quality_has_every_root() {
        let catalog = ChordCatalog::standard();
        assert_eq!(catalog.dictionaries().count(), ChordQuality::ALL.len());
        for quality in ChordQuality::ALL {
            for root in PitchClass::ALL {
                let notes = catalog.lookup(&Chord::new(root, quality).name());
                let notes = notes.unwrap_or_else(|| panic!("missing {:?} {:?}", root, quality));
                assert_eq!(notes[0], root);
                assert!((2..=4).contains(&notes.len()));
            }
        }
    }

    #[test]
    fn test_catalog_is_transpositionally_closed() {
        let catalog = ChordCatalog::standard();
        for dict in catalog.dictionaries() {
            for root in PitchClass::ALL {
                for k in -12..=12 {
                    let base = dict.notes(root.transpose(-k));
                    let shifted: Vec<PitchClass> = base.iter().map(|n| n.transpose(k)).collect();
                    assert_eq!(
                        dict.notes(root),
                        shifted.as_slice(),
                        "{} by {}",
                        dict.name(root),
                        k
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookup_known_chords() {
        let catalog = ChordCatalog::standard();
        assert_eq!(catalog.lookup("G7"), Some(&[G, B, D, F][..]));
        assert_eq!(catalog.lookup("C"), Some(&[C, E, G][..]));
        assert_eq!(catalog.lookup("A#5"), Some(&[ASharp, F][..]));
        assert_eq!(catalog.lookup("Fsus4"), Some(&[F, ASharp, C][..]));
    }

    #[test]
    fn test_minor_seventh_not_misread_as_minor() {
        let catalog = ChordCatalog::standard();
        assert_eq!(catalog.resolve("Cm7").map(|c| c.quality), Some(ChordQuality::MinorSeventh));
        assert_eq!(catalog.lookup("Cm7"), Some(&[C, DSharp, G, ASharp][..]));
        assert_eq!(catalog.resolve("Cm").map(|c| c.quality), Some(ChordQuality::Minor));
        assert_eq!(catalog.lookup("Cm"), catalog.lookup("Cmin"));
    }

    #[test]
    fn test_resolve_every_catalog_name() {
        let catalog = ChordCatalog::standard();
        for quality in ChordQuality::ALL {
            for name in catalog.entries(quality) {
                assert_eq!(catalog.resolve(&name).map(|c| c.quality), Some(quality), "{}", name);
            }
        }
        assert_eq!(catalog.resolve("CM").map(|c| c.quality), Some(ChordQuality::Major));
        assert_eq!(catalog.resolve("Cadd9"), None);
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let catalog = ChordCatalog::standard();
        assert_eq!(catalog.lookup("Cadd9"), None);
        assert_eq!(catalog.lookup("H7"), None);
        assert_eq!(catalog.lookup(""), None);
    }

    #[test]
    fn test_flat_names_resolve() {
        let catalog = ChordCatalog::standard();
        assert_eq!(catalog.lookup("Db7"), catalog.lookup("C#7"));
        assert_eq!(catalog.lookup("Bbmaj7"), catalog.lookup("A#maj7"));
    }

    #[test]
    fn test_names_with_root_order_is_stable() {
        let catalog = ChordCatalog::standard();
        assert_eq!(
            catalog.names_with_root(C),
            vec!["C5", "C7", "Caug", "Cdim", "Cm7", "C", "Cmaj7", "Cmin", "Csus2", "Csus4"]
        );
        assert_eq!(catalog.names_with_root(FSharp)[4], "F#m7");
        assert_eq!(catalog.names_with_root(FSharp), catalog.names_with_root(FSharp));
    }

    #[test]
    fn test_entries_by_root_letter() {
        let catalog = ChordCatalog::standard();
        let names = catalog.entries(ChordQuality::Diminished);
        assert_eq!(names.len(), 12);
        assert_eq!(&names[..4], &["Adim", "A#dim", "Bdim", "Cdim"]);
        assert_eq!(names[11], "G#dim");
    }

    #[test]
    fn test_highlight_mask() {
        let catalog = ChordCatalog::standard();
        let mask = catalog.highlight_mask("Am");
        let lit: Vec<usize> = (0..12).filter(|&i| mask[i]).collect();
        assert_eq!(lit, vec![0, 4, 9]);
        assert_eq!(catalog.highlight_mask("Xyz"), [false; 12]);
    }
}
