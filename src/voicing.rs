//! The pair of chord rows: the chords the user picked (source) and the same
//! chords shifted by the shared transpose offset (derived).
//!
//! The derived row is never edited directly. It is rebuilt from the source
//! row whenever the offset changes and extended or shrunk alongside it.

use tracing::{debug, warn};

use crate::catalog::ChordCatalog;
use crate::error::{ChordError, Result};
use crate::pitch::PitchClass;
use crate::transpose::transpose;

/// One user-chosen chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicingEntry {
    pub name: String,
    /// Insertion position; always equal to the entry's index
    pub position: usize,
}

/// Ordered chord entries plus the transpose offset they share
#[derive(Debug, Clone)]
pub struct VoicingSequence {
    catalog: ChordCatalog,
    entries: Vec<VoicingEntry>,
    derived: Vec<String>,
    offset: i32,
}

impl VoicingSequence {
    pub fn new(catalog: ChordCatalog) -> Self {
        Self {
            catalog,
            entries: Vec::new(),
            derived: Vec::new(),
            offset: 0,
        }
    }

    /// Shifted name for one source name. Names with no valid root cannot be
    /// shifted; they show up unchanged and simply never highlight.
    fn derive(&self, name: &str) -> String {
        match transpose(name, self.offset) {
            Ok(shifted) => shifted,
            Err(e) => {
                warn!("Cannot transpose {:?}: {}", name, e);
                name.to_string()
            }
        }
    }

    /// Add a chord at the end. Names that fail to parse are still accepted.
    pub fn append(&mut self, name: &str) {
        let entry = VoicingEntry {
            name: name.to_string(),
            position: self.entries.len(),
        };
        let shifted = self.derive(name);
        debug!("Appended {} at {} (shown as {})", entry.name, entry.position, shifted);
        self.entries.push(entry);
        self.derived.push(shifted);
    }

    /// Remove the entry at `position` from both rows. Later entries move
    /// down by one.
    pub fn remove_at(&mut self, position: usize) -> Result<VoicingEntry> {
        if position >= self.entries.len() {
            return Err(ChordError::PositionOutOfRange {
                position,
                len: self.entries.len(),
            });
        }

        let removed = self.entries.remove(position);
        self.derived.remove(position);
        for entry in &mut self.entries[position..] {
            entry.position -= 1;
        }
        debug!("Removed {} from {}", removed.name, position);
        Ok(removed)
    }

    /// Set the shared offset and rebuild the whole derived row
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
        self.derived = self.entries.iter().map(|entry| self.derive(&entry.name)).collect();
        debug!("Transpose offset set to {}", offset);
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn entries(&self) -> &[VoicingEntry] {
        &self.entries
    }

    /// Source names in insertion order
    pub fn source_view(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Transposed names in insertion order
    pub fn derived_view(&self) -> &[String] {
        &self.derived
    }

    /// Notes to highlight for the derived chord at `position`. `None` when
    /// the position is empty or the chord is not in the catalog.
    pub fn highlight(&self, position: usize) -> Option<&'static [PitchClass]> {
        let name = self.derived.get(position)?;
        let notes = self.catalog.lookup(name);
        if notes.is_none() {
            warn!("Chord not found: {}", name);
        }
        notes
    }

    pub fn catalog(&self) -> &ChordCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. The offset is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.derived.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(names: &[&str]) -> VoicingSequence {
        let mut seq = VoicingSequence::new(ChordCatalog::standard());
        for name in names {
            seq.append(name);
        }
        seq
    }

    fn assert_consistent(seq: &VoicingSequence) {
        assert_eq!(seq.derived_view().len(), seq.entries().len());
        for (i, entry) in seq.entries().iter().enumerate() {
            assert_eq!(entry.position, i);
            assert_eq!(seq.derived_view()[i], transpose(&entry.name, seq.offset()).unwrap());
        }
    }

    #[test]
    fn test_append_without_offset() {
        let seq = sequence(&["C", "Am", "F", "G7"]);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.derived_view(), &["C", "Am", "F", "G7"]);
        assert_consistent(&seq);
    }

    #[test]
    fn test_set_offset_recomputes_everything() {
        let mut seq = sequence(&["C", "Am", "F", "G7"]);
        seq.set_offset(2);
        assert_eq!(seq.derived_view(), &["D", "Bm", "G", "A7"]);
        assert_eq!(seq.source_view(), vec!["C", "Am", "F", "G7"]);
        seq.set_offset(12);
        assert_eq!(seq.derived_view(), &["C", "Am", "F", "G7"]);
        assert_consistent(&seq);
    }

    #[test]
    fn test_append_after_offset_uses_current_offset() {
        let mut seq = sequence(&["C"]);
        seq.set_offset(5);
        seq.append("G7");
        assert_eq!(seq.derived_view(), &["F", "C7"]);
        assert_consistent(&seq);
    }

    #[test]
    fn test_remove_keeps_rows_aligned() {
        let mut seq = sequence(&["C", "Am", "F", "G7"]);
        seq.set_offset(3);
        let removed = seq.remove_at(1).unwrap();
        assert_eq!(removed.name, "Am");
        assert_eq!(seq.source_view(), vec!["C", "F", "G7"]);
        assert_eq!(seq.derived_view(), &["D#", "G#", "A#7"]);
        assert_consistent(&seq);

        seq.remove_at(0).unwrap();
        seq.remove_at(1).unwrap();
        assert_eq!(seq.source_view(), vec!["F"]);
        assert_consistent(&seq);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut seq = sequence(&["C"]);
        assert_eq!(
            seq.remove_at(3),
            Err(ChordError::PositionOutOfRange { position: 3, len: 1 })
        );
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_mixed_operations_stay_consistent() {
        let mut seq = VoicingSequence::new(ChordCatalog::standard());
        let names = ["C", "Dm7", "Esus4", "F#dim", "Gaug", "A5", "Bmaj7"];
        for (i, name) in names.iter().enumerate() {
            seq.append(name);
            seq.set_offset(i as i32 * 5 - 7);
            if i % 3 == 2 {
                seq.remove_at(i / 3).unwrap();
            }
            assert_consistent(&seq);
        }
    }

    #[test]
    fn test_unparseable_entry_degrades() {
        let mut seq = sequence(&["C", "H7"]);
        seq.set_offset(4);
        assert_eq!(seq.derived_view(), &["E", "H7"]);
        assert_eq!(seq.highlight(0), Some(&[PitchClass::E, PitchClass::GSharp, PitchClass::B][..]));
        assert_eq!(seq.highlight(1), None);
        assert_eq!(seq.highlight(9), None);
    }

    #[test]
    fn test_unknown_quality_has_no_highlight() {
        let mut seq = sequence(&["Cadd9"]);
        seq.set_offset(2);
        assert_eq!(seq.derived_view(), &["Dadd9"]);
        assert_eq!(seq.highlight(0), None);
    }

    #[test]
    fn test_clear_keeps_offset() {
        let mut seq = sequence(&["C", "G"]);
        seq.set_offset(7);
        seq.clear();
        assert!(seq.is_empty());
        assert!(seq.derived_view().is_empty());
        assert_eq!(seq.offset(), 7);
    }
}
