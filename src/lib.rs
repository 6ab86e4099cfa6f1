//! Chord transposition by fret.
//!
//! Chord names are parsed into a root and a quality suffix, shifted through
//! the chromatic cycle, and resolved to notes through a fixed catalog. A
//! `VoicingSequence` keeps the picked chords next to their transposed view,
//! and a `FretSelector` turns pointer input on a fret strip into the offset.

pub mod catalog;
pub mod chord;
pub mod error;
pub mod fret;
pub mod layout;
pub mod parser;
pub mod pitch;
pub mod transpose;
pub mod voicing;

pub use catalog::ChordCatalog;
pub use chord::{Chord, ChordQuality};
pub use error::{ChordError, LayoutError};
pub use fret::{FretSelector, FretZone, Point, Rect};
pub use pitch::PitchClass;
pub use voicing::{VoicingEntry, VoicingSequence};
