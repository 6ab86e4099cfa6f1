//! Error types for chordshift

use thiserror::Error;

/// Failures of the chord model and transposition engine.
///
/// A chord that parses but has no catalog entry is not an error; lookups
/// return `None` for that case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    #[error("invalid pitch: {0:?}")]
    InvalidPitch(String),
    #[error("position {position} out of range (sequence has {len} entries)")]
    PositionOutOfRange { position: usize, len: usize },
}

/// Errors raised while loading a fretboard layout file.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("reading layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, ChordError>;
