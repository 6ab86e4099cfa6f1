use std::fmt;

use crate::error::{ChordError, Result};

/// Pitch classes of the chromatic scale, sharp spellings only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All twelve pitch classes in chromatic order starting at C
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Position within the octave (C=0, B=11)
    pub fn semitone(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp => 1,
            PitchClass::D => 2,
            PitchClass::DSharp => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp => 6,
            PitchClass::G => 7,
            PitchClass::GSharp => 8,
            PitchClass::A => 9,
            PitchClass::ASharp => 10,
            PitchClass::B => 11,
        }
    }

    /// Pitch class for any integer semitone, wrapped into the octave
    pub fn from_semitone(semitone: i32) -> PitchClass {
        PitchClass::ALL[semitone.rem_euclid(12) as usize]
    }

    /// Canonical (sharp) spelling
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Shift by a signed number of semitones, modulo 12.
    pub fn transpose(self, steps: i32) -> PitchClass {
        // rem_euclid first so i32::MIN/MAX steps cannot overflow
        PitchClass::from_semitone(self.semitone() as i32 + steps.rem_euclid(12))
    }

    /// Parse a root token: a letter A-G (either case) followed by any
    /// number of `#` or `b` marks.
    ///
    /// Each `#` raises and each `b` lowers by one semitone, so `Db` and `C#`
    /// are the same pitch class. Anything else in the token is rejected.
    pub fn parse(token: &str) -> Result<PitchClass> {
        let mut chars = token.chars();
        let natural = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => PitchClass::C,
            Some('D') => PitchClass::D,
            Some('E') => PitchClass::E,
            Some('F') => PitchClass::F,
            Some('G') => PitchClass::G,
            Some('A') => PitchClass::A,
            Some('B') => PitchClass::B,
            _ => return Err(ChordError::InvalidPitch(token.to_string())),
        };

        let mut shift = 0i32;
        for c in chars {
            match c {
                '#' => shift += 1,
                'b' => shift -= 1,
                _ => return Err(ChordError::InvalidPitch(token.to_string())),
            }
        }

        Ok(natural.transpose(shift))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PitchClass {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self> {
        PitchClass::parse(s)
    }
}
