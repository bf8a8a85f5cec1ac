// Pitch classes: the twelve chromatic tones, C = 0 through B = 11.
//
// A `PitchClass` is always in range; the only ways to build one are the
// checked `new`, note-name parsing, and transposition of an existing pitch
// class (which goes through `ModularInt`).
//
// Two spellings are provided. `name()` pairs enharmonics ("C#/Db") and
// `short_name()` uses the flat spelling ("Db"). Parsing accepts either
// spelling of a black key, the paired form, and is case-insensitive.
//
// See also: `key.rs` which walks scales from a `PitchClass` root.

use crate::error::PitchError;
use crate::modint::ModularInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NAMES: [&str; 12] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

const SHORT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Upper-cased single spellings accepted by the parser.
const SPELLINGS: [(&str, u8); 17] = [
    ("C", 0),
    ("C#", 1),
    ("DB", 1),
    ("D", 2),
    ("D#", 3),
    ("EB", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("GB", 6),
    ("G", 7),
    ("G#", 8),
    ("AB", 8),
    ("A", 9),
    ("A#", 10),
    ("BB", 10),
    ("B", 11),
];

/// One of the 12 chromatic pitch classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build from an integer in `[0, 11]`.
    pub fn new(value: i64) -> Result<Self, PitchError> {
        if (0..12).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PitchError::InvalidPitchClass(value))
        }
    }

    /// All twelve pitch classes in ascending order.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12u8).map(PitchClass)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Paired spelling for black keys, e.g. `"C#/Db"`.
    pub fn name(self) -> &'static str {
        NAMES[self.0 as usize]
    }

    /// Flat spelling for black keys, e.g. `"Db"`.
    pub fn short_name(self) -> &'static str {
        SHORT_NAMES[self.0 as usize]
    }

    /// Move by `semitones` (either direction), wrapping around the octave.
    pub fn transpose(self, semitones: i64) -> Self {
        let pc = ModularInt::pitch_class(self.0 as i64) + semitones;
        Self(pc.value() as u8)
    }

    /// Semitones from `self` up to `other`, in `[0, 11]`.
    pub fn interval_to(self, other: PitchClass) -> u8 {
        ModularInt::pitch_class(other.0 as i64 - self.0 as i64).value() as u8
    }
}

fn parse_single(spelling: &str) -> Option<u8> {
    let upper = spelling.trim().to_uppercase();
    SPELLINGS
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|&(_, value)| value)
}

impl FromStr for PitchClass {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PitchError::UnknownNoteName(s.to_string());
        let mut value = None;
        // "C#/Db": every spelling in the pair must name the same tone.
        for part in s.split('/') {
            let v = parse_single(part).ok_or_else(unknown)?;
            if value.is_some_and(|prev| prev != v) {
                return Err(unknown());
            }
            value = Some(v);
        }
        value.map(PitchClass).ok_or_else(unknown)
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = PitchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PitchClass::new(value as i64)
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
