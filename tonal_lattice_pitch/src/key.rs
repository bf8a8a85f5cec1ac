// Key contexts: a root pitch class plus major/minor mode.
//
// A key is what a chord is "heard in". This module provides:
// - The step pattern of each mode (whole/half steps from the root)
// - The seven diatonic pitch classes of a key
// - The relative-major root used to index the region table
// - Enumeration of all 24 keys in lattice order
//
// Used by the basic-space builder (diatonic level), the region distance
// (relative-major lookup), and the progression analyzer (one lattice
// candidate per key).

use crate::pitch_class::PitchClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Major or minor. The diatonic scale of a minor key is the natural minor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// C D E F G A B: whole-whole-half-whole-whole-whole-half.
    Major,
    /// A B C D E F G: whole-half-whole-whole-half-whole-whole.
    Minor,
}

impl KeyMode {
    /// Semitone steps walked from the root to produce the scale.
    /// The last step lands back on the root.
    pub fn steps(self) -> [u8; 7] {
        match self {
            KeyMode::Major => [2, 2, 1, 2, 2, 2, 1],
            KeyMode::Minor => [2, 1, 2, 2, 1, 2, 2],
        }
    }

    pub fn is_minor(self) -> bool {
        self == KeyMode::Minor
    }

    pub fn from_minor_flag(is_minor: bool) -> Self {
        if is_minor {
            KeyMode::Minor
        } else {
            KeyMode::Major
        }
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

/// A specific key: a mode plus its root pitch class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    pub root: PitchClass,
    pub mode: KeyMode,
}

impl Key {
    pub fn new(root: PitchClass, mode: KeyMode) -> Self {
        Key { root, mode }
    }

    pub fn major(root: PitchClass) -> Self {
        Key::new(root, KeyMode::Major)
    }

    pub fn minor(root: PitchClass) -> Self {
        Key::new(root, KeyMode::Minor)
    }

    /// All 24 keys: for each root C..B, the major key then the minor key.
    pub fn all() -> impl Iterator<Item = Key> {
        PitchClass::all().flat_map(|root| [Key::major(root), Key::minor(root)])
    }

    /// The seven pitch classes landed on when walking the mode's steps
    /// from the root. The root itself is the final landing.
    pub fn scale(&self) -> [PitchClass; 7] {
        let mut pcs = [self.root; 7];
        let mut now = self.root;
        for (slot, step) in pcs.iter_mut().zip(self.mode.steps()) {
            now = now.transpose(step as i64);
            *slot = now;
        }
        pcs
    }

    /// Whether a pitch class belongs to this key's diatonic scale.
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.scale().contains(&pc)
    }

    /// Root of the major key sharing this key's signature. Minor keys move
    /// up a minor third; major keys are their own relative major.
    pub fn relative_major_root(&self) -> PitchClass {
        match self.mode {
            KeyMode::Major => self.root,
            KeyMode::Minor => self.root.transpose(3),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.mode)
    }
}
