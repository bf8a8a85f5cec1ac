// Chord delta: the full TPS distance between two chords-in-key.
//
//   delta = basic-space distance + region distance + chord-circle distance
//
// Every call recomputes all three terms from the chords; nothing is cached
// and nothing about the last call is retained. The components come back
// alongside the total in `ChordDelta` for diagnostics.
//
// See also: `basic_space.rs`, `region.rs`, `chord_circle.rs` for the
// terms, and the analysis crate's `progression.rs` which calls this once
// per lattice edge.

use crate::basic_space::basic_space_distance;
use crate::chord::Chord;
use crate::chord_circle::chord_circle_distance;
use crate::config::{TpsConfig, TpsTables};
use crate::error::TpsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three components of a chord delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordDelta {
    pub basic_space: u32,
    pub region: u32,
    pub chord_circle: u32,
}

impl ChordDelta {
    pub fn total(&self) -> u32 {
        self.basic_space + self.region + self.chord_circle
    }
}

impl fmt::Display for ChordDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (C:{} R:{} B:{})",
            self.total(),
            self.chord_circle,
            self.region,
            self.basic_space
        )
    }
}

/// Computes chord deltas against one set of compiled tables.
#[derive(Clone, Debug)]
pub struct ChordDeltaCalculator {
    tables: TpsTables,
}

impl ChordDeltaCalculator {
    pub fn new(config: &TpsConfig) -> Result<Self, TpsError> {
        Ok(Self {
            tables: TpsTables::from_config(config)?,
        })
    }

    pub fn from_tables(tables: TpsTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TpsTables {
        &self.tables
    }

    /// Total distance between two chords-in-key.
    pub fn calc(&self, a: &Chord, b: &Chord) -> Result<u32, TpsError> {
        Ok(self.calc_detailed(a, b)?.total())
    }

    /// All three components for a pair of chords-in-key.
    pub fn calc_detailed(&self, a: &Chord, b: &Chord) -> Result<ChordDelta, TpsError> {
        Ok(ChordDelta {
            basic_space: basic_space_distance(a, b, &self.tables.levels)?,
            region: self.tables.region.chord_distance(a, b)?,
            chord_circle: chord_circle_distance(a, b, &self.tables)?,
        })
    }
}
