// tonal_lattice_tps: Lerdahl's Tonal Pitch Space chord distance.
//
// Scores how far apart two chords are, each heard in a key, as the sum of
// three terms: basic-space distance (which tones matter and how much),
// region distance (how far apart the keys are), and chord-circle distance
// (steps between the chords around a key's circle of diatonic chords).
//
// Module overview:
// - `chord.rs`:        ChordQuality, ChordSymbol, Chord: descriptors and chords-in-key.
// - `config.rs`:       TpsConfig (levels, sentinel, region table, chord circles) + TpsTables.
// - `basic_space.rs`:  BasicSpace profile and its distance.
// - `region.rs`:       RegionTable: circle-of-fifths key distance.
// - `chord_circle.rs`: Diatonic chord circles, pivot discovery, circular distance.
// - `delta.rs`:        ChordDeltaCalculator: the three terms combined.
// - `error.rs`:        TpsError.
//
// All distance functions are pure: given the same chords and tables they
// return the same numbers, and they keep no state between calls.

pub mod basic_space;
pub mod chord;
pub mod chord_circle;
pub mod config;
pub mod delta;
pub mod error;
pub mod region;

pub use basic_space::{BasicSpace, basic_space_distance};
pub use chord::{Chord, ChordQuality, ChordSymbol};
pub use chord_circle::{PivotSet, chord_circle_distance, find_pivots};
pub use config::{BasicSpaceLevels, TpsConfig, TpsTables};
pub use delta::{ChordDelta, ChordDeltaCalculator};
pub use error::TpsError;
pub use region::RegionTable;
