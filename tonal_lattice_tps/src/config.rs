// Data-driven TPS configuration.
//
// The constants of the model live here in `TpsConfig`: the basic-space
// levels, the sentinel returned for unmeasurable chord-circle distances,
// the 12x12 region table, and the 24 diatonic chord circles. `Default`
// reproduces the published tables exactly, irregular entries included
// ("D m" in the B major circle, "Eb m" heading the E minor circle, "B"
// standing in for Cb in the Gb major circle). Distances computed against
// other tables are not comparable with reference outputs.
//
// The chord circles are stored as chord names so a config can be loaded
// from JSON. `TpsTables::from_config` parses and validates them once; the
// calculators only ever see the compiled form.
//
// See also: `delta.rs` which owns a `TpsTables`, `chord.rs` for the chord
// name format.

use crate::chord::{ChordQuality, ChordSymbol};
use crate::chord_circle::ChordCircles;
use crate::error::TpsError;
use crate::region::RegionTable;
use serde::{Deserialize, Serialize};
use tonal_lattice_pitch::PitchClass;

/// Weight given to each layer of a basic space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicSpaceLevels {
    /// Starting weight of every pitch class.
    pub chromatic: u32,
    /// Added to each pitch class of the key's diatonic scale.
    pub diatonic_increment: u32,
    /// Assigned (not added) to chord tones.
    pub root: u32,
    pub fifth: u32,
    pub third: u32,
    pub seventh: u32,
}

impl Default for BasicSpaceLevels {
    fn default() -> Self {
        Self {
            chromatic: 1,
            diatonic_increment: 1,
            root: 6,
            fifth: 5,
            third: 4,
            seventh: 3,
        }
    }
}

/// All tunable constants of the TPS model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TpsConfig {
    pub levels: BasicSpaceLevels,
    /// Chord-circle distance reported when no pivot pair can be measured.
    pub unmeasurable_distance: u32,
    /// Circle-of-fifths distance between major-key roots, indexed by
    /// pitch class. Must be symmetric with a zero diagonal.
    pub region_table: [[u32; 12]; 12],
    /// Diatonic chords of each major key, indexed by key root.
    pub major_chord_circles: [[String; 7]; 12],
    /// Diatonic chords of each minor key, indexed by key root.
    pub minor_chord_circles: [[String; 7]; 12],
}

pub const UNMEASURABLE_DISTANCE: u32 = 99;

const REGION_TABLE: [[u32; 12]; 12] = [
    [0, 5, 2, 3, 4, 1, 6, 1, 4, 3, 2, 5],
    [5, 0, 5, 2, 3, 4, 1, 6, 1, 4, 3, 2],
    [2, 5, 0, 5, 2, 3, 4, 1, 6, 1, 4, 3],
    [3, 2, 5, 0, 5, 2, 3, 4, 1, 6, 1, 4],
    [4, 3, 2, 5, 0, 5, 2, 3, 4, 1, 6, 1],
    [1, 4, 3, 2, 5, 0, 5, 2, 3, 4, 1, 6],
    [6, 1, 4, 3, 2, 5, 0, 5, 2, 3, 4, 1],
    [1, 6, 1, 4, 3, 2, 5, 0, 5, 2, 3, 4],
    [4, 1, 6, 1, 4, 3, 2, 5, 0, 5, 2, 3],
    [3, 4, 1, 6, 1, 4, 3, 2, 5, 0, 5, 2],
    [2, 3, 4, 1, 6, 1, 4, 3, 2, 5, 0, 5],
    [5, 2, 3, 4, 1, 6, 1, 4, 3, 2, 5, 0],
];

// Order around each circle: I, iii, V, vii(dim), ii, IV, vi.
const MAJOR_CHORD_CIRCLES: [[&str; 7]; 12] = [
    ["C", "E m", "G", "B m -5", "D m", "F", "A m"],
    ["Db", "F m", "Ab", "C m -5", "Eb m", "Gb", "Bb m"],
    ["D", "F# m", "A", "C# m -5", "E m", "G", "B m"],
    ["Eb", "G m", "Bb", "D m -5", "F m", "Ab", "C m"],
    ["E", "G# m", "B", "D# m -5", "F# m", "A", "C# m"],
    ["F", "A m", "C", "E m -5", "G m", "Bb", "D m"],
    ["Gb", "Bb m", "Db", "F m -5", "Ab m", "B", "Eb m"],
    ["G", "B m", "D", "F# m -5", "A m", "C", "E m"],
    ["Ab", "C m", "Eb", "G m -5", "Bb m", "Db", "F m"],
    ["A", "C# m", "E", "G# m -5", "B m", "D", "F# m"],
    ["Bb", "D m", "F", "A m -5", "C m", "Eb", "G m"],
    ["B", "D m", "F#", "A# m -5", "C# m", "E", "G# m"],
];

// Order around each circle: i, III, v, VII, ii(dim), iv, VI.
const MINOR_CHORD_CIRCLES: [[&str; 7]; 12] = [
    ["C m", "Eb", "G m", "Bb", "D m -5", "F m", "Ab"],
    ["C# m", "E", "G# m", "B", "D# m -5", "F# m", "A"],
    ["D m", "F", "A m", "C", "E m -5", "G m", "Bb"],
    ["Eb m", "Gb", "Bb m", "Db", "F m -5", "Ab m", "B"],
    ["Eb m", "G", "B m", "D", "F# m -5", "A m", "C"],
    ["F m", "Ab", "C m", "Eb", "G m -5", "Bb m", "Db"],
    ["F# m", "A", "C# m", "E", "G# m -5", "B m", "D"],
    ["G m", "Bb", "D m", "F", "A m -5", "C m", "Eb"],
    ["G# m", "B", "D# m", "F#", "A# m -5", "C# m", "E"],
    ["A m", "C", "E m", "G", "B m -5", "D m", "F"],
    ["Bb m", "Db", "F m", "Ab", "C m -5", "Eb m", "Gb"],
    ["B m", "D", "F# m", "A", "C# m -5", "E m", "G"],
];

fn to_owned_table(table: &[[&str; 7]; 12]) -> [[String; 7]; 12] {
    table.map(|row| row.map(str::to_string))
}

impl Default for TpsConfig {
    fn default() -> Self {
        Self {
            levels: BasicSpaceLevels::default(),
            unmeasurable_distance: UNMEASURABLE_DISTANCE,
            region_table: REGION_TABLE,
            major_chord_circles: to_owned_table(&MAJOR_CHORD_CIRCLES),
            minor_chord_circles: to_owned_table(&MINOR_CHORD_CIRCLES),
        }
    }
}

impl TpsConfig {
    pub fn from_json(json: &str) -> Result<Self, TpsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, TpsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A validated, parsed `TpsConfig`, ready for distance calculation.
#[derive(Clone, Debug)]
pub struct TpsTables {
    pub levels: BasicSpaceLevels,
    pub unmeasurable_distance: u32,
    pub region: RegionTable,
    pub circles: ChordCircles,
}

fn parse_circles(table: &[[String; 7]; 12]) -> Result<[[ChordSymbol; 7]; 12], TpsError> {
    let mut parsed = [[ChordSymbol::new(PitchClass::C, ChordQuality::Major); 7]; 12];
    for (row_out, row_in) in parsed.iter_mut().zip(table) {
        for (slot, name) in row_out.iter_mut().zip(row_in) {
            *slot = name.parse()?;
        }
    }
    Ok(parsed)
}

impl TpsTables {
    pub fn from_config(config: &TpsConfig) -> Result<Self, TpsError> {
        let region = RegionTable::new(config.region_table)?;
        let circles = ChordCircles::new(
            parse_circles(&config.major_chord_circles)?,
            parse_circles(&config.minor_chord_circles)?,
        );
        Ok(Self {
            levels: config.levels,
            unmeasurable_distance: config.unmeasurable_distance,
            region,
            circles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_compile() {
        let tables = TpsTables::from_config(&TpsConfig::default()).unwrap();
        assert_eq!(tables.unmeasurable_distance, 99);
        assert_eq!(tables.levels.root, 6);
    }

    #[test]
    fn default_config_serializes() {
        let config = TpsConfig::default();
        let json = config.to_json_pretty().unwrap();
        let restored = TpsConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
        // Names are kept exactly as written.
        assert_eq!(restored.major_chord_circles[11][1], "D m");
        assert_eq!(restored.minor_chord_circles[4][0], "Eb m");
    }

    #[test]
    fn unknown_chord_in_circle_rejected() {
        let mut config = TpsConfig::default();
        config.major_chord_circles[0][0] = "C 13".to_string();
        assert!(matches!(
            TpsTables::from_config(&config),
            Err(TpsError::UnsupportedQuality { .. })
        ));
    }

    #[test]
    fn asymmetric_region_table_rejected() {
        let mut config = TpsConfig::default();
        config.region_table[0][1] = 4;
        assert!(matches!(
            TpsTables::from_config(&config),
            Err(TpsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            TpsConfig::from_json("{\"levels\": 3}"),
            Err(TpsError::Json(_))
        ));
    }
}
