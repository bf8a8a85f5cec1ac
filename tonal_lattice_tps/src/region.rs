// Region distance: how far apart two keys sit on the circle of fifths.
//
// A direct read of the configured 12x12 table. The table is indexed by
// major-key roots, so a minor key is first replaced by its relative major
// (root + 3 semitones). No other computation happens here.

use crate::chord::Chord;
use crate::error::TpsError;
use tonal_lattice_pitch::Key;

/// Symmetric circle-of-fifths distance table with a zero diagonal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionTable {
    table: [[u32; 12]; 12],
}

impl RegionTable {
    pub fn new(table: [[u32; 12]; 12]) -> Result<Self, TpsError> {
        for (i, row) in table.iter().enumerate() {
            if row[i] != 0 {
                return Err(TpsError::InvalidConfig(format!(
                    "region table diagonal entry {i} is {}",
                    row[i]
                )));
            }
            for (j, &value) in row.iter().enumerate().skip(i + 1) {
                if value != table[j][i] {
                    return Err(TpsError::InvalidConfig(format!(
                        "region table not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(Self { table })
    }

    /// Distance between two keys.
    pub fn distance(&self, a: Key, b: Key) -> u32 {
        let ra = a.relative_major_root().value() as usize;
        let rb = b.relative_major_root().value() as usize;
        self.table[ra][rb]
    }

    /// Distance between the keys of two chords-in-key.
    pub fn chord_distance(&self, a: &Chord, b: &Chord) -> Result<u32, TpsError> {
        Ok(self.distance(a.require_key()?, b.require_key()?))
    }
}
