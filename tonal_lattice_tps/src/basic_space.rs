// Basic spaces and the basic-space distance.
//
// A basic space is a 12-slot weight profile, one slot per pitch class,
// describing how structurally important each tone is when a chord sounds
// in a key. It is built in three layers:
//
//   1. every slot starts at the chromatic level;
//   2. each pitch class of the key's diatonic scale gets the diatonic
//      increment;
//   3. chord tones are set to their role's level (root, fifth, third,
//      seventh), replacing whatever the first two layers left there.
//
// The distance between two spaces is the smaller of the total positive
// and total negative slot differences: the least weight that has to move
// in one direction to reconcile them. It is symmetric and zero for
// identical spaces.
//
// See also: `chord.rs` for the per-quality chord-tone tables,
// `chord_circle.rs` which uses this distance to choose pivot chords.

use crate::chord::{Chord, ChordSymbol, ToneRole};
use crate::config::BasicSpaceLevels;
use crate::error::TpsError;
use serde::Serialize;
use std::ops::Index;
use tonal_lattice_pitch::{Key, PitchClass};

/// Weight profile of a chord sounded in a key. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BasicSpace {
    levels: [u32; 12],
}

impl BasicSpace {
    pub fn new(symbol: ChordSymbol, key: Key, levels: &BasicSpaceLevels) -> Self {
        let mut space = [levels.chromatic; 12];

        for pc in key.scale() {
            space[pc.value() as usize] += levels.diatonic_increment;
        }

        space[symbol.root.value() as usize] = levels.root;
        for tone in symbol.quality.tones() {
            let pc = symbol.root.transpose(tone.interval as i64);
            space[pc.value() as usize] = match tone.role {
                ToneRole::Third => levels.third,
                ToneRole::Fifth => levels.fifth,
                ToneRole::Seventh => levels.seventh,
            };
        }

        BasicSpace { levels: space }
    }

    /// Build the space of a chord in its own key.
    pub fn for_chord(chord: &Chord, levels: &BasicSpaceLevels) -> Result<Self, TpsError> {
        Ok(BasicSpace::new(chord.symbol(), chord.require_key()?, levels))
    }

    pub fn levels(&self) -> &[u32; 12] {
        &self.levels
    }

    /// Distance to another space: the smaller of the summed positive and
    /// summed negative per-slot differences.
    pub fn distance(&self, other: &BasicSpace) -> u32 {
        let mut positive = 0u32;
        let mut negative = 0u32;
        for (&a, &b) in self.levels.iter().zip(&other.levels) {
            if a >= b {
                positive += a - b;
            } else {
                negative += b - a;
            }
        }
        positive.min(negative)
    }
}

impl Index<PitchClass> for BasicSpace {
    type Output = u32;

    fn index(&self, pc: PitchClass) -> &u32 {
        &self.levels[pc.value() as usize]
    }
}

/// Basic-space distance between two chords-in-key.
pub fn basic_space_distance(
    a: &Chord,
    b: &Chord,
    levels: &BasicSpaceLevels,
) -> Result<u32, TpsError> {
    let space_a = BasicSpace::for_chord(a, levels)?;
    let space_b = BasicSpace::for_chord(b, levels)?;
    Ok(space_a.distance(&space_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(v: i64) -> PitchClass {
        PitchClass::new(v).unwrap()
    }

    fn space(name: &str, key: Key) -> BasicSpace {
        BasicSpace::new(name.parse().unwrap(), key, &BasicSpaceLevels::default())
    }

    #[test]
    fn c_major_triad_in_c_major() {
        let s = space("C", Key::major(PitchClass::C));
        assert_eq!(s.levels(), &[6, 1, 2, 1, 4, 2, 1, 5, 1, 2, 1, 2]);
    }

    #[test]
    fn g7_in_c_major() {
        let s = space("G 7", Key::major(PitchClass::C));
        // G root, B third, D fifth, F seventh.
        assert_eq!(s[pc(7)], 6);
        assert_eq!(s[pc(11)], 4);
        assert_eq!(s[pc(2)], 5);
        assert_eq!(s[pc(5)], 3);
        assert_eq!(s[PitchClass::C], 2);
        assert_eq!(s[pc(1)], 1);
    }

    #[test]
    fn chord_tones_replace_diatonic_weight() {
        // E major in C major: G# is chromatic, but the third still lands at 4.
        let s = space("E", Key::major(PitchClass::C));
        assert_eq!(s[pc(8)], 4);
        assert_eq!(s[pc(4)], 6);
        assert_eq!(s[pc(11)], 5);
    }

    #[test]
    fn quality_specific_fifths() {
        let key = Key::major(PitchClass::C);
        assert_eq!(space("C aug", key)[pc(8)], 5);
        assert_eq!(space("C aug", key)[pc(7)], 2);
        assert_eq!(space("B m -5", key)[pc(5)], 5);
        assert_eq!(space("C sus4", key)[pc(5)], 4);
        assert_eq!(space("C sus4", key)[pc(4)], 2);
        assert_eq!(space("C maj7", key)[pc(11)], 3);
    }

    #[test]
    fn minor_key_diatonic_layer() {
        let s = space("A m", Key::minor(pc(9)));
        // A natural minor: G is diatonic, G# is not.
        assert_eq!(s[pc(7)], 2);
        assert_eq!(s[pc(8)], 1);
    }

    #[test]
    fn distance_is_reflexive() {
        let s = space("D m 7", Key::minor(pc(2)));
        assert_eq!(s.distance(&s), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = space("G 7", Key::major(PitchClass::C));
        let b = space("C", Key::major(PitchClass::C));
        assert_eq!(a.distance(&b), b.distance(&a));
        let c = space("F# m", Key::minor(pc(6)));
        assert_eq!(a.distance(&c), c.distance(&a));
    }

    #[test]
    fn g7_to_c_in_c_major() {
        // Differences G7 - C: C -4, D +3, E -2, F +1, G +1, B +2.
        let a = space("G 7", Key::major(PitchClass::C));
        let b = space("C", Key::major(PitchClass::C));
        assert_eq!(a.distance(&b), 6);
    }

    #[test]
    fn chords_without_key_fail() {
        let a: Chord = "C".parse().unwrap();
        let b = Chord::parse_in_key("C", Key::major(PitchClass::C)).unwrap();
        assert!(matches!(
            basic_space_distance(&a, &b, &BasicSpaceLevels::default()),
            Err(TpsError::MissingKey { .. })
        ));
    }
}
