// Chord-circle distance: steps between two chords around a key's circle
// of diatonic chords, with pivot substitution for non-diatonic chords.
//
// Each key has a circle of its seven diatonic chords (see `config.rs`).
// Measuring a pair of chords-in-key takes three steps:
//
//   1. Pivots. A chord that is one of its key's seven circle entries is its
//      own pivot. Otherwise its pivots are every circle entry at minimal
//      basic-space distance from it (ties all kept), and the chord is
//      marked as needing a leap off the circle.
//   2. Circular steps. For a pivot pair, if the other chord's pivot is not
//      on this chord's circle the pair is unmeasurable. If it is, count
//      clockwise steps from this pivot to that one; past half the circle,
//      count the other way instead. Add one step per side that leapt.
//   3. Both directions. Repeat with the roles swapped, measuring on the
//      other chord's circle, and keep the global minimum.
//
// If nothing is measurable the result is the configured sentinel. That is
// an expected outcome, not an error: it just makes the pair very
// unattractive to the lattice search.
//
// See also: `basic_space.rs` for the pivot-selection distance,
// `delta.rs` which adds this term to the other two.

use crate::basic_space::BasicSpace;
use crate::chord::{Chord, ChordSymbol};
use crate::config::TpsTables;
use crate::error::TpsError;
use smallvec::{SmallVec, smallvec};
use tonal_lattice_pitch::{Key, KeyMode, ModularInt};
use tracing::debug;

/// Number of chords on a diatonic chord circle.
pub const CIRCLE_LEN: usize = 7;

/// The diatonic chord circle of every major and minor key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChordCircles {
    major: [[ChordSymbol; CIRCLE_LEN]; 12],
    minor: [[ChordSymbol; CIRCLE_LEN]; 12],
}

impl ChordCircles {
    pub fn new(
        major: [[ChordSymbol; CIRCLE_LEN]; 12],
        minor: [[ChordSymbol; CIRCLE_LEN]; 12],
    ) -> Self {
        Self { major, minor }
    }

    pub fn circle(&self, key: Key) -> &[ChordSymbol; CIRCLE_LEN] {
        let row = key.root.value() as usize;
        match key.mode {
            KeyMode::Major => &self.major[row],
            KeyMode::Minor => &self.minor[row],
        }
    }
}

/// Chords standing in for a chord on its key's circle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PivotSet {
    pub chords: SmallVec<[ChordSymbol; CIRCLE_LEN]>,
    /// Set when the chord is not on its circle and must leap to a pivot.
    pub leap: bool,
}

impl PivotSet {
    fn leap_steps(&self) -> u32 {
        u32::from(self.leap)
    }
}

/// Find the pivots of a chord-in-key.
pub fn find_pivots(chord: &Chord, tables: &TpsTables) -> Result<PivotSet, TpsError> {
    let key = chord.require_key()?;
    let symbol = chord.symbol();
    let circle = tables.circles.circle(key);

    if circle.contains(&symbol) {
        return Ok(PivotSet {
            chords: smallvec![symbol],
            leap: false,
        });
    }

    let target = BasicSpace::new(symbol, key, &tables.levels);
    let distances =
        (*circle).map(|diatonic| BasicSpace::new(diatonic, key, &tables.levels).distance(&target));
    let nearest = distances.iter().copied().min().unwrap_or(0);
    let chords: SmallVec<[ChordSymbol; CIRCLE_LEN]> = circle
        .iter()
        .zip(distances)
        .filter(|&(_, d)| d == nearest)
        .map(|(&c, _)| c)
        .collect();

    debug!(%chord, distance = nearest, pivots = chords.len(), "non-diatonic chord, using pivots");

    Ok(PivotSet { chords, leap: true })
}

/// Steps from `from` to `to` around `circle`, taking the shorter direction.
/// `None` if either chord is not on the circle.
fn circular_steps(
    circle: &[ChordSymbol; CIRCLE_LEN],
    from: ChordSymbol,
    to: ChordSymbol,
) -> Result<Option<u32>, TpsError> {
    let Some(start) = circle.iter().position(|&c| c == from) else {
        return Ok(None);
    };
    let mut position = ModularInt::new(start as i64, CIRCLE_LEN as u32)?;
    for steps in 0..CIRCLE_LEN {
        if circle[position.value() as usize] == to {
            let steps = if steps * 2 > CIRCLE_LEN {
                CIRCLE_LEN - steps
            } else {
                steps
            };
            return Ok(Some(steps as u32));
        }
        position += 1;
    }
    Ok(None)
}

/// Measure from `own`'s circle toward `other`'s pivots, pushing one result
/// per pivot pair.
fn measure_direction(
    circle: &[ChordSymbol; CIRCLE_LEN],
    own: &PivotSet,
    other: &PivotSet,
    sentinel: u32,
    results: &mut Vec<u32>,
) -> Result<(), TpsError> {
    let leaps = own.leap_steps() + other.leap_steps();
    for &from in &own.chords {
        for &to in &other.chords {
            let measured = match circular_steps(circle, from, to)? {
                Some(steps) => steps + leaps,
                None => sentinel,
            };
            results.push(measured);
        }
    }
    Ok(())
}

/// Chord-circle distance between two chords-in-key. Returns the configured
/// unmeasurable distance when no pivot pair shares a circle.
pub fn chord_circle_distance(a: &Chord, b: &Chord, tables: &TpsTables) -> Result<u32, TpsError> {
    let circle_a = tables.circles.circle(a.require_key()?);
    let circle_b = tables.circles.circle(b.require_key()?);
    let pivots_a = find_pivots(a, tables)?;
    let pivots_b = find_pivots(b, tables)?;

    let mut results = Vec::new();
    measure_direction(
        circle_a,
        &pivots_a,
        &pivots_b,
        tables.unmeasurable_distance,
        &mut results,
    )?;
    measure_direction(
        circle_b,
        &pivots_b,
        &pivots_a,
        tables.unmeasurable_distance,
        &mut results,
    )?;

    Ok(results
        .into_iter()
        .min()
        .unwrap_or(tables.unmeasurable_distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TpsConfig;
    use tonal_lattice_pitch::PitchClass;

    fn tables() -> TpsTables {
        TpsTables::from_config(&TpsConfig::default()).unwrap()
    }

    fn pc(v: i64) -> PitchClass {
        PitchClass::new(v).unwrap()
    }

    fn chord(name: &str, key: Key) -> Chord {
        Chord::parse_in_key(name, key).unwrap()
    }

    fn sym(name: &str) -> ChordSymbol {
        name.parse().unwrap()
    }

    #[test]
    fn diatonic_chord_is_its_own_pivot() {
        let t = tables();
        let p = find_pivots(&chord("D m", Key::major(PitchClass::C)), &t).unwrap();
        assert_eq!(p.chords.as_slice(), &[sym("D m")]);
        assert!(!p.leap);
    }

    #[test]
    fn dominant_seventh_pivots_to_dominant_triad() {
        let t = tables();
        let p = find_pivots(&chord("G 7", Key::major(PitchClass::C)), &t).unwrap();
        assert_eq!(p.chords.as_slice(), &[sym("G")]);
        assert!(p.leap);
    }

    #[test]
    fn identical_diatonic_chords_are_zero() {
        let t = tables();
        let key = Key::minor(pc(9));
        for name in ["A m", "C", "E m", "G", "B m -5", "D m", "F"] {
            let c = chord(name, key);
            assert_eq!(chord_circle_distance(&c, &c, &t).unwrap(), 0, "{name}");
        }
    }

    #[test]
    fn shorter_direction_is_taken() {
        let t = tables();
        let key = Key::major(PitchClass::C);
        // C -> A m is one step counter-clockwise (six clockwise).
        let d = chord_circle_distance(&chord("C", key), &chord("A m", key), &t).unwrap();
        assert_eq!(d, 1);
        // C -> B m -5 is three steps clockwise.
        let d = chord_circle_distance(&chord("C", key), &chord("B m -5", key), &t).unwrap();
        assert_eq!(d, 3);
    }

    #[test]
    fn dominant_seventh_to_tonic() {
        let t = tables();
        let key = Key::major(PitchClass::C);
        // G pivot, two steps from C, plus one leap.
        let d = chord_circle_distance(&chord("G 7", key), &chord("C", key), &t).unwrap();
        assert_eq!(d, 3);
    }

    #[test]
    fn circles_sharing_no_chord_are_unmeasurable() {
        let t = tables();
        let a = chord("C", Key::major(PitchClass::C));
        let b = chord("F#", Key::major(pc(6)));
        assert_eq!(chord_circle_distance(&a, &b, &t).unwrap(), 99);
    }

    #[test]
    fn measured_on_either_circle() {
        let t = tables();
        // G is on both C major's and G major's circles.
        let a = chord("G", Key::major(PitchClass::C));
        let b = chord("C", Key::major(pc(7)));
        assert_eq!(chord_circle_distance(&a, &b, &t).unwrap(), 2);
    }

    #[test]
    fn symmetric_and_bounded() {
        let t = tables();
        let names = ["C", "A m 7", "G 7", "F# m -5", "Eb aug", "D 7 sus4", "B dim(M7)"];
        for ka in [Key::major(PitchClass::C), Key::minor(pc(4)), Key::major(pc(10))] {
            for kb in [Key::minor(pc(9)), Key::major(pc(7)), Key::minor(pc(1))] {
                for na in names {
                    for nb in names {
                        let a = chord(na, ka);
                        let b = chord(nb, kb);
                        let ab = chord_circle_distance(&a, &b, &t).unwrap();
                        let ba = chord_circle_distance(&b, &a, &t).unwrap();
                        assert_eq!(ab, ba);
                        assert!(ab <= t.unmeasurable_distance);
                    }
                }
            }
        }
    }

    #[test]
    fn requires_key() {
        let t = tables();
        let bare: Chord = "C".parse().unwrap();
        let keyed = chord("C", Key::major(PitchClass::C));
        assert!(matches!(
            chord_circle_distance(&bare, &keyed, &t),
            Err(TpsError::MissingKey { .. })
        ));
    }
}
