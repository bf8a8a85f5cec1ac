// Chord descriptors and chords-in-key.
//
// A `ChordSymbol` is the structured form of a chord name: a root pitch
// class plus a `ChordQuality`. A `Chord` is a symbol with an optional key
// context, the unit every distance in this crate is measured between.
//
// The chord-name reader here is deliberately minimal. A name is
// whitespace-separated tokens: the first is a note name, the rest are
// concatenated into a quality symbol ("B m 7 -5" -> root B, symbol
// "m7-5"). This is the format of the diatonic chord-circle tables in
// `config.rs` and of the progression sheets the analyzer accepts.
//
// Each quality carries a fixed table of chord tones above the root. The
// basic-space builder overlays those tones at their role's level, so an
// unknown quality symbol has to fail here rather than fall back to a
// plain triad.
//
// See also: `basic_space.rs` for the level overlay, `chord_circle.rs`
// which compares symbols for diatonic membership.

use crate::error::TpsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tonal_lattice_pitch::{Key, KeyMode, PitchClass};

/// Structural role of a non-root chord tone. Determines its basic-space level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneRole {
    /// Third, or the fourth that replaces it in a suspended chord.
    Third,
    Fifth,
    Seventh,
}

/// A chord tone: semitones above the root plus its role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChordTone {
    pub interval: u8,
    pub role: ToneRole,
}

const fn tone(interval: u8, role: ToneRole) -> ChordTone {
    ChordTone { interval, role }
}

use ToneRole::{Fifth, Seventh, Third};

const MAJOR: [ChordTone; 2] = [tone(4, Third), tone(7, Fifth)];
const MINOR: [ChordTone; 2] = [tone(3, Third), tone(7, Fifth)];
const MAJOR7: [ChordTone; 3] = [tone(4, Third), tone(7, Fifth), tone(11, Seventh)];
const MINOR_MAJOR7: [ChordTone; 3] = [tone(3, Third), tone(7, Fifth), tone(11, Seventh)];
const AUGMENTED: [ChordTone; 2] = [tone(4, Third), tone(8, Fifth)];
const FLAT_FIVE: [ChordTone; 2] = [tone(4, Third), tone(6, Fifth)];
const DOMINANT7: [ChordTone; 3] = [tone(4, Third), tone(7, Fifth), tone(10, Seventh)];
const MINOR7: [ChordTone; 3] = [tone(3, Third), tone(7, Fifth), tone(10, Seventh)];
const AUGMENTED7: [ChordTone; 3] = [tone(4, Third), tone(8, Fifth), tone(10, Seventh)];
const DOMINANT7_FLAT_FIVE: [ChordTone; 3] = [tone(4, Third), tone(6, Fifth), tone(10, Seventh)];
const DIMINISHED: [ChordTone; 2] = [tone(3, Third), tone(6, Fifth)];
const HALF_DIMINISHED7: [ChordTone; 3] = [tone(3, Third), tone(6, Fifth), tone(10, Seventh)];
const DIMINISHED_MAJOR7: [ChordTone; 3] = [tone(3, Third), tone(6, Fifth), tone(11, Seventh)];
const SUSPENDED4: [ChordTone; 2] = [tone(5, Third), tone(7, Fifth)];
const DOMINANT7_SUS4: [ChordTone; 3] = [tone(5, Third), tone(7, Fifth), tone(10, Seventh)];

/// Every chord quality the basic-space builder has a chord-tone rule for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Major7,
    MinorMajor7,
    Augmented,
    /// Major third with a flattened fifth ("-5", "alt").
    FlatFive,
    Dominant7,
    Minor7,
    Augmented7,
    Dominant7FlatFive,
    /// Classical diminished triad ("dim", "m -5").
    Diminished,
    HalfDiminished7,
    DiminishedMajor7,
    Suspended4,
    Dominant7Sus4,
}

impl ChordQuality {
    /// Parse a quality symbol. Whitespace inside the symbol is ignored, so
    /// "m 7 -5" and "m7-5" are the same.
    pub fn from_symbol(symbol: &str) -> Result<Self, TpsError> {
        let compact: String = symbol.split_whitespace().collect();
        let quality = match compact.as_str() {
            "" => ChordQuality::Major,
            "m" => ChordQuality::Minor,
            "maj7" | "M7" => ChordQuality::Major7,
            "mmaj7" | "mM7" => ChordQuality::MinorMajor7,
            "aug" | "+" => ChordQuality::Augmented,
            "-5" | "alt" | "b5" => ChordQuality::FlatFive,
            "7" => ChordQuality::Dominant7,
            "m7" => ChordQuality::Minor7,
            "aug7" | "+7" => ChordQuality::Augmented7,
            "7-5" | "7b5" => ChordQuality::Dominant7FlatFive,
            "dim" | "m-5" | "mb5" => ChordQuality::Diminished,
            "m7-5" | "m7b5" => ChordQuality::HalfDiminished7,
            "dim(M7)" | "dimM7" => ChordQuality::DiminishedMajor7,
            "sus4" => ChordQuality::Suspended4,
            "7sus4" => ChordQuality::Dominant7Sus4,
            _ => {
                return Err(TpsError::UnsupportedQuality {
                    symbol: symbol.to_string(),
                });
            }
        };
        Ok(quality)
    }

    /// Canonical symbol, written in the space-separated token style of the
    /// chord-circle tables.
    pub fn symbol(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Major7 => "maj7",
            ChordQuality::MinorMajor7 => "mmaj7",
            ChordQuality::Augmented => "aug",
            ChordQuality::FlatFive => "-5",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m 7",
            ChordQuality::Augmented7 => "aug 7",
            ChordQuality::Dominant7FlatFive => "7 -5",
            ChordQuality::Diminished => "m -5",
            ChordQuality::HalfDiminished7 => "m 7 -5",
            ChordQuality::DiminishedMajor7 => "dim(M7)",
            ChordQuality::Suspended4 => "sus4",
            ChordQuality::Dominant7Sus4 => "7 sus4",
        }
    }

    /// Chord tones above the root, root excluded.
    pub fn tones(self) -> &'static [ChordTone] {
        match self {
            ChordQuality::Major => &MAJOR,
            ChordQuality::Minor => &MINOR,
            ChordQuality::Major7 => &MAJOR7,
            ChordQuality::MinorMajor7 => &MINOR_MAJOR7,
            ChordQuality::Augmented => &AUGMENTED,
            ChordQuality::FlatFive => &FLAT_FIVE,
            ChordQuality::Dominant7 => &DOMINANT7,
            ChordQuality::Minor7 => &MINOR7,
            ChordQuality::Augmented7 => &AUGMENTED7,
            ChordQuality::Dominant7FlatFive => &DOMINANT7_FLAT_FIVE,
            ChordQuality::Diminished => &DIMINISHED,
            ChordQuality::HalfDiminished7 => &HALF_DIMINISHED7,
            ChordQuality::DiminishedMajor7 => &DIMINISHED_MAJOR7,
            ChordQuality::Suspended4 => &SUSPENDED4,
            ChordQuality::Dominant7Sus4 => &DOMINANT7_SUS4,
        }
    }
}

/// A chord name in structured form: root plus quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChordSymbol {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl ChordSymbol {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        ChordSymbol { root, quality }
    }

    /// Pitch classes sounded by the chord, root first.
    pub fn pitch_classes(&self) -> impl Iterator<Item = PitchClass> + '_ {
        std::iter::once(self.root).chain(
            self.quality
                .tones()
                .iter()
                .map(|t| self.root.transpose(t.interval as i64)),
        )
    }
}

impl FromStr for ChordSymbol {
    type Err = TpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let root: PitchClass = tokens.next().ok_or(TpsError::EmptyChordName)?.parse()?;
        let rest: Vec<&str> = tokens.collect();
        let quality = ChordQuality::from_symbol(&rest.concat())?;
        Ok(ChordSymbol { root, quality })
    }
}

impl TryFrom<String> for ChordSymbol {
    type Error = TpsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ChordSymbol> for String {
    fn from(symbol: ChordSymbol) -> String {
        symbol.to_string()
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = self.quality.symbol();
        if suffix.is_empty() {
            f.write_str(self.root.short_name())
        } else {
            write!(f, "{} {}", self.root.short_name(), suffix)
        }
    }
}

/// A chord with an optional key context. The key is all-or-nothing: both
/// root and mode, or neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    symbol: ChordSymbol,
    key: Option<Key>,
}

impl Chord {
    pub fn new(symbol: ChordSymbol) -> Self {
        Chord { symbol, key: None }
    }

    pub fn in_key(symbol: ChordSymbol, key: Key) -> Self {
        Chord {
            symbol,
            key: Some(key),
        }
    }

    /// Parse a chord name and attach a key in one step.
    pub fn parse_in_key(name: &str, key: Key) -> Result<Self, TpsError> {
        Ok(Chord::in_key(name.parse()?, key))
    }

    pub fn symbol(&self) -> ChordSymbol {
        self.symbol
    }

    pub fn key(&self) -> Option<Key> {
        self.key
    }

    /// The key context, or `MissingKey` for a bare chord.
    pub fn require_key(&self) -> Result<Key, TpsError> {
        self.key.ok_or_else(|| TpsError::MissingKey {
            chord: self.symbol.to_string(),
        })
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Set or clear the key from its two parts. Supplying exactly one part
    /// is `MalformedKey` and leaves the chord unchanged.
    pub fn set_key(
        &mut self,
        root: Option<PitchClass>,
        mode: Option<KeyMode>,
    ) -> Result<(), TpsError> {
        self.key = match (root, mode) {
            (Some(root), Some(mode)) => Some(Key::new(root, mode)),
            (None, None) => None,
            _ => return Err(TpsError::MalformedKey),
        };
        Ok(())
    }

    pub fn clear_key(&mut self) {
        self.key = None;
    }
}

impl FromStr for Chord {
    type Err = TpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Chord::new(s.parse()?))
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.symbol)?;
        if let Some(key) = self.key {
            write!(f, " in {}", key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(v: i64) -> PitchClass {
        PitchClass::new(v).unwrap()
    }

    #[test]
    fn parses_spaced_tokens() {
        let s: ChordSymbol = "B m 7 -5".parse().unwrap();
        assert_eq!(s.root, pc(11));
        assert_eq!(s.quality, ChordQuality::HalfDiminished7);

        let s: ChordSymbol = "C maj7".parse().unwrap();
        assert_eq!(s.quality, ChordQuality::Major7);

        let s: ChordSymbol = "G 7".parse().unwrap();
        assert_eq!(s.root, pc(7));
        assert_eq!(s.quality, ChordQuality::Dominant7);

        let s: ChordSymbol = "F#".parse().unwrap();
        assert_eq!(s.quality, ChordQuality::Major);
    }

    #[test]
    fn diminished_spellings_agree() {
        let a: ChordSymbol = "B m -5".parse().unwrap();
        let b: ChordSymbol = "B dim".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn enharmonic_roots_agree() {
        let a: ChordSymbol = "C# m".parse().unwrap();
        let b: ChordSymbol = "Db m".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unsupported_quality_fails() {
        let err = "C 13".parse::<ChordSymbol>().unwrap_err();
        assert!(matches!(err, TpsError::UnsupportedQuality { .. }));
        assert!(matches!(
            "".parse::<ChordSymbol>(),
            Err(TpsError::EmptyChordName)
        ));
        assert!(matches!(
            "H m".parse::<ChordSymbol>(),
            Err(TpsError::Pitch(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for name in ["C", "E m", "B m -5", "A m 7", "C maj7", "Eb aug 7", "D 7 sus4"] {
            let s: ChordSymbol = name.parse().unwrap();
            let again: ChordSymbol = s.to_string().parse().unwrap();
            assert_eq!(s, again, "{name}");
        }
        assert_eq!("B m -5".parse::<ChordSymbol>().unwrap().to_string(), "B m -5");
    }

    #[test]
    fn tones_are_distinct_and_nonzero() {
        let all = [
            ChordQuality::Major,
            ChordQuality::Minor,
            ChordQuality::Major7,
            ChordQuality::MinorMajor7,
            ChordQuality::Augmented,
            ChordQuality::FlatFive,
            ChordQuality::Dominant7,
            ChordQuality::Minor7,
            ChordQuality::Augmented7,
            ChordQuality::Dominant7FlatFive,
            ChordQuality::Diminished,
            ChordQuality::HalfDiminished7,
            ChordQuality::DiminishedMajor7,
            ChordQuality::Suspended4,
            ChordQuality::Dominant7Sus4,
        ];
        for q in all {
            let intervals: Vec<u8> = q.tones().iter().map(|t| t.interval).collect();
            assert!(intervals.iter().all(|&i| i > 0 && i < 12), "{q:?}");
            let mut dedup = intervals.clone();
            dedup.dedup();
            assert_eq!(dedup.len(), intervals.len(), "{q:?}");
            // Symbol must parse back to the same quality.
            assert_eq!(ChordQuality::from_symbol(q.symbol()).unwrap(), q);
        }
    }

    #[test]
    fn pitch_classes_of_g7() {
        let s: ChordSymbol = "G 7".parse().unwrap();
        let pcs: Vec<u8> = s.pitch_classes().map(|p| p.value()).collect();
        assert_eq!(pcs, vec![7, 11, 2, 5]);
    }

    #[test]
    fn key_context_all_or_nothing() {
        let mut chord: Chord = "C".parse().unwrap();
        assert!(chord.key().is_none());

        chord.set_key(Some(pc(0)), Some(KeyMode::Major)).unwrap();
        assert_eq!(chord.key(), Some(Key::major(pc(0))));

        assert!(matches!(
            chord.set_key(Some(pc(2)), None),
            Err(TpsError::MalformedKey)
        ));
        assert!(matches!(
            chord.set_key(None, Some(KeyMode::Minor)),
            Err(TpsError::MalformedKey)
        ));
        // Unchanged by the failed calls.
        assert_eq!(chord.key(), Some(Key::major(pc(0))));

        chord.set_key(None, None).unwrap();
        assert!(chord.key().is_none());
    }

    #[test]
    fn require_key_reports_chord() {
        let chord: Chord = "A m 7".parse().unwrap();
        match chord.require_key() {
            Err(TpsError::MissingKey { chord }) => assert_eq!(chord, "A m 7"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn display_with_key() {
        let chord = Chord::parse_in_key("G 7", Key::major(pc(0))).unwrap();
        assert_eq!(chord.to_string(), "[G 7] in C major");
        let bare: Chord = "G 7".parse().unwrap();
        assert_eq!(bare.to_string(), "[G 7]");
    }

    #[test]
    fn symbol_serializes_as_name() {
        let s: ChordSymbol = "D m 7".parse().unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"D m 7\"");
        let back: ChordSymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(serde_json::from_str::<ChordSymbol>("\"D 13\"").is_err());
    }
}
