// tonal_lattice_pitch: the chromatic leaf layer of the tonal lattice.
//
// Everything above this crate (basic spaces, region and chord-circle
// distances, the progression lattice) talks about pitch in terms of the
// three types defined here. Nothing in this crate knows about chords.
//
// Module overview:
// - `pitch_class.rs`: PitchClass (0-11) with paired and short note-name spellings.
// - `modint.rs`:      ModularInt, an integer held modulo a fixed modulus.
// - `key.rs`:         KeyMode and Key: key root plus major/minor, scale walking,
//                     relative-major shift, enumeration of all 24 keys.
// - `error.rs`:       PitchError.
//
// **Critical constraint: no silent clamping.** Out-of-range integers and
// unknown note names are construction errors; nothing here wraps a bad
// input into range on the caller's behalf.

pub mod error;
pub mod key;
pub mod modint;
pub mod pitch_class;

pub use error::PitchError;
pub use key::{Key, KeyMode};
pub use modint::ModularInt;
pub use pitch_class::PitchClass;
