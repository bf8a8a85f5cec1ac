// Error type for chord construction, configuration, and distance calculation.
//
// Only construction and validation problems are errors. A chord-circle
// distance that cannot be measured is not an error: it comes back as the
// configured sentinel distance so lattice search can keep going.

use thiserror::Error;
use tonal_lattice_pitch::PitchError;

#[derive(Debug, Error)]
pub enum TpsError {
    #[error(transparent)]
    Pitch(#[from] PitchError),

    #[error("empty chord name")]
    EmptyChordName,

    #[error("unsupported chord quality: {symbol:?}")]
    UnsupportedQuality { symbol: String },

    #[error("key root and mode must be set together or cleared together")]
    MalformedKey,

    #[error("chord {chord} has no key context")]
    MissingKey { chord: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
