// Error type for pitch-level construction and arithmetic.

use thiserror::Error;

/// Errors raised while building pitch classes or doing modular arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    #[error("pitch class must be between 0 and 11, got {0}")]
    InvalidPitchClass(i64),

    #[error("unrecognized note name: {0:?}")]
    UnknownNoteName(String),

    #[error("modulus must be positive")]
    ZeroModulus,

    #[error("modulus mismatch: {left} vs {right}")]
    ModulusMismatch { left: u32, right: u32 },
}
