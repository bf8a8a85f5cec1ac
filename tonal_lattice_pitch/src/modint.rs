// Integers held modulo a fixed modulus.
//
// Used for every circular quantity in the workspace: pitch-class
// transposition (mod 12), the relative-major shift of minor keys, and
// clockwise stepping around the 7-entry diatonic chord circles.
//
// The modulus is fixed at construction. Adding a plain integer always
// succeeds; adding another `ModularInt` requires the same modulus.

use crate::error::PitchError;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Number of chromatic pitch classes in an octave.
pub const PITCH_CLASS_COUNT: u32 = 12;

/// An integer value kept in `[0, modulus)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModularInt {
    value: u32,
    modulus: u32,
}

impl ModularInt {
    /// Reduce `value` modulo `modulus`. Negative values wrap upward, so
    /// `ModularInt::new(-1, 12)` holds 11.
    pub fn new(value: i64, modulus: u32) -> Result<Self, PitchError> {
        if modulus == 0 {
            return Err(PitchError::ZeroModulus);
        }
        Ok(Self {
            value: value.rem_euclid(modulus as i64) as u32,
            modulus,
        })
    }

    /// A value modulo 12, for pitch-class arithmetic.
    pub fn pitch_class(value: i64) -> Self {
        Self {
            value: value.rem_euclid(PITCH_CLASS_COUNT as i64) as u32,
            modulus: PITCH_CLASS_COUNT,
        }
    }

    pub fn value(self) -> u32 {
        self.value
    }

    pub fn modulus(self) -> u32 {
        self.modulus
    }

    /// Add another modular integer. Fails unless both share a modulus.
    pub fn try_add(self, other: ModularInt) -> Result<Self, PitchError> {
        if self.modulus != other.modulus {
            return Err(PitchError::ModulusMismatch {
                left: self.modulus,
                right: other.modulus,
            });
        }
        Ok(self + other.value as i64)
    }
}

impl Add<i64> for ModularInt {
    type Output = ModularInt;

    fn add(self, rhs: i64) -> ModularInt {
        let m = self.modulus as i64;
        ModularInt {
            value: (self.value as i64 + rhs.rem_euclid(m)).rem_euclid(m) as u32,
            modulus: self.modulus,
        }
    }
}

impl AddAssign<i64> for ModularInt {
    fn add_assign(&mut self, rhs: i64) {
        *self = *self + rhs;
    }
}

impl fmt::Display for ModularInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mod {}", self.value, self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_on_construction() {
        let a = ModularInt::new(10, 3).unwrap();
        assert_eq!(a.value(), 1);
        assert_eq!(a.modulus(), 3);
        assert_eq!(ModularInt::new(-1, 12).unwrap().value(), 11);
    }

    #[test]
    fn pitch_class_constructor_is_mod_twelve() {
        let a = ModularInt::pitch_class(14);
        assert_eq!(a.value(), 2);
        assert_eq!(a.modulus(), PITCH_CLASS_COUNT);
        assert_eq!(ModularInt::pitch_class(-3).value(), 9);
    }

    #[test]
    fn zero_modulus_rejected() {
        assert_eq!(ModularInt::new(5, 0), Err(PitchError::ZeroModulus));
    }

    #[test]
    fn integer_addition_wraps() {
        let a = ModularInt::new(10, 3).unwrap() + 2;
        assert_eq!(a.value(), 0);
        let b = ModularInt::new(11, 12).unwrap() + 3;
        assert_eq!(b.value(), 2);
        let c = ModularInt::new(0, 7).unwrap() + -1;
        assert_eq!(c.value(), 6);
        let mut d = ModularInt::new(6, 7).unwrap();
        d += 1;
        assert_eq!(d.value(), 0);
    }

    #[test]
    fn same_modulus_addition() {
        let a = ModularInt::new(9, 12).unwrap();
        let b = ModularInt::new(5, 12).unwrap();
        assert_eq!(a.try_add(b).unwrap().value(), 2);
    }

    #[test]
    fn modulus_mismatch_fails() {
        let a = ModularInt::new(1, 12).unwrap();
        let b = ModularInt::new(1, 7).unwrap();
        assert_eq!(
            a.try_add(b),
            Err(PitchError::ModulusMismatch { left: 12, right: 7 })
        );
    }

    #[test]
    fn display_shows_modulus() {
        assert_eq!(ModularInt::new(4, 12).unwrap().to_string(), "4 mod 12");
    }
}
