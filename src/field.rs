//! Arithmetic modulo a small configurable modulus.
//!
//! A [`Field`] owns the modulus and its multiplicative inverse table. Every
//! [`FieldElement`] borrows the field it was created from, so the
//! configuration cannot change while any element of it is alive.

use core::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use rand::{CryptoRng, RngCore};

use crate::error::{Result, ShardError};

/// The configuration of a finite field: its modulus and inverse table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    modulus: u16,
    /// `inverses[v]` is the multiplicative inverse of `v`, if it has one.
    inverses: Vec<Option<u8>>,
}

impl Field {
    /// Configures a field for the given modulus.
    ///
    /// The modulus must lie in `2..=256` so that every element fits in a byte
    /// and can be drawn from a single random byte.
    pub fn new(modulus: u32) -> Result<Self> {
        let mut field = Field {
            modulus: 0,
            inverses: Vec::new(),
        };
        field.set_modulus(modulus)?;
        Ok(field)
    }

    /// Reconfigures the field, rebuilding the inverse table.
    ///
    /// For each nonzero `i` the table is filled by scanning `j` upward until
    /// `i * j mod m == 1`, which is quadratic in the modulus. Values without a
    /// match (possible only for a composite modulus) get no entry.
    pub fn set_modulus(&mut self, modulus: u32) -> Result<()> {
        if !(2..=256).contains(&modulus) {
            return Err(ShardError::InvalidModulus(modulus));
        }

        let mut inverses = vec![None; modulus as usize];
        for i in 1..modulus {
            inverses[i as usize] = (1..modulus)
                .find(|j| (i * j) % modulus == 1)
                .map(|j| j as u8);
        }

        self.modulus = modulus as u16;
        self.inverses = inverses;
        Ok(())
    }

    pub fn modulus(&self) -> u16 {
        self.modulus
    }

    /// Constructs an element, failing if `value` is not in `[0, modulus)`.
    pub fn element(&self, value: u64) -> Result<FieldElement<'_>> {
        if value >= u64::from(self.modulus) {
            return Err(ShardError::ValueOutOfRange {
                value,
                modulus: self.modulus,
            });
        }
        Ok(FieldElement {
            value: value as u8,
            field: self,
        })
    }

    /// Constructs the element congruent to `value`.
    pub fn reduce(&self, value: u64) -> FieldElement<'_> {
        FieldElement {
            value: (value % u64::from(self.modulus)) as u8,
            field: self,
        }
    }

    pub fn zero(&self) -> FieldElement<'_> {
        FieldElement {
            value: 0,
            field: self,
        }
    }

    pub fn one(&self) -> FieldElement<'_> {
        FieldElement {
            value: 1,
            field: self,
        }
    }

    /// Draws a uniformly distributed element.
    ///
    /// Bytes in the tail `[m * floor(256 / m), 256)` are rejected and redrawn
    /// so that reducing modulo `m` carries no bias.
    pub fn random<R: RngCore + CryptoRng>(&self, rng: &mut R) -> FieldElement<'_> {
        let modulus = u32::from(self.modulus);
        let limit = modulus * (256 / modulus);
        loop {
            let mut byte = [0u8; 1];
            rng.fill_bytes(&mut byte);
            let candidate = u32::from(byte[0]);
            if candidate < limit {
                return self.reduce(u64::from(candidate));
            }
        }
    }
}

/// A value of a [`Field`].
///
/// Equality is structural: two elements are equal when they hold the same
/// value under the same modulus.
#[derive(Clone, Copy)]
pub struct FieldElement<'f> {
    value: u8,
    field: &'f Field,
}

impl<'f> FieldElement<'f> {
    pub fn value(self) -> u8 {
        self.value
    }

    pub fn field(self) -> &'f Field {
        self.field
    }

    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Looks up the multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Zero (and any non-unit of a composite modulus) has no inverse.
    pub fn inverse(self) -> Result<Self> {
        match self.field.inverses[self.value as usize] {
            Some(inverse) => Ok(FieldElement {
                value: inverse,
                field: self.field,
            }),
            None => Err(ShardError::NoInverse {
                value: self.value,
                modulus: self.field.modulus,
            }),
        }
    }

    /// Raises the element to an integer power.
    ///
    /// Negative exponents go through the inverse, so they fail for zero.
    pub fn pow(self, exp: i64) -> Result<Self> {
        let base = if exp < 0 { self.inverse()? } else { self };
        let mut remaining = exp.unsigned_abs();
        let mut square = base;
        let mut result = self.field.one();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result * square;
            }
            square = square * square;
            remaining >>= 1;
        }
        Ok(result)
    }

    /// Divides by `rhs`, failing when `rhs` has no inverse.
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        Ok(self * rhs.inverse()?)
    }

    fn with(self, value: u32) -> Self {
        debug_assert!(value < u32::from(self.field.modulus));
        FieldElement {
            value: value as u8,
            field: self.field,
        }
    }
}

impl PartialEq for FieldElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.field.modulus == other.field.modulus
    }
}

impl Eq for FieldElement<'_> {}

impl fmt::Debug for FieldElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({} mod {})", self.value, self.field.modulus)
    }
}

impl fmt::Display for FieldElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<'f> Add for FieldElement<'f> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.field.modulus, rhs.field.modulus);
        let modulus = u32::from(self.field.modulus);
        self.with((u32::from(self.value) + u32::from(rhs.value)) % modulus)
    }
}

impl<'f> Sub for FieldElement<'f> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        debug_assert_eq!(self.field.modulus, rhs.field.modulus);
        let modulus = u32::from(self.field.modulus);
        self.with((u32::from(self.value) + modulus - u32::from(rhs.value)) % modulus)
    }
}

impl<'f> Neg for FieldElement<'f> {
    type Output = Self;

    fn neg(self) -> Self {
        let modulus = u32::from(self.field.modulus);
        self.with((modulus - u32::from(self.value)) % modulus)
    }
}

impl<'f> Mul for FieldElement<'f> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        debug_assert_eq!(self.field.modulus, rhs.field.modulus);
        let modulus = u32::from(self.field.modulus);
        self.with((u32::from(self.value) * u32::from(rhs.value)) % modulus)
    }
}
