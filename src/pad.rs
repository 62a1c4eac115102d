//! Password-derived additive mask.
//!
//! The password is hashed with SHA-512 and each digest byte is reduced into
//! the field. Symbol `i` of the secret is shifted by offset `i mod 64` before
//! splitting and shifted back after recovery. Without a password every
//! offset is zero.

use sha2::{Digest, Sha512};

use crate::field::{Field, FieldElement};

/// Number of offsets, one per SHA-512 digest byte.
pub const PAD_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct PasswordPad<'f> {
    offsets: Vec<FieldElement<'f>>,
}

impl<'f> PasswordPad<'f> {
    pub fn derive(field: &'f Field, password: &str) -> Self {
        let offsets = if password.is_empty() {
            vec![field.zero(); PAD_LEN]
        } else {
            Sha512::digest(password.as_bytes())
                .iter()
                .map(|&byte| field.reduce(u64::from(byte)))
                .collect()
        };
        PasswordPad { offsets }
    }

    pub fn offset(&self, position: usize) -> FieldElement<'f> {
        self.offsets[position % PAD_LEN]
    }

    pub fn mask(&self, position: usize, value: FieldElement<'f>) -> FieldElement<'f> {
        value + self.offset(position)
    }

    pub fn unmask(&self, position: usize, value: FieldElement<'f>) -> FieldElement<'f> {
        value - self.offset(position)
    }
}
