use std::collections::HashSet;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

use crate::alphabet;
use crate::error::{Result, ShardError};
use crate::field::{Field, FieldElement};
use crate::pad::PasswordPad;
use crate::polynomial::Polynomial;

/// Modulus of the field every share is computed in, one value per symbol.
pub const MODULUS: u32 = alphabet::SIZE as u32;

/// Largest accepted recovery threshold.
pub const MAX_THRESHOLD: usize = 57;

/// Share counts above this trigger a warning about repeated identifiers.
pub const MAX_UNIQUE_SHARES: usize = 57;

/// Number of distinct nonzero evaluation points the field offers.
const EVALUATION_POINTS: usize = alphabet::SIZE - 1;

/// A configured secret sharing scheme over the symbol field.
///
/// The scheme owns its [`Field`]; splitting and recovering borrow it for
/// the duration of the call.
#[derive(Debug, Clone)]
pub struct Scheme {
    field: Field,
}

impl Scheme {
    pub fn new() -> Result<Self> {
        Ok(Scheme {
            field: Field::new(MODULUS)?,
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Splits a secret into shares using the operating system's random source.
    ///
    /// See [`split`] for the meaning of the arguments.
    pub fn split(
        &self,
        shares: usize,
        threshold: usize,
        secret: &str,
        password: &str,
    ) -> Result<Vec<String>> {
        self.split_with_rng(shares, threshold, secret, password, &mut OsRng)
    }

    /// Splits a secret into shares, drawing polynomial coefficients from `rng`.
    pub fn split_with_rng<R: RngCore + CryptoRng>(
        &self,
        shares: usize,
        threshold: usize,
        secret: &str,
        password: &str,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        if threshold == 0 {
            return Err(ShardError::ZeroThreshold);
        }
        if threshold > MAX_THRESHOLD {
            return Err(ShardError::ThresholdTooLarge {
                threshold,
                max: MAX_THRESHOLD,
            });
        }

        let mut shares = shares;
        if threshold > shares {
            warn!(
                "recovery threshold {} is greater than the number of shares {}, producing {} shares",
                threshold, shares, threshold
            );
            shares = threshold;
        }
        if shares > MAX_UNIQUE_SHARES {
            warn!(
                "{} shares requested; above {} shares identifiers repeat, which may cause trouble when recovering",
                shares, MAX_UNIQUE_SHARES
            );
        }

        let symbols = self.encode_text(secret)?;
        if symbols.is_empty() {
            return Err(ShardError::EmptySecret);
        }

        let pad = PasswordPad::derive(&self.field, password);
        let polynomials: Vec<Polynomial> = symbols
            .iter()
            .enumerate()
            .map(|(i, &symbol)| Polynomial::random(threshold - 1, pad.mask(i, symbol), rng))
            .collect();
        debug!(
            "built {} polynomials of degree {}",
            polynomials.len(),
            threshold - 1
        );

        (1..=shares)
            .map(|i| {
                let x = self.field.reduce(((i - 1) % EVALUATION_POINTS + 1) as u64);
                let mut share = String::with_capacity(polynomials.len() + 1);
                for poly in &polynomials {
                    share.push(self.decode_element(poly.evaluate(x))?);
                }
                share.push(self.decode_element(x)?);
                Ok(share)
            })
            .collect()
    }

    /// Recovers a secret from shares. See [`recover`].
    pub fn recover<S: AsRef<str>>(&self, shares: &[S], password: &str) -> Result<String> {
        let first = shares.first().ok_or(ShardError::NoShares)?;
        let expected = first.as_ref().chars().count();

        let mut seen = HashSet::new();
        let mut points = Vec::with_capacity(shares.len());
        let mut rows = Vec::with_capacity(shares.len());
        for (index, share) in shares.iter().enumerate() {
            let share = share.as_ref();
            let found = share.chars().count();
            if found < 2 {
                return Err(ShardError::ShareTooShort { index });
            }
            if found != expected {
                return Err(ShardError::ShareLengthMismatch {
                    index,
                    expected,
                    found,
                });
            }

            let mut row = self.encode_text(share)?;
            let x = row.pop().ok_or(ShardError::ShareTooShort { index })?;
            if !seen.insert(x.value()) {
                debug!("dropping share {} with repeated identifier {}", index, x);
                continue;
            }
            points.push(x);
            rows.push(row);
        }

        let basis = Polynomial::lagrange_basis(&points)?;
        let zero = self.field.zero();
        let weights: Vec<FieldElement> = basis.iter().map(|l| l.evaluate(zero)).collect();
        debug!("interpolating through {} distinct points", points.len());

        let pad = PasswordPad::derive(&self.field, password);
        (0..expected - 1)
            .map(|position| {
                let value = rows
                    .iter()
                    .zip(&weights)
                    .fold(zero, |acc, (row, &weight)| acc + row[position] * weight);
                self.decode_element(pad.unmask(position, value))
            })
            .collect()
    }

    fn encode_text(&self, text: &str) -> Result<Vec<FieldElement<'_>>> {
        text.chars()
            .enumerate()
            .map(|(position, symbol)| {
                let value = alphabet::encode(symbol)
                    .ok_or(ShardError::InvalidSymbol { symbol, position })?;
                self.field.element(u64::from(value))
            })
            .collect()
    }

    fn decode_element(&self, element: FieldElement) -> Result<char> {
        alphabet::decode(element.value()).ok_or(ShardError::UndecodableValue(element.value()))
    }
}

/// Splits a secret into a specified number of shares using Shamir's Secret Sharing Scheme.
///
/// Each symbol of the secret is masked with the password pad and becomes the
/// constant term of its own random polynomial of degree `threshold - 1`.
/// Share `x` holds every polynomial evaluated at `x`, followed by `x`
/// itself, all written in the symbol alphabet.
///
/// # Arguments
/// * `shares` - The total number of shares to be created. Raised to `threshold` if smaller.
/// * `threshold` - The minimum number of shares required to reconstruct the secret.
/// * `secret` - The secret, written in the symbol alphabet.
/// * `password` - Optional password; `""` disables the mask.
///
/// # Returns
/// The shares, ordered by evaluation point.
///
/// # Errors
/// Returns an error if the threshold is zero or greater than [`MAX_THRESHOLD`],
/// or if the secret is empty or contains a character outside the alphabet.
///
/// # Examples
/// ```rust
/// use keyshard::sss::{recover, split};
///
/// let shares = split(5, 3, "5KhyfSnsmQ6P", "").unwrap();
/// assert_eq!(shares.len(), 5);
/// assert_eq!(recover(&shares[1..4], "").unwrap(), "5KhyfSnsmQ6P");
/// ```
pub fn split(shares: usize, threshold: usize, secret: &str, password: &str) -> Result<Vec<String>> {
    Scheme::new()?.split(shares, threshold, secret, password)
}

/// Combines shares to reconstruct a secret using Lagrange interpolation.
///
/// Shares repeating an identifier already seen are discarded. The number of
/// shares is assumed to meet the threshold: with too few shares the result
/// is a well-formed but wrong string, and nothing reports it.
///
/// # Arguments
/// * `shares` - Shares produced by [`split`], all of the same length.
/// * `password` - The password used when splitting.
///
/// # Returns
/// The reconstructed secret.
///
/// # Errors
/// Returns an error if no shares are given, if shares differ in length or
/// contain characters outside the alphabet, or if two remaining shares sit
/// on the same evaluation point.
pub fn recover<S: AsRef<str>>(shares: &[S], password: &str) -> Result<String> {
    Scheme::new()?.recover(shares, password)
}
