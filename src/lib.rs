//! # Shamir Secret Sharing for Private Keys
//!
//! This library splits alphanumeric secrets, such as Bitcoin private keys in
//! base58, into shares with Shamir's Secret Sharing (SSS), and recovers them
//! again from any threshold number of shares.
//!
//! ## Shamir's Secret Sharing (SSS)
//!
//! Shamir's Secret Sharing divides a secret into parts, giving each
//! participant its own unique part, with the property that a certain number
//! of these parts are needed to reconstruct the secret. Fewer parts reveal
//! nothing beyond what guessing would.
//!
//! ### The Mathematics Behind SSS
//!
//! Every symbol of the secret is a value of the field of integers modulo 59.
//! For each symbol `S` the scheme chooses a random polynomial of degree `t-1`
//! (where `t` is the threshold number of shares needed to reconstruct):
//!
//! ```ignore
//! f(x) = a0 + a1*x + a2*x^2 + ... + a(t-1)*x^(t-1)
//! ```
//!
//! where `a0 = S` and `a1, ..., a(t-1)` are random. Share `x` holds `f(x)`
//! for every symbol, followed by `x` itself. With `t` shares, Lagrange
//! interpolation gives back `f(0)` for every symbol.
//!
//! Because the field has 59 elements and the alphabet has 59 symbols, every
//! share is again a plain alphanumeric string, one character per symbol of
//! the secret plus one identifier character.
//!
//! ### Passwords
//!
//! An optional password is hashed with SHA-512 and added to the secret symbol
//! by symbol before splitting, like a one-time pad. Recovering with a
//! different password produces a different, wrong secret.
//!
//! ## Usage in the Code
//!
//! ```rust
//! use keyshard::sss::{recover, split};
//!
//! let shares = split(3, 2, "Ah7g30LXaR2T", "password").unwrap();
//! let secret = recover(&[&shares[2], &shares[0]], "password").unwrap();
//! assert_eq!(secret, "Ah7g30LXaR2T");
//! ```
//!
//! ## Modules
//!
//! - `field`: arithmetic modulo a configurable modulus.
//! - `polynomial`: polynomials over the field and Lagrange bases.
//! - `alphabet`: the symbol set secrets and shares are written in.
//! - `pad`: the password-derived mask.
//! - `sss`: splitting and recovery.
//! - `config`: defaults for the command line tool.
//! - `util`: reading and writing secret and share files.

/// The `alphabet` module maps characters to field values and back.
pub mod alphabet;

/// The `config` module loads command line defaults from a TOML file and the
/// environment.
pub mod config;

/// The `error` module defines the error type shared by every layer.
pub mod error;

/// The `field` module implements the finite field the scheme computes in.
pub mod field;

/// The `pad` module derives the additive mask applied when a password is
/// given.
pub mod pad;

/// The `polynomial` module implements polynomial arithmetic over the field,
/// including the division and Lagrange basis construction recovery relies on.
pub mod polynomial;

/// The `sss` (Shamir's Secret Sharing) module splits secrets into shares
/// and recovers them.
pub mod sss;

/// The `util` module reads and writes the plain text secret and share files.
pub mod util;

pub use error::{ErrorKind, Result, ShardError};
pub use sss::{recover, split, Scheme};
