use thiserror::Error;

/// Result type specialized for secret sharing operations.
pub type Result<T> = std::result::Result<T, ShardError>;

/// Broad class of a [`ShardError`], used by callers that only care about
/// what went wrong in general terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The field was misconfigured or a value fell outside it.
    Configuration,
    /// The caller supplied parameters or text the scheme cannot accept.
    Validation,
    /// A field or polynomial operation has no defined result.
    Arithmetic,
    /// The shares cannot be combined into a consistent secret.
    Integrity,
}

/// Errors raised by the field, polynomial and sharing layers.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    #[error("field modulus must be between 2 and 256, got {0}")]
    InvalidModulus(u32),
    #[error("field elements are between 0 and {}, cannot be {value}", .modulus - 1)]
    ValueOutOfRange { value: u64, modulus: u16 },

    #[error("the recovery threshold must be at least 1")]
    ZeroThreshold,
    #[error("the recovery threshold can not be more than {max}, got {threshold}")]
    ThresholdTooLarge { threshold: usize, max: usize },
    #[error("the secret is empty")]
    EmptySecret,
    #[error("no shares were supplied")]
    NoShares,
    #[error("share {index} is too short to carry an identifier and a symbol")]
    ShareTooShort { index: usize },
    #[error("share {index} has {found} characters, expected {expected}")]
    ShareLengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("illegal character {symbol:?} at position {position}; use alphanumerics other than l, I and O")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("{value} has no multiplicative inverse modulo {modulus}")]
    NoInverse { value: u8, modulus: u16 },
    #[error("polynomial division by zero")]
    DivisionByZero,

    #[error("two of the shares are for the identical point {0}")]
    DuplicatePoint(u8),
    #[error("field value {0} has no symbol in the alphabet")]
    UndecodableValue(u8),
}

impl ShardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShardError::InvalidModulus(_) | ShardError::ValueOutOfRange { .. } => {
                ErrorKind::Configuration
            }
            ShardError::ZeroThreshold
            | ShardError::ThresholdTooLarge { .. }
            | ShardError::EmptySecret
            | ShardError::NoShares
            | ShardError::ShareTooShort { .. }
            | ShardError::ShareLengthMismatch { .. }
            | ShardError::InvalidSymbol { .. } => ErrorKind::Validation,
            ShardError::NoInverse { .. } | ShardError::DivisionByZero => ErrorKind::Arithmetic,
            ShardError::DuplicatePoint(_) | ShardError::UndecodableValue(_) => {
                ErrorKind::Integrity
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ShardError::InvalidModulus(1).kind(), ErrorKind::Configuration);
        assert_eq!(
            ShardError::ThresholdTooLarge { threshold: 58, max: 57 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(ShardError::DivisionByZero.kind(), ErrorKind::Arithmetic);
        assert_eq!(ShardError::DuplicatePoint(3).kind(), ErrorKind::Integrity);
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ShardError::ValueOutOfRange { value: 70, modulus: 59 };
        assert_eq!(err.to_string(), "field elements are between 0 and 58, cannot be 70");
    }
}
