//! The symbol set secrets and shares are written in.
//!
//! It is the Bitcoin base58 alphabet with the digit `0` added back: digits,
//! lowercase letters without `l`, uppercase letters without `I` and `O`.
//! That gives 59 symbols, one for every element of the field the scheme
//! computes in, so any field value can be written as a single character.

/// Symbols in field-value order.
pub const SYMBOLS: &[u8; 59] = b"0123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Number of symbols, equal to the modulus of the scheme's field.
pub const SIZE: usize = SYMBOLS.len();

/// Maps a symbol to its field value, or `None` for characters outside the
/// alphabet.
pub fn encode(symbol: char) -> Option<u8> {
    if !symbol.is_ascii() {
        return None;
    }
    SYMBOLS
        .iter()
        .position(|&s| s == symbol as u8)
        .map(|index| index as u8)
}

/// Maps a field value back to its symbol, or `None` for values past the end
/// of the alphabet.
pub fn decode(value: u8) -> Option<char> {
    SYMBOLS.get(value as usize).map(|&s| s as char)
}

/// Returns the first character of `text` outside the alphabet, with its
/// position.
pub fn find_invalid(text: &str) -> Option<(usize, char)> {
    text.chars()
        .enumerate()
        .find(|&(_, c)| encode(c).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_are_unique() {
        let unique: HashSet<_> = SYMBOLS.iter().collect();
        assert_eq!(unique.len(), SIZE);
        assert_eq!(SIZE, 59);
    }

    #[test]
    fn test_ambiguous_letters_excluded() {
        for c in ['l', 'I', 'O', '+', '/', ' ', 'é'] {
            assert_eq!(encode(c), None, "{c:?} should not encode");
        }
    }

    #[test]
    fn test_encode_decode() {
        assert_eq!(encode('0'), Some(0));
        assert_eq!(encode('9'), Some(9));
        assert_eq!(encode('a'), Some(10));
        assert_eq!(encode('m'), Some(21));
        assert_eq!(encode('A'), Some(35));
        assert_eq!(encode('Z'), Some(58));

        for value in 0..SIZE as u8 {
            let symbol = decode(value).unwrap();
            assert_eq!(encode(symbol), Some(value));
        }
    }

    #[test]
    fn test_decode_past_end() {
        assert_eq!(decode(58), Some('Z'));
        assert_eq!(decode(59), None);
        assert_eq!(decode(255), None);
    }

    #[test]
    fn test_find_invalid() {
        assert_eq!(find_invalid("5KhyfSnsmQ6P"), None);
        assert_eq!(find_invalid("5Khylf"), Some((4, 'l')));
        assert_eq!(find_invalid(""), None);
    }
}
