//! Control character computation.
//!
//! The control character is `CHECKSUM_ALPHABET[n % 31]` where `n` is the
//! nine-digit number formed by `DDMMYY` followed by the individual number.

/// Control character alphabet, indexed by remainder. G, I, O and Q are left out.
pub const CHECKSUM_ALPHABET: &[u8; 31] = b"0123456789ABCDEFHJKLMNPRSTUVWXY";

/// Modulus of the control character computation.
pub const CHECKSUM_MODULUS: u32 = 31;

/// Map a checksum base to its control character.
#[inline]
pub fn checksum(base: u32) -> char {
    CHECKSUM_ALPHABET[(base % CHECKSUM_MODULUS) as usize] as char
}

/// Compute the control character for zero-padded date digits and individual number.
///
/// `digits` must be the nine ASCII digits `DDMMYYNNN`; returns `None` otherwise.
pub fn checksum_for_digits(digits: &str) -> Option<char> {
    if digits.len() != 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().map(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_excludes_confusable_letters() {
        for c in [b'G', b'I', b'O', b'Q', b'Z'] {
            assert!(!CHECKSUM_ALPHABET.contains(&c));
        }
        assert_eq!(CHECKSUM_ALPHABET.len() as u32, CHECKSUM_MODULUS);
    }

    #[test]
    fn test_checksum_edges() {
        assert_eq!(checksum(0), '0');
        assert_eq!(checksum(10), 'A');
        assert_eq!(checksum(30), 'Y');
        assert_eq!(checksum(31), '0');
    }

    #[test]
    fn test_checksum_for_known_codes() {
        // 010195+433X, 010197-100P, 010114A173M
        assert_eq!(checksum_for_digits("010195433"), Some('X'));
        assert_eq!(checksum_for_digits("010197100"), Some('P'));
        assert_eq!(checksum_for_digits("010114173"), Some('M'));
        assert_eq!(checksum_for_digits("290200717"), Some('E'));
    }

    #[test]
    fn test_checksum_for_rejects_bad_digits() {
        assert_eq!(checksum_for_digits("01019543"), None);
        assert_eq!(checksum_for_digits("0101954330"), None);
        assert_eq!(checksum_for_digits("01019a433"), None);
        assert_eq!(checksum_for_digits("+10195433"), None);
    }
}
