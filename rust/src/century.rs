//! Century sign table.
//!
//! Position 6 of an identity code encodes the century of birth. Besides the
//! legacy signs `+`, `-` and `A`, the 2023 reform added alternates for the
//! 1900s (`U`..`Y`) and the 2000s (`B`..`F`).

/// Signs sharing a century base year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenturyBand {
    pub base: i32,
    pub signs: &'static str,
}

impl CenturyBand {
    pub fn contains_sign(&self, sign: char) -> bool {
        self.signs.contains(sign)
    }
}

/// Recognised bands. Every sign covers all two-digit years of its century.
pub const CENTURY_BANDS: [CenturyBand; 3] = [
    CenturyBand {
        base: 1800,
        signs: "+",
    },
    CenturyBand {
        base: 1900,
        signs: "-UVWXY",
    },
    CenturyBand {
        base: 2000,
        signs: "ABCDEF",
    },
];

/// Base year for a century sign, `None` for an unrecognised character.
pub fn century_base(sign: char) -> Option<i32> {
    CENTURY_BANDS
        .iter()
        .find(|band| band.contains_sign(sign))
        .map(|band| band.base)
}

/// All signs denoting the century starting at `base`. Empty for unsupported centuries.
pub fn signs_for_century(base: i32) -> Vec<char> {
    CENTURY_BANDS
        .iter()
        .filter(|band| band.base == base)
        .flat_map(|band| band.signs.chars())
        .collect()
}

/// All signs that can encode the full year `year`.
pub fn signs_for_year(year: i32) -> Vec<char> {
    signs_for_century(century_of(year))
}

/// First year of the century containing `year`.
#[inline]
pub fn century_of(year: i32) -> i32 {
    year.div_euclid(100) * 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_lookup() {
        assert_eq!(century_base('+'), Some(1800));
        assert_eq!(century_base('-'), Some(1900));
        assert_eq!(century_base('Y'), Some(1900));
        assert_eq!(century_base('A'), Some(2000));
        assert_eq!(century_base('F'), Some(2000));
        assert_eq!(century_base('G'), None);
        assert_eq!(century_base('a'), None);
        assert_eq!(century_base('T'), None);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(signs_for_century(1800), vec!['+']);
        assert_eq!(signs_for_century(1900), vec!['-', 'U', 'V', 'W', 'X', 'Y']);
        assert_eq!(signs_for_century(2000), vec!['A', 'B', 'C', 'D', 'E', 'F']);
        assert!(signs_for_century(1700).is_empty());
        assert!(signs_for_century(2100).is_empty());
    }

    #[test]
    fn test_reverse_is_inverse_of_forward() {
        for band in CENTURY_BANDS {
            for sign in band.signs.chars() {
                assert!(signs_for_century(band.base).contains(&sign));
                assert_eq!(century_base(sign), Some(band.base));
            }
        }
    }

    #[test]
    fn test_signs_for_year() {
        assert_eq!(signs_for_year(1826), vec!['+']);
        assert_eq!(signs_for_year(1999).len(), 6);
        assert_eq!(signs_for_year(2026).len(), 6);
        assert_eq!(signs_for_year(2030), signs_for_century(2000));
        assert_eq!(signs_for_year(2099).len(), 6);
        assert!(signs_for_year(2100).is_empty());
        assert!(signs_for_year(1799).is_empty());
    }

    #[test]
    fn test_century_of() {
        assert_eq!(century_of(1826), 1800);
        assert_eq!(century_of(1900), 1900);
        assert_eq!(century_of(1999), 1900);
        assert_eq!(century_of(2000), 2000);
        assert_eq!(century_of(2026), 2000);
    }
}
