//! hetu: Finnish personal identity code (henkilötunnus) validation, parsing and generation.
//!
//! An identity code encodes a date of birth, a century sign, an individual
//! number whose parity gives the sex, and a control character.
//!
//! # Format
//!
//! ```text
//! HETU ::= DD MM YY SIGN NNN Q
//! SIGN ::= "+" | "-" | "U".."Y" | "A".."F"
//! Q    ::= one of "0123456789ABCDEFHJKLMNPRSTUVWXY"
//! ```
//!
//! # Example
//!
//! ```
//! use hetu::{Sex, create_with_age, parse_hetu, validate_hetu};
//!
//! assert!(validate_hetu("010197-100P"));
//! assert!(!validate_hetu("290200-101P"));
//!
//! let parsed = parse_hetu("290200A717E").expect("well-formed code");
//! assert_eq!(parsed.sex, Sex::Male);
//!
//! let code = create_with_age(30).expect("age within 1..=200");
//! assert!(validate_hetu(&code));
//! ```

mod calendar;
mod century;
mod checksum;
mod generator;
mod hetu;

pub use calendar::{DAYS_IN_MONTH, age_in_years, days_in_month, is_leap_year, local_today};
pub use century::{CENTURY_BANDS, CenturyBand, century_base, signs_for_century, signs_for_year};
pub use checksum::{CHECKSUM_ALPHABET, checksum, checksum_for_digits};
pub use generator::{
    HetuGen, MAX_AGE, MAX_INDIVIDUAL_NUMBER, MIN_AGE, MIN_INDIVIDUAL_NUMBER, create_with_age,
    create_with_age_at,
};
pub use hetu::{
    HETU_LEN, HetuError, ParsedHetu, Sex, is_well_formed, parse_hetu, parse_hetu_at, validate_hetu,
};
