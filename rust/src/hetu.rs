//! Identity code parsing and validation.
//!
//! Format: `DDMMYYCNNNQ`
//!
//! - `DDMMYY`: date of birth, year within the century
//! - `C`: century sign, see [`crate::century`]
//! - `NNN`: individual number, odd for males and even for females
//! - `Q`: control character, see [`crate::checksum`]

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::calendar::{age_in_years, days_in_month, local_today};
use crate::century::century_base;
use crate::checksum::checksum_for_digits;

/// Length of an identity code in characters.
pub const HETU_LEN: usize = 11;

/// Individual numbers from this value upwards are reserved for temporary codes.
pub const TEMPORARY_INDIVIDUAL_NUMBER: u16 = 900;

/// Errors that can occur during identity code operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HetuError {
    #[error("Not valid SSN format: {0:?}")]
    InvalidFormat(String),
    #[error("Not valid SSN: no such date {day:02}.{month:02}.{year}")]
    InvalidDate { day: u32, month: u32, year: i32 },
    #[error("Given age ({age}) is not between sensible age range of {min} and {max}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },
    #[error("No century sign for birth year {0}")]
    UnsupportedCentury(i32),
}

impl HetuError {
    /// Input does not match the positional grammar.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidFormat(_))
    }

    /// Input is well-formed but names an impossible date.
    pub fn is_semantic_error(&self) -> bool {
        matches!(self, Self::InvalidDate { .. })
    }

    /// Generation was asked for something outside the supported range.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::AgeOutOfRange { .. } | Self::UnsupportedCentury(_))
    }
}

/// Sex encoded by the parity of the individual number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Odd individual numbers are male, even are female.
    pub fn from_individual_number(n: u16) -> Self {
        if n % 2 == 1 { Self::Male } else { Self::Female }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed identity code.
///
/// `valid` reflects the control character only. A code with a wrong control
/// character still parses, with every other field filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedHetu {
    pub raw: String,
    pub valid: bool,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub age_in_years: i32,
    pub century_sign: char,
    pub individual_number: u16,
}

impl ParsedHetu {
    /// Temporary codes use individual numbers 900-999.
    pub fn is_temporary(&self) -> bool {
        self.individual_number >= TEMPORARY_INDIVIDUAL_NUMBER
    }
}

static HETU_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])(0[1-9]|1[0-2])([0-9]{2})([-+U-YA-F])([0-9]{3})([0-9A-Z])$")
        .unwrap()
});

/// Positional fields of a code that passed the grammar.
struct Fields<'a> {
    day: &'a str,
    month: &'a str,
    year: &'a str,
    sign: char,
    individual: &'a str,
    control: char,
}

fn match_grammar(code: &str) -> Option<Fields<'_>> {
    if code.len() != HETU_LEN {
        return None;
    }
    let caps = HETU_PATTERN.captures(code)?;
    Some(Fields {
        day: caps.get(1)?.as_str(),
        month: caps.get(2)?.as_str(),
        year: caps.get(3)?.as_str(),
        sign: caps.get(4)?.as_str().chars().next()?,
        individual: caps.get(5)?.as_str(),
        control: caps.get(6)?.as_str().chars().next()?,
    })
}

/// Whether `code` matches the positional grammar, without checking the date or control character.
pub fn is_well_formed(code: &str) -> bool {
    match_grammar(code).is_some()
}

/// Validate an identity code. Never fails: malformed input is simply invalid.
pub fn validate_hetu(code: &str) -> bool {
    match parse_hetu(code) {
        Ok(parsed) => parsed.valid,
        Err(err) => {
            debug!(%err, "identity code rejected");
            false
        }
    }
}

/// Parse an identity code, computing the age against the local date.
pub fn parse_hetu(code: &str) -> Result<ParsedHetu, HetuError> {
    parse_hetu_at(code, local_today())
}

/// Parse an identity code, computing the age as of `today`.
pub fn parse_hetu_at(code: &str, today: NaiveDate) -> Result<ParsedHetu, HetuError> {
    let invalid_format = || HetuError::InvalidFormat(code.to_string());

    let fields = match_grammar(code).ok_or_else(invalid_format)?;

    let day: u32 = fields.day.parse().map_err(|_| invalid_format())?;
    let month: u32 = fields.month.parse().map_err(|_| invalid_format())?;
    let year_in_century: i32 = fields.year.parse().map_err(|_| invalid_format())?;
    let individual_number: u16 = fields.individual.parse().map_err(|_| invalid_format())?;

    let year = century_base(fields.sign).ok_or_else(invalid_format)? + year_in_century;

    let invalid_date = HetuError::InvalidDate { day, month, year };
    match days_in_month(year, month) {
        Some(max) if (1..=max).contains(&day) => {}
        _ => return Err(invalid_date),
    }
    let date_of_birth = NaiveDate::from_ymd_opt(year, month, day).ok_or(invalid_date)?;

    let digits = format!(
        "{}{}{}{}",
        fields.day, fields.month, fields.year, fields.individual
    );
    let expected = checksum_for_digits(&digits).ok_or_else(invalid_format)?;

    Ok(ParsedHetu {
        raw: code.to_string(),
        valid: expected == fields.control,
        sex: Sex::from_individual_number(individual_number),
        date_of_birth,
        age_in_years: age_in_years(date_of_birth, today),
        century_sign: fields.sign,
        individual_number,
    })
}
