//! Synthetic identity code generation for a target age.
//!
//! Generated codes always validate and parse back to the requested age as of
//! the date they were generated for. Individual numbers are drawn from
//! `100..=899`, so generated codes are never temporary ones.

use chrono::{Datelike, NaiveDate};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, RngExt, SeedableRng};
use tracing::debug;

use crate::calendar::{FEBRUARY, anniversary_passed, days_in_month, local_today};
use crate::century::{century_of, signs_for_year};
use crate::checksum::checksum_for_digits;
use crate::hetu::HetuError;

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 200;

pub const MIN_INDIVIDUAL_NUMBER: u16 = 100;
pub const MAX_INDIVIDUAL_NUMBER: u16 = 899;

const SHORTEST_MONTH: u32 = 28;

/// Create a random identity code for a person aged `age` today.
pub fn create_with_age(age: u32) -> Result<String, HetuError> {
    create_with_age_at(age, local_today(), &mut rand::rng())
}

/// Create a random identity code for a person aged `age` on `today`, drawing from `rng`.
pub fn create_with_age_at<R: Rng + ?Sized>(
    age: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Result<String, HetuError> {
    check_age(age)?;

    let year = today.year() - age as i32;
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=days_in_month(year, month).unwrap_or(SHORTEST_MONTH));
    let (year, month, day) = settle_birth_date(year, month, day, today);

    let signs = signs_for_year(year);
    if signs.is_empty() {
        return Err(HetuError::UnsupportedCentury(year));
    }
    let sign = signs[rng.random_range(0..signs.len())];

    let individual = rng.random_range(MIN_INDIVIDUAL_NUMBER..=MAX_INDIVIDUAL_NUMBER);
    let year_in_century = year - century_of(year);

    let digits = format!("{day:02}{month:02}{year_in_century:02}{individual:03}");
    let control =
        checksum_for_digits(&digits).ok_or_else(|| HetuError::InvalidFormat(digits.clone()))?;

    let code = format!("{day:02}{month:02}{year_in_century:02}{sign}{individual:03}{control}");
    debug!(age, %today, %code, "generated identity code");
    Ok(code)
}

fn check_age(age: u32) -> Result<(), HetuError> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(HetuError::AgeOutOfRange {
            age,
            min: MIN_AGE,
            max: MAX_AGE,
        })
    }
}

/// Move a birth date drawn in `today.year() - age` so that it yields exactly that age.
///
/// When the anniversary is still ahead the person was born a year earlier. A
/// leap day moved into a common year becomes Feb 28, or Mar 1 when Feb 28 is
/// `today` and would already count as passed.
fn settle_birth_date(year: i32, month: u32, day: u32, today: NaiveDate) -> (i32, u32, u32) {
    if anniversary_passed(month, day, today) {
        return (year, month, day);
    }

    let year = year - 1;
    match days_in_month(year, month) {
        Some(max) if day > max && month == FEBRUARY => {
            if anniversary_passed(FEBRUARY, max, today) {
                (year, FEBRUARY + 1, 1)
            } else {
                (year, FEBRUARY, max)
            }
        }
        _ => (year, month, day),
    }
}

/// Identity code generator bound to a target age.
///
/// The generator implements `Iterator<Item = String>`; iteration ends at the
/// first generation error. Use `next_hetu()` or `next_n()` to see the error.
pub struct HetuGen<R: Rng = ThreadRng> {
    age: u32,
    today: Option<NaiveDate>,
    rng: R,
}

impl HetuGen<ThreadRng> {
    /// Create a generator drawing from the thread-local RNG.
    pub fn new(age: u32) -> Result<Self, HetuError> {
        Self::with_rng(age, rand::rng())
    }
}

impl HetuGen<StdRng> {
    /// Create a reproducible generator from a seed.
    pub fn with_seed(age: u32, seed: u64) -> Result<Self, HetuError> {
        Self::with_rng(age, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HetuGen<R> {
    /// Create a generator drawing from `rng`.
    pub fn with_rng(age: u32, rng: R) -> Result<Self, HetuError> {
        check_age(age)?;
        Ok(Self {
            age,
            today: None,
            rng,
        })
    }

    /// Pin the reference date instead of reading the local clock on every call.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Generate the next identity code (domain API).
    pub fn next_hetu(&mut self) -> Result<String, HetuError> {
        let today = self.today.unwrap_or_else(local_today);
        create_with_age_at(self.age, today, &mut self.rng)
    }

    /// Generate n identity codes, stopping at the first error.
    pub fn next_n(&mut self, n: usize) -> Result<Vec<String>, HetuError> {
        (0..n).map(|_| self.next_hetu()).collect()
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

impl<R: Rng> Iterator for HetuGen<R> {
    type Item = String;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_hetu().ok()
    }
}
