//! # Lotto Numbers
//!
//! A `LottoNumber` is an integer in `1..=45`. The only way to get one is
//! through [`LottoNumber::new`], so every set in the engine holds valid
//! numbers by construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::Rejection;

/// Smallest drawable number.
pub const MIN_NUMBER: u8 = 1;
/// Largest drawable number.
pub const MAX_NUMBER: u8 = 45;
/// Numbers in a complete combination.
pub const NUMBERS_PER_COMBINATION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct LottoNumber(u8);

impl LottoNumber {
    /// Checked constructor. Anything outside `1..=45` is `InvalidNumber`.
    pub fn new(value: i64) -> Result<Self, Rejection> {
        if (MIN_NUMBER as i64..=MAX_NUMBER as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Rejection::InvalidNumber(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every number from 1 to 45, ascending.
    pub fn all() -> impl Iterator<Item = LottoNumber> {
        (MIN_NUMBER..=MAX_NUMBER).map(LottoNumber)
    }
}

impl TryFrom<i64> for LottoNumber {
    type Error = Rejection;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        LottoNumber::new(value)
    }
}

impl From<LottoNumber> for u8 {
    fn from(n: LottoNumber) -> u8 {
        n.0
    }
}

impl fmt::Display for LottoNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a list of raw integers, failing on the first out-of-range value.
pub fn parse_numbers(raw: &[i64]) -> Result<Vec<LottoNumber>, Rejection> {
    raw.iter().map(|&n| LottoNumber::new(n)).collect()
}

/// Converts numbers back to plain integers for the wire.
pub fn to_raw(numbers: &[LottoNumber]) -> Vec<u8> {
    numbers.iter().map(|n| n.get()).collect()
}
