//! Fixed-point money amount (two decimal places).
//!
//! Stored as integer cents. On the wire it is a decimal string such as
//! `"123.45"`, matching how exports render prices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Ten significant digits with two after the point.
const MAX_CENTS: u64 = 99_999_999_99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Result<Self, SiteError> {
        if cents > MAX_CENTS {
            return Err(SiteError::BadRequest("price exceeds 10 digits".into()));
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// `self * qty`, or `None` if the result leaves the representable range.
    pub fn times(self, qty: u32) -> Option<Price> {
        self.0
            .checked_mul(u64::from(qty))
            .filter(|c| *c <= MAX_CENTS)
            .map(Price)
    }

    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.0
            .checked_add(other.0)
            .filter(|c| *c <= MAX_CENTS)
            .map(Price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SiteError::BadRequest(format!("invalid price: {s:?}"));
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || frac.len() > 2 {
            return Err(bad());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let whole: u64 = whole.parse().map_err(|_| bad())?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| bad())? * 10,
            _ => frac.parse().map_err(|_| bad())?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(bad)?;
        Price::from_cents(cents)
    }
}

impl TryFrom<String> for Price {
    type Error = SiteError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Price> for String {
    fn from(p: Price) -> Self {
        p.to_string()
    }
}
