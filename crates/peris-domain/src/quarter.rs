//! Quarter identifiers (`YYYY.NQ`) and their calendar boundaries.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuarterError {
    #[error("invalid quarter id `{0}`: expected YYYY.NQ")]
    Malformed(String),
    #[error("invalid quarter number `{0}`: expected 1-4")]
    NumberOutOfRange(u8),
}

/// A 3-month fiscal period, e.g. `2025.1Q` (January through March 2025).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quarter {
    year: i32,
    number: u8,
}

impl Quarter {
    pub fn new(year: i32, number: u8) -> Result<Self, QuarterError> {
        if !(1..=4).contains(&number) {
            return Err(QuarterError::NumberOutOfRange(number));
        }
        Ok(Self { year, number })
    }

    /// The quarter containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            number: ((date.month0() / 3) + 1) as u8,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// First calendar day of the quarter.
    pub fn start(&self) -> NaiveDate {
        let month = self.number as u32 * 3 - 2;
        NaiveDate::from_ymd_opt(self.year, month, 1).expect("quarter start is a valid date")
    }

    /// Last calendar day of the quarter (last day of month `3N`).
    pub fn end(&self) -> NaiveDate {
        let (next_year, next_month) = if self.number == 4 {
            (self.year + 1, 1)
        } else {
            (self.year, self.number as u32 * 3 + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("quarter boundary is a valid date")
            .pred_opt()
            .expect("quarter end is a valid date")
    }

    /// The immediately preceding quarter.
    pub fn previous(&self) -> Self {
        if self.number == 1 {
            Self {
                year: self.year - 1,
                number: 4,
            }
        } else {
            Self {
                year: self.year,
                number: self.number - 1,
            }
        }
    }

    /// The same quarter one year earlier.
    pub fn year_ago(&self) -> Self {
        Self {
            year: self.year - 1,
            number: self.number,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}.{}Q", self.year, self.number)
    }
}

impl FromStr for Quarter {
    type Err = QuarterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || QuarterError::Malformed(value.to_string());
        let (year_part, quarter_part) = value.split_once('.').ok_or_else(malformed)?;
        if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let number_part = quarter_part.strip_suffix('Q').ok_or_else(malformed)?;
        if number_part.len() != 1 || !number_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year: i32 = year_part.parse().map_err(|_| malformed())?;
        let number: u8 = number_part.parse().map_err(|_| malformed())?;
        Quarter::new(year, number)
    }
}

impl TryFrom<String> for Quarter {
    type Error = QuarterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quarter> for String {
    fn from(quarter: Quarter) -> Self {
        quarter.to_string()
    }
}
