//! Fixed offsets from UTC.

use std::fmt;

use crate::cal::fmt::ISO;
use crate::error::{Error, Result};
use crate::util::RangeExt;


/// A fixed difference between local time and UTC, such as `+05:30`.
///
/// UTC itself is kept distinct from a zero offset so that it can be
/// written out as `Z`.
#[derive(PartialEq, Eq, Hash, Copy, Clone)]
pub struct Offset {
    offset_seconds: Option<i32>,
}

impl Offset {
    pub fn utc() -> Self {
        Self { offset_seconds: None }
    }

    pub fn of_seconds(seconds: i32) -> Result<Self> {
        if seconds.is_within(-86400..86401) {
            Ok(Self { offset_seconds: Some(seconds) })
        }
        else {
            Err(Error::unresolvable(format!("offset of {}s is out of range", seconds)))
        }
    }

    pub fn of_hours_and_minutes(hours: i8, minutes: i8) -> Result<Self> {
        if (hours.is_positive() && minutes.is_negative())
        || (hours.is_negative() && minutes.is_positive()) {
            Err(Error::unresolvable("offset hours and minutes have different signs"))
        }
        else if hours <= -24 || hours >= 24 || minutes <= -60 || minutes >= 60 {
            Err(Error::unresolvable(format!("offset {}h {}m is out of range", hours, minutes)))
        }
        else {
            let hours = hours as i32;
            let minutes = minutes as i32;
            Self::of_seconds(hours * (60 * 60) + minutes * 60)
        }
    }

    /// Reads an offset written as a sign followed by hours and optional
    /// minutes: `+5`, `-05`, `+0530`, or `+05:30`. A lone `Z` is UTC.
    pub fn parse(input: &str) -> Result<Self> {
        if input == "Z" {
            return Ok(Self::utc());
        }

        let bad = || Error::unparsable(input, "expected an offset such as +05:30");

        let (negative, digits) = match input.chars().next() {
            Some('+') => (false, &input[1..]),
            Some('-') => (true,  &input[1..]),
            _         => return Err(bad()),
        };

        let digits: String = match digits.find(':') {
            Some(2) => digits.chars().filter(|c| *c != ':').collect(),
            Some(_) => return Err(bad()),
            None    => digits.to_owned(),
        };

        if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }

        let (hours, minutes) = match digits.len() {
            1 | 2 => (&digits[..], "0"),
            4     => (&digits[..2], &digits[2..]),
            _     => return Err(bad()),
        };

        let hours: i8 = hours.parse().map_err(|_| bad())?;
        let minutes: i8 = minutes.parse().map_err(|_| bad())?;

        if negative {
            Self::of_hours_and_minutes(-hours, -minutes)
        }
        else {
            Self::of_hours_and_minutes(hours, minutes)
        }
    }

    pub fn is_utc(self) -> bool {
        self.offset_seconds.is_none()
    }

    pub fn is_negative(self) -> bool {
        self.total_seconds() < 0
    }

    /// The whole offset, in seconds east of UTC.
    pub fn total_seconds(self) -> i64 {
        self.offset_seconds.unwrap_or(0) as i64
    }

    pub fn hours(self) -> i8 {
        (self.total_seconds() / 60 / 60) as i8
    }

    pub fn minutes(self) -> i8 {
        (self.total_seconds() / 60 % 60) as i8
    }

    pub fn seconds(self) -> i8 {
        (self.total_seconds() % 60) as i8
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Offset({})", self.iso())
    }
}
