//! Dates, times, datetimes, months, and weekdays, without any time zone.

use std::cmp::{Ordering, PartialOrd};
use std::fmt;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::fmt::ISO;
use crate::duration::{Duration, NANOS_PER_SECOND};
use crate::error::{Error, Result};
use crate::instant::Instant;
use crate::util::{RangeExt, split_cycles};

use self::Month::*;
use self::Weekday::*;


/// The smallest year this library will represent. The limits keep every
/// day count and second count comfortably inside an `i64`.
pub const MIN_YEAR: i64 = -999_999_999;

/// The largest year this library will represent.
pub const MAX_YEAR: i64 = 999_999_999;


/// A single year.
///
/// This is just a wrapper around `i64` that performs year-related tests.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Year(pub i64);

impl Year {

    /// Returns whether this year is a leap year.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::Year;
    ///
    /// assert_eq!(Year(2000).is_leap_year(), true);
    /// assert_eq!(Year(1900).is_leap_year(), false);
    /// ```
    pub fn is_leap_year(self) -> bool {
        let year = self.0;
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Returns a year-month, pairing this year with the given month.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::{Year, Month};
    ///
    /// let expiry_date = Year(2017).month(Month::February);
    /// assert_eq!(expiry_date.year.0, 2017);
    /// assert_eq!(expiry_date.month, Month::February);
    /// ```
    pub fn month(self, month: Month) -> YearMonth {
        YearMonth { year: self, month }
    }

    /// Returns the number of days in this year.
    pub fn day_count(self) -> i64 {
        if self.is_leap_year() { 366 } else { 365 }
    }

    /// Returns whether this year lies within the range of years that can
    /// be represented.
    pub fn is_representable(self) -> bool {
        self.0.is_within(MIN_YEAR .. MAX_YEAR + 1)
    }
}


/// A month-year pair.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct YearMonth {
    pub year: Year,
    pub month: Month,
}

impl YearMonth {

    /// Returns the number of days in this month. This can be definitely
    /// known, as the paired year determines whether it’s a leap year, so
    /// there’s no chance of being caught out by February.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::Year;
    /// use calendrical::Month::February;
    ///
    /// assert_eq!(Year(2000).month(February).day_count(), 29);
    /// assert_eq!(Year(1900).month(February).day_count(), 28);
    /// ```
    pub fn day_count(&self) -> i8 {
        self.month.days_in_month(self.year.is_leap_year())
    }

    /// Returns a `LocalDate` based on the day of this month.
    ///
    /// This is just a short-cut for the `LocalDate::ymd` constructor.
    pub fn day(&self, day: i8) -> Result<LocalDate> {
        LocalDate::ymd(self.year.0, self.month, day)
    }

    /// Returns this year-month moved by a number of months, either
    /// forwards or backwards, wrapping around years as it goes.
    pub fn offset(&self, months: i64) -> Result<YearMonth> {
        let zero_based = self.year.0 * 12 + self.month.months_from_january() as i64 + months;
        let (year, month) = split_cycles(zero_based, 12);

        if !Year(year).is_representable() {
            return Err(Error::nonexistent(format!("year {} is out of range", year)));
        }

        Ok(Year(year).month(Month::from_zero(month as i8)?))
    }
}


/// Number of days in a complete 400-year cycle of the Gregorian calendar.
/// The calendar repeats itself, weekdays included, after every cycle.
pub const DAYS_IN_400Y: i64 = 365 * 400 + 97;

/// Number of seconds in a day. As everywhere in this library, leap seconds
/// are simply ignored.
pub const SECONDS_IN_DAY: i64 = 86400;

/// Number of days between **1st March, 0000** and **1st January, 1970**.
///
/// The day arithmetic below counts years as starting in March, so that the
/// leap day falls at the very *end* of each year. Combined with counting
/// in 400-year cycles from a year that is a multiple of 400, the
/// calculations reduce to plain division, with a bit of date-shifting to
/// base everything around the Unix epoch.
const EPOCH_DIFFERENCE: i64 = 719_468;



/// A **local date** is a day-long span on the timeline, *without a time
/// zone*.
#[derive(Eq, Clone, Copy)]
pub struct LocalDate {
    ymd:     YMD,
    yearday: i16,
    weekday: Weekday,
}

/// A **local time** is a time on the timeline that recurs once a day,
/// *without a time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct LocalTime {
    hour:   i8,
    minute: i8,
    second: i8,
    nanosecond: i32,
}

/// A **local date-time** is an exact instant on the timeline, *without a
/// time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}


impl LocalDate {

    /// Creates a new local date instance from the given year, month, and day
    /// fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an error.
    ///
    /// ### Examples
    ///
    /// ```rust
    /// use calendrical::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::ymd(1969, Month::July, 20).unwrap();
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.month(), Month::July);
    /// assert_eq!(date.day(), 20);
    ///
    /// assert!(LocalDate::ymd(2100, Month::February, 29).is_err());
    /// ```
    pub fn ymd(year: i64, month: Month, day: i8) -> Result<Self> {
        YMD { year, month, day }
            .to_days_since_epoch()
            .map(Self::from_days_since_epoch)
    }

    /// Creates a new local date instance from the given year and day-of-year
    /// values.
    ///
    /// ### Examples
    ///
    /// ```rust
    /// use calendrical::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::yd(2015, 0x100).unwrap();
    /// assert_eq!(date.year(), 2015);
    /// assert_eq!(date.month(), Month::September);
    /// assert_eq!(date.day(), 13);
    /// ```
    pub fn yd(year: i64, yearday: i64) -> Result<Self> {
        if yearday.is_within(1 .. Year(year).day_count() + 1) {
            let jan_1 = YMD { year, month: January, day: 1 };
            let days = jan_1.to_days_since_epoch()?;
            Ok(Self::from_days_since_epoch(days + yearday - 1))
        }
        else {
            Err(Error::unresolvable(format!("day {} is out of range for year {}", yearday, year)))
        }
    }

    /// Computes a LocalDate - year, month, day, weekday, and yearday -
    /// given the number of days that have passed since **1st January,
    /// 1970**. Negative numbers count backwards.
    ///
    /// ```rust
    /// use calendrical::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::from_days_since_epoch(-1);
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.month(), Month::December);
    /// assert_eq!(date.day(), 31);
    /// ```
    pub fn from_days_since_epoch(days: i64) -> Self {

        // The Gregorian calendar works in 400-year cycles, which repeat
        // themselves ever after. Shift the day count so that it starts
        // at a cycle boundary, then work out how far into the cycle it is.
        let (num_400y_cycles, day_of_cycle) = split_cycles(days + EPOCH_DIFFERENCE, DAYS_IN_400Y);

        // Which year of the cycle is this? Each 4-year, 100-year, and
        // 400-year boundary removes or restores a leap day, which is what
        // the three corrections account for.
        let year_of_cycle = (day_of_cycle
                             - day_of_cycle / 1460
                             + day_of_cycle / 36524
                             - day_of_cycle / 146_096) / 365;

        // Which day of the (March-based) year is this?
        let day_of_year = day_of_cycle - (365 * year_of_cycle + year_of_cycle / 4 - year_of_cycle / 100);

        // Months from March onwards alternate between 31 and 30 days in a
        // pattern that repeats every five months, 153 days at a time.
        let month_from_march = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * month_from_march + 2) / 5 + 1;

        // Wrap January and February around to the *next* year, and make
        // the month 1-indexed.
        let (month, year_correction) = if month_from_march < 10 { (month_from_march + 3, 0) }
                                                            else { (month_from_march - 9, 1) };
        let year = year_of_cycle + num_400y_cycles * 400 + year_correction;

        let is_leap_year = Year(year).is_leap_year();
        let month_variant = Month::from_one(month as i8).unwrap_or(January);
        let yearday = month_variant.days_before_start() as i64
                    + if is_leap_year && month_variant >= March { 1 } else { 0 }
                    + day;

        Self {
            yearday: yearday as i16,
            weekday: days_to_weekday(days),
            ymd: YMD {
                year,
                month: month_variant,
                day:   day as i8,
            },
        }
    }

    /// Returns the number of days between **1st January, 1970** and this
    /// date.
    pub fn days_since_epoch(&self) -> i64 {
        self.ymd.days_unchecked()
    }

    /// Returns the date the given number of days later (or earlier, for
    /// negative numbers).
    pub fn add_days(&self, days: i64) -> Self {
        Self::from_days_since_epoch(self.days_since_epoch() + days)
    }

    /// Returns the year-month pair this date lies in.
    pub fn year_month(&self) -> YearMonth {
        Year(self.ymd.year).month(self.ymd.month)
    }
}

impl DatePiece for LocalDate {
    fn year(&self) -> i64 { self.ymd.year }
    fn month(&self) -> Month { self.ymd.month }
    fn day(&self) -> i8 { self.ymd.day }
    fn yearday(&self) -> i16 { self.yearday }
    fn weekday(&self) -> Weekday { self.weekday }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDate({})", self.iso())
    }
}

impl PartialEq for LocalDate {
    fn eq(&self, other: &Self) -> bool {
        self.ymd == other.ymd
    }
}

impl PartialOrd for LocalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ymd.cmp(&other.ymd)
    }
}


impl LocalTime {

    /// Computes the number of hours, minutes, and seconds, based on the
    /// number of seconds that have elapsed since midnight.
    pub fn from_seconds_since_midnight(seconds: i64) -> Self {
        Self::from_seconds_and_nanoseconds_since_midnight(seconds, 0)
    }

    /// Computes the number of hours, minutes, and seconds, based on the
    /// number of seconds that have elapsed since midnight.
    pub fn from_seconds_and_nanoseconds_since_midnight(seconds: i64, nanosecond_of_second: i32) -> Self {
        Self {
            hour:   (seconds / 60 / 60) as i8,
            minute: (seconds / 60 % 60) as i8,
            second: (seconds % 60) as i8,
            nanosecond: nanosecond_of_second,
        }
    }

    /// Returns the time at midnight, with all fields initialised to 0.
    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0, second: 0, nanosecond: 0 }
    }

    /// Creates a new timestamp instance with the given hour and minute
    /// fields. The second and nanosecond fields are set to 0.
    pub fn hm(hour: i8, minute: i8) -> Result<Self> {
        Self::hms_nanos(hour, minute, 0, 0)
    }

    /// Creates a new timestamp instance with the given hour, minute, and
    /// second fields. The nanosecond field is set to 0.
    pub fn hms(hour: i8, minute: i8, second: i8) -> Result<Self> {
        Self::hms_nanos(hour, minute, second, 0)
    }

    /// Creates a new timestamp instance with the given hour, minute,
    /// second, and nanosecond fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an `Err`. Unlike some
    /// other libraries, there is no 24:00: the end of one day is the
    /// start of the next.
    pub fn hms_nanos(hour: i8, minute: i8, second: i8, nanosecond: i32) -> Result<Self> {
        if hour.is_within(0..24)   && minute.is_within(0..60)
        && second.is_within(0..60) && (nanosecond as i64).is_within(0..NANOS_PER_SECOND)
        {
            Ok(Self { hour, minute, second, nanosecond })
        }
        else {
            Err(Error::unresolvable(format!("time {:02}:{:02}:{:02}.{:09} is out of range", hour, minute, second, nanosecond)))
        }
    }

    /// Calculate the number of seconds since midnight this time is at,
    /// ignoring nanoseconds.
    pub fn to_seconds(self) -> i64 {
        self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64
    }
}

impl TimePiece for LocalTime {
    fn hour(&self) -> i8 { self.hour }
    fn minute(&self) -> i8 { self.minute }
    fn second(&self) -> i8 { self.second }
    fn nanosecond(&self) -> i32 { self.nanosecond }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalTime({})", self.iso())
    }
}


impl LocalDateTime {

    /// Computes a complete date-time based on the values in the given
    /// Instant parameter, read as UTC.
    pub fn from_instant(instant: Instant) -> Self {
        let (days, secs) = split_cycles(instant.seconds(), SECONDS_IN_DAY);

        // Just split the input value into days and seconds, and let
        // LocalDate and LocalTime do all the hard work.
        Self {
            date: LocalDate::from_days_since_epoch(days),
            time: LocalTime::from_seconds_and_nanoseconds_since_midnight(secs, instant.nanoseconds()),
        }
    }

    /// Computes a complete date-time based on the number of seconds that
    /// have elapsed since **midnight, 1st January, 1970**, setting the
    /// number of nanoseconds to 0.
    pub fn at(seconds_since_1970_epoch: i64) -> Self {
        Self::from_instant(Instant::at(seconds_since_1970_epoch))
    }

    /// Creates a new local date time from a local date and a local time.
    pub fn new(date: LocalDate, time: LocalTime) -> Self {
        Self { date, time }
    }

    /// Returns the date portion of this date-time stamp.
    pub fn date(&self) -> LocalDate {
        self.date
    }

    /// Returns the time portion of this date-time stamp.
    pub fn time(&self) -> LocalTime {
        self.time
    }

    /// Returns the instant that this date-time would be at if it were in
    /// UTC.
    pub fn to_instant(&self) -> Instant {
        Instant::at_nanos(self.local_seconds(), self.time.nanosecond as i64)
    }

    /// Returns the number of seconds since the Unix epoch that this
    /// date-time would be at if it were in UTC, ignoring nanoseconds. The
    /// first and last days of the timeline stop at the ends of `i64`.
    pub fn local_seconds(&self) -> i64 {
        self.date.days_since_epoch().saturating_mul(SECONDS_IN_DAY).saturating_add(self.time.to_seconds())
    }

    /// Returns this date-time moved by a number of seconds.
    pub fn add_seconds(&self, seconds: i64) -> Self {
        Self::from_instant(self.to_instant() + Duration::of(seconds))
    }
}

impl DatePiece for LocalDateTime {
    fn year(&self) -> i64 { self.date.ymd.year }
    fn month(&self) -> Month { self.date.ymd.month }
    fn day(&self) -> i8 { self.date.ymd.day }
    fn yearday(&self) -> i16 { self.date.yearday }
    fn weekday(&self) -> Weekday { self.date.weekday }
}

impl TimePiece for LocalDateTime {
    fn hour(&self) -> i8 { self.time.hour }
    fn minute(&self) -> i8 { self.time.minute }
    fn second(&self) -> i8 { self.time.second }
    fn nanosecond(&self) -> i32 { self.time.nanosecond }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDateTime({})", self.iso())
    }
}


/// A **YMD** is an implementation detail of `LocalDate`. It provides
/// helper methods relating to the construction of `LocalDate` instances.
///
/// The main difference is that while all `LocalDate` values get checked
/// for validity before they are used, there is no such check for `YMD`.
/// The interface to `LocalDate` ensures that it should be impossible to
/// create an instance of the 74th of March, for example, but you’re
/// free to create such an instance of `YMD`. For this reason, it is not
/// exposed to implementors of this library.
#[derive(PartialEq, PartialOrd, Eq, Ord, Hash, Clone, Debug, Copy)]
struct YMD {
    year:    i64,
    month:   Month,
    day:     i8,
}

impl YMD {

    /// Calculates the number of days that have elapsed since the 1st
    /// January, 1970, after checking that the date is real.
    fn to_days_since_epoch(&self) -> Result<i64> {
        if !Year(self.year).is_representable() {
            return Err(Error::unresolvable(format!("year {} is out of range", self.year)));
        }

        if !self.is_valid() {
            return Err(Error::unresolvable(format!("day {} is out of range for {:?} {}", self.day, self.month, self.year)));
        }

        Ok(self.days_unchecked())
    }

    /// The reverse of `LocalDate::from_days_since_epoch`, with no validity
    /// checks.
    fn days_unchecked(&self) -> i64 {
        let month = self.month as i64;

        // Years start in March here, so January and February belong to
        // the year before.
        let year = if month <= 2 { self.year - 1 } else { self.year };
        let (num_400y_cycles, year_of_cycle) = split_cycles(year, 400);

        let month_from_march = if month > 2 { month - 3 } else { month + 9 };
        let day_of_year = (153 * month_from_march + 2) / 5 + self.day as i64 - 1;
        let day_of_cycle = year_of_cycle * 365 + year_of_cycle / 4 - year_of_cycle / 100 + day_of_year;

        num_400y_cycles * DAYS_IN_400Y + day_of_cycle - EPOCH_DIFFERENCE
    }

    /// Returns whether this datestamp is valid, which basically means
    /// whether the day is in the range allowed by the month.
    fn is_valid(&self) -> bool {
        self.day >= 1 && self.day <= self.month.days_in_month(Year(self.year).is_leap_year())
    }
}

/// Returns the number of days between **1st January, 1970** and the given
/// date, without checking that the day exists in its month. Days past the
/// end of the month carry on into the next one.
pub(crate) fn days_from_civil(year: i64, month: Month, day: i64) -> i64 {
    YMD { year, month, day: 1 }.days_unchecked() + day - 1
}

/// Computes the weekday, given the number of days that have passed
/// since the 1st of January, 1970.
fn days_to_weekday(days: i64) -> Weekday {
    // 1st January 1970 was a Thursday, so add 4 to the number of days.
    let (_, weekday) = split_cycles(days + 4, 7);
    Weekday::from_zero(weekday as i8).unwrap_or(Sunday)
}


/// A month of the year, starting with January, and ending with December.
///
/// This is stored as an enum instead of just a number to prevent
/// off-by-one errors: is month 2 February (1-indexed) or March (0-indexed)?
/// In this case, it’s 1-indexed, to have January become 1 when you use
/// `as i32` in code.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Month {
    January =  1, February =  2, March     =  3,
    April   =  4, May      =  5, June      =  6,
    July    =  7, August   =  8, September =  9,
    October = 10, November = 11, December  = 12,
}

#[allow(clippy::match_same_arms)]
impl Month {

    /// Returns the number of days in this month, depending on whether it’s
    /// a leap year or not.
    pub fn days_in_month(self, leap_year: bool) -> i8 {
        match self {
            January   => 31, February  => if leap_year { 29 } else { 28 },
            March     => 31, April     => 30,
            May       => 31, June      => 30,
            July      => 31, August    => 31,
            September => 30, October   => 31,
            November  => 30, December  => 31,
        }
    }

    /// Returns the number of days that have elapsed in a year *before* this
    /// month begins, with no leap year check.
    fn days_before_start(self) -> i16 {
        match self {
            January =>   0, February =>  31, March     =>  59,
            April   =>  90, May      => 120, June      => 151,
            July    => 181, August   => 212, September => 243,
            October => 273, November => 304, December  => 334,
        }
    }

    pub fn months_from_january(self) -> usize {
        self as usize - 1
    }

    /// Returns the quarter of the year this month is in, from 1 to 4.
    pub fn quarter(self) -> i8 {
        (self.months_from_january() / 3) as i8 + 1
    }

    /// Returns the month based on a number, with January as **Month 1**,
    /// February as **Month 2**, and so on.
    ///
    /// ```rust
    /// use calendrical::Month;
    /// assert_eq!(Month::from_one(5).unwrap(), Month::May);
    /// assert!(Month::from_one(0).is_err());
    /// ```
    pub fn from_one(month: i8) -> Result<Self> {
        Ok(match month {
             1 => January,   2 => February,   3 => March,
             4 => April,     5 => May,        6 => June,
             7 => July,      8 => August,     9 => September,
            10 => October,  11 => November,  12 => December,
             _ => return Err(Error::unresolvable(format!("month {} is out of range", month))),
        })
    }

    /// Returns the month based on a number, with January as **Month 0**,
    /// February as **Month 1**, and so on.
    ///
    /// ```rust
    /// use calendrical::Month;
    /// assert_eq!(Month::from_zero(5).unwrap(), Month::June);
    /// assert!(Month::from_zero(12).is_err());
    /// ```
    pub fn from_zero(month: i8) -> Result<Self> {
        Self::from_one(month.saturating_add(1))
    }
}


/// A named day of the week.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Weekday {
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
}

// Sunday is Day 0, and Day 1 when used as a calendar field. There’s no
// standard as to whether Sunday comes before Monday or the other way
// around, so weekdays don’t get an Ord instance: the first day of the week
// is part of a calendar’s configuration instead.

impl Weekday {

    /// Return the weekday based on a number, with Sunday as Day 0, Monday as
    /// Day 1, and so on.
    ///
    /// ```rust
    /// use calendrical::Weekday;
    /// assert_eq!(Weekday::from_zero(4).unwrap(), Weekday::Thursday);
    /// assert!(Weekday::from_zero(7).is_err());
    /// ```
    pub fn from_zero(weekday: i8) -> Result<Self> {
        Ok(match weekday {
            0 => Sunday,     1 => Monday,    2 => Tuesday,
            3 => Wednesday,  4 => Thursday,  5 => Friday,
            6 => Saturday,   _ => return Err(Error::unresolvable(format!("weekday {} is out of range", weekday))),
        })
    }

    /// Return the weekday based on its ISO-8601 number, with Monday as
    /// Day 1 and Sunday as Day 7.
    pub fn from_one(weekday: i8) -> Result<Self> {
        if weekday == 7 { Ok(Sunday) } else { Self::from_zero(weekday) }
    }

    /// Return the weekday based on its calendar field value, with Sunday
    /// as Day 1 and Saturday as Day 7.
    ///
    /// ```rust
    /// use calendrical::Weekday;
    /// assert_eq!(Weekday::from_field_value(2).unwrap(), Weekday::Monday);
    /// ```
    pub fn from_field_value(weekday: i64) -> Result<Self> {
        if weekday.is_within(1..8) {
            Self::from_zero(weekday as i8 - 1)
        }
        else {
            Err(Error::unresolvable(format!("weekday {} is out of range", weekday)))
        }
    }

    /// Returns this weekday’s calendar field value, with Sunday as Day 1
    /// and Saturday as Day 7.
    pub fn field_value(self) -> i64 {
        self as i64 + 1
    }

    /// Returns the number of days from `start` forwards to this weekday,
    /// from 0 to 6.
    pub fn days_since(self, start: Weekday) -> i64 {
        split_cycles(self as i64 - start as i64, 7).1
    }

    pub fn is_weekend(self) -> bool {
        self == Saturday || self == Sunday
    }
}
