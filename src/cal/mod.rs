//! Gregorian calendar calculations, which use years, months, days,
//! hours, minutes, and seconds, and the calendar engine built on top of
//! them.

pub(crate) mod datetime;
pub(crate) mod fields;
pub(crate) mod calendar;
pub(crate) mod engine;
pub mod fmt;
pub(crate) mod offset;
#[cfg(feature="parse")] pub(crate) mod parse;
pub mod zone;
#[cfg(feature="zoneinfo")] pub mod zoneinfo;

pub use self::datetime::{LocalDate, LocalTime, LocalDateTime, Weekday, Month, Year, YearMonth};
pub use self::datetime::{MIN_YEAR, MAX_YEAR};
pub use self::fields::{CalendarField, CalendarFieldSet};
pub use self::calendar::{CalendarSystem, CalendarIdentifier, Disambiguation, CalendarProvider, AutoUpdatingCalendar};
pub use self::engine::{CalendarEngine, MatchingPolicy, SEARCH_HORIZON_DAYS};
pub use self::offset::Offset;
pub use self::zone::{TimeZone, StaticTimeZone, LocalTimes, ZoneProvider, FixedZones};
#[cfg(feature="zoneinfo")] pub use self::zoneinfo::ZoneinfoDatabase;
pub use self::fmt::{ISO, DateStyle, Format};
#[cfg(feature="format")] pub use self::fmt::{Formatter, LocaleData, LocaleProvider, BuiltinLocales};


/// The **date piece** trait is used for date and time values that have
/// date components of years, months, and days.
pub trait DatePiece {

    /// The year, in absolute terms.
    /// This is in human-readable format, so the year 2014 actually has a
    /// year value of 2014, rather than 14 or 114 or anything like that.
    /// Years before 1 AD count down through 0 (1 BC) and below.
    fn year(&self) -> i64;

    /// The month of the year.
    fn month(&self) -> Month;

    /// The day of the month, from 1 to 31.
    fn day(&self) -> i8;

    /// The day of the year, from 1 to 366.
    fn yearday(&self) -> i16;

    /// The day of the week.
    fn weekday(&self) -> Weekday;

    /// The number of years into the century.
    /// This is the same as the last two digits of the year.
    fn year_of_century(&self) -> i64 { self.year().rem_euclid(100) }

    /// The quarter of the year, from 1 to 4.
    fn quarter(&self) -> i8 { self.month().quarter() }
}


/// The **time piece** trait is used for date and time values that have
/// time components of hours, minutes, and seconds.
pub trait TimePiece {

    /// The hour of the day.
    fn hour(&self) -> i8;

    /// The minute of the hour.
    fn minute(&self) -> i8;

    /// The second of the minute.
    fn second(&self) -> i8;

    /// The nanosecond of the second.
    fn nanosecond(&self) -> i32;

    /// The millisecond of the second.
    fn millisecond(&self) -> i16 { (self.nanosecond() / 1_000_000) as i16 }
}
