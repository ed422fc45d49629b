//! Reading ISO-8601 dates and times.

use std::str::FromStr;

use crate::cal::{LocalDate, LocalTime, LocalDateTime, Month, Weekday};
use crate::cal::calendar::CalendarSystem;
use crate::cal::offset::Offset;
use crate::cal::zone::TimeZone;
use crate::error::{Error, Result};


impl FromStr for LocalDate {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match iso8601::date(input) {
            Ok(fields)  => fields_to_date(fields).map_err(|e| invalid(input, e)),
            Err(e)      => Err(Error::unparsable(input, e)),
        }
    }
}

impl FromStr for LocalTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match iso8601::time(input) {
            Ok(fields)  => fields_to_time(fields).map_err(|e| invalid(input, e)),
            Err(e)      => Err(Error::unparsable(input, e)),
        }
    }
}

impl FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        parse_datetime(input).map(|(local, _)| local)
    }
}


/// Parses an ISO-8601 date and time, with an optional offset from UTC,
/// returning the local date and time along with the offset. A missing
/// offset reads as UTC.
pub(crate) fn parse_datetime(input: &str) -> Result<(LocalDateTime, Offset)> {
    let fields = match iso8601::datetime(input) {
        Ok(fields)  => fields,
        Err(e)      => return Err(Error::unparsable(input, e)),
    };

    let date   = fields_to_date(fields.date).map_err(|e| invalid(input, e))?;
    let time   = fields_to_time(fields.time).map_err(|e| invalid(input, e))?;
    let offset = Offset::of_hours_and_minutes(fields.time.tz_offset_hours as i8, fields.time.tz_offset_minutes as i8)
                     .map_err(|e| invalid(input, e))?;

    Ok((LocalDateTime::new(date, time), offset))
}


fn fields_to_date(fields: iso8601::Date) -> Result<LocalDate> {
    match fields {
        iso8601::Date::YMD { year, month, day } => {
            let month_variant = Month::from_one(month as i8)?;
            LocalDate::ymd(year as i64, month_variant, day as i8)
        },
        iso8601::Date::Week { year, ww, d } => {
            let weekday = Weekday::from_one(d as i8)?;
            week_date(year as i64, ww as i64, weekday)
        },
        iso8601::Date::Ordinal { year, ddd } => {
            LocalDate::yd(year as i64, ddd as i64)
        },
    }
}

fn fields_to_time(fields: iso8601::Time) -> Result<LocalTime> {
    let h  = fields.hour as i8;
    let m  = fields.minute as i8;
    let s  = fields.second as i8;
    let ns = fields.millisecond as i32 * 1_000_000;

    LocalTime::hms_nanos(h, m, s, ns)
}

/// The date of a weekday in an ISO week-numbering year.
fn week_date(year: i64, week: i64, weekday: Weekday) -> Result<LocalDate> {
    let iso = CalendarSystem::iso8601(TimeZone::utc());
    if week < 1 || week > iso.weeks_in_year(year) {
        return Err(Error::unresolvable(format!("year {} has no week {}", year, week)));
    }

    let days = iso.first_week_start(year) + 7 * (week - 1) + weekday.days_since(Weekday::Monday);
    Ok(LocalDate::from_days_since_epoch(days))
}

/// Input that parses, but names a date or time that doesn’t exist.
fn invalid(input: &str, error: Error) -> Error {
    Error::unparsable(input, error.to_string())
}
