//! Calendar configuration: which calendar, which zone, and how weeks and
//! daylight-saving changes are counted.

use crate::cal::{LocalDate, Month, Weekday, DatePiece};
use crate::cal::datetime::days_from_civil;
use crate::cal::zone::{TimeZone, ZoneProvider};
use crate::error::Result;
use crate::system::sys_timezone;
use crate::util::split_cycles;


/// The calendars this library can compute with. Both are proleptic
/// Gregorian calendars; they differ only in how weeks are numbered.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum CalendarIdentifier {
    Gregorian,
    Iso8601,
}


/// What to do with a local date and time that a time zone shows either
/// twice (when the clocks go back) or never (when they go forward).
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Disambiguation {

    /// Use the later of two instants. A skipped time is moved forward by
    /// the length of the gap, so 02:30 in a one-hour gap becomes 03:30.
    Later,

    /// Use the earlier of two instants. A skipped time is moved backward
    /// by the length of the gap.
    Earlier,

    /// Fail with an `UnresolvableDate` error.
    Reject,
}

impl Default for Disambiguation {
    fn default() -> Self {
        Disambiguation::Later
    }
}


/// An immutable calendar configuration that every engine operation is
/// computed against.
#[derive(PartialEq, Debug, Clone)]
pub struct CalendarSystem {
    identifier: CalendarIdentifier,
    time_zone: TimeZone,
    first_weekday: Weekday,
    minimum_days_in_first_week: i8,
    disambiguation: Disambiguation,
}

impl CalendarSystem {

    /// A Gregorian calendar in the given zone, with weeks starting on
    /// Sunday and week 1 being the week that contains the 1st of January.
    pub fn gregorian(time_zone: TimeZone) -> Self {
        Self {
            identifier: CalendarIdentifier::Gregorian,
            time_zone,
            first_weekday: Weekday::Sunday,
            minimum_days_in_first_week: 1,
            disambiguation: Disambiguation::default(),
        }
    }

    /// An ISO-8601 calendar in the given zone, with weeks starting on
    /// Monday and week 1 being the first one with four days in the new
    /// year.
    pub fn iso8601(time_zone: TimeZone) -> Self {
        Self {
            identifier: CalendarIdentifier::Iso8601,
            time_zone,
            first_weekday: Weekday::Monday,
            minimum_days_in_first_week: 4,
            disambiguation: Disambiguation::default(),
        }
    }

    /// The default configuration for a calendar identifier.
    pub fn of(identifier: CalendarIdentifier, time_zone: TimeZone) -> Self {
        match identifier {
            CalendarIdentifier::Gregorian => Self::gregorian(time_zone),
            CalendarIdentifier::Iso8601   => Self::iso8601(time_zone),
        }
    }

    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    /// Sets how many days of the new year the first week needs. Values
    /// are clamped to the range 1 to 7.
    pub fn with_minimum_days_in_first_week(mut self, days: i8) -> Self {
        self.minimum_days_in_first_week = days.max(1).min(7);
        self
    }

    pub fn with_disambiguation(mut self, disambiguation: Disambiguation) -> Self {
        self.disambiguation = disambiguation;
        self
    }

    pub fn identifier(&self) -> CalendarIdentifier {
        self.identifier
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn minimum_days_in_first_week(&self) -> i8 {
        self.minimum_days_in_first_week
    }

    pub fn disambiguation(&self) -> Disambiguation {
        self.disambiguation
    }

    /// Returns the date that week 1 of the given week-numbering year
    /// starts on.
    pub(crate) fn first_week_start(&self, year: i64) -> i64 {
        self.week_one_start(days_from_civil(year, Month::January, 1))
    }

    /// Returns the start of week 1 in a span that starts on the given day,
    /// either a year or a month.
    pub(crate) fn week_one_start(&self, first_day: i64) -> i64 {
        let weekday = LocalDate::from_days_since_epoch(first_day).weekday();
        let into_week = weekday.days_since(self.first_weekday);
        let week_start = first_day - into_week;

        // The partial week counts as week 1 only if enough of it lies in
        // the span.
        if 7 - into_week >= self.minimum_days_in_first_week as i64 {
            week_start
        }
        else {
            week_start + 7
        }
    }

    /// Returns the number of weeks in the given week-numbering year, which
    /// is either 52 or 53.
    pub(crate) fn weeks_in_year(&self, year: i64) -> i64 {
        (self.first_week_start(year + 1) - self.first_week_start(year)) / 7
    }

    /// Returns the week-numbering year and the week of that year for the
    /// given date.
    pub(crate) fn week_of_year(&self, date: LocalDate) -> (i64, i64) {
        let days = date.days_since_epoch();
        let year = date.year();

        let next_start = self.first_week_start(year + 1);
        if days >= next_start {
            return (year + 1, 1);
        }

        let this_start = self.first_week_start(year);
        if days >= this_start {
            return (year, (days - this_start) / 7 + 1);
        }

        let last_start = self.first_week_start(year - 1);
        (year - 1, (days - last_start) / 7 + 1)
    }

    /// Returns the week of the month for the given date, which is 0 for
    /// days before the month’s first full week.
    pub(crate) fn week_of_month(&self, date: LocalDate) -> i64 {
        let days = date.days_since_epoch();
        let first = days - (date.day() as i64 - 1);
        let start = self.week_one_start(first);
        split_cycles(days - start, 7).0 + 1
    }

    /// Returns the first day of the week the given date lies in.
    pub(crate) fn start_of_week(&self, date: LocalDate) -> LocalDate {
        date.add_days(-date.weekday().days_since(self.first_weekday))
    }
}

/// Something that hands out a calendar configuration whenever it’s asked.
pub trait CalendarProvider: Send + Sync {
    fn current(&self) -> Result<CalendarSystem>;
}

impl CalendarProvider for CalendarSystem {
    fn current(&self) -> Result<CalendarSystem> {
        Ok(self.clone())
    }
}


/// A calendar that follows the computer’s current time zone, looking it
/// up again on every call rather than keeping the zone it first saw.
#[derive(Debug, Clone)]
pub struct AutoUpdatingCalendar<P> {
    identifier: CalendarIdentifier,
    zones: P,
}

impl<P: ZoneProvider> AutoUpdatingCalendar<P> {
    pub fn new(identifier: CalendarIdentifier, zones: P) -> Self {
        Self { identifier, zones }
    }
}

impl<P: ZoneProvider> CalendarProvider for AutoUpdatingCalendar<P> {
    fn current(&self) -> Result<CalendarSystem> {
        let zone = match sys_timezone() {
            Some(name) => self.zones.zone_by_name(&name).unwrap_or_else(|_e| {
                warn!("system time zone {:?} is unavailable ({}); using UTC", name, _e);
                TimeZone::utc()
            }),
            None => {
                debug!("no system time zone set; using UTC");
                TimeZone::utc()
            },
        };

        Ok(CalendarSystem::of(self.identifier, zone))
    }
}
