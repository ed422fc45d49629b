//! Sparse sets of calendar fields.

use std::fmt;

use crate::cal::calendar::{CalendarIdentifier, CalendarSystem};
use crate::cal::engine::CalendarEngine;
use crate::cal::zone::TimeZone;


/// One of the units a date and time can be broken down into.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum CalendarField {

    /// 0 for BC, 1 for AD.
    Era,

    /// The year within the era, so 1 BC is year 1 of era 0.
    Year,

    /// The month of the year, from 1 to 12.
    Month,

    /// The day of the month, from 1 to 31.
    Day,

    Hour,
    Minute,
    Second,
    Nanosecond,

    /// The day of the week, from 1 (Sunday) to 7 (Saturday).
    Weekday,

    /// Which occurrence of its weekday a day is within its month, so the
    /// second Tuesday has an ordinal of 2. Negative values count backwards
    /// from the end of the month.
    WeekdayOrdinal,

    /// The quarter of the year, from 1 to 4.
    Quarter,

    WeekOfMonth,
    WeekOfYear,

    /// The year that a week-of-year number belongs to, which differs from
    /// the calendar year for some days around New Year.
    YearForWeekOfYear,
}

use self::CalendarField::*;

impl CalendarField {

    /// Every field, in the order they’re stored.
    pub const ALL: [CalendarField; 14] = [
        Era, Year, Month, Day, Hour, Minute, Second, Nanosecond,
        Weekday, WeekdayOrdinal, Quarter, WeekOfMonth, WeekOfYear, YearForWeekOfYear,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether this field is part of the time of day, rather than the date.
    pub fn is_time_field(self) -> bool {
        matches!(self, Hour | Minute | Second | Nanosecond)
    }
}


/// A sparse collection of calendar field values, along with an optional
/// calendar and time zone.
///
/// A field set is just data: it makes no attempt to keep its fields
/// consistent with each other, and an unset field is different from a
/// field set to zero. It gets its meaning from a `CalendarEngine`, which
/// turns it into an instant, produces one from an instant, or applies it
/// as a set of amounts to add.
///
/// ### Examples
///
/// ```
/// use calendrical::{CalendarFieldSet, CalendarField};
///
/// let fields = CalendarFieldSet::new().with_year(2024).with_month(2).with_day(29);
/// assert_eq!(fields.month(), Some(2));
/// assert!(!fields.is_set(CalendarField::Hour));
/// ```
#[derive(PartialEq, Clone, Default)]
pub struct CalendarFieldSet {
    values: [Option<i64>; 14],
    calendar: Option<CalendarIdentifier>,
    time_zone: Option<TimeZone>,
}

macro_rules! accessors {
    ($($field: ident => $getter: ident, $builder: ident;)*) => {
        $(
            pub fn $getter(&self) -> Option<i64> {
                self.get(CalendarField::$field)
            }

            pub fn $builder(self, value: i64) -> Self {
                self.with(CalendarField::$field, value)
            }
        )*
    };
}

impl CalendarFieldSet {

    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    accessors! {
        Era               => era,                   with_era;
        Year              => year,                  with_year;
        Month             => month,                 with_month;
        Day               => day,                   with_day;
        Hour              => hour,                  with_hour;
        Minute            => minute,                with_minute;
        Second            => second,                with_second;
        Nanosecond        => nanosecond,            with_nanosecond;
        Weekday           => weekday,               with_weekday;
        WeekdayOrdinal    => weekday_ordinal,       with_weekday_ordinal;
        Quarter           => quarter,               with_quarter;
        WeekOfMonth       => week_of_month,         with_week_of_month;
        WeekOfYear        => week_of_year,          with_week_of_year;
        YearForWeekOfYear => year_for_week_of_year, with_year_for_week_of_year;
    }

    /// Returns this set with the given field set to the given value.
    pub fn with(mut self, field: CalendarField, value: i64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Sets or clears a field.
    pub fn set(&mut self, field: CalendarField, value: Option<i64>) {
        self.values[field.index()] = value;
    }

    pub fn get(&self, field: CalendarField) -> Option<i64> {
        self.values[field.index()]
    }

    pub fn is_set(&self, field: CalendarField) -> bool {
        self.get(field).is_some()
    }

    /// Whether no field at all has been set.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Iterates over the fields that have been set, with their values.
    pub fn iter(&self) -> impl Iterator<Item=(CalendarField, i64)> + '_ {
        CalendarField::ALL.iter()
                          .filter_map(move |f| self.get(*f).map(|v| (*f, v)))
    }

    pub fn with_calendar(mut self, calendar: CalendarIdentifier) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    pub fn calendar(&self) -> Option<CalendarIdentifier> {
        self.calendar
    }

    pub fn time_zone(&self) -> Option<&TimeZone> {
        self.time_zone.as_ref()
    }

    /// Returns whether these fields name at least one real date in the
    /// given calendar.
    ///
    /// When no year is set, this asks whether there is *any* year that
    /// fits, so the 29th of February is valid but the 30th never is. Time
    /// fields have to be in range, and weekday and week fields have to
    /// agree with the rest of the date.
    pub fn is_valid_date(&self, calendar: &CalendarSystem) -> bool {
        CalendarEngine::new(calendar.clone()).is_valid(self)
    }
}

impl fmt::Debug for CalendarFieldSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in self.iter() {
            let _ = map.entry(&field, &value);
        }
        if let Some(ref calendar) = self.calendar {
            let _ = map.entry(&"calendar", calendar);
        }
        if let Some(ref zone) = self.time_zone {
            let _ = map.entry(&"time_zone", &zone.zone_name());
        }
        map.finish()
    }
}
