//! The calendar engine, which turns field sets into instants and back
//! again, and does calendar-aware arithmetic and searching.

use std::borrow::Cow;
use std::cmp::{Ordering, Reverse};
use std::ops::Range;

use num_traits::FromPrimitive;

use crate::cal::{DatePiece, TimePiece, LocalDate, LocalTime, LocalDateTime, Month, Weekday, Year, YearMonth};
use crate::cal::{MIN_YEAR, MAX_YEAR};
use crate::cal::calendar::CalendarSystem;
use crate::cal::datetime::{days_from_civil, DAYS_IN_400Y, SECONDS_IN_DAY};
use crate::cal::fields::{CalendarField, CalendarFieldSet};
use crate::cal::zone::{LocalTimes, TimeZone};
use crate::clock::Clock;
use crate::duration::{Duration, NANOS_PER_SECOND};
use crate::error::{Error, Result};
use crate::instant::Instant;
use crate::interval::Interval;
use crate::util::{RangeExt, split_cycles};


/// How many days `next_occurrence` looks through before giving up. This is
/// one whole cycle of the Gregorian calendar, after which every pattern of
/// months, days and weekdays repeats.
pub const SEARCH_HORIZON_DAYS: i64 = DAYS_IN_400Y;

/// Field values larger than this are rejected outright, which keeps all
/// the arithmetic below well inside an `i64`.
const MAX_FIELD_MAGNITUDE: i64 = 1_000_000_000_000;

/// The largest number of days from the epoch to a representable date.
const MAX_DAYS: i64 = 400_000_000_000;


/// What `next_occurrence` should do when the wall-clock time it’s looking
/// for is skipped by a daylight-saving transition.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum MatchingPolicy {

    /// Return the first instant after the gap.
    NextTime,

    /// Don’t match a time that doesn’t exist; keep searching instead.
    Strict,

    /// Return the time one gap-length earlier, keeping any smaller fields,
    /// so 02:30 in a one-hour gap matches 01:30.
    PreviousTimePreservingSmallerFields,
}


/// Whether invalid values are errors or get carried into the next unit.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum Resolution {
    Strict,
    Normalizing,
}


/// Calendar computations, all performed against one `CalendarSystem`.
///
/// ### Examples
///
/// ```
/// use calendrical::{CalendarEngine, CalendarSystem, CalendarFieldSet, TimeZone};
///
/// let engine = CalendarEngine::new(CalendarSystem::gregorian(TimeZone::utc()));
/// let fields = CalendarFieldSet::new().with_year(2001).with_month(1).with_day(1);
/// assert_eq!(engine.to_instant(&fields).unwrap().seconds(), 978_307_200);
/// ```
#[derive(PartialEq, Debug, Clone)]
pub struct CalendarEngine {
    system: CalendarSystem,
}

impl CalendarEngine {
    pub fn new(system: CalendarSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &CalendarSystem {
        &self.system
    }

    fn zone(&self) -> &TimeZone {
        self.system.time_zone()
    }

    fn local(&self, instant: Instant) -> LocalDateTime {
        self.zone().to_local(instant)
    }

    /// The system to resolve the given fields with, taking any calendar
    /// they carry into account.
    fn system_for(&self, fields: &CalendarFieldSet) -> Cow<CalendarSystem> {
        match fields.calendar() {
            Some(id) if id != self.system.identifier() => {
                Cow::Owned(CalendarSystem::of(id, self.zone().clone())
                               .with_disambiguation(self.system.disambiguation()))
            },
            _ => Cow::Borrowed(&self.system),
        }
    }


    // ---- field sets to instants ----

    /// Returns the instant named by a set of calendar fields, filling in
    /// any unset fields with defaults.
    ///
    /// Unset time fields are 0, an unset month is January (or the first
    /// month of the quarter, if one is set), and the day is worked out from
    /// the weekday and week fields if there’s no day of the month. With no
    /// year, the year 1 AD is used, or 4 AD for the 29th of February.
    ///
    /// Values out of range, and fields that contradict each other, are an
    /// `UnresolvableDate` error. Times that the zone skips or repeats are
    /// handled according to the calendar’s `Disambiguation`.
    pub fn to_instant(&self, fields: &CalendarFieldSet) -> Result<Instant> {
        self.resolve(fields, Resolution::Strict)
    }

    /// Like `to_instant`, except that values out of range are carried into
    /// the next unit, so the 31st of February is the 2nd or 3rd of March,
    /// and hour 25 is 1 o’clock the next day.
    pub fn to_instant_normalizing(&self, fields: &CalendarFieldSet) -> Result<Instant> {
        self.resolve(fields, Resolution::Normalizing)
    }

    fn resolve(&self, fields: &CalendarFieldSet, resolution: Resolution) -> Result<Instant> {
        let local = self.resolve_local(fields, resolution)?;
        let zone = fields.time_zone().unwrap_or_else(|| self.zone());
        zone.resolve_local(local, self.system.disambiguation())
    }

    /// Whether the fields name a real date in *some* year.
    pub(crate) fn is_valid(&self, fields: &CalendarFieldSet) -> bool {
        if self.resolve_local(fields, Resolution::Strict).is_ok() {
            return true;
        }

        if fields.is_set(CalendarField::Year) || fields.is_set(CalendarField::YearForWeekOfYear) {
            return false;
        }

        // Weekdays and week numbers land on different dates in different
        // years, but they all repeat every 400 years.
        let year_dependent = [CalendarField::Weekday, CalendarField::WeekdayOrdinal, CalendarField::WeekOfMonth, CalendarField::WeekOfYear]
                                .iter().any(|f| fields.is_set(*f));

        year_dependent && (1 ..= 400).any(|year| {
            let fields = fields.clone().with_year(year);
            self.resolve_local(&fields, Resolution::Strict).is_ok()
        })
    }

    fn resolve_local(&self, fields: &CalendarFieldSet, resolution: Resolution) -> Result<LocalDateTime> {
        let system = self.system_for(fields);
        let strict = resolution == Resolution::Strict;

        for (field, value) in fields.iter() {
            if value.abs() > MAX_FIELD_MAGNITUDE {
                return Err(out_of_range(field, value));
            }
        }

        // Time of day.
        let hour = fields.hour().unwrap_or(0);
        let minute = fields.minute().unwrap_or(0);
        let second = fields.second().unwrap_or(0);
        let nanosecond = fields.nanosecond().unwrap_or(0);

        if strict {
            check_range(CalendarField::Hour, hour, 0 .. 24)?;
            check_range(CalendarField::Minute, minute, 0 .. 60)?;
            check_range(CalendarField::Second, second, 0 .. 60)?;
            check_range(CalendarField::Nanosecond, nanosecond, 0 .. NANOS_PER_SECOND)?;
        }

        // Era and year.
        if let Some(era) = fields.era() {
            if strict {
                check_range(CalendarField::Era, era, 0 .. 2)?;
                if let Some(year) = fields.year() {
                    check_range(CalendarField::Year, year, 1 .. MAX_FIELD_MAGNITUDE)?;
                }
            }
        }

        let year = match fields.year() {
            Some(year) => proleptic_year(fields.era(), year),
            None       => default_year(fields),
        };

        // Month, possibly from the quarter.
        if let Some(quarter) = fields.quarter() {
            if strict {
                check_range(CalendarField::Quarter, quarter, 1 .. 5)?;
            }
        }

        let month = match (fields.month(), fields.quarter()) {
            (Some(month), _)      => month,
            (None, Some(quarter)) => (quarter - 1) * 3 + 1,
            (None, None)          => 1,
        };

        if strict {
            check_range(CalendarField::Month, month, 1 .. 13)?;
        }

        let (year, month) = split_cycles(year * 12 + month - 1, 12);
        if !Year(year).is_representable() {
            return Err(Error::unresolvable(format!("year {} is out of range", year)));
        }

        let month = Month::from_zero(month as i8)?;
        let year_month = Year(year).month(month);
        let first_of_month = days_from_civil(year, month, 1);

        let weekday = match fields.weekday() {
            Some(w) if strict => Some(Weekday::from_field_value(w)?),
            Some(w)           => Some(Weekday::from_field_value(split_cycles(w - 1, 7).1 + 1)?),
            None              => None,
        };

        let first_weekday = system.first_weekday();
        let week_based = !fields.is_set(CalendarField::Month) && !fields.is_set(CalendarField::Day)
                      && (fields.is_set(CalendarField::WeekOfYear) || fields.is_set(CalendarField::YearForWeekOfYear));

        // Day of the month, from whichever fields are available.
        let days = if let Some(day) = fields.day() {
            if strict {
                check_range(CalendarField::Day, day, 1 .. year_month.day_count() as i64 + 1)?;
            }
            first_of_month + day - 1
        }
        else if let (Some(weekday), Some(ordinal)) = (weekday, fields.weekday_ordinal()) {
            nth_weekday(year_month, weekday, ordinal, resolution)?
        }
        else if let Some(week) = fields.week_of_month() {
            let weekday = weekday.unwrap_or(first_weekday);
            let days = system.week_one_start(first_of_month) + 7 * (week - 1) + weekday.days_since(first_weekday);
            if strict && !(days - first_of_month).is_within(0 .. year_month.day_count() as i64) {
                return Err(out_of_range(CalendarField::WeekOfMonth, week));
            }
            days
        }
        else if week_based {
            let week_year = fields.year_for_week_of_year().unwrap_or(year);
            let week = fields.week_of_year().unwrap_or(1);
            if !Year(week_year).is_representable() {
                return Err(out_of_range(CalendarField::YearForWeekOfYear, week_year));
            }
            if strict {
                check_range(CalendarField::WeekOfYear, week, 1 .. system.weeks_in_year(week_year) + 1)?;
            }
            let weekday = weekday.unwrap_or(first_weekday);
            system.first_week_start(week_year) + 7 * (week - 1) + weekday.days_since(first_weekday)
        }
        else if let Some(weekday) = weekday {
            let first = LocalDate::from_days_since_epoch(first_of_month).weekday();
            first_of_month + weekday.days_since(first)
        }
        else {
            first_of_month
        };

        let seconds = linear(&[ (days, SECONDS_IN_DAY), (hour, 3600), (minute, 60), (second, 1) ])?;
        let local = LocalDateTime::from_instant(Instant::at_nanos(seconds, nanosecond));

        if !Year(local.year()).is_representable() {
            return Err(Error::unresolvable(format!("year {} is out of range", local.year())));
        }

        if strict {
            self.check_consistency(&system, fields, local.date(), week_based)?;
        }

        Ok(local)
    }

    /// Checks every set date field against the date they resolved to.
    fn check_consistency(&self, system: &CalendarSystem, fields: &CalendarFieldSet, date: LocalDate, week_based: bool) -> Result<()> {
        for (field, value) in fields.iter() {
            let agrees = match field {
                CalendarField::Era | CalendarField::Year if week_based => true,
                CalendarField::Year => match fields.era() {
                    Some(_) => era_and_year(date.year()).1 == value,
                    None    => date.year() == value,
                },
                f if f.is_time_field() => true,
                f => date_field_matches(system, f, value, date),
            };

            if !agrees {
                return Err(Error::unresolvable(format!("{:?} {} contradicts the date {:?}", field, value, date)));
            }
        }

        Ok(())
    }


    // ---- instants to field sets ----

    /// Breaks an instant down into the requested fields, in this engine’s
    /// time zone. The resulting set carries the zone and the calendar.
    pub fn to_field_set(&self, instant: Instant, fields: &[CalendarField]) -> CalendarFieldSet {
        let local = self.local(instant);
        let mut set = CalendarFieldSet::new()
                          .with_calendar(self.system.identifier())
                          .with_time_zone(self.zone().clone());

        for field in fields {
            let value = match *field {
                CalendarField::Hour       => local.hour() as i64,
                CalendarField::Minute     => local.minute() as i64,
                CalendarField::Second     => local.second() as i64,
                CalendarField::Nanosecond => local.nanosecond() as i64,
                other                     => date_field(&self.system, other, local.date()),
            };

            set.set(*field, Some(value));
        }

        set
    }


    // ---- arithmetic ----

    /// Adds a set of amounts to an instant.
    ///
    /// The amounts are applied largest first: years, then months (and
    /// quarters), after which the day is moved back to the end of the month
    /// if it has run past it; then days (and weeks), after which the
    /// wall-clock time is found again in the time zone; and finally hours,
    /// minutes, seconds and nanoseconds as exact amounts of elapsed time.
    ///
    /// ```
    /// use calendrical::{CalendarEngine, CalendarSystem, CalendarFieldSet, TimeZone, Instant};
    ///
    /// let engine = CalendarEngine::new(CalendarSystem::gregorian(TimeZone::utc()));
    /// let jan_31 = engine.to_instant(&CalendarFieldSet::new().with_year(2023).with_month(1).with_day(31)).unwrap();
    /// let feb_28 = engine.to_instant(&CalendarFieldSet::new().with_year(2023).with_month(2).with_day(28)).unwrap();
    /// assert_eq!(engine.add_fields(&CalendarFieldSet::new().with_month(1), jan_31), Ok(feb_28));
    /// ```
    pub fn add_fields(&self, delta: &CalendarFieldSet, instant: Instant) -> Result<Instant> {
        if delta.era().map_or(false, |era| era != 0) {
            return Err(Error::nonexistent("eras cannot be added"));
        }

        for (field, value) in delta.iter() {
            if value.abs() > MAX_FIELD_MAGNITUDE {
                return Err(Error::nonexistent(format!("{:?} amount {} is too large", field, value)));
            }
        }

        let amount = |field| delta.get(field).unwrap_or(0);

        let months = linear(&[
            (amount(CalendarField::Year), 12),
            (amount(CalendarField::YearForWeekOfYear), 12),
            (amount(CalendarField::Month), 1),
            (amount(CalendarField::Quarter), 3),
        ])?;

        let days = linear(&[
            (amount(CalendarField::Day), 1),
            (amount(CalendarField::Weekday), 1),
            (amount(CalendarField::WeekOfYear), 7),
            (amount(CalendarField::WeekOfMonth), 7),
            (amount(CalendarField::WeekdayOrdinal), 7),
        ])?;

        let local = self.local(instant);
        let mut date = local.date();

        if months != 0 {
            let year_month = date.year_month().offset(months)?;
            let day = date.day().min(year_month.day_count());
            date = year_month.day(day)?;
        }

        if days != 0 {
            let days = date.days_since_epoch() + days;
            if days.abs() > MAX_DAYS {
                return Err(Error::nonexistent(format!("{} days from the epoch is out of range", days)));
            }
            date = LocalDate::from_days_since_epoch(days);
        }

        if !Year(date.year()).is_representable() {
            return Err(Error::nonexistent(format!("year {} is out of range", date.year())));
        }

        let moved = if date == local.date() {
            instant
        }
        else {
            self.zone().resolve_local(LocalDateTime::new(date, local.time()), self.system.disambiguation())?
        };

        let seconds = linear(&[
            (amount(CalendarField::Hour), 3600),
            (amount(CalendarField::Minute), 60),
            (amount(CalendarField::Second), 1),
        ])?;

        let result = moved + Duration::of_nanos(seconds, amount(CalendarField::Nanosecond));
        if !Year(self.local(result).year()).is_representable() {
            return Err(Error::nonexistent("result is out of range"));
        }

        Ok(result)
    }

    /// Returns the instant with one field changed and every other field
    /// kept the same.
    ///
    /// Week-based fields keep the weekday, so changing the week of the
    /// year moves to the same weekday in another week, and changing the
    /// quarter keeps the month’s position in the quarter. Nothing gets
    /// clamped: setting the month of the 31st of January to February is an
    /// `UnresolvableDate` error.
    pub fn set_field(&self, field: CalendarField, value: i64, instant: Instant) -> Result<Instant> {
        let local = self.local(instant);
        let date = local.date();
        let time = local.time();
        let first_weekday = self.system.first_weekday();

        let (date, time) = match field {
            CalendarField::Era => {
                let (_, year_of_era) = era_and_year(date.year());
                check_range(field, value, 0 .. 2)?;
                (LocalDate::ymd(proleptic_year(Some(value), year_of_era), date.month(), date.day())?, time)
            },
            CalendarField::Year => {
                let (era, _) = era_and_year(date.year());
                check_range(field, value, 1 .. MAX_FIELD_MAGNITUDE)?;
                (LocalDate::ymd(proleptic_year(Some(era), value), date.month(), date.day())?, time)
            },
            CalendarField::Month => {
                let month = Month::from_one(narrow(field, value)?)?;
                (LocalDate::ymd(date.year(), month, date.day())?, time)
            },
            CalendarField::Day => {
                (LocalDate::ymd(date.year(), date.month(), narrow(field, value)?)?, time)
            },
            CalendarField::Quarter => {
                check_range(field, value, 1 .. 5)?;
                let month = (value - 1) * 3 + (date.month().months_from_january() % 3) as i64 + 1;
                (LocalDate::ymd(date.year(), Month::from_one(month as i8)?, date.day())?, time)
            },
            CalendarField::Hour => {
                (date, LocalTime::hms_nanos(narrow(field, value)?, time.minute(), time.second(), time.nanosecond())?)
            },
            CalendarField::Minute => {
                (date, LocalTime::hms_nanos(time.hour(), narrow(field, value)?, time.second(), time.nanosecond())?)
            },
            CalendarField::Second => {
                (date, LocalTime::hms_nanos(time.hour(), time.minute(), narrow(field, value)?, time.nanosecond())?)
            },
            CalendarField::Nanosecond => {
                (date, LocalTime::hms_nanos(time.hour(), time.minute(), time.second(), narrow(field, value)?)?)
            },
            CalendarField::Weekday => {
                let weekday = Weekday::from_field_value(value)?;
                let shift = weekday.days_since(first_weekday) - date.weekday().days_since(first_weekday);
                (date.add_days(shift), time)
            },
            CalendarField::WeekdayOrdinal => {
                let days = nth_weekday(date.year_month(), date.weekday(), value, Resolution::Strict)?;
                (LocalDate::from_days_since_epoch(days), time)
            },
            CalendarField::WeekOfMonth => {
                let first_of_month = date.days_since_epoch() - (date.day() as i64 - 1);
                let days = self.system.week_one_start(first_of_month) + 7 * (value - 1) + date.weekday().days_since(first_weekday);
                let moved = LocalDate::from_days_since_epoch(days);
                if moved.year_month() != date.year_month() {
                    return Err(out_of_range(field, value));
                }
                (moved, time)
            },
            CalendarField::WeekOfYear => {
                let (week_year, _) = self.system.week_of_year(date);
                (self.date_in_week(week_year, value, date.weekday())?, time)
            },
            CalendarField::YearForWeekOfYear => {
                let (_, week) = self.system.week_of_year(date);
                (self.date_in_week(value, week, date.weekday())?, time)
            },
        };

        self.zone().resolve_local(LocalDateTime::new(date, time), self.system.disambiguation())
    }

    fn date_in_week(&self, week_year: i64, week: i64, weekday: Weekday) -> Result<LocalDate> {
        if !Year(week_year).is_representable() {
            return Err(out_of_range(CalendarField::YearForWeekOfYear, week_year));
        }

        check_range(CalendarField::WeekOfYear, week, 1 .. self.system.weeks_in_year(week_year) + 1)?;
        let first_weekday = self.system.first_weekday();
        let days = self.system.first_week_start(week_year) + 7 * (week - 1) + weekday.days_since(first_weekday);
        Ok(LocalDate::from_days_since_epoch(days))
    }

    /// Returns the calendar amounts between two instants, in the given
    /// units, largest first. Each amount is the largest that doesn’t
    /// overshoot `to`, and they’re all negative when `to` comes first.
    pub fn difference(&self, units: &[CalendarField], from: Instant, to: Instant) -> CalendarFieldSet {
        let mut units = units.to_vec();
        units.sort_by_key(|unit| (Reverse(unit_size(*unit)), *unit));
        units.dedup();

        let mut cursor = from;
        let mut result = CalendarFieldSet::new();

        for unit in units {
            let (amount, moved) = match unit {
                CalendarField::Era        => (0, cursor),
                CalendarField::Hour       => clock_step(cursor, to, 3600 * NANOS_PER_SECOND),
                CalendarField::Minute     => clock_step(cursor, to, 60 * NANOS_PER_SECOND),
                CalendarField::Second     => clock_step(cursor, to, NANOS_PER_SECOND),
                CalendarField::Nanosecond => clock_step(cursor, to, 1),
                _                         => self.largest_step(unit, cursor, to),
            };

            cursor = moved;
            result.set(unit, Some(amount));
        }

        trace!("difference from {:?} to {:?} is {:?}", from, to, result);
        result
    }

    /// Finds how many of a calendar unit fit between two instants by
    /// doubling the amount until it overshoots, then bisecting. Returns
    /// the count along with the instant it reaches.
    fn largest_step(&self, unit: CalendarField, from: Instant, to: Instant) -> (i64, Instant) {
        let sign = if to >= from { 1 } else { -1 };
        let step = |amount: i64| {
            self.add_fields(&CalendarFieldSet::new().with(unit, sign * amount), from).ok()
                .filter(|moved| if sign > 0 { *moved <= to } else { *moved >= to })
        };

        let mut low = (0, from);
        let mut high = 1;
        while let Some(moved) = step(high) {
            low = (high, moved);
            high *= 2;
            if high > MAX_FIELD_MAGNITUDE {
                break;
            }
        }

        while high - low.0 > 1 {
            let middle = low.0 + (high - low.0) / 2;
            match step(middle) {
                Some(moved) => low = (middle, moved),
                None        => high = middle,
            }
        }

        (sign * low.0, low.1)
    }


    // ---- searching ----

    /// Finds the earliest instant strictly after `after` that matches
    /// every field set in the pattern.
    ///
    /// If the pattern has no time fields, the time of day of `after` is
    /// kept, so looking for the next Monday on a Wednesday gives a result
    /// exactly five days later. When only the day of `after` itself
    /// matches, the answer is the next whole second. Otherwise, unset time
    /// fields smaller than the smallest one set are zero, and larger ones
    /// are searched through.
    ///
    /// The search covers one 400-year cycle of days before failing with
    /// `NoMatch`.
    pub fn next_occurrence(&self, pattern: &CalendarFieldSet, after: Instant, policy: MatchingPolicy) -> Result<Instant> {
        let no_match = |days_searched| Error::NoMatch { days_searched };

        if pattern.iter().any(|(field, value)| !pattern_value_in_range(field, value)) {
            debug!("pattern {:?} has a value that can never match", pattern);
            return Err(no_match(0));
        }

        let start = self.local(after);
        let mut date = start.date();

        // A pattern year tells the search where to start, and whether
        // there’s any point starting at all.
        let target_year = pattern.year().map(|year| proleptic_year(pattern.era(), year));
        if let Some(year) = target_year {
            if year < date.year() {
                return Err(no_match(0));
            }
            else if year > date.year() {
                date = LocalDate::from_days_since_epoch(days_from_civil(year, Month::January, 1));
            }
        }
        else if let Some(week_year) = pattern.year_for_week_of_year() {
            let (current, _) = self.system.week_of_year(date);
            if week_year < current {
                return Err(no_match(0));
            }
            else if week_year > current {
                date = LocalDate::from_days_since_epoch(self.system.first_week_start(week_year));
            }
        }

        let times = TimeSearch::new(pattern, start.time());
        let mut searched = 0;

        while searched < SEARCH_HORIZON_DAYS {
            if target_year.map_or(false, |year| date.year() > year) || !Year(date.year()).is_representable() {
                break;
            }

            if self.date_matches(pattern, date) {
                for time in times.candidates() {
                    if let Some(found) = self.match_at(LocalDateTime::new(date, time), after, policy) {
                        return Ok(found);
                    }
                }
            }

            date = date.add_days(1);
            searched += 1;
        }

        // With no time fields, the rest of the first day matches as well,
        // which matters when no later day does.
        if !pattern.iter().any(|(field, _)| field.is_time_field()) {
            let next_second = Instant::at(after.seconds().saturating_add(1));
            let local = self.local(next_second);
            if local.date() == start.date() && self.date_matches(pattern, local.date()) {
                return Ok(next_second);
            }
        }

        warn!("no match for {:?} within {} days of {:?}", pattern, searched, after);
        Err(no_match(searched))
    }

    fn date_matches(&self, pattern: &CalendarFieldSet, date: LocalDate) -> bool {
        pattern.iter().all(|(field, value)| {
            match field {
                CalendarField::Year => era_and_year(date.year()).1 == value && pattern.era().map_or(date.year() >= 1, |era| era == era_and_year(date.year()).0),
                f if f.is_time_field() => true,
                f => date_field_matches(&self.system, f, value, date),
            }
        })
    }

    /// Resolves a matching wall-clock time, returning it if it comes after
    /// the instant being searched from.
    fn match_at(&self, wall: LocalDateTime, after: Instant, policy: MatchingPolicy) -> Option<Instant> {
        match self.zone().convert_local(wall) {
            LocalTimes::Precise(instant) => Some(instant).filter(|i| *i > after),
            LocalTimes::Ambiguous { earlier, later } => {
                if earlier > after { Some(earlier) }
                else if later > after { Some(later) }
                else { None }
            },
            LocalTimes::Impossible { transition, earlier, .. } => {
                trace!("{:?} is skipped in this zone; matching with {:?}", wall, policy);
                let found = match policy {
                    MatchingPolicy::NextTime                            => Some(transition),
                    MatchingPolicy::Strict                              => None,
                    MatchingPolicy::PreviousTimePreservingSmallerFields => Some(earlier),
                };
                found.filter(|i| *i > after)
            },
        }
    }


    // ---- days and units ----

    /// Returns the first instant of the day the given instant falls on.
    /// If the zone skips midnight, this is the moment the day begins; if
    /// midnight happens twice, it’s the first of the two.
    pub fn start_of_day(&self, instant: Instant) -> Instant {
        self.midnight(self.local(instant).date())
    }

    fn midnight(&self, date: LocalDate) -> Instant {
        match self.zone().convert_local(LocalDateTime::new(date, LocalTime::midnight())) {
            LocalTimes::Precise(instant)                => instant,
            LocalTimes::Ambiguous { earlier, .. }       => earlier,
            LocalTimes::Impossible { transition, .. }   => transition,
        }
    }

    /// Compares two instants to the precision of the given unit, so two
    /// instants on the same day are equal at day granularity.
    pub fn compare_granularity(&self, a: Instant, b: Instant, unit: CalendarField) -> Ordering {
        match unit {
            CalendarField::Nanosecond => a.cmp(&b),
            CalendarField::Second     => a.seconds().cmp(&b.seconds()),
            _                         => self.truncate(a, unit).cmp(&self.truncate(b, unit)),
        }
    }

    fn truncate(&self, instant: Instant, unit: CalendarField) -> [i64; 3] {
        let local = self.local(instant);
        let date = local.date();

        match unit {
            CalendarField::Era     => [era_and_year(date.year()).0, 0, 0],
            CalendarField::Year    => [date.year(), 0, 0],
            CalendarField::Quarter => [date.year(), date.quarter() as i64, 0],
            CalendarField::Month   => [date.year(), date.month() as i64, 0],
            CalendarField::WeekOfYear | CalendarField::YearForWeekOfYear => {
                let (week_year, week) = self.system.week_of_year(date);
                [week_year, week, 0]
            },
            CalendarField::WeekOfMonth => [date.year(), date.month() as i64, self.system.week_of_month(date)],
            CalendarField::Hour        => [date.days_since_epoch(), local.hour() as i64, 0],
            CalendarField::Minute      => [date.days_since_epoch(), local.hour() as i64, local.minute() as i64],
            _                          => [date.days_since_epoch(), 0, 0],
        }
    }

    /// Whether the instant falls on a Saturday or a Sunday.
    pub fn is_weekend(&self, instant: Instant) -> bool {
        self.local(instant).weekday().is_weekend()
    }

    /// Whether the instant falls on the same day as the clock’s current
    /// time.
    pub fn is_date_in_today(&self, instant: Instant, clock: &dyn Clock) -> bool {
        self.local(instant).date() == self.local(clock.now()).date()
    }

    /// Returns the interval covering the whole of the unit (the day, the
    /// month, the week…) that the given instant falls in.
    pub fn date_interval(&self, unit: CalendarField, instant: Instant) -> Result<Interval> {
        let local = self.local(instant);
        let date = local.date();

        let (first, next) = match unit {
            CalendarField::Era => {
                return Err(Error::nonexistent("an era has no bounded interval"));
            },
            CalendarField::Year => {
                let first = date.add_days(-(date.yearday() as i64 - 1));
                (first, first.add_days(Year(date.year()).day_count()))
            },
            CalendarField::Quarter => {
                let first_month = Month::from_one((date.quarter() - 1) * 3 + 1)?;
                let year_month = Year(date.year()).month(first_month);
                (year_month.day(1)?, year_month.offset(3)?.day(1)?)
            },
            CalendarField::Month => {
                let year_month = date.year_month();
                (year_month.day(1)?, year_month.offset(1)?.day(1)?)
            },
            CalendarField::WeekOfYear | CalendarField::WeekOfMonth => {
                let first = self.system.start_of_week(date);
                (first, first.add_days(7))
            },
            CalendarField::YearForWeekOfYear => {
                let (week_year, _) = self.system.week_of_year(date);
                (LocalDate::from_days_since_epoch(self.system.first_week_start(week_year)),
                 LocalDate::from_days_since_epoch(self.system.first_week_start(week_year + 1)))
            },
            CalendarField::Day | CalendarField::Weekday | CalendarField::WeekdayOrdinal => {
                (date, date.add_days(1))
            },
            CalendarField::Hour   => return clock_interval(instant, local, 3600),
            CalendarField::Minute => return clock_interval(instant, local, 60),
            CalendarField::Second => return clock_interval(instant, local, 1),
            CalendarField::Nanosecond => {
                return Interval::new(instant, Duration::of_nanos(0, 1));
            },
        };

        Interval::between(self.midnight(first), self.midnight(next))
    }

    /// Returns the range of values a smaller unit can take within the
    /// larger unit that contains the instant, such as the days in its
    /// month, or `None` if the pair of units makes no sense.
    pub fn range_of(&self, smaller: CalendarField, larger: CalendarField, instant: Instant) -> Option<Range<i64>> {
        use crate::cal::fields::CalendarField as F;

        let date = self.local(instant).date();
        let year_length = Year(date.year()).day_count();
        let month_length = date.year_month().day_count() as i64;

        let range = match (smaller, larger) {
            (F::Day, F::Month)                    => 1 .. month_length + 1,
            (F::Day, F::Year)                     => 1 .. year_length + 1,
            (F::Day, F::Quarter)                  => {
                let quarter = self.date_interval(F::Quarter, instant).ok()?;
                1 .. (quarter.duration().whole_seconds() + SECONDS_IN_DAY / 2) / SECONDS_IN_DAY + 1
            },
            (F::Month, F::Year)                   => 1 .. 13,
            (F::Month, F::Quarter)                => {
                let first = (date.quarter() as i64 - 1) * 3 + 1;
                first .. first + 3
            },
            (F::Quarter, F::Year)                 => 1 .. 5,
            (F::Year, F::Era)                     => match era_and_year(date.year()).0 {
                1 => 1 .. MAX_YEAR + 1,
                _ => 1 .. 2 - MIN_YEAR,
            },
            (F::Hour, F::Day)                     => 0 .. 24,
            (F::Minute, F::Hour)                  => 0 .. 60,
            (F::Second, F::Minute)                => 0 .. 60,
            (F::Nanosecond, F::Second)            => 0 .. NANOS_PER_SECOND,
            (F::Weekday, F::WeekOfYear)
            | (F::Weekday, F::WeekOfMonth)        => 1 .. 8,
            (F::WeekdayOrdinal, F::Month)         => 1 .. (month_length + 6) / 7 + 1,
            (F::WeekOfYear, F::YearForWeekOfYear) => {
                let (week_year, _) = self.system.week_of_year(date);
                1 .. self.system.weeks_in_year(week_year) + 1
            },
            (F::WeekOfYear, F::Year)              => {
                // The first days of a year can belong to the last week of
                // the year before, and its last days to week 1 of the next.
                let (_, first) = self.system.week_of_year(date.add_days(1 - date.yearday() as i64));
                let (_, last) = self.system.week_of_year(date.add_days(year_length - date.yearday() as i64));
                let first = if first > 1 { 1 } else { first };
                let last = if last == 1 { self.system.weeks_in_year(date.year()) } else { last };
                first .. last + 1
            },
            (F::WeekOfMonth, F::Month)            => {
                let first = date.add_days(1 - date.day() as i64);
                let last = first.add_days(month_length - 1);
                self.system.week_of_month(first) .. self.system.week_of_month(last) + 1
            },
            _ => return None,
        };

        Some(range)
    }
}


/// The calendar field value of a date, for any field that isn’t a time
/// field.
fn date_field(system: &CalendarSystem, field: CalendarField, date: LocalDate) -> i64 {
    match field {
        CalendarField::Era               => era_and_year(date.year()).0,
        CalendarField::Year              => era_and_year(date.year()).1,
        CalendarField::Month             => date.month() as i64,
        CalendarField::Day               => date.day() as i64,
        CalendarField::Weekday           => date.weekday().field_value(),
        CalendarField::WeekdayOrdinal    => (date.day() as i64 - 1) / 7 + 1,
        CalendarField::Quarter           => date.quarter() as i64,
        CalendarField::WeekOfMonth       => system.week_of_month(date),
        CalendarField::WeekOfYear        => system.week_of_year(date).1,
        CalendarField::YearForWeekOfYear => system.week_of_year(date).0,
        CalendarField::Hour | CalendarField::Minute | CalendarField::Second | CalendarField::Nanosecond => 0,
    }
}

/// Whether a date has the given value for a date field. Negative weekday
/// ordinals count from the end of the month.
fn date_field_matches(system: &CalendarSystem, field: CalendarField, value: i64, date: LocalDate) -> bool {
    match field {
        CalendarField::WeekdayOrdinal if value < 0 => {
            let days_left = date.year_month().day_count() as i64 - date.day() as i64;
            -(days_left / 7 + 1) == value
        },
        _ => date_field(system, field, date) == value,
    }
}

/// Turns an era and a year of that era into a year where 1 BC is year 0
/// and 2 BC is year -1. With no era, the year is taken as it is.
fn proleptic_year(era: Option<i64>, year: i64) -> i64 {
    match era {
        Some(0) => 1 - year,
        _       => year,
    }
}

/// Splits a year where 1 BC is year 0 into an era and a year of that era.
fn era_and_year(year: i64) -> (i64, i64) {
    if year >= 1 { (1, year) } else { (0, 1 - year) }
}

/// The year to use when the fields don’t give one.
fn default_year(fields: &CalendarFieldSet) -> i64 {
    if let Some(week_year) = fields.year_for_week_of_year() {
        return week_year;
    }

    let leap_day = fields.month() == Some(2) && fields.day() == Some(29);
    match fields.era() {
        Some(0)             => 0,
        _ if leap_day       => 4,
        _                   => 1,
    }
}

/// Returns the day (counted from the epoch) of the nth occurrence of a
/// weekday in a month, counting from the end for negative numbers.
fn nth_weekday(year_month: YearMonth, weekday: Weekday, ordinal: i64, resolution: Resolution) -> Result<i64> {
    let month_days = year_month.day_count() as i64;
    let first = days_from_civil(year_month.year.0, year_month.month, 1);

    let day = if ordinal > 0 || (ordinal == 0 && resolution == Resolution::Normalizing) {
        let first_weekday = LocalDate::from_days_since_epoch(first).weekday();
        1 + weekday.days_since(first_weekday) + 7 * (ordinal - 1)
    }
    else if ordinal < 0 {
        let last_weekday = LocalDate::from_days_since_epoch(first + month_days - 1).weekday();
        month_days - last_weekday.days_since(weekday) + 7 * (ordinal + 1)
    }
    else {
        return Err(out_of_range(CalendarField::WeekdayOrdinal, ordinal));
    };

    if resolution == Resolution::Strict && !day.is_within(1 .. month_days + 1) {
        return Err(out_of_range(CalendarField::WeekdayOrdinal, ordinal));
    }

    Ok(first + day - 1)
}

/// The interval of the clock unit (hour, minute or second) containing an
/// instant, measured on the wall clock.
fn clock_interval(instant: Instant, local: LocalDateTime, unit_seconds: i64) -> Result<Interval> {
    let (_, into_unit) = split_cycles(local.local_seconds(), unit_seconds);
    let start = Instant::at(instant.seconds().saturating_sub(into_unit));
    Interval::new(start, Duration::of(unit_seconds))
}

/// How many whole units of a fixed length fit between two instants,
/// rounding towards zero, and the instant that many units on.
fn clock_step(from: Instant, to: Instant, unit_nanos: i64) -> (i64, Instant) {
    let nanos_per_second = NANOS_PER_SECOND as i128;
    let (seconds, nanoseconds) = (to - from).lengths();
    let total = seconds as i128 * nanos_per_second + nanoseconds as i128;

    let count = (total / unit_nanos as i128).max(i64::MIN as i128).min(i64::MAX as i128);
    let span = count * unit_nanos as i128;
    let moved = from + Duration::of_nanos((span / nanos_per_second) as i64, (span % nanos_per_second) as i64);
    (count as i64, moved)
}

/// Orders units from smallest to largest for `difference`.
fn unit_size(unit: CalendarField) -> u8 {
    match unit {
        CalendarField::Nanosecond                                        => 0,
        CalendarField::Second                                            => 1,
        CalendarField::Minute                                            => 2,
        CalendarField::Hour                                              => 3,
        CalendarField::Day | CalendarField::Weekday                      => 4,
        CalendarField::WeekOfYear | CalendarField::WeekOfMonth
        | CalendarField::WeekdayOrdinal                                  => 5,
        CalendarField::Month                                             => 6,
        CalendarField::Quarter                                           => 7,
        CalendarField::Year | CalendarField::YearForWeekOfYear           => 8,
        CalendarField::Era                                               => 9,
    }
}

/// Whether a search pattern value could ever match anything.
fn pattern_value_in_range(field: CalendarField, value: i64) -> bool {
    match field {
        CalendarField::Era               => value.is_within(0 .. 2),
        CalendarField::Year              => value.is_within(1 .. MAX_YEAR + 1),
        CalendarField::Month             => value.is_within(1 .. 13),
        CalendarField::Day               => value.is_within(1 .. 32),
        CalendarField::Hour              => value.is_within(0 .. 24),
        CalendarField::Minute            => value.is_within(0 .. 60),
        CalendarField::Second            => value.is_within(0 .. 60),
        CalendarField::Nanosecond        => value.is_within(0 .. NANOS_PER_SECOND),
        CalendarField::Weekday           => value.is_within(1 .. 8),
        CalendarField::WeekdayOrdinal    => value != 0 && value.is_within(-5 .. 6),
        CalendarField::Quarter           => value.is_within(1 .. 5),
        CalendarField::WeekOfMonth       => value.is_within(0 .. 7),
        CalendarField::WeekOfYear        => value.is_within(1 .. 54),
        CalendarField::YearForWeekOfYear => Year(value).is_representable(),
    }
}

/// Sums up a list of amounts multiplied by their scales, failing instead
/// of overflowing.
fn linear(terms: &[(i64, i64)]) -> Result<i64> {
    terms.iter().try_fold(0_i64, |sum, &(amount, scale)| {
        amount.checked_mul(scale)
              .and_then(|term| sum.checked_add(term))
              .ok_or_else(|| Error::nonexistent("amount is too large"))
    })
}

fn check_range(field: CalendarField, value: i64, range: Range<i64>) -> Result<()> {
    if value.is_within(range) { Ok(()) } else { Err(out_of_range(field, value)) }
}

fn narrow<T: FromPrimitive>(field: CalendarField, value: i64) -> Result<T> {
    T::from_i64(value).ok_or_else(|| out_of_range(field, value))
}

fn out_of_range(field: CalendarField, value: i64) -> Error {
    Error::unresolvable(format!("{:?} {} is out of range", field, value))
}


/// The wall-clock times of day that `next_occurrence` tries on each
/// matching day, in order.
#[derive(Debug, Clone)]
struct TimeSearch {
    hours: Range<i64>,
    minutes: Range<i64>,
    seconds: Range<i64>,
    nanoseconds: Range<i64>,
}

impl TimeSearch {
    fn new(pattern: &CalendarFieldSet, start: LocalTime) -> Self {
        let units = [
            (pattern.hour(),       24,               start.hour() as i64),
            (pattern.minute(),     60,               start.minute() as i64),
            (pattern.second(),     60,               start.second() as i64),
            (pattern.nanosecond(), NANOS_PER_SECOND, start.nanosecond() as i64),
        ];

        let smallest_set = units.iter().rposition(|u| u.0.is_some());

        let ranges: Vec<Range<i64>> = units.iter().enumerate().map(|(index, &(value, limit, current))| {
            match (value, smallest_set) {
                (Some(value), _)                       => value .. value + 1,
                (None, None)                           => current .. current + 1,
                (None, Some(smallest)) if index > smallest => 0 .. 1,
                (None, Some(_))                        => 0 .. limit,
            }
        }).collect();

        Self {
            hours:       ranges[0].clone(),
            minutes:     ranges[1].clone(),
            seconds:     ranges[2].clone(),
            nanoseconds: ranges[3].clone(),
        }
    }

    fn candidates(&self) -> impl Iterator<Item=LocalTime> {
        let minutes = self.minutes.clone();
        let seconds = self.seconds.clone();
        let nanoseconds = self.nanoseconds.clone();

        self.hours.clone().flat_map(move |h| {
            let seconds = seconds.clone();
            let nanoseconds = nanoseconds.clone();
            minutes.clone().flat_map(move |m| {
                let nanoseconds = nanoseconds.clone();
                seconds.clone().flat_map(move |s| nanoseconds.clone().map(move |n| (h, m, s, n)))
            })
        })
        .filter_map(|(h, m, s, n)| LocalTime::hms_nanos(h as i8, m as i8, s as i8, n as i32).ok())
    }
}
