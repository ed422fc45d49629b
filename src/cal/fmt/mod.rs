//! Turning instants into text and back again.
//!
//! Instants are formatted in the time zone of a `CalendarSystem`, either
//! with a pattern of letter tokens or with a pair of date and time styles
//! that a locale expands into patterns:
//!
//! | Token           | Meaning                                      |
//! |-----------------|----------------------------------------------|
//! | `y`, `yyyy`     | year, padded to the number of letters        |
//! |                 | (counting through 0 for 1 BC, like ISO-8601) |
//! | `yy`            | two-digit year, read back as 2000 to 2099    |
//! | `M`, `MM`       | month number                                 |
//! | `MMM`, `MMMM`   | short and long month name                    |
//! | `d`, `dd`       | day of the month                             |
//! | `E`, `EEEE`     | short and long weekday name                  |
//! | `H`, `HH`       | hour, 0 to 23                                |
//! | `h`, `hh`       | hour, 1 to 12                                |
//! | `a`             | `AM` or `PM`                                 |
//! | `m`, `s`        | minute and second                            |
//! | `S…`            | fraction of a second, one digit per letter   |
//! | `Q`             | quarter                                      |
//! | `Z`             | offset from UTC, as `+hhmm`                  |
//!
//! Text in single quotes is copied as it is, with `''` standing for a
//! single quote. Any other ASCII letter is an error.

pub mod iso;
pub use self::iso::ISO;
#[cfg(feature="format")] mod locales;
#[cfg(feature="format")] mod pattern;

#[cfg(feature="format")] pub use self::locales::{LocaleData, LocaleProvider, BuiltinLocales};

#[cfg(feature="format")] use crate::cal::calendar::CalendarSystem;
#[cfg(feature="format")] use crate::cal::engine::CalendarEngine;
#[cfg(feature="format")] use crate::cal::zone::TimeZone;
#[cfg(feature="format")] use crate::error::{Error, Result};
#[cfg(feature="format")] use crate::instant::Instant;


/// How much detail to show of a date, or of a time.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum DateStyle {

    /// Leave it out entirely.
    None,
    Short,
    Medium,
    Long,
    Full,
}

impl DateStyle {
    pub(crate) fn index(self) -> Option<usize> {
        match self {
            DateStyle::None    => None,
            DateStyle::Short   => Some(0),
            DateStyle::Medium  => Some(1),
            DateStyle::Long    => Some(2),
            DateStyle::Full    => Some(3),
        }
    }
}


/// What an instant should look like as text.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Format {

    /// A pattern of tokens, such as `"yyyy-MM-dd HH:mm"`.
    Pattern(String),

    /// A date style and a time style, looked up in the locale.
    Style(DateStyle, DateStyle),
}

impl Format {
    pub fn pattern<P: Into<String>>(pattern: P) -> Self {
        Format::Pattern(pattern.into())
    }
}


/// Formats and parses instants in a calendar system’s time zone.
///
/// ### Examples
///
/// ```
/// use calendrical::{Formatter, Format, DateStyle, CalendarSystem, TimeZone, Instant};
///
/// let formatter = Formatter::new(CalendarSystem::gregorian(TimeZone::utc()));
/// let instant = Instant::at(1_000_000_000);
///
/// assert_eq!(formatter.format(instant, &Format::pattern("yyyy-MM-dd HH:mm")).unwrap(), "2001-09-09 01:46");
/// assert_eq!(formatter.format(instant, &Format::Style(DateStyle::Medium, DateStyle::None)).unwrap(), "Sep 9, 2001");
/// assert_eq!(formatter.parse("2001-09-09 01:46:40", "yyyy-MM-dd HH:mm:ss"), Ok(instant));
/// ```
#[cfg(feature="format")]
#[derive(PartialEq, Debug, Clone)]
pub struct Formatter {
    engine: CalendarEngine,
    locale: LocaleData,
}

#[cfg(feature="format")]
impl Formatter {

    /// A formatter for the given calendar system, using `en_US` styles.
    pub fn new(system: CalendarSystem) -> Self {
        Self { engine: CalendarEngine::new(system), locale: LocaleData::default() }
    }

    pub fn with_locale(self, locale: LocaleData) -> Self {
        Self { locale, ..self }
    }

    pub fn calendar(&self) -> &CalendarSystem {
        self.engine.system()
    }

    pub fn locale(&self) -> &LocaleData {
        &self.locale
    }

    /// Writes out an instant, failing only if a pattern is invalid.
    pub fn format(&self, instant: Instant, format: &Format) -> Result<String> {
        match *format {
            Format::Pattern(ref pattern) => self.format_pattern(instant, pattern),
            Format::Style(date, time) => {
                let date = self.locale.date_pattern(date).map(|p| self.format_pattern(instant, p)).transpose()?;
                let time = self.locale.time_pattern(time).map(|p| self.format_pattern(instant, p)).transpose()?;

                Ok(match (date, time) {
                    (Some(d), Some(t))  => format!("{}{}{}", d, self.locale.separator(), t),
                    (Some(d), None)     => d,
                    (None, Some(t))     => t,
                    (None, None)        => String::new(),
                })
            },
        }
    }

    fn format_pattern(&self, instant: Instant, pattern: &str) -> Result<String> {
        let pattern = pattern::Pattern::parse(pattern)?;
        let zone = self.calendar().time_zone();
        let local = zone.to_local(instant);
        Ok(pattern.format(&local, zone.offset(instant), &locale::Time::english()))
    }

    /// Reads text written with a pattern back into an instant.
    ///
    /// Fields the pattern doesn’t cover get the usual defaults, and the
    /// text is read in this formatter’s time zone unless it contains an
    /// offset of its own. Text that doesn’t match the pattern, or that
    /// names a date that doesn’t exist, is an `UnparsableInput` error.
    pub fn parse(&self, input: &str, pattern: &str) -> Result<Instant> {
        let pattern = pattern::Pattern::parse(pattern)?;
        let reading = pattern.read(input, &locale::Time::english())?;

        let fields = match reading.offset {
            Some(offset) => reading.fields.with_time_zone(TimeZone::fixed(offset)),
            None         => reading.fields,
        };

        self.engine.to_instant(&fields).map_err(|e| match e {
            Error::UnresolvableDate { reason } | Error::NonexistentResult { reason } => Error::unparsable(input, reason),
            other => other,
        })
    }

    /// Writes out an instant in ISO-8601 form, such as
    /// `2001-09-09T01:46:40.000Z`, with the offset of this formatter’s
    /// time zone.
    pub fn format_iso8601(&self, instant: Instant) -> Result<String> {
        use crate::cal::offset::Offset;

        let zone = self.calendar().time_zone();
        let offset = match zone.offset(instant) {
            0 => Offset::utc(),
            seconds => Offset::of_seconds(seconds as i32)?,
        };
        Ok(format!("{}{}", zone.to_local(instant).iso(), offset.iso()))
    }

    /// Reads an ISO-8601 date and time, which may be a calendar date, a
    /// week date, or an ordinal date. Without an offset it’s read as UTC.
    #[cfg(feature="parse")]
    pub fn parse_iso8601(&self, input: &str) -> Result<Instant> {
        use crate::duration::Duration;

        let (local, offset) = crate::cal::parse::parse_datetime(input)?;
        Ok(local.to_instant() - Duration::of(offset.total_seconds()))
    }
}
