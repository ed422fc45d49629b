#![crate_name = "calendrical"]
#![crate_type = "rlib"]

#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Calendar fields, calendar arithmetic, intervals and formatting on top
//! of absolute instants.
//!
//! An `Instant` is a point on the time line, with no calendar or time zone
//! attached. A `CalendarEngine` gives it meaning: it breaks instants down
//! into a `CalendarFieldSet` of years, months, days, and so on, resolves
//! field sets back into instants, adds calendar amounts, and searches for
//! the next instant that matches a pattern of fields.
//!
//! # Examples
//!
//! ```
//! use calendrical::{CalendarEngine, CalendarSystem, CalendarFieldSet, CalendarField, TimeZone};
//!
//! let engine = CalendarEngine::new(CalendarSystem::gregorian(TimeZone::utc()));
//!
//! let leap_day = engine.to_instant(&CalendarFieldSet::new().with_year(2024).with_month(2).with_day(29)).unwrap();
//! let next_year = engine.add_fields(&CalendarFieldSet::new().with_year(1), leap_day).unwrap();
//!
//! let fields = engine.to_field_set(next_year, &[CalendarField::Month, CalendarField::Day]);
//! assert_eq!((fields.month(), fields.day()), (Some(2), Some(28)));
//! ```
//!
//! The 31st of February is not a date:
//!
//! ```
//! use calendrical::{CalendarEngine, CalendarSystem, CalendarFieldSet, TimeZone, Error};
//!
//! let engine = CalendarEngine::new(CalendarSystem::gregorian(TimeZone::utc()));
//! let fields = CalendarFieldSet::new().with_year(2023).with_month(2).with_day(31);
//!
//! match engine.to_instant(&fields) {
//!     Err(Error::UnresolvableDate { .. }) => {},
//!     other => panic!("{:?}", other),
//! }
//! ```

#[macro_use]
mod logging;

mod cal;
mod clock;
mod duration;
mod error;
mod instant;
mod interval;
mod system;
mod util;

pub use crate::cal::{LocalDate, LocalTime, LocalDateTime, Weekday, Month, Year, YearMonth, MIN_YEAR, MAX_YEAR};
pub use crate::cal::{DatePiece, TimePiece};
pub use crate::cal::{CalendarField, CalendarFieldSet};
pub use crate::cal::{CalendarSystem, CalendarIdentifier, Disambiguation, CalendarProvider, AutoUpdatingCalendar};
pub use crate::cal::{CalendarEngine, MatchingPolicy, SEARCH_HORIZON_DAYS};
pub use crate::cal::{Offset, TimeZone, StaticTimeZone, LocalTimes, ZoneProvider, FixedZones};
pub use crate::cal::zone::{self, TimeZoneSource, FixedTimespan, FixedTimespanSet};
#[cfg(feature="zoneinfo")] pub use crate::cal::ZoneinfoDatabase;
pub use crate::cal::{ISO, DateStyle, Format};
#[cfg(feature="format")] pub use crate::cal::{Formatter, LocaleData, LocaleProvider, BuiltinLocales};

pub use crate::clock::{Clock, SystemClock, FixedClock};
pub use crate::duration::Duration;
pub use crate::error::{Error, Result};
pub use crate::instant::{Instant, REFERENCE_DATE_OFFSET};
pub use crate::interval::Interval;
pub use crate::system::sys_timezone;
