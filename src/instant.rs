//! Exact points on a timeline.

use std::fmt;
use std::ops::{Add, Sub};

use crate::clock::{Clock, SystemClock};
use crate::duration::{Duration, NANOS_PER_SECOND};
use crate::util::split_cycles;


/// Number of seconds between the Unix epoch and the **reference date**,
/// midnight UTC on the 1st of January 2001.
pub const REFERENCE_DATE_OFFSET: i64 = 978_307_200;


/// An **instant** is an exact point on the timeline, irrespective of time
/// zone or calendar format, with nanosecond precision.
///
/// Internally, this is represented by a 64-bit integer of seconds since
/// the Unix epoch, and a 32-bit integer of nanoseconds into that second.
/// Leap seconds are ignored: every day is 86,400 seconds long.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Instant {
    seconds: i64,
    nanoseconds: i32,
}

impl Instant {

    /// The earliest instant there is. Arithmetic that would go past it
    /// stops here.
    pub const MIN: Instant = Instant { seconds: i64::MIN, nanoseconds: 0 };

    /// The latest instant there is.
    pub const MAX: Instant = Instant { seconds: i64::MAX, nanoseconds: 999_999_999 };

    /// Creates a new Instant set to the number of seconds since the Unix
    /// epoch, and zero nanoseconds.
    pub fn at(seconds: i64) -> Self {
        Self { seconds, nanoseconds: 0 }
    }

    /// Creates a new Instant set to the number of seconds since the
    /// Unix epoch, along with a number of nanoseconds, which gets carried
    /// into the seconds if it’s out of range.
    pub fn at_nanos(seconds: i64, nanoseconds: i64) -> Self {
        Self::at_epoch() + Duration::of_nanos(seconds, nanoseconds)
    }

    /// Creates a new Instant from seconds and milliseconds since the Unix
    /// epoch.
    pub fn at_ms(seconds: i64, milliseconds: i16) -> Self {
        Self::at_nanos(seconds, milliseconds as i64 * 1_000_000)
    }

    /// Creates a new Instant set to the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::at(0)
    }

    /// Creates a new Instant set to the reference date, midnight UTC on
    /// the 1st of January 2001.
    pub fn at_reference_date() -> Self {
        Self::at(REFERENCE_DATE_OFFSET)
    }

    /// Creates a new Instant that lies the given (possibly fractional)
    /// number of seconds after the reference date.
    pub fn from_reference_offset(seconds: f64) -> Self {
        Self::at_reference_date() + Duration::from_secs_f64(seconds)
    }

    /// Creates a new Instant set to the computer’s current time.
    pub fn now() -> Self {
        SystemClock.now()
    }

    /// Creates a new Instant set to whatever time the given clock reads.
    pub fn now_from(clock: &dyn Clock) -> Self {
        clock.now()
    }

    /// Returns the number of seconds at this instant
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the number of nanoseconds into the second at this instant
    pub fn nanoseconds(&self) -> i32 {
        self.nanoseconds
    }

    /// Returns the number of seconds elapsed since the reference date,
    /// negative for instants before it.
    pub fn reference_offset(&self) -> f64 {
        (*self - Self::at_reference_date()).as_secs_f64()
    }

    /// Returns the signed length of time from `earlier` to this instant.
    pub fn since(&self, earlier: Instant) -> Duration {
        *self - earlier
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Instant({}s/{}ns)", self.seconds, self.nanoseconds)
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    fn add(self, duration: Duration) -> Self {
        let (seconds, nanoseconds) = duration.lengths();
        let (carry, nanoseconds) = split_cycles(self.nanoseconds as i64 + nanoseconds as i64, NANOS_PER_SECOND);

        match self.seconds.checked_add(seconds).and_then(|s| s.checked_add(carry)) {
            Some(seconds)        => Self { seconds, nanoseconds: nanoseconds as i32 },
            None if seconds < 0  => Self::MIN,
            None                 => Self::MAX,
        }
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        self + -duration
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, earlier: Instant) -> Duration {
        Duration::of_nanos(self.seconds.saturating_sub(earlier.seconds), self.nanoseconds as i64 - earlier.nanoseconds as i64)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stops_at_the_ends() {
        assert_eq!(Instant::at(i64::MAX - 10) + Duration::of(3600), Instant::MAX);
        assert_eq!(Instant::at(i64::MIN + 10) - Duration::of(3600), Instant::MIN);
        assert_eq!(Instant::MAX + Duration::of_nanos(0, 1), Instant::MAX);
        assert_eq!(Instant::at(i64::MAX - 10) + Duration::of(5), Instant::at(i64::MAX - 5));
    }

    #[test]
    fn carrying() {
        assert_eq!(Instant::at_nanos(1, 1_500_000_000), Instant::at_nanos(2, 500_000_000));
        assert_eq!(Instant::at_nanos(0, -1).seconds(), -1);
    }

    #[test]
    fn reference_date() {
        assert_eq!(Instant::from_reference_offset(0.0), Instant::at(978_307_200));
        assert_eq!(Instant::at(978_307_260).reference_offset(), 60.0);
    }

    #[test]
    fn subtraction_gives_duration() {
        let a = Instant::at_ms(10, 250);
        let b = Instant::at_ms(12, 0);
        assert_eq!(b - a, Duration::of_ms(1, 750));
        assert!((a - b).is_negative());
    }
}
