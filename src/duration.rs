//! Lengths of time on the timeline.

use std::ops::{Add, Sub, Mul, Neg};

use crate::util::split_cycles;


pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;


/// A **duration** is a length of time on the timeline, irrespective of
/// time zone or calendar format, with nanosecond precision.
///
/// The seconds part carries the sign; the nanosecond part is always in
/// `0 .. 1_000_000_000`, so minus half a second is stored as `-1s + 500ms`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy)]
pub struct Duration {
    seconds: i64,
    nanoseconds: i32,
}

impl Duration {

    /// Create a new zero-length duration.
    pub fn zero() -> Self {
        Self { seconds: 0, nanoseconds: 0 }
    }

    /// Create a new duration that’s the given number of seconds long.
    pub fn of(seconds: i64) -> Self {
        Self { seconds, nanoseconds: 0 }
    }

    /// Create a new duration from seconds and a number of nanoseconds,
    /// which may be larger than a second or negative and is carried into
    /// the seconds part.
    pub fn of_nanos(seconds: i64, nanoseconds: i64) -> Self {
        let (carry, nanos) = split_cycles(nanoseconds, NANOS_PER_SECOND);
        Self { seconds: seconds.saturating_add(carry), nanoseconds: nanos as i32 }
    }

    /// Create a new duration from seconds and milliseconds.
    pub fn of_ms(seconds: i64, milliseconds: i16) -> Self {
        Self::of_nanos(seconds, milliseconds as i64 * 1_000_000)
    }

    /// Create a duration from a number of seconds with a fractional part,
    /// rounded to the nearest nanosecond.
    pub fn from_secs_f64(seconds: f64) -> Self {
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * NANOS_PER_SECOND as f64).round() as i64;
        Self::of_nanos(whole as i64, nanos)
    }

    /// Return the seconds and nanoseconds portions of the duration as
    /// a 2-element tuple.
    pub fn lengths(&self) -> (i64, i32) {
        (self.seconds, self.nanoseconds)
    }

    // As with `lengths`, there’s no `nanoseconds()` method on its own: it
    // would read like the *total* length in nanoseconds.

    /// The length of this duration in seconds, as a float.
    pub fn as_secs_f64(&self) -> f64 {
        self.seconds as f64 + self.nanoseconds as f64 / NANOS_PER_SECOND as f64
    }

    /// The length of this duration in whole seconds, rounding towards
    /// negative infinity.
    pub fn whole_seconds(&self) -> i64 {
        self.seconds
    }

    pub fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanoseconds == 0
    }
}

impl Add<Duration> for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::of_nanos(self.seconds.saturating_add(rhs.seconds), self.nanoseconds as i64 + rhs.nanoseconds as i64)
    }
}

impl Sub<Duration> for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration::of_nanos(self.seconds.saturating_sub(rhs.seconds), self.nanoseconds as i64 - rhs.nanoseconds as i64)
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, amount: i64) -> Duration {
        Duration::of_nanos(self.seconds.saturating_mul(amount), (self.nanoseconds as i64).saturating_mul(amount))
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::of_nanos(self.seconds.saturating_neg(), -(self.nanoseconds as i64))
    }
}

#[cfg(test)]
mod test {
    pub use super::Duration;

    mod addition {
        use super::*;

        #[test]
        fn simple() {
            assert_eq!(Duration::of(10), Duration::of(2) + Duration::of(8))
        }

        #[test]
        fn milliseconds() {
            assert_eq!(Duration::of_ms(0, 500), Duration::of_ms(0, 167) + Duration::of_ms(0, 333))
        }

        #[test]
        fn wrapping() {
            assert_eq!(Duration::of_ms(1, 500), Duration::of_ms(0, 750) + Duration::of_ms(0, 750))
        }

        #[test]
        fn wrapping_exact() {
            assert_eq!(Duration::of(1), Duration::of_ms(0, 500) + Duration::of_ms(0, 500))
        }
    }

    mod subtraction {
        use super::*;

        #[test]
        fn simple() {
            assert_eq!(Duration::of(13), Duration::of(28) - Duration::of(15))
        }

        #[test]
        fn wrapping() {
            assert_eq!(Duration::of_ms(0, 750), Duration::of_ms(1, 500) - Duration::of_ms(0, 750))
        }

        #[test]
        fn below_zero() {
            let d = Duration::of_ms(0, 250) - Duration::of_ms(0, 750);
            assert_eq!(d.lengths(), (-1, 500_000_000));
            assert!(d.is_negative());
        }
    }

    mod multiplication {
        use super::*;

        #[test]
        fn simple() {
            assert_eq!(Duration::of(16), Duration::of(8) * 2)
        }

        #[test]
        fn milliseconds() {
            assert_eq!(Duration::of(1), Duration::of_ms(0, 500) * 2)
        }
    }

    #[test]
    fn negation() {
        assert_eq!(-Duration::of_ms(1, 250), Duration::of_nanos(-2, 750_000_000));
    }

    #[test]
    fn fractional_seconds() {
        assert_eq!(Duration::from_secs_f64(-0.5), Duration::of_nanos(-1, 500_000_000));
        assert_eq!(Duration::of_ms(2, 250).as_secs_f64(), 2.25);
    }
}
