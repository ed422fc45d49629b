//! Spans of time between two instants.

use std::fmt;

use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::instant::Instant;


/// A span of time starting at one instant and lasting for a non-negative
/// duration.
///
/// An interval contains its start but not its end, so two intervals that
/// meet end-to-start don’t overlap. The exception is an interval with no
/// length at all, which still contains its own start.
///
/// Intervals are ordered by their start, and then by their length.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Interval {
    start: Instant,
    duration: Duration,
}

impl Interval {

    /// Creates an interval from its start and its length, which must not
    /// be negative.
    pub fn new(start: Instant, duration: Duration) -> Result<Self> {
        if duration.is_negative() {
            Err(Error::InvalidInterval { seconds: duration.whole_seconds() })
        }
        else {
            Ok(Self { start, duration })
        }
    }

    /// Creates an interval between two instants, the second of which must
    /// not come before the first.
    pub fn between(start: Instant, end: Instant) -> Result<Self> {
        Self::new(start, end - start)
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.start + self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_empty(&self) -> bool {
        self.duration.is_zero()
    }

    /// Returns whether the instant lies within this interval.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::{Interval, Instant, Duration};
    ///
    /// let interval = Interval::new(Instant::at(100), Duration::of(10)).unwrap();
    /// assert!(interval.contains(Instant::at(100)));
    /// assert!(interval.contains(Instant::at(109)));
    /// assert!(!interval.contains(Instant::at(110)));
    /// ```
    pub fn contains(&self, instant: Instant) -> bool {
        instant == self.start || (instant > self.start && instant < self.end())
    }

    /// Returns whether there’s any instant that both intervals contain.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.intersection(other).is_some()
    }

    /// Returns the interval that both intervals have in common, if there
    /// is one.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());

        if start < end || (start == end && self.contains(start) && other.contains(start)) {
            Some(Interval { start, duration: end - start })
        }
        else {
            None
        }
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Interval({:?} + {:?})", self.start, self.duration)
    }
}
