//! Sources of the current time.
//!
//! Reading the real-time clock is the only place this library touches
//! wall-clock time, and it always happens through a `Clock`. Code that needs
//! “now” takes a clock parameter, so tests can hand it a `FixedClock`.

use crate::duration::Duration;
use crate::instant::Instant;
use crate::system::sys_time;


/// Something that can say what time it is.
pub trait Clock: Send + Sync {

    /// Returns the current instant, according to this clock.
    fn now(&self) -> Instant;
}


/// The operating system’s real-time clock.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg_attr(target_os = "redox", allow(unused_unsafe))]
    fn now(&self) -> Instant {
        let (seconds, nanoseconds) = unsafe { sys_time() };
        Instant::at_nanos(seconds, nanoseconds as i64)
    }
}


/// A clock that is stopped at one instant.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct FixedClock(pub Instant);

impl FixedClock {

    /// Returns a new clock stopped the given duration later than this one.
    pub fn advanced(self, by: Duration) -> Self {
        FixedClock(self.0 + by)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_clock_returns_given_instant() {
        let clock = FixedClock(Instant::at(1_500_000_000));
        assert_eq!(clock.now(), Instant::at(1_500_000_000));
        assert_eq!(Instant::now_from(&clock), Instant::at(1_500_000_000));
    }

    #[test]
    fn clock_trait_object_works() {
        let clock: Box<dyn Clock> = Box::new(FixedClock(Instant::at(7)).advanced(Duration::of(3)));
        assert_eq!(clock.now(), Instant::at(10));
    }

    #[test]
    fn system_clock_sanity() {
        // If this fails then you have gone back in time, or something?
        assert!(SystemClock.now() > Instant::at(1_500_000_000));
    }
}
