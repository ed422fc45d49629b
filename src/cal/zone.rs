//! Time zones with a variable UTC offset, and the providers that look
//! them up by name.

use std::borrow::Cow;
use std::sync::Arc;

use crate::cal::LocalDateTime;
use crate::cal::calendar::Disambiguation;
use crate::cal::offset::Offset;
use crate::error::{Error, Result};
use crate::instant::Instant;


/// A **time zone**, which here is a list of timespans, each containing a
/// fixed offset for the current location’s time from UTC.
#[derive(PartialEq, Debug, Clone)]
pub struct TimeZone(pub TimeZoneSource<'static>);

#[derive(PartialEq, Debug, Clone)]
pub enum TimeZoneSource<'a> {
    Static(&'a StaticTimeZone<'a>),
    Runtime(Arc<runtime::OwnedTimeZone>),
}

#[derive(PartialEq, Debug)]
pub struct StaticTimeZone<'a> {

    /// This zone’s name in the zoneinfo database, such as “America/New_York”.
    pub name: &'a str,

    /// The set of timespans used in this time zone.
    pub fixed_timespans: FixedTimespanSet<'a>,
}

/// Coordinated Universal Time, which never changes its offset.
pub static UTC: StaticTimeZone<'static> = StaticTimeZone {
    name: "UTC",
    fixed_timespans: FixedTimespanSet {
        first: FixedTimespan {
            offset: 0,
            is_dst: false,
            name: Cow::Borrowed("UTC"),
        },
        rest: &[],
    },
};

impl TimeZone {

    /// The UTC time zone.
    pub fn utc() -> Self {
        TimeZone(TimeZoneSource::Static(&UTC))
    }

    /// A time zone that is always at the given offset from UTC.
    pub fn fixed(offset: Offset) -> Self {
        let name = format!("UTC{}", crate::cal::fmt::ISO::iso(&offset));
        Self::fixed_named(name, offset)
    }

    /// A time zone that is always at the given offset from UTC, with the
    /// given name and abbreviation.
    pub fn fixed_named<N: Into<String>>(name: N, offset: Offset) -> Self {
        let name = name.into();
        let timespans = runtime::OwnedFixedTimespanSet {
            first: FixedTimespan {
                offset: offset.total_seconds(),
                is_dst: false,
                name: Cow::Owned(name.clone()),
            },
            rest: Vec::new(),
        };

        TimeZone(TimeZoneSource::Runtime(Arc::new(runtime::OwnedTimeZone {
            name: Some(name),
            fixed_timespans: timespans,
        })))
    }

    /// A time zone that owns a list of transitions, such as one read from
    /// a zoneinfo file.
    pub fn from_timespans(name: Option<String>, fixed_timespans: runtime::OwnedFixedTimespanSet) -> Self {
        TimeZone(TimeZoneSource::Runtime(Arc::new(runtime::OwnedTimeZone { name, fixed_timespans })))
    }

    pub fn zone_name(&self) -> Option<&str> {
        match self.0 {
            TimeZoneSource::Static(ref tz)   => Some(tz.name),
            TimeZoneSource::Runtime(ref arc) => arc.name.as_deref(),
        }
    }

    fn with_timespans<T, F: FnOnce(&FixedTimespanSet) -> T>(&self, f: F) -> T {
        match self.0 {
            TimeZoneSource::Static(ref tz)   => f(&tz.fixed_timespans),
            TimeZoneSource::Runtime(ref arc) => f(&arc.fixed_timespans.borrow()),
        }
    }

    /// Returns the total offset from UTC, in seconds, that this time zone
    /// has at the given instant.
    pub fn offset(&self, instant: Instant) -> i64 {
        self.with_timespans(|spans| spans.find(instant.seconds()).offset)
    }

    /// Returns the time zone abbreviation that this time zone has at the
    /// given instant. As always, abbreviations are notoriously vague, and
    /// should only be used when referring to a known timezone.
    pub fn abbreviation(&self, instant: Instant) -> String {
        self.with_timespans(|spans| spans.find(instant.seconds()).name.to_string())
    }

    /// Returns whether daylight-saving time is in effect at the given
    /// instant.
    pub fn is_dst(&self, instant: Instant) -> bool {
        self.with_timespans(|spans| spans.find(instant.seconds()).is_dst)
    }

    /// Whether this time zone is “fixed”: a fixed time zone has no
    /// transitions, meaning it will always be at the same offset from UTC.
    pub fn is_fixed(&self) -> bool {
        self.with_timespans(|spans| spans.is_fixed())
    }

    /// Returns the first instant after the given one at which this zone
    /// changes its offset, if there is one in its table.
    pub fn next_transition(&self, after: Instant) -> Option<Instant> {
        self.with_timespans(|spans| {
            spans.rest.iter()
                 .map(|t| t.0)
                 .find(|t| *t > after.seconds())
                 .map(Instant::at)
        })
    }

    /// Returns the wall-clock date and time this zone shows at the given
    /// instant.
    pub fn to_local(&self, instant: Instant) -> LocalDateTime {
        LocalDateTime::from_instant(instant + crate::duration::Duration::of(self.offset(instant)))
    }

    /// Finds the instants at which this time zone’s wall clock shows the
    /// given local date and time.
    ///
    /// This method can return 0, 1, or 2 values, depending on whether the
    /// datetime passed in falls between two timespans (an impossible time)
    /// or overlaps two separate timespans (an ambiguous time). The result
    /// will *almost* always be precise, but there are edge cases you need
    /// to watch out for.
    pub fn convert_local(&self, local: LocalDateTime) -> LocalTimes {
        self.with_timespans(|spans| spans.convert_local(local))
    }

    /// Converts a local date and time to one instant, using the given
    /// policy to choose between zero or two candidates.
    pub fn resolve_local(&self, local: LocalDateTime, policy: Disambiguation) -> Result<Instant> {
        let times = self.convert_local(local);
        if !times.is_precise() {
            debug!("local time {:?} in {:?} is {:?}, resolving with {:?}", local, self.zone_name(), times, policy);
        }
        times.resolve(policy)
    }
}


/// A set of timespans, separated by the instances at which the timespans
/// change over. There will always be one more timespan than transitions.
#[derive(PartialEq, Debug, Clone)]
pub struct FixedTimespanSet<'a> {

    /// The first timespan, which is assumed to have been in effect up until
    /// the initial transition instant (if any). Each set has to have at
    /// least one timespan.
    pub first: FixedTimespan<'a>,

    /// The rest of the timespans, as a slice of tuples, each containing:
    ///
    /// 1. A transition instant at which the previous timespan ends and the
    ///    next one begins, stored as a Unix timestamp;
    /// 2. The actual timespan to transition into.
    pub rest: &'a [ (i64, FixedTimespan<'a>) ],
}

/// An individual timespan with a fixed offset.
#[derive(PartialEq, Debug, Clone)]
pub struct FixedTimespan<'a> {

    /// The *total* offset in effect during this timespan, in seconds. This
    /// is the sum of the standard offset from UTC (the zone’s standard
    /// time), and any extra daylight-saving offset.
    pub offset: i64,

    /// Whether there was any daylight-saving offset in effect during this
    /// timespan.
    pub is_dst: bool,

    /// The abbreviation in use during this timespan, such as “GMT” or
    /// “PDT”. Abbreviations are notoriously vague, and should only be used
    /// for referring to a known timezone.
    pub name: Cow<'a, str>,
}

impl<'a> FixedTimespanSet<'a> {

    /// The timespan in effect at the given Unix timestamp. A transition
    /// takes effect at its own instant.
    fn find(&self, time: i64) -> &FixedTimespan<'a> {
        match self.rest.iter().take_while(|t| t.0 <= time).last() {
            None     => &self.first,
            Some(zd) => &zd.1,
        }
    }

    fn is_fixed(&self) -> bool {
        self.rest.is_empty()
    }

    fn convert_local(&self, local: LocalDateTime) -> LocalTimes {
        let wall = local.local_seconds();
        let nanos = local.to_instant().nanoseconds() as i64;

        // Offsets are always less than a day, so the instant being looked
        // for can only be in the timespan around the wall-clock reading,
        // or in one of its neighbours.
        let surroundings = self.find_with_surroundings(wall);

        let mut candidates = Vec::with_capacity(3);
        if let Some((previous, _)) = surroundings.previous {
            candidates.push(previous.offset);
        }
        candidates.push(surroundings.current.offset);
        if let Some(&(_, ref next)) = surroundings.next {
            candidates.push(next.offset);
        }
        candidates.sort_unstable();
        candidates.dedup();

        // An offset is a real answer only if the instant it gives is
        // inside a timespan that has that very offset.
        let mut instants: Vec<i64> = candidates.iter()
            .map(|offset| wall.saturating_sub(*offset))
            .filter(|instant| candidates.contains(&(wall - instant)) && self.find(*instant).offset == wall - instant)
            .collect();
        instants.sort_unstable();

        match instants.len() {
            0 => self.describe_gap(wall, &surroundings)
                     .map(|(transition, before, after)| LocalTimes::Impossible {
                         transition: Instant::at(transition),
                         earlier:    Instant::at_nanos(wall.saturating_sub(after), nanos),
                         later:      Instant::at_nanos(wall.saturating_sub(before), nanos),
                     })
                     .unwrap_or_else(|| LocalTimes::Precise(Instant::at_nanos(wall.saturating_sub(surroundings.current.offset), nanos))),
            1 => LocalTimes::Precise(Instant::at_nanos(instants[0], nanos)),
            _ => LocalTimes::Ambiguous {
                earlier: Instant::at_nanos(instants[0], nanos),
                later:   Instant::at_nanos(instants[instants.len() - 1], nanos),
            },
        }
    }

    /// Finds the transition whose gap the given wall-clock reading falls
    /// into, returning it along with the offsets before and after.
    fn describe_gap(&self, wall: i64, surroundings: &Surroundings) -> Option<(i64, i64, i64)> {
        let mut transitions = Vec::with_capacity(2);
        if let Some((previous, time)) = surroundings.previous {
            transitions.push((time, previous.offset, surroundings.current.offset));
        }
        if let Some(&(time, ref next)) = surroundings.next {
            transitions.push((time, surroundings.current.offset, next.offset));
        }

        transitions.into_iter()
                   .find(|&(time, before, after)| before < after && wall >= time + before && wall < time + after)
    }

    fn find_with_surroundings(&self, time: i64) -> Surroundings {
        if let Some((position, _)) = self.rest.iter().enumerate().take_while(|&(_, t)| t.0 <= time).last() {
            // There’s a matching time in the ‘rest’ list, so return that
            // time along with the two sets of details around it.

            let previous_details = if position == 0 {
                &self.first
            }
            else {
                &self.rest[position - 1].1
            };

            Surroundings {
                previous:  Some((previous_details, self.rest[position].0)),
                current:   &self.rest[position].1,
                next:      self.rest.get(position + 1),
            }
        }
        else {
            // If there’s no matching time in the ‘rest’ list, it must be
            // the ‘first’ one.
            Surroundings {
                previous: None,
                current:  &self.first,
                next:     self.rest.get(0),
            }
        }
    }
}


#[derive(PartialEq, Debug)]
struct Surroundings<'a> {
    previous:  Option<(&'a FixedTimespan<'a>, i64)>,
    current:   &'a FixedTimespan<'a>,
    next:      Option<&'a (i64, FixedTimespan<'a>)>,
}


/// The result of converting a *local* time to an instant in a time zone.
/// See `TimeZone::convert_local` for more information.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LocalTimes {

    /// This local time is impossible (when a time occurs between two
    /// timespans, which should never be shown on a wall clock).
    ///
    /// `earlier` reads the wall-clock time with the offset from *after*
    /// the transition, which lands before it; `later` reads it with the
    /// offset from *before*, which lands after it.
    Impossible { transition: Instant, earlier: Instant, later: Instant },

    /// This local time can be defined unambiguously.
    Precise(Instant),

    /// This local time is ambiguous (when a time overlaps two timespans,
    /// which happens twice on a wall clock rather than once).
    Ambiguous { earlier: Instant, later: Instant },
}

impl LocalTimes {

    /// Returns whether this local times result is impossible (when a time
    /// occurs between two timespans, which should never be shown on a wall
    /// clock).
    pub fn is_impossible(&self) -> bool {
        matches!(*self, LocalTimes::Impossible { .. })
    }

    /// Returns whether this local times result is ambiguous (when a time
    /// overlaps two timespans, which happens twice on a wall clock rather
    /// than once).
    pub fn is_ambiguous(&self) -> bool {
        matches!(*self, LocalTimes::Ambiguous { .. })
    }

    pub fn is_precise(&self) -> bool {
        matches!(*self, LocalTimes::Precise(_))
    }

    /// Picks one instant according to the given policy.
    pub fn resolve(self, policy: Disambiguation) -> Result<Instant> {
        match (self, policy) {
            (LocalTimes::Precise(instant), _) => Ok(instant),

            (LocalTimes::Ambiguous { later, .. }, Disambiguation::Later)
            | (LocalTimes::Impossible { later, .. }, Disambiguation::Later)     => Ok(later),

            (LocalTimes::Ambiguous { earlier, .. }, Disambiguation::Earlier)
            | (LocalTimes::Impossible { earlier, .. }, Disambiguation::Earlier) => Ok(earlier),

            (LocalTimes::Ambiguous { .. }, Disambiguation::Reject)  => Err(Error::unresolvable("local time is ambiguous in this time zone")),
            (LocalTimes::Impossible { .. }, Disambiguation::Reject) => Err(Error::unresolvable("local time is skipped in this time zone")),
        }
    }
}


/// Something that can look up a time zone by its identifier, such as a
/// zoneinfo database.
pub trait ZoneProvider: Send + Sync {

    /// Returns the zone with the given name, or an `UnknownZoneOrLocale`
    /// error if there isn’t one.
    fn zone_by_name(&self, name: &str) -> Result<TimeZone>;
}

/// A provider for the zones that need no data at all: UTC itself, and
/// fixed offsets such as `GMT+2` or `UTC-03:30`.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct FixedZones;

impl ZoneProvider for FixedZones {
    fn zone_by_name(&self, name: &str) -> Result<TimeZone> {
        match name {
            "UTC" | "GMT" | "Z" | "Etc/UTC" | "Etc/GMT" | "Universal" => return Ok(TimeZone::utc()),
            _ => {}
        }

        let suffix = ["UTC", "GMT"].iter()
                                   .find(|prefix| name.starts_with(*prefix))
                                   .map(|prefix| &name[prefix.len() ..]);

        match suffix.map(Offset::parse) {
            Some(Ok(offset)) => Ok(TimeZone::fixed_named(name, offset)),
            _                => Err(Error::unknown(name)),
        }
    }
}


pub mod runtime {
    use super::{FixedTimespan, FixedTimespanSet};

    #[derive(PartialEq, Debug)]
    pub struct OwnedTimeZone {
        pub name: Option<String>,
        pub fixed_timespans: OwnedFixedTimespanSet,
    }

    #[derive(PartialEq, Debug, Clone)]
    pub struct OwnedFixedTimespanSet {
        pub first: FixedTimespan<'static>,
        pub rest: Vec<(i64, FixedTimespan<'static>)>,
    }

    impl OwnedFixedTimespanSet {
        pub fn borrow(&self) -> FixedTimespanSet {
            FixedTimespanSet {
                first: self.first.clone(),
                rest: &*self.rest,
            }
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use super::Surroundings;
    use std::borrow::Cow;

    const NONE: FixedTimespanSet<'static> = FixedTimespanSet {
        first: FixedTimespan {
            offset: 0,
            is_dst: false,
            name: Cow::Borrowed("ZONE_A"),
        },
        rest: &[],
    };

    #[test]
    fn empty() {
        assert_eq!(NONE.find_with_surroundings(1184000000), Surroundings {
            previous: None,
            current: &FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("ZONE_A"),
            },
            next: None,
        })
    }

    const MANY: FixedTimespanSet<'static> = FixedTimespanSet {
        first: FixedTimespan {
            offset: 0,
            is_dst: false,
            name: Cow::Borrowed("ZONE_A"),
        },
        rest: &[
            (1174784400, FixedTimespan {
                offset: 3600,
                is_dst: true,
                name: Cow::Borrowed("ZONE_B"),
            }),
            (1193533200, FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("ZONE_C"),
            }),
        ],
    };

    #[test]
    fn multiple_second() {
        let surroundings = MANY.find_with_surroundings(1184000000);
        assert_eq!(surroundings.previous.map(|p| p.1), Some(1174784400));
        assert_eq!(surroundings.current.name, "ZONE_B");
        assert_eq!(surroundings.next.map(|n| n.0), Some(1193533200));
    }

    #[test]
    fn multiple_last() {
        let surroundings = MANY.find_with_surroundings(1200000000);
        assert_eq!(surroundings.previous.map(|p| p.0.name.clone()), Some(Cow::Borrowed("ZONE_B")));
        assert_eq!(surroundings.current.name, "ZONE_C");
        assert_eq!(surroundings.next, None);
    }

    #[test]
    fn transition_takes_effect_at_its_instant() {
        assert_eq!(MANY.find(1174784399).offset, 0);
        assert_eq!(MANY.find(1174784400).offset, 3600);
    }

    #[test]
    fn gap_resolution() {
        // 1174784400 is 2007-03-25T01:00:00Z, so 01:30 local never happens.
        let local = LocalDateTime::at(1174784400 + 1800);
        let times = MANY.convert_local(local);
        assert_eq!(times, LocalTimes::Impossible {
            transition: Instant::at(1174784400),
            earlier:    Instant::at(1174784400 - 1800),
            later:      Instant::at(1174784400 + 1800),
        });
        assert_eq!(times.resolve(Disambiguation::Later), Ok(Instant::at(1174784400 + 1800)));
        assert!(times.resolve(Disambiguation::Reject).is_err());
    }

    #[test]
    fn overlap_resolution() {
        // 1193533200 is 2007-10-28T01:00:00Z; local 01:30 happens twice.
        let local = LocalDateTime::at(1193533200 + 1800);
        let times = MANY.convert_local(local);
        assert_eq!(times, LocalTimes::Ambiguous {
            earlier: Instant::at(1193533200 - 1800),
            later:   Instant::at(1193533200 + 1800),
        });
        assert_eq!(times.resolve(Disambiguation::Earlier), Ok(Instant::at(1193533200 - 1800)));
    }

    mod fixed_zones {
        use super::*;

        #[test]
        fn utc() {
            assert_eq!(FixedZones.zone_by_name("UTC"), Ok(TimeZone::utc()));
        }

        #[test]
        fn offset() {
            let zone = FixedZones.zone_by_name("GMT+05:30").unwrap();
            assert_eq!(zone.offset(Instant::at_epoch()), 5 * 3600 + 30 * 60);
            assert_eq!(zone.zone_name(), Some("GMT+05:30"));
            assert!(zone.is_fixed());
        }

        #[test]
        fn unknown() {
            assert_eq!(FixedZones.zone_by_name("Mars/Olympus_Mons"),
                       Err(Error::UnknownZoneOrLocale { name: "Mars/Olympus_Mons".into() }));
        }
    }
}
