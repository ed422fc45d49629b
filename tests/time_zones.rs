extern crate calendrical;
use calendrical::zone::{StaticTimeZone, FixedTimespanSet, FixedTimespan, TimeZoneSource};
use calendrical::{TimeZone, ZoneProvider, FixedZones, Offset, Disambiguation, MatchingPolicy};
use calendrical::{CalendarEngine, CalendarSystem, CalendarFieldSet, LocalDateTime, LocalDate, LocalTime, Month};
use calendrical::{Instant, Error};
use std::borrow::Cow;


// British summer time for 2007: clocks go forward an hour at 01:00 UTC
// on the 25th of March, and back at 01:00 UTC on the 28th of October.
const LONDON_2007: &'static StaticTimeZone<'static> = &StaticTimeZone {
    name: "Test/London",
    fixed_timespans: FixedTimespanSet {
        first: FixedTimespan {
            offset: 0,
            is_dst: false,
            name: Cow::Borrowed("GMT"),
        },
        rest: &[
            (1_174_784_400, FixedTimespan {
                offset: 3600,
                is_dst: true,
                name: Cow::Borrowed("BST"),
            }),
            (1_193_533_200, FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("GMT"),
            }),
        ]
    }
};

const MARCH_25: i64 = 1_174_780_800;
const OCTOBER_28: i64 = 1_193_529_600;

fn london() -> TimeZone {
    TimeZone(TimeZoneSource::Static(LONDON_2007))
}

fn engine(disambiguation: Disambiguation) -> CalendarEngine {
    CalendarEngine::new(CalendarSystem::gregorian(london()).with_disambiguation(disambiguation))
}

fn local(month: Month, day: i8, hour: i8, minute: i8) -> LocalDateTime {
    LocalDateTime::new(LocalDate::ymd(2007, month, day).unwrap(), LocalTime::hm(hour, minute).unwrap())
}

fn wall(month: i64, day: i64, hour: i64, minute: i64) -> CalendarFieldSet {
    CalendarFieldSet::new().with_year(2007).with_month(month).with_day(day).with_hour(hour).with_minute(minute)
}


mod conversion {
    use super::*;

    #[test]
    fn offsets_and_names() {
        let zone = london();
        assert_eq!(zone.zone_name(), Some("Test/London"));
        assert_eq!(zone.offset(Instant::at(MARCH_25)), 0);
        assert_eq!(zone.offset(Instant::at(MARCH_25 + 7200)), 3600);
        assert_eq!(zone.abbreviation(Instant::at(MARCH_25 + 7200)), "BST");
        assert!(zone.is_dst(Instant::at(MARCH_25 + 7200)));
        assert!(!zone.is_fixed());
    }

    #[test]
    fn next_transition() {
        assert_eq!(london().next_transition(Instant::at(MARCH_25)), Some(Instant::at(1_174_784_400)));
        assert_eq!(london().next_transition(Instant::at(OCTOBER_28 + 86400)), None);
    }

    #[test]
    fn summer() {
        let instant = Instant::at(1_181_390_400);  // 12:00 UTC, 9th June
        assert_eq!(london().to_local(instant), local(Month::June, 9, 13, 0));
        assert_eq!(london().convert_local(local(Month::June, 9, 13, 0)).resolve(Disambiguation::Reject), Ok(instant));
    }

    #[test]
    fn ambiguity() {
        let converted = london().convert_local(local(Month::October, 28, 1, 30));
        assert!(converted.is_ambiguous(), "Local time {:?} should be ambiguous", converted);
    }

    #[test]
    fn impossible() {
        let converted = london().convert_local(local(Month::March, 25, 1, 30));
        assert!(converted.is_impossible(), "Local time {:?} should be impossible", converted);
    }
}


mod resolving {
    use super::*;

    #[test]
    fn skipped_time_moves_forward() {
        assert_eq!(engine(Disambiguation::Later).to_instant(&wall(3, 25, 1, 30)), Ok(Instant::at(MARCH_25 + 5400)));
    }

    #[test]
    fn skipped_time_moves_back() {
        assert_eq!(engine(Disambiguation::Earlier).to_instant(&wall(3, 25, 1, 30)), Ok(Instant::at(MARCH_25 + 1800)));
    }

    #[test]
    fn repeated_time_is_the_later_one() {
        assert_eq!(engine(Disambiguation::default()).to_instant(&wall(10, 28, 1, 30)), Ok(Instant::at(OCTOBER_28 + 5400)));
    }

    #[test]
    fn repeated_time_rejected() {
        match engine(Disambiguation::Reject).to_instant(&wall(10, 28, 1, 30)) {
            Err(Error::UnresolvableDate { .. }) => {},
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn day_across_the_gap_keeps_the_wall_clock() {
        let engine = engine(Disambiguation::Later);
        let noon = engine.to_instant(&wall(3, 24, 12, 0)).unwrap();

        let next_day = engine.add_fields(&CalendarFieldSet::new().with_day(1), noon).unwrap();
        assert_eq!(next_day, engine.to_instant(&wall(3, 25, 12, 0)).unwrap());

        let day_of_hours = engine.add_fields(&CalendarFieldSet::new().with_hour(24), noon).unwrap();
        assert_eq!(day_of_hours, engine.to_instant(&wall(3, 25, 13, 0)).unwrap());
    }

    #[test]
    fn short_day() {
        let engine = engine(Disambiguation::Later);
        let interval = engine.date_interval(calendrical::CalendarField::Day, Instant::at(MARCH_25 + 43200)).unwrap();
        assert_eq!(interval.duration().whole_seconds(), 23 * 3600);
    }
}


mod searching {
    use super::*;

    macro_rules! test {
        ($name: ident: $policy: ident => $result: expr) => {
            #[test]
            fn $name() {
                let pattern = CalendarFieldSet::new().with_hour(1).with_minute(30);
                let found = engine(Disambiguation::Later).next_occurrence(&pattern, Instant::at(MARCH_25), MatchingPolicy::$policy);
                assert_eq!(found, Ok(Instant::at($result)));
            }
        };
    }

    test!(next_time:       NextTime                            => 1_174_784_400);
    test!(strict:          Strict                              => MARCH_25 + 86400 + 1800);
    test!(previous_time:   PreviousTimePreservingSmallerFields => MARCH_25 + 1800);
}


mod providers {
    use super::*;

    #[test]
    fn fixed_names() {
        assert_eq!(FixedZones.zone_by_name("UTC"), Ok(TimeZone::utc()));
        let zone = FixedZones.zone_by_name("GMT+05:30").unwrap();
        assert_eq!(zone.offset(Instant::at(0)), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn unknown_name() {
        assert_eq!(FixedZones.zone_by_name("Mars/Olympus_Mons"), Err(Error::UnknownZoneOrLocale { name: "Mars/Olympus_Mons".into() }));
    }

    #[test]
    fn fixed_zone() {
        let zone = TimeZone::fixed(Offset::of_hours_and_minutes(-3, 0).unwrap());
        assert!(zone.is_fixed());
        assert_eq!(zone.offset(Instant::at(MARCH_25)), -3 * 3600);
    }
}


#[cfg(feature = "zoneinfo")]
mod zoneinfo {
    use super::*;
    use calendrical::ZoneinfoDatabase;

    fn database() -> ZoneinfoDatabase {
        ZoneinfoDatabase::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/zoneinfo"))
    }

    #[test]
    fn compiled_file() {
        let zone = database().zone_by_name("Test/London").unwrap();
        assert_eq!(zone.zone_name(), Some("Test/London"));
        assert_eq!(zone.offset(Instant::at(MARCH_25)), 0);
        assert_eq!(zone.offset(Instant::at(MARCH_25 + 7200)), 3600);
        assert_eq!(zone.abbreviation(Instant::at(MARCH_25 + 7200)), "BST");
        assert_eq!(zone.offset(Instant::at(OCTOBER_28 + 7200)), 0);
        assert_eq!(zone.next_transition(Instant::at(MARCH_25)), Some(Instant::at(1_174_784_400)));
    }

    #[test]
    fn last_transition_lasts_forever() {
        let zone = database().zone_by_name("Test/London").unwrap();
        let summer_2030 = Instant::at(1_910_000_000);
        assert_eq!(zone.offset(summer_2030), 0);
        assert_eq!(zone.next_transition(Instant::at(OCTOBER_28 + 86400)), None);
    }

    #[test]
    fn same_as_the_static_table() {
        let zone = database().zone_by_name("Test/London").unwrap();
        for &seconds in &[ MARCH_25 - 86400, MARCH_25 + 5400, 1_181_390_400, OCTOBER_28 + 5400 ] {
            assert_eq!(zone.to_local(Instant::at(seconds)), london().to_local(Instant::at(seconds)));
        }
    }

    #[test]
    fn file_without_transitions() {
        let zone = database().zone_by_name("Test/Minus_Five").unwrap();
        assert_eq!(zone.offset(Instant::at(MARCH_25)), -5 * 3600);
        assert_eq!(zone.abbreviation(Instant::at(MARCH_25)), "-05");
        assert_eq!(zone.next_transition(Instant::at(0)), None);
    }

    #[test]
    fn not_a_zoneinfo_file() {
        let db = ZoneinfoDatabase::new(env!("CARGO_MANIFEST_DIR"));
        assert_eq!(db.zone_by_name("Cargo.toml"), Err(Error::UnknownZoneOrLocale { name: "Cargo.toml".into() }));
    }
}
