extern crate calendrical;
use calendrical::{CalendarEngine, CalendarSystem, CalendarFieldSet, MatchingPolicy, TimeZone, Instant, Error};
use calendrical::SEARCH_HORIZON_DAYS;


fn engine() -> CalendarEngine {
    CalendarEngine::new(CalendarSystem::gregorian(TimeZone::utc()))
}

fn at(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Instant {
    let fields = CalendarFieldSet::new().with_year(year).with_month(month).with_day(day)
                                        .with_hour(hour).with_minute(minute);
    engine().to_instant(&fields).unwrap()
}

fn next(pattern: CalendarFieldSet, after: Instant) -> Result<Instant, Error> {
    engine().next_occurrence(&pattern, after, MatchingPolicy::NextTime)
}


mod matches {
    use super::*;

    macro_rules! test {
        ($name: ident: $pattern: expr, $after: expr => $result: expr) => {
            #[test]
            fn $name() {
                assert_eq!(next($pattern, $after), Ok($result))
            }
        };
    }

    // The 15th of March 2023 is a Wednesday.
    test!(next_monday:       CalendarFieldSet::new().with_weekday(2),             at(2023, 3, 15, 12, 0) => at(2023, 3, 20, 12, 0));
    test!(strictly_after:    CalendarFieldSet::new().with_weekday(2),             at(2023, 3, 20, 12, 0) => at(2023, 3, 27, 12, 0));
    test!(next_leap_day:     CalendarFieldSet::new().with_month(2).with_day(29),  at(2023, 3, 1, 0, 0)   => at(2024, 2, 29, 0, 0));
    test!(friday_13th:       CalendarFieldSet::new().with_weekday(6).with_day(13), at(2023, 1, 1, 0, 0)  => at(2023, 1, 13, 0, 0));
    test!(nine_oclock:       CalendarFieldSet::new().with_hour(9),                at(2023, 3, 15, 12, 0) => at(2023, 3, 16, 9, 0));
    test!(half_past:         CalendarFieldSet::new().with_minute(30),             at(2023, 3, 15, 12, 0) => at(2023, 3, 15, 12, 30));
    test!(given_year:        CalendarFieldSet::new().with_year(2025).with_month(6), at(2023, 3, 15, 12, 0) => at(2025, 6, 1, 12, 0));
    test!(second_sunday_may: CalendarFieldSet::new().with_month(5).with_weekday(1).with_weekday_ordinal(2).with_hour(10),
                                                                                   at(2023, 1, 1, 0, 0)   => at(2023, 5, 14, 10, 0));
}


mod last_matching_day {
    use super::*;

    #[test]
    fn rest_of_the_year() {
        let noon = at(2023, 12, 31, 12, 0);
        assert_eq!(next(CalendarFieldSet::new().with_year(2023), noon), Ok(Instant::at(noon.seconds() + 1)));
    }

    #[test]
    fn rest_of_the_month() {
        let noon = at(2023, 12, 31, 12, 0);
        let december = CalendarFieldSet::new().with_era(1).with_year(2023).with_month(12);
        assert_eq!(next(december, noon), Ok(Instant::at(noon.seconds() + 1)));
    }

    #[test]
    fn nothing_left() {
        let last_second = Instant::at(at(2024, 1, 1, 0, 0).seconds() - 1);
        assert_eq!(next(CalendarFieldSet::new().with_year(2023), last_second), Err(Error::NoMatch { days_searched: 1 }));
    }

    #[test]
    fn later_days_still_come_first() {
        let noon = at(2023, 12, 30, 12, 0);
        assert_eq!(next(CalendarFieldSet::new().with_year(2023), noon), Ok(at(2023, 12, 31, 12, 0)));
    }
}


mod failures {
    use super::*;

    #[test]
    fn february_30th() {
        let pattern = CalendarFieldSet::new().with_month(2).with_day(30);
        assert_eq!(next(pattern, at(2023, 1, 1, 0, 0)), Err(Error::NoMatch { days_searched: SEARCH_HORIZON_DAYS }));
    }

    #[test]
    fn month_13() {
        let pattern = CalendarFieldSet::new().with_month(13);
        assert_eq!(next(pattern, at(2023, 1, 1, 0, 0)), Err(Error::NoMatch { days_searched: 0 }));
    }

    #[test]
    fn year_gone_by() {
        let pattern = CalendarFieldSet::new().with_year(2020);
        assert_eq!(next(pattern, at(2023, 1, 1, 0, 0)), Err(Error::NoMatch { days_searched: 0 }));
    }
}
