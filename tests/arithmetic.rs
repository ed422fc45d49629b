extern crate calendrical;
use calendrical::{CalendarEngine, CalendarSystem, CalendarFieldSet, CalendarField, TimeZone, Instant, Error};


fn engine() -> CalendarEngine {
    CalendarEngine::new(CalendarSystem::gregorian(TimeZone::utc()))
}

fn at(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Instant {
    let fields = CalendarFieldSet::new().with_year(year).with_month(month).with_day(day)
                                        .with_hour(hour).with_minute(minute);
    engine().to_instant(&fields).unwrap()
}


mod adding {
    use super::*;

    macro_rules! test {
        ($name: ident: $from: expr, $amounts: expr => $result: expr) => {
            #[test]
            fn $name() {
                assert_eq!(engine().add_fields(&$amounts, $from), Ok($result))
            }
        };
    }

    test!(one_month_clamps:    at(2023, 1, 31, 9, 0), CalendarFieldSet::new().with_month(1)  => at(2023, 2, 28, 9, 0));
    test!(into_a_leap_year:    at(2024, 1, 31, 9, 0), CalendarFieldSet::new().with_month(1)  => at(2024, 2, 29, 9, 0));
    test!(leap_day_plus_year:  at(2024, 2, 29, 0, 0), CalendarFieldSet::new().with_year(1)   => at(2025, 2, 28, 0, 0));
    test!(months_backwards:    at(2023, 3, 31, 0, 0), CalendarFieldSet::new().with_month(-1) => at(2023, 2, 28, 0, 0));
    test!(quarters:            at(2023, 11, 15, 0, 0), CalendarFieldSet::new().with_quarter(1) => at(2024, 2, 15, 0, 0));
    test!(days_across_months:  at(2023, 2, 27, 0, 0), CalendarFieldSet::new().with_day(3)    => at(2023, 3, 2, 0, 0));
    test!(weeks:               at(2023, 3, 14, 0, 0), CalendarFieldSet::new().with_week_of_year(2) => at(2023, 3, 28, 0, 0));
    test!(hours_past_midnight: at(2023, 3, 14, 22, 0), CalendarFieldSet::new().with_hour(3)  => at(2023, 3, 15, 1, 0));
    test!(larger_units_first:  at(2023, 1, 31, 0, 0), CalendarFieldSet::new().with_month(1).with_day(1) => at(2023, 3, 1, 0, 0));
    test!(nothing:             at(2023, 3, 14, 0, 0), CalendarFieldSet::new()                => at(2023, 3, 14, 0, 0));

    #[test]
    fn eras_cannot_be_added() {
        match engine().add_fields(&CalendarFieldSet::new().with_era(1), at(2023, 1, 1, 0, 0)) {
            Err(Error::NonexistentResult { .. }) => {},
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn out_of_range() {
        let amounts = CalendarFieldSet::new().with_year(999_999_999_999);
        assert!(engine().add_fields(&amounts, at(2023, 1, 1, 0, 0)).is_err());
    }
}


mod setting {
    use super::*;

    #[test]
    fn day() {
        assert_eq!(engine().set_field(CalendarField::Day, 15, at(2023, 1, 31, 8, 30)), Ok(at(2023, 1, 15, 8, 30)));
    }

    #[test]
    fn month_without_clamping() {
        assert!(engine().set_field(CalendarField::Month, 2, at(2023, 1, 31, 0, 0)).is_err());
    }

    #[test]
    fn weekday_within_the_week() {
        // Tuesday to the Friday of the same week.
        assert_eq!(engine().set_field(CalendarField::Weekday, 6, at(2023, 3, 14, 0, 0)), Ok(at(2023, 3, 17, 0, 0)));
    }

    #[test]
    fn hour() {
        assert_eq!(engine().set_field(CalendarField::Hour, 23, at(2023, 3, 14, 8, 30)), Ok(at(2023, 3, 14, 23, 30)));
        assert!(engine().set_field(CalendarField::Hour, 24, at(2023, 3, 14, 8, 30)).is_err());
    }
}


mod differences {
    use super::*;

    #[test]
    fn months_and_days() {
        let difference = engine().difference(&[CalendarField::Month, CalendarField::Day], at(2023, 1, 31, 0, 0), at(2023, 3, 1, 0, 0));
        assert_eq!((difference.month(), difference.day()), (Some(1), Some(1)));
    }

    #[test]
    fn units_in_any_order() {
        let difference = engine().difference(&[CalendarField::Day, CalendarField::Year], at(2020, 6, 1, 0, 0), at(2023, 6, 11, 0, 0));
        assert_eq!((difference.year(), difference.day()), (Some(3), Some(10)));
    }

    #[test]
    fn backwards() {
        let difference = engine().difference(&[CalendarField::Day], at(2023, 3, 1, 0, 0), at(2023, 1, 31, 0, 0));
        assert_eq!(difference.day(), Some(-29));
    }

    #[test]
    fn clock_units() {
        let difference = engine().difference(&[CalendarField::Hour, CalendarField::Minute], at(2023, 3, 14, 0, 0), at(2023, 3, 14, 1, 30));
        assert_eq!((difference.hour(), difference.minute()), (Some(1), Some(30)));
    }

    #[test]
    fn eras_do_not_get_in_the_way() {
        let difference = engine().difference(&[CalendarField::Era, CalendarField::Year, CalendarField::Day], at(2020, 6, 1, 0, 0), at(2023, 6, 11, 0, 0));
        assert_eq!((difference.era(), difference.year(), difference.day()), (Some(0), Some(3), Some(10)));
    }

    #[test]
    fn hours_over_centuries() {
        let (from, to) = (at(1700, 1, 1, 0, 0), at(2023, 1, 1, 0, 0));
        let difference = engine().difference(&[CalendarField::Hour, CalendarField::Second], from, to);
        assert_eq!(difference.hour(), Some((to.seconds() - from.seconds()) / 3600));
        assert_eq!(difference.second(), Some(0));
    }

    #[test]
    fn nothing_between() {
        let instant = at(2023, 3, 14, 0, 0);
        let difference = engine().difference(&[CalendarField::Month], instant, instant);
        assert_eq!(difference.month(), Some(0));
    }
}
