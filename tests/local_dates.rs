extern crate calendrical;
use calendrical::{LocalDate, LocalTime, LocalDateTime, Month, Weekday, Year, DatePiece, TimePiece, ISO};


mod leap_years {
    use super::*;

    macro_rules! test {
        ($name: ident: $year: expr => $result: expr) => {
            #[test]
            fn $name() {
                assert_eq!(Year($year).is_leap_year(), $result)
            }
        };
    }

    test!(year_1600: 1600 => true);
    test!(year_1900: 1900 => false);
    test!(year_2000: 2000 => true);
    test!(year_2023: 2023 => false);
    test!(year_2024: 2024 => true);
    test!(year_1_bc:    0 => true);
}


mod construction {
    use super::*;

    #[test]
    fn the_distant_past() {
        let date = LocalDate::ymd(-753, Month::April, 21).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (-753, Month::April, 21));
    }

    #[test]
    fn the_distant_future() {
        let date = LocalDate::ymd(1048576, Month::October, 13).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1048576, Month::October, 13));
    }

    #[test]
    fn day_out_of_range() {
        assert!(LocalDate::ymd(2023, Month::February, 29).is_err());
        assert!(LocalDate::ymd(2023, Month::April, 31).is_err());
        assert!(LocalDate::ymd(2023, Month::April, 0).is_err());
    }

    #[test]
    fn yeardays() {
        assert_eq!(LocalDate::ymd(2015, Month::December, 31).unwrap().yearday(), 365);
        assert_eq!(LocalDate::ymd(2016, Month::December, 31).unwrap().yearday(), 366);
        assert_eq!(LocalDate::yd(2016, 60).unwrap(), LocalDate::ymd(2016, Month::February, 29).unwrap());
        assert!(LocalDate::yd(2015, 366).is_err());
    }

    #[test]
    fn yeardays_round_trip() {
        for year in 1590 .. 1610 {
            let last = LocalDate::ymd(year, Month::December, 31).unwrap();
            let again = LocalDate::yd(year, last.yearday() as i64).unwrap();
            assert_eq!(again, last);
        }
    }

    #[test]
    fn weekdays() {
        assert_eq!(LocalDate::ymd(1970, Month::January, 1).unwrap().weekday(), Weekday::Thursday);
        assert_eq!(LocalDate::ymd(2000, Month::February, 29).unwrap().weekday(), Weekday::Tuesday);
        assert_eq!(LocalDate::ymd(2023, Month::March, 5).unwrap().weekday(), Weekday::Sunday);
    }

    #[test]
    fn days_since_epoch() {
        let date = LocalDate::from_days_since_epoch(-1);
        assert_eq!(date, LocalDate::ymd(1969, Month::December, 31).unwrap());
        assert_eq!(date.add_days(1).days_since_epoch(), 0);
    }
}


mod instants {
    use super::*;
    use calendrical::Instant;

    #[test]
    fn some_date() {
        let local = LocalDateTime::from_instant(Instant::at(1_234_567_890));
        assert_eq!(local.date(), LocalDate::ymd(2009, Month::February, 13).unwrap());
        assert_eq!((local.hour(), local.minute(), local.second()), (23, 31, 30));
        assert_eq!(local.to_instant(), Instant::at(1_234_567_890));
    }

    #[test]
    fn before_the_epoch() {
        let local = LocalDateTime::from_instant(Instant::at(-1));
        assert_eq!(local.date(), LocalDate::ymd(1969, Month::December, 31).unwrap());
        assert_eq!(local.time(), LocalTime::hms(23, 59, 59).unwrap());
    }
}


mod iso {
    use super::*;

    #[test]
    fn just_then() {
        let date = LocalDate::ymd(-753, Month::December, 1).unwrap();
        assert_eq!(date.iso().to_string(), "-0753-12-01");
    }

    #[test]
    fn far_far_future() {
        let date = LocalDate::ymd(10601, Month::January, 31).unwrap();
        assert_eq!(date.iso().to_string(), "+10601-01-31");
    }

    #[test]
    fn datetime() {
        let date = LocalDate::ymd(2001, Month::February, 3).unwrap();
        let time = LocalTime::hms_nanos(4, 5, 6, 7_000_000).unwrap();
        assert_eq!(LocalDateTime::new(date, time).iso().to_string(), "2001-02-03T04:05:06.007");
    }
}
