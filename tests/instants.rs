extern crate calendrical;
use calendrical::{Instant, Duration, Clock, FixedClock, SystemClock};


mod instants {
    use super::*;

    #[test]
    fn seconds() {
        assert_eq!(Instant::at(3), Instant::at_ms(3, 0))
    }

    #[test]
    fn nanoseconds_carry() {
        assert_eq!(Instant::at_nanos(1, 1_500_000_000), Instant::at_ms(2, 500))
    }

    #[test]
    fn before_the_epoch() {
        let instant = Instant::at_nanos(0, -1);
        assert_eq!((instant.seconds(), instant.nanoseconds()), (-1, 999_999_999))
    }

    #[test]
    fn epoch() {
        assert_eq!(Instant::at_epoch().seconds(), 0)
    }

    #[test]
    fn reference_date() {
        assert_eq!(Instant::at_reference_date(), Instant::at(978_307_200));
        assert_eq!(Instant::from_reference_offset(1.5), Instant::at_ms(978_307_201, 500));
        assert_eq!(Instant::at(978_307_140).reference_offset(), -60.0);
    }

    #[test]
    fn addition() {
        assert_eq!(Instant::at(10), Instant::at(3) + Duration::of(7))
    }

    #[test]
    fn subtraction() {
        assert_eq!(Instant::at(20), Instant::at(50) - Duration::of(30))
    }

    #[test]
    fn between_instants() {
        assert_eq!(Instant::at_ms(5, 250) - Instant::at_ms(2, 750), Duration::of_ms(2, 500));
        assert_eq!(Instant::at(2).since(Instant::at(5)), Duration::of(-3));
    }
}


mod durations {
    use super::*;

    #[test]
    fn wrapping_addition() {
        assert_eq!(Duration::of_ms(1, 500), Duration::of_ms(0, 750) + Duration::of_ms(0, 750))
    }

    #[test]
    fn wrapping_subtraction() {
        assert_eq!(Duration::of_ms(0, 750), Duration::of_ms(1, 500) - Duration::of_ms(0, 750))
    }

    #[test]
    fn multiplication() {
        assert_eq!(Duration::of(1), Duration::of_ms(0, 500) * 2)
    }

    #[test]
    fn negation() {
        let half = -Duration::of_ms(0, 500);
        assert!(half.is_negative());
        assert_eq!(half.lengths(), (-1, 500_000_000));
        assert_eq!(half.as_secs_f64(), -0.5);
    }

    #[test]
    fn fractional() {
        assert_eq!(Duration::from_secs_f64(2.25), Duration::of_ms(2, 250));
        assert!(Duration::from_secs_f64(0.0).is_zero());
    }
}


mod clocks {
    use super::*;

    #[test]
    fn fixed() {
        let clock = FixedClock(Instant::at(100));
        assert_eq!(Instant::now_from(&clock), Instant::at(100));
        assert_eq!(clock.advanced(Duration::of(5)).now(), Instant::at(105));
    }

    #[test]
    fn sanity() {
        // Test that the system call has worked at all.
        assert!(SystemClock.now() > Instant::at_reference_date())
    }
}
