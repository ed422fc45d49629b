//! Date patterns made of letter tokens, such as `yyyy-MM-dd HH:mm`.

use std::str::CharIndices;

use pad::{PadStr, Alignment};

use crate::cal::{DatePiece, TimePiece, LocalDateTime};
use crate::cal::fields::{CalendarField, CalendarFieldSet};
use crate::cal::offset::Offset;
use crate::error::{Error, Result};


type Width = usize;
type Pos = usize;


/// One piece of a pattern. Numeric fields carry the number of letters
/// they were written with, which is the width they get padded to.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub(crate) enum Field<'a> {
    Literal(&'a str),

    Year(Width),
    YearOfCentury,

    Month(Width),
    MonthName(bool),

    Day(Width),
    WeekdayName(bool),

    Hour(Width),
    Hour12(Width),
    AmPm,
    Minute(Width),
    Second(Width),
    Fraction(Width),

    Quarter(Width),
    Offset,
}

impl<'a> Field<'a> {

    /// The field written as `count` copies of the letter `c`, if that
    /// letter means anything.
    fn from_letter(c: char, count: Width) -> Option<Field<'a>> {
        Some(match c {
            'y' if count == 2  => Field::YearOfCentury,
            'y'                => Field::Year(count),
            'M' if count <= 2  => Field::Month(count),
            'M'                => Field::MonthName(count >= 4),
            'd'                => Field::Day(count),
            'E'                => Field::WeekdayName(count >= 4),
            'H'                => Field::Hour(count),
            'h'                => Field::Hour12(count),
            'a'                => Field::AmPm,
            'm'                => Field::Minute(count),
            's'                => Field::Second(count),
            'S'                => Field::Fraction(count),
            'Q'                => Field::Quarter(count),
            'Z'                => Field::Offset,
            _                  => return None,
        })
    }

    fn is_numeric(self) -> bool {
        match self {
            Field::Year(_) | Field::YearOfCentury | Field::Month(_) | Field::Day(_) |
            Field::Hour(_) | Field::Hour12(_) | Field::Minute(_) | Field::Second(_) |
            Field::Fraction(_) | Field::Quarter(_) => true,
            _ => false,
        }
    }

    /// The number of letters this field was written with, or 2 for the
    /// two-digit year.
    fn width(self) -> Width {
        match self {
            Field::Year(w) | Field::Month(w) | Field::Day(w) | Field::Hour(w) |
            Field::Hour12(w) | Field::Minute(w) | Field::Second(w) |
            Field::Fraction(w) | Field::Quarter(w) => w,
            Field::YearOfCentury => 2,
            _ => 0,
        }
    }

    fn format(&self, when: &LocalDateTime, offset: i64, locale: &locale::Time, w: &mut String) {
        match *self {
            Field::Literal(s)          => w.push_str(s),
            Field::Year(n)             => w.push_str(&number(when.year(), n)),
            Field::YearOfCentury       => w.push_str(&number(when.year_of_century(), 2)),
            Field::Month(n)            => w.push_str(&number(when.month() as i64, n)),
            Field::MonthName(true)     => w.push_str(&locale.long_month_name(when.month().months_from_january())),
            Field::MonthName(false)    => w.push_str(&locale.short_month_name(when.month().months_from_january())),
            Field::Day(n)              => w.push_str(&number(when.day() as i64, n)),
            Field::WeekdayName(true)   => w.push_str(LONG_DAY_NAMES[when.weekday() as usize]),
            Field::WeekdayName(false)  => w.push_str(&locale.short_day_name(when.weekday() as usize)),
            Field::Hour(n)             => w.push_str(&number(when.hour() as i64, n)),
            Field::Hour12(n)           => w.push_str(&number(twelve_hour(when.hour()), n)),
            Field::AmPm                => w.push_str(if when.hour() < 12 { "AM" } else { "PM" }),
            Field::Minute(n)           => w.push_str(&number(when.minute() as i64, n)),
            Field::Second(n)           => w.push_str(&number(when.second() as i64, n)),
            Field::Fraction(n)         => w.push_str(&fraction(when.nanosecond(), n)),
            Field::Quarter(n)          => w.push_str(&number(when.quarter() as i64, n)),
            Field::Offset              => w.push_str(&hours_and_minutes(offset)),
        }
    }
}

/// Full weekday names, from Sunday. `locale::Time` only hands out the
/// short ones, whichever method is asked.
const LONG_DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

fn number(n: i64, width: Width) -> String {
    let digits = n.abs().to_string().pad(width, '0', Alignment::Right, false);
    if n < 0 { format!("-{}", digits) } else { digits }
}

fn twelve_hour(hour: i8) -> i64 {
    match hour % 12 {
        0 => 12,
        h => h as i64,
    }
}

/// The leading `width` digits of the fraction of a second.
fn fraction(nanoseconds: i32, width: Width) -> String {
    let digits = format!("{:09}", nanoseconds);
    if width <= digits.len() {
        digits[.. width].to_owned()
    }
    else {
        digits.pad(width, '0', Alignment::Left, false)
    }
}

/// An offset written as `+hhmm`.
fn hours_and_minutes(offset: i64) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.abs() / 60;
    format!("{}{:02}{:02}", sign, minutes / 60, minutes % 60)
}


/// A parsed pattern.
#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) struct Pattern<'a> {
    pub(crate) fields: Vec<Field<'a>>,
}

/// The fields read out of some text, along with the offset it named.
#[derive(PartialEq, Debug, Clone)]
pub(crate) struct Reading {
    pub(crate) fields: CalendarFieldSet,
    pub(crate) offset: Option<Offset>,
}

impl<'a> Pattern<'a> {
    pub(crate) fn parse(input: &'a str) -> Result<Pattern<'a>> {
        let mut parser = PatternParser::new(input);
        parser.parse_pattern()?;

        Ok(Pattern { fields: parser.fields })
    }

    /// Writes out a local date and time, along with the offset from UTC
    /// in effect at that time.
    pub(crate) fn format(&self, when: &LocalDateTime, offset: i64, locale: &locale::Time) -> String {
        let mut buf = String::new();

        for field in &self.fields {
            field.format(when, offset, locale, &mut buf);
        }

        buf
    }

    /// Reads text written with this pattern back into a set of fields.
    /// The fields aren’t checked against each other here.
    pub(crate) fn read(&self, input: &str, locale: &locale::Time) -> Result<Reading> {
        let mut reader = Reader { input, pos: 0, just_read: 0 };
        let mut fields = CalendarFieldSet::new();
        let mut offset = None;
        let mut hour12 = None;
        let mut pm = None;

        for (i, field) in self.fields.iter().enumerate() {
            let abutting = self.fields.get(i + 1).map_or(false, |f| f.is_numeric());
            let max_digits = if abutting { Some(field.width().max(1)) } else { None };

            match *field {
                Field::Literal(s) => {
                    if !reader.literal(s) {
                        return Err(reader.expected(&format!("{:?}", s)));
                    }
                },
                Field::Year(_) => {
                    let year = reader.signed_number(max_digits).ok_or_else(|| reader.expected("a year"))?;
                    fields.set(CalendarField::Year, Some(year));
                },
                Field::YearOfCentury => {
                    let year = reader.number(Some(2)).filter(|_| reader.just_read == 2)
                                     .ok_or_else(|| reader.expected("a two-digit year"))?;
                    fields.set(CalendarField::Year, Some(2000 + year));
                },
                Field::Month(_) => {
                    let month = reader.number(max_digits).ok_or_else(|| reader.expected("a month"))?;
                    fields.set(CalendarField::Month, Some(month));
                },
                Field::MonthName(_) => {
                    let names = (0 .. 12).flat_map(|i| vec![ (i, locale.long_month_name(i)), (i, locale.short_month_name(i)) ]);
                    let month = reader.name(names).ok_or_else(|| reader.expected("a month name"))?;
                    fields.set(CalendarField::Month, Some(month as i64 + 1));
                },
                Field::Day(_) => {
                    let day = reader.number(max_digits).ok_or_else(|| reader.expected("a day"))?;
                    fields.set(CalendarField::Day, Some(day));
                },
                Field::WeekdayName(_) => {
                    let names = (0 .. 7).flat_map(|i| vec![ (i, LONG_DAY_NAMES[i].to_owned()), (i, locale.short_day_name(i)) ]);
                    let weekday = reader.name(names).ok_or_else(|| reader.expected("a weekday name"))?;
                    fields.set(CalendarField::Weekday, Some(weekday as i64 + 1));
                },
                Field::Hour(_) => {
                    let hour = reader.number(max_digits).ok_or_else(|| reader.expected("an hour"))?;
                    fields.set(CalendarField::Hour, Some(hour));
                },
                Field::Hour12(_) => {
                    let hour = reader.number(max_digits).ok_or_else(|| reader.expected("an hour"))?;
                    hour12 = Some(hour);
                },
                Field::AmPm => {
                    let half = reader.name(vec![ (0, "AM".to_owned()), (1, "PM".to_owned()) ])
                                     .ok_or_else(|| reader.expected("AM or PM"))?;
                    pm = Some(half == 1);
                },
                Field::Minute(_) => {
                    let minute = reader.number(max_digits).ok_or_else(|| reader.expected("a minute"))?;
                    fields.set(CalendarField::Minute, Some(minute));
                },
                Field::Second(_) => {
                    let second = reader.number(max_digits).ok_or_else(|| reader.expected("a second"))?;
                    fields.set(CalendarField::Second, Some(second));
                },
                Field::Fraction(_) => {
                    let digits = reader.digits(max_digits).ok_or_else(|| reader.expected("a fraction of a second"))?;
                    fields.set(CalendarField::Nanosecond, Some(nanoseconds(digits)));
                },
                Field::Quarter(_) => {
                    let quarter = reader.number(max_digits).ok_or_else(|| reader.expected("a quarter"))?;
                    fields.set(CalendarField::Quarter, Some(quarter));
                },
                Field::Offset => {
                    offset = Some(reader.offset().ok_or_else(|| reader.expected("an offset"))?);
                },
            }
        }

        if !reader.rest().is_empty() {
            return Err(reader.expected("the end of the input"));
        }

        if let Some(hour) = hour12 {
            if !(1 ..= 12).contains(&hour) {
                return Err(Error::unparsable(input, format!("hour {} is not on a twelve-hour clock", hour)));
            }

            let afternoon = if pm == Some(true) { 12 } else { 0 };
            fields.set(CalendarField::Hour, Some(hour % 12 + afternoon));
        }

        Ok(Reading { fields, offset })
    }
}

/// The number of nanoseconds in a fraction of a second given as its
/// digits after the decimal point.
fn nanoseconds(digits: &str) -> i64 {
    digits.chars()
          .chain(std::iter::repeat('0'))
          .take(9)
          .fold(0, |n, c| n * 10 + c.to_digit(10).unwrap_or(0) as i64)
}


/// A cursor over the text being read.
struct Reader<'i> {
    input: &'i str,
    pos: Pos,
    just_read: usize,
}

impl<'i> Reader<'i> {
    fn rest(&self) -> &'i str {
        &self.input[self.pos ..]
    }

    fn expected(&self, what: &str) -> Error {
        Error::unparsable(self.input, format!("expected {} at position {}", what, self.pos))
    }

    fn literal(&mut self, text: &str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            true
        }
        else {
            false
        }
    }

    /// A run of at least one digit, no longer than `max`.
    fn digits(&mut self, max: Option<usize>) -> Option<&'i str> {
        let rest = self.rest();
        let count = rest.bytes()
                        .take(max.unwrap_or(usize::MAX))
                        .take_while(u8::is_ascii_digit)
                        .count();

        if count == 0 {
            return None;
        }

        self.pos += count;
        self.just_read = count;
        Some(&rest[.. count])
    }

    fn number(&mut self, max: Option<usize>) -> Option<i64> {
        self.digits(max)?.parse().ok()
    }

    fn signed_number(&mut self, max: Option<usize>) -> Option<i64> {
        let start = self.pos;
        let negative = self.literal("-");
        match self.number(max) {
            Some(n) => Some(if negative { -n } else { n }),
            None    => { self.pos = start; None },
        }
    }

    /// The index of the longest name that the text starts with, ignoring
    /// case.
    fn name<N: IntoIterator<Item=(usize, String)>>(&mut self, names: N) -> Option<usize> {
        let rest = self.rest();
        let (index, length) = names.into_iter()
            .filter(|(_, name)| !name.is_empty())
            .filter(|(_, name)| rest.get(.. name.len()).map_or(false, |r| r.eq_ignore_ascii_case(name)))
            .map(|(i, name)| (i, name.len()))
            .max_by_key(|&(_, length)| length)?;

        self.pos += length;
        Some(index)
    }

    /// `Z`, or an offset as `+hhmm` or `+hh:mm`.
    fn offset(&mut self) -> Option<Offset> {
        if self.literal("Z") {
            return Some(Offset::utc());
        }

        let start = self.pos;
        let sign = if self.literal("+") { 1 } else if self.literal("-") { -1 } else { return None };
        let hours = self.number(Some(2)).filter(|_| self.just_read == 2);
        let _ = self.literal(":");
        let minutes = self.number(Some(2)).filter(|_| self.just_read == 2);

        match (hours, minutes) {
            (Some(h), Some(m)) => Offset::of_hours_and_minutes((sign * h) as i8, (sign * m) as i8).ok(),
            _                  => { self.pos = start; None },
        }
    }
}


struct PatternParser<'a> {
    iter:   CharIndices<'a>,
    fields: Vec<Field<'a>>,
    input:  &'a str,
    anchor: Option<Pos>,
    peekee: Option<Option<(Pos, char)>>,
}

impl<'a> PatternParser<'a> {
    fn new(input: &'a str) -> PatternParser<'a> {
        PatternParser {
            iter:   input.char_indices(),
            fields: Vec::new(),
            input,
            anchor: None,
            peekee: None,
        }
    }

    fn next(&mut self) -> Option<(Pos, char)> {
        match self.peekee {
            Some(p) => {
                self.peekee = None;
                p
            },
            None => { self.iter.next() },
        }
    }

    fn peek(&mut self) -> Option<(Pos, char)> {
        match self.peekee {
            Some(thing) => thing,
            None => {
                self.peekee = Some(self.iter.next());
                self.peek()
            }
        }
    }

    fn collect_up_to_anchor(&mut self, position: Option<Pos>) {
        if let Some(pos) = self.anchor {
            self.anchor = None;
            let text = match position {
                Some(new_pos) => &self.input[pos..new_pos],
                None          => &self.input[pos..],
            };
            self.fields.push(Field::Literal(text));
        }
    }

    fn parse_pattern(&mut self) -> Result<()> {
        loop {
            match self.next() {
                Some((pos, '\'')) => {
                    self.collect_up_to_anchor(Some(pos));
                    self.parse_quoted(pos)?;
                },
                Some((pos, c)) if c.is_ascii_alphabetic() => {
                    self.collect_up_to_anchor(Some(pos));

                    let count = self.count_repeats(c);
                    let field = Field::from_letter(c, count).ok_or(Error::InvalidPattern { c, pos })?;
                    self.fields.push(field);
                },
                Some((pos, _)) => {
                    if self.anchor.is_none() {
                        self.anchor = Some(pos);
                    }
                },
                None => break,
            }
        }

        self.collect_up_to_anchor(None);
        Ok(())
    }

    // Like every other literal, quotes are served as slices of the
    // pattern, so `''` becomes a literal made of its first character.

    fn parse_quoted(&mut self, open_pos: Pos) -> Result<()> {
        if let Some((pos, '\'')) = self.peek() {
            let _ = self.next();
            self.fields.push(Field::Literal(&self.input[pos ..=pos]));
            return Ok(());
        }

        loop {
            match self.next() {
                Some((pos, '\'')) => {
                    self.collect_up_to_anchor(Some(pos));

                    if let Some((_, '\'')) = self.peek() {
                        let _ = self.next();
                        self.fields.push(Field::Literal(&self.input[pos ..=pos]));
                    }
                    else {
                        return Ok(());
                    }
                },
                Some((pos, _)) => {
                    if self.anchor.is_none() {
                        self.anchor = Some(pos);
                    }
                },
                None => return Err(Error::InvalidPattern { c: '\'', pos: open_pos }),
            }
        }
    }

    /// The number of times a letter appears in a row, including the one
    /// just read.
    fn count_repeats(&mut self, c: char) -> Width {
        let mut count = 1;

        while let Some((_, n)) = self.peek() {
            if n != c {
                break;
            }

            let _ = self.next();
            count += 1;
        }

        count
    }
}


#[cfg(test)]
mod test {
    pub(crate) use super::{Pattern, Field::*};
    pub(crate) use crate::error::Error;

    mod parse {
        use super::*;

        macro_rules! test {
            ($name: ident: $input: expr => $result: expr) => {
                #[test]
                fn $name() {
                    assert_eq!(Pattern::parse($input), $result)
                }
            };
        }

        test!(empty_string: ""                => Ok(Pattern { fields: vec![] }));
        test!(entirely_literal: "12:00!"      => Ok(Pattern { fields: vec![ Literal("12:00!") ] }));
        test!(single_element: "yyyy"          => Ok(Pattern { fields: vec![ Year(4) ] }));
        test!(two_digit_year: "yy"            => Ok(Pattern { fields: vec![ YearOfCentury ] }));
        test!(surrounded: "(d)"               => Ok(Pattern { fields: vec![ Literal("("), Day(1), Literal(")") ] }));
        test!(a_bunch_of_elements: "y-MMM-dd" => Ok(Pattern { fields: vec![ Year(1), Literal("-"), MonthName(false), Literal("-"), Day(2) ] }));
        test!(long_names: "EEEE MMMM"         => Ok(Pattern { fields: vec![ WeekdayName(true), Literal(" "), MonthName(true) ] }));
        test!(clock: "h:mm a"                 => Ok(Pattern { fields: vec![ Hour12(1), Literal(":"), Minute(2), Literal(" "), AmPm ] }));

        test!(invalid_letter: "yyyy-qq"   => Err(Error::InvalidPattern { c: 'q', pos: 5 }));
        test!(unclosed_quote: "HH 'o clock" => Err(Error::InvalidPattern { c: '\'', pos: 3 }));

        test!(quoted: "'T'HH"           => Ok(Pattern { fields: vec![ Literal("T"), Hour(2) ] }));
        test!(quoted_letters: "'at' H"  => Ok(Pattern { fields: vec![ Literal("at"), Literal(" "), Hour(1) ] }));
        test!(lone_quote: "h''"         => Ok(Pattern { fields: vec![ Hour12(1), Literal("'") ] }));
        test!(quote_inside: "'o''clock'" => Ok(Pattern { fields: vec![ Literal("o"), Literal("'"), Literal("clock") ] }));
    }

    mod format {
        use super::*;
        use crate::cal::{LocalDate, LocalTime, LocalDateTime, Month};

        macro_rules! test {
            ($name: ident: $pattern: expr => $result: expr) => {
                #[test]
                fn $name() {
                    let date = LocalDate::ymd(2023, Month::March, 5).unwrap();
                    let time = LocalTime::hms_nanos(14, 7, 9, 45_000_000).unwrap();
                    let when = LocalDateTime::new(date, time);
                    let pattern = Pattern::parse($pattern).unwrap();
                    assert_eq!(pattern.format(&when, -5 * 3600, &locale::Time::english()), $result)
                }
            };
        }

        test!(iso_date:    "yyyy-MM-dd"         => "2023-03-05");
        test!(short_year:  "d/M/yy"             => "5/3/23");
        test!(names:       "EEE, d MMM y"       => "Sun, 5 Mar 2023");
        test!(long_names:  "EEEE d MMMM"        => "Sunday 5 March");
        test!(twelve_hour: "h:mm a"             => "2:07 PM");
        test!(fraction:    "HH:mm:ss.SSS"       => "14:07:09.045");
        test!(one_digit:   "s.S"                => "9.0");
        test!(quarter:     "'Q'Q yyyy"          => "Q1 2023");
        test!(offset:      "HH:mm Z"            => "14:07 -0500");
        test!(quoting:     "h 'o''clock'"       => "2 o'clock");

        #[test]
        fn every_long_weekday() {
            let pattern = Pattern::parse("EEEE").unwrap();
            let names = [ "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday" ];
            for (day, name) in (5 ..= 11).zip(names.iter()) {
                let when = LocalDateTime::new(LocalDate::ymd(2023, Month::March, day).unwrap(), LocalTime::midnight());
                assert_eq!(pattern.format(&when, 0, &locale::Time::english()), *name);
            }
        }

        #[test]
        fn years_before_one() {
            let date = LocalDate::ymd(-43, Month::March, 15).unwrap();
            let when = LocalDateTime::new(date, LocalTime::midnight());
            let pattern = Pattern::parse("yyyy-MM-dd").unwrap();
            assert_eq!(pattern.format(&when, 0, &locale::Time::english()), "-0043-03-15");
        }
    }

    mod read {
        use super::*;
        use crate::cal::fields::CalendarFieldSet;

        fn read(pattern: &str, input: &str) -> Result<CalendarFieldSet, Error> {
            let pattern = Pattern::parse(pattern).unwrap();
            pattern.read(input, &locale::Time::english()).map(|r| r.fields)
        }

        #[test]
        fn numbers() {
            let fields = read("yyyy-MM-dd HH:mm:ss", "2023-03-05 14:07:09").unwrap();
            assert_eq!(fields, CalendarFieldSet::new().with_year(2023).with_month(3).with_day(5)
                                                     .with_hour(14).with_minute(7).with_second(9));
        }

        #[test]
        fn abutting_numbers() {
            let fields = read("yyyyMMdd", "20230305").unwrap();
            assert_eq!(fields, CalendarFieldSet::new().with_year(2023).with_month(3).with_day(5));
        }

        #[test]
        fn two_digit_year() {
            assert_eq!(read("yy", "99").unwrap().year(), Some(2099));
        }

        #[test]
        fn names_ignore_case() {
            let fields = read("EEE d MMMM", "sunday 5 MAR").unwrap();
            assert_eq!(fields, CalendarFieldSet::new().with_weekday(1).with_day(5).with_month(3));
        }

        #[test]
        fn long_weekday_names() {
            assert_eq!(read("EEEE", "Wednesday").unwrap().weekday(), Some(4));
            assert_eq!(read("EEEE", "SATURDAY").unwrap().weekday(), Some(7));
            assert_eq!(read("EEEE, d", "Thu, 9").unwrap().weekday(), Some(5));
        }

        #[test]
        fn afternoon() {
            assert_eq!(read("h a", "12 AM").unwrap().hour(), Some(0));
            assert_eq!(read("h a", "12 PM").unwrap().hour(), Some(12));
            assert_eq!(read("h a", "3 pm").unwrap().hour(), Some(15));
        }

        #[test]
        fn fraction() {
            assert_eq!(read("s.SSS", "4.5").unwrap().nanosecond(), Some(500_000_000));
        }

        #[test]
        fn offset() {
            let pattern = Pattern::parse("HH Z").unwrap();
            let reading = pattern.read("10 +0530", &locale::Time::english()).unwrap();
            assert_eq!(reading.offset.map(|o| o.total_seconds()), Some(5 * 3600 + 30 * 60));
        }

        #[test]
        fn mismatched_literal() {
            match read("yyyy-MM-dd", "2023/03/05") {
                Err(Error::UnparsableInput { input, .. }) => assert_eq!(input, "2023/03/05"),
                other => panic!("unexpected {:?}", other),
            }
        }

        #[test]
        fn trailing_text() {
            assert!(read("HH:mm", "12:30pm").is_err());
        }
    }
}
