//! The single error type returned by every fallible operation.

use std::borrow::Cow;

use thiserror::Error;


/// Everything that can go wrong when resolving, searching, formatting or
/// parsing dates.
///
/// All of these are ordinary values handed back to the caller: nothing in
/// this library panics on bad input.
#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum Error {

    /// A set of calendar fields that does not name any real date, such as
    /// the 31st of February, or a weekday that disagrees with the day.
    #[error("fields do not denote a real date: {reason}")]
    UnresolvableDate { reason: Cow<'static, str> },

    /// Calendar arithmetic produced a value outside the range this
    /// library can represent.
    #[error("calendar arithmetic has no result: {reason}")]
    NonexistentResult { reason: Cow<'static, str> },

    /// A bounded search for matching fields ran out of candidates.
    #[error("no matching date within {days_searched} days")]
    NoMatch { days_searched: i64 },

    /// An interval whose end lies before its start.
    #[error("interval ends {seconds}s before it starts")]
    InvalidInterval { seconds: i64 },

    /// Input text that does not match a pattern, or that matches it but
    /// names an invalid date.
    #[error("cannot parse {input:?}: {reason}")]
    UnparsableInput { input: String, reason: Cow<'static, str> },

    /// A format pattern containing a letter with no meaning.
    #[error("invalid pattern character {c:?} at position {pos}")]
    InvalidPattern { c: char, pos: usize },

    /// A time zone or locale identifier the data provider does not know.
    #[error("unknown time zone or locale {name:?}")]
    UnknownZoneOrLocale { name: String },
}

impl Error {
    pub(crate) fn unresolvable<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        Error::UnresolvableDate { reason: reason.into() }
    }

    pub(crate) fn nonexistent<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        Error::NonexistentResult { reason: reason.into() }
    }

    pub(crate) fn unparsable<R: Into<Cow<'static, str>>>(input: &str, reason: R) -> Self {
        Error::UnparsableInput { input: input.to_owned(), reason: reason.into() }
    }

    pub(crate) fn unknown<N: Into<String>>(name: N) -> Self {
        Error::UnknownZoneOrLocale { name: name.into() }
    }
}

/// Shorthand for results carrying this crate’s [`Error`].
pub type Result<T> = std::result::Result<T, Error>;


#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display_unresolvable() {
        let e = Error::unresolvable("day 31 is out of range for February");
        assert_eq!(e.to_string(), "fields do not denote a real date: day 31 is out of range for February");
    }

    #[test]
    fn display_pattern() {
        let e = Error::InvalidPattern { c: 'q', pos: 4 };
        assert_eq!(e.to_string(), "invalid pattern character 'q' at position 4");
    }
}
