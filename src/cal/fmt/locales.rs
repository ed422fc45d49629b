//! Locale data: the patterns that date and time styles expand to.

use std::borrow::Cow;

use crate::cal::fmt::DateStyle;
use crate::error::{Error, Result};


/// The date and time patterns a locale uses for each style, and the
/// text put between a date and a time when both are shown.
///
/// Names of months and weekdays are always English.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct LocaleData {
    identifier: Cow<'static, str>,
    date_patterns: [Cow<'static, str>; 4],
    time_patterns: [Cow<'static, str>; 4],
    separator: Cow<'static, str>,
}

impl LocaleData {

    /// American English: `3/5/23`, `2:07 PM`.
    pub fn en_us() -> Self {
        Self {
            identifier: "en_US".into(),
            date_patterns: [ "M/d/yy".into(), "MMM d, y".into(), "MMMM d, y".into(), "EEEE, MMMM d, y".into() ],
            time_patterns: [ "h:mm a".into(), "h:mm:ss a".into(), "h:mm:ss a Z".into(), "h:mm:ss a Z".into() ],
            separator: ", ".into(),
        }
    }

    /// British English: `05/03/2023`, `14:07`.
    pub fn en_gb() -> Self {
        Self {
            identifier: "en_GB".into(),
            date_patterns: [ "dd/MM/y".into(), "d MMM y".into(), "d MMMM y".into(), "EEEE, d MMMM y".into() ],
            time_patterns: [ "HH:mm".into(), "HH:mm:ss".into(), "HH:mm:ss Z".into(), "HH:mm:ss Z".into() ],
            separator: ", ".into(),
        }
    }

    /// The fixed locale for machine-readable text, which never changes
    /// with user preferences.
    pub fn en_us_posix() -> Self {
        Self {
            identifier: "en_US_POSIX".into(),
            date_patterns: [ "yyyy-MM-dd".into(), "yyyy-MM-dd".into(), "MMMM d, yyyy".into(), "EEEE, MMMM d, yyyy".into() ],
            time_patterns: [ "HH:mm".into(), "HH:mm:ss".into(), "HH:mm:ss Z".into(), "HH:mm:ss Z".into() ],
            separator: " ".into(),
        }
    }

    /// A locale of your own, starting out with the same patterns as
    /// `en_US_POSIX`.
    pub fn custom<I: Into<String>>(identifier: I) -> Self {
        Self { identifier: Cow::Owned(identifier.into()), ..Self::en_us_posix() }
    }

    /// Replaces the pattern used for a date style. Setting one for
    /// `DateStyle::None` does nothing.
    pub fn with_date_pattern<P: Into<String>>(mut self, style: DateStyle, pattern: P) -> Self {
        if let Some(i) = style.index() {
            self.date_patterns[i] = Cow::Owned(pattern.into());
        }
        self
    }

    pub fn with_time_pattern<P: Into<String>>(mut self, style: DateStyle, pattern: P) -> Self {
        if let Some(i) = style.index() {
            self.time_patterns[i] = Cow::Owned(pattern.into());
        }
        self
    }

    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = Cow::Owned(separator.into());
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The pattern for a date style, or nothing for `DateStyle::None`.
    pub fn date_pattern(&self, style: DateStyle) -> Option<&str> {
        style.index().map(|i| &*self.date_patterns[i])
    }

    pub fn time_pattern(&self, style: DateStyle) -> Option<&str> {
        style.index().map(|i| &*self.time_patterns[i])
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for LocaleData {
    fn default() -> Self {
        Self::en_us()
    }
}


/// Something that can look up locale data by its identifier.
pub trait LocaleProvider: Send + Sync {
    fn locale_data(&self, identifier: &str) -> Result<LocaleData>;
}

/// The locales built into this library: `en_US`, `en_GB`, and
/// `en_US_POSIX`. Identifiers may use either `_` or `-`.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct BuiltinLocales;

impl LocaleProvider for BuiltinLocales {
    fn locale_data(&self, identifier: &str) -> Result<LocaleData> {
        match &*identifier.replace('-', "_") {
            "en_US"        => Ok(LocaleData::en_us()),
            "en_GB"        => Ok(LocaleData::en_gb()),
            "en_US_POSIX"  => Ok(LocaleData::en_us_posix()),
            _              => {
                debug!("no built-in locale {:?}", identifier);
                Err(Error::unknown(identifier))
            },
        }
    }
}
