//! Wall-clock times and their localized text form.
//!
//! Formatting and reading are both driven by a [`TimeTemplate`]. The
//! [`TimeOptions`] select a rewritten variant of that template (no seconds,
//! no day period, hours folded into minutes) and whether the value is a
//! duration rather than a time of day.

use std::fmt;

use crate::day_period::DayPeriods;
use crate::settings::LocaleSettings;

mod format;
mod read;
mod template;

pub use template::{TimeTemplate, TimeToken};

/// Formats and reads times with one locale's template, day periods and
/// date/time digit set.
#[derive(Clone, Copy, Debug)]
pub struct TimeTemplateEngine<'a> {
    settings: &'a LocaleSettings,
    periods: &'a DayPeriods,
}

impl<'a> TimeTemplateEngine<'a> {
    /// Borrow the settings and day periods to use.
    #[must_use]
    pub const fn new(settings: &'a LocaleSettings, periods: &'a DayPeriods) -> Self {
        Self { settings, periods }
    }
}

/// A time of day with millisecond resolution.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

impl ClockTime {
    /// 00:00:00.000.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
    };

    /// 23:59:59.999.
    pub const LAST_MILLISECOND: Self = Self {
        hour: 23,
        minute: 59,
        second: 59,
        millisecond: 999,
    };

    /// Build a time from hours, minutes, and seconds.
    #[must_use]
    pub const fn hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        Self::hmsz(hour, minute, second, 0)
    }

    /// Build a time including milliseconds; `None` when any field is out of
    /// range.
    #[must_use]
    pub const fn hmsz(hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// Parse `HH:MM`, `HH:MM:SS`, or `HH:MM:SS.mmm`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (clock, millisecond) = match text.trim().split_once('.') {
            Some((clock, fraction)) => (clock, fraction.parse().ok()?),
            None => (text.trim(), 0),
        };
        let mut fields = clock.split(':');
        let hour = fields.next()?.parse().ok()?;
        let minute = fields.next()?.parse().ok()?;
        let second = fields.next().map_or(Some(0), |field| field.parse().ok())?;
        if fields.next().is_some() {
            return None;
        }
        Self::hmsz(hour, minute, second, millisecond)
    }

    /// Hour of the day, 0–23.
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    /// Minute of the hour.
    #[must_use]
    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Second of the minute.
    #[must_use]
    pub const fn second(self) -> u32 {
        self.second
    }

    /// Millisecond of the second.
    #[must_use]
    pub const fn millisecond(self) -> u32 {
        self.millisecond
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// Variations applied when formatting or reading a time.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TimeOptions {
    /// Drop the seconds field and its separator.
    pub without_seconds: bool,
    /// Drop the day-period field.
    pub without_am_pm: bool,
    /// Drop hour fields and express the whole value in minutes.
    pub fold_hours: bool,
    /// Treat the value as an elapsed duration: 12-hour fields show the
    /// 24-hour value and never consult day periods.
    pub duration: bool,
}

impl TimeOptions {
    /// Set [`Self::without_seconds`].
    #[must_use]
    pub const fn without_seconds(mut self) -> Self {
        self.without_seconds = true;
        self
    }

    /// Set [`Self::without_am_pm`].
    #[must_use]
    pub const fn without_am_pm(mut self) -> Self {
        self.without_am_pm = true;
        self
    }

    /// Set [`Self::fold_hours`].
    #[must_use]
    pub const fn fold_hours(mut self) -> Self {
        self.fold_hours = true;
        self
    }

    /// Set [`Self::duration`].
    #[must_use]
    pub const fn duration(mut self) -> Self {
        self.duration = true;
        self
    }
}

/// How closely the input must follow the template's whitespace.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReadStrictness {
    /// A template space requires at least one input space.
    Strict,
    /// Template spaces match any amount of input whitespace, including none.
    #[default]
    Lax,
}
