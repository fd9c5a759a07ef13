//! Spoken forms of millisecond durations.

use std::borrow::Cow;

use fluent_templates::fluent_bundle::FluentValue;

use crate::LIBRARY_DOMAIN;
use crate::catalog::{Arguments, TranslationResolver};
use crate::number::NumberFormatter;

const SECOND: u64 = 1_000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

#[derive(Clone, Copy)]
enum Span {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Span {
    const fn key(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }

    const fn singular(self) -> &'static str {
        match self {
            Self::Days => "{ $value } day",
            Self::Hours => "{ $value } hour",
            Self::Minutes => "{ $value } minute",
            Self::Seconds => "{ $value } second",
        }
    }

    const fn plural(self) -> &'static str {
        match self {
            Self::Days => "{ $value } days",
            Self::Hours => "{ $value } hours",
            Self::Minutes => "{ $value } minutes",
            Self::Seconds => "{ $value } seconds",
        }
    }
}

/// Renders durations given in milliseconds.
#[derive(Clone, Copy)]
pub struct DurationFormatter<'a> {
    numbers: NumberFormatter<'a>,
    resolver: TranslationResolver<'a>,
}

impl<'a> DurationFormatter<'a> {
    /// Pair a number formatter with the resolver used for phrases.
    #[must_use]
    pub const fn new(numbers: NumberFormatter<'a>, resolver: TranslationResolver<'a>) -> Self {
        Self { numbers, resolver }
    }

    /// The duration in its largest whole unit with two decimals, e.g.
    /// `1.50 hours`; below one second, a plain millisecond count.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "durations beyond 2^53 ms are not displayed exactly"
    )]
    pub fn format_duration(&self, milliseconds: u64) -> String {
        let largest = [
            (DAY, Span::Days),
            (HOUR, Span::Hours),
            (MINUTE, Span::Minutes),
            (SECOND, Span::Seconds),
        ]
        .into_iter()
        .find(|(unit, _)| milliseconds >= *unit);
        let Some((unit, span)) = largest else {
            let count = self.numbers.format_integer(i64::try_from(milliseconds).unwrap_or(0));
            return self.plural(
                "duration-milliseconds",
                milliseconds as f64,
                &count,
                "{ $value } millisecond",
                "{ $value } milliseconds",
            );
        };
        let value = self.numbers.format(milliseconds as f64 / unit as f64, Some(2));
        let mut args = Arguments::new();
        args.insert(Cow::Borrowed("value"), FluentValue::from(value));
        self.resolver
            .translate(
                Some(LIBRARY_DOMAIN),
                &format!("duration-{}-decimal", span.key()),
                span.plural(),
                Some(&args),
            )
            .text
    }

    /// The two most significant non-zero units, e.g. `1 day and 2 hours`.
    ///
    /// Seconds are rounded; a round up to sixty carries into the minutes.
    #[must_use]
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "milliseconds split into whole units"
    )]
    pub fn pretty_format_duration(&self, milliseconds: u64) -> String {
        let days = milliseconds / DAY;
        let hours = milliseconds % DAY / HOUR;
        let minutes = milliseconds % HOUR / MINUTE;
        let remainder = milliseconds % MINUTE;
        let seconds = (remainder + SECOND / 2) / SECOND;
        if seconds == 60 {
            return self.pretty_format_duration(milliseconds - remainder + MINUTE);
        }

        let counts = [
            (days, Span::Days),
            (hours, Span::Hours),
            (minutes, Span::Minutes),
        ];
        for (index, (count, span)) in counts.into_iter().enumerate() {
            if count == 0 {
                continue;
            }
            let first = self.count_phrase(count, span);
            let next = counts
                .get(index + 1)
                .copied()
                .unwrap_or((seconds, Span::Seconds));
            return if next.0 == 0 {
                first
            } else {
                self.pair(first, self.count_phrase(next.0, next.1))
            };
        }
        self.count_phrase(seconds, Span::Seconds)
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "unit counts stay far below 2^53"
    )]
    fn count_phrase(&self, count: u64, span: Span) -> String {
        let value = self.numbers.format_integer(i64::try_from(count).unwrap_or(i64::MAX));
        self.plural(
            &format!("duration-{}", span.key()),
            count as f64,
            &value,
            span.singular(),
            span.plural(),
        )
    }

    fn plural(&self, id: &str, count: f64, value: &str, singular: &str, plural: &str) -> String {
        let mut args = Arguments::new();
        args.insert(Cow::Borrowed("value"), FluentValue::from(value));
        self.resolver
            .translate_plural(Some(LIBRARY_DOMAIN), id, count, singular, plural, &args)
            .text
    }

    fn pair(&self, first: String, second: String) -> String {
        let mut args = Arguments::new();
        args.insert(Cow::Borrowed("first"), FluentValue::from(first));
        args.insert(Cow::Borrowed("second"), FluentValue::from(second));
        self.resolver
            .translate(
                Some(LIBRARY_DOMAIN),
                "duration-pair",
                "{ $first } and { $second }",
                Some(&args),
            )
            .text
    }
}
