use log::debug;
use parlance_common::to_canonical_digits;

use super::{ClockTime, ReadStrictness, TimeOptions, TimeTemplateEngine, TimeToken};
use crate::day_period::{DayPeriod, PeriodNameFormat};
use crate::error::ReadError;

impl TimeTemplateEngine<'_> {
    /// Read a time written with the locale's template.
    ///
    /// Input whitespace is collapsed, case is ignored, and digits of any
    /// known script are accepted. Under hour folding the minute field
    /// carries the whole value: `hour = minute / 60`, replacing any hour
    /// read earlier, and day periods are not consulted. Seconds default to
    /// zero when the template has none.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when the input and template disagree, a
    /// numeric field is missing, no day period name matches, or the fields
    /// do not form a valid time.
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "folded minutes split into hours and minutes"
    )]
    pub fn read(
        &self,
        text: &str,
        options: TimeOptions,
        strictness: ReadStrictness,
    ) -> Result<ClockTime, ReadError> {
        let normalised = to_canonical_digits(&text.split_whitespace().collect::<Vec<_>>().join(" "))
            .to_lowercase();
        let mut cursor = Cursor::new(&normalised);
        let mut fields = Fields::default();
        let mut use_period = false;
        let mut period = self.periods.for_time(ClockTime::MIDNIGHT);

        for token in self.settings.time_template().tokens(options) {
            if cursor.is_empty() {
                return Err(cursor.mismatch());
            }
            match *token {
                TimeToken::Space => {
                    if !cursor.eat(' ') && strictness == ReadStrictness::Strict {
                        return Err(cursor.mismatch());
                    }
                }
                TimeToken::Literal(expected) => {
                    let matched = expected
                        .to_lowercase()
                        .all(|lowered| cursor.eat(lowered));
                    if !matched {
                        return Err(cursor.mismatch());
                    }
                }
                TimeToken::Percent => {
                    if !cursor.eat('%') {
                        return Err(cursor.mismatch());
                    }
                }
                TimeToken::Unknown(_) => {}
                TimeToken::Hour24 { .. } => {
                    use_period = false;
                    fields.hour = Some(cursor.number("hour")?);
                }
                TimeToken::Hour12 { .. } => {
                    use_period = !options.duration;
                    fields.hour = Some(cursor.number("hour")?);
                }
                TimeToken::Minute => {
                    let minute = cursor.number("minute")?;
                    if options.fold_hours {
                        fields.hour = Some(minute / 60);
                        fields.minute = Some(minute % 60);
                    } else {
                        fields.minute = Some(minute);
                    }
                }
                TimeToken::Second => fields.second = Some(cursor.number("second")?),
                TimeToken::DayPeriod { .. } => {
                    period = Some(self.match_period(&mut cursor)?);
                }
            }
        }
        if !cursor.is_empty() {
            return Err(cursor.mismatch());
        }

        let hour = fields.hour.ok_or(ReadError::MissingField { field: "hour" })?;
        let minute = fields.minute.ok_or(ReadError::MissingField { field: "minute" })?;
        let second = fields.second.unwrap_or(0);
        let invalid = ReadError::InvalidTime {
            hour,
            minute,
            second,
        };
        if use_period && !options.fold_hours {
            period
                .and_then(|matched| matched.time(hour, minute, second, 0))
                .ok_or(invalid)
        } else {
            ClockTime::hms(hour, minute, second).ok_or(invalid)
        }
    }

    /// Read `text` strictly with the full template, then without seconds.
    ///
    /// # Errors
    ///
    /// Returns the error from the seconds-free attempt when both fail.
    pub fn read_time(&self, text: &str) -> Result<ClockTime, ReadError> {
        self.read(text, TimeOptions::default(), ReadStrictness::Strict)
            .or_else(|error| {
                debug!(target: "time", "full template rejected `{text}`: {error}");
                self.read(
                    text,
                    TimeOptions::default().without_seconds(),
                    ReadStrictness::Strict,
                )
            })
    }

    fn match_period(&self, cursor: &mut Cursor<'_>) -> Result<&DayPeriod, ReadError> {
        for period in self.periods.as_slice() {
            let name = period.name(PeriodNameFormat::Short).to_lowercase();
            if !name.is_empty() && cursor.eat_str(&name) {
                return Ok(period);
            }
        }
        Err(ReadError::UnknownDayPeriod {
            text: cursor.remaining().to_owned(),
        })
    }
}

#[derive(Default)]
struct Fields {
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    const fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    const fn remaining(&self) -> &'a str {
        self.rest
    }

    fn eat(&mut self, expected: char) -> bool {
        let rest = self.rest;
        rest.strip_prefix(expected)
            .map(|tail| self.rest = tail)
            .is_some()
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        let rest = self.rest;
        rest.strip_prefix(expected)
            .map(|tail| self.rest = tail)
            .is_some()
    }

    fn number(&mut self, field: &'static str) -> Result<u32, ReadError> {
        let digits = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        if digits == 0 {
            return Err(ReadError::MissingDigits { field });
        }
        let (number, rest) = self.rest.split_at(digits);
        self.rest = rest;
        number.parse().map_err(|_| ReadError::InvalidNumber {
            text: number.to_owned(),
        })
    }

    fn mismatch(&self) -> ReadError {
        ReadError::TemplateMismatch {
            remaining: self.rest.to_owned(),
        }
    }
}
