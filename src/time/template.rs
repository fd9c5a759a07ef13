//! Percent-escaped time templates, tokenized once and cached with every
//! rewrite variant the formatting options can ask for.

use std::fmt;

use super::TimeOptions;

/// One element of a parsed time template.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimeToken {
    /// A character copied verbatim.
    Literal(char),
    /// A run of whitespace, collapsed to one space.
    Space,
    /// `%%`, a literal percent sign.
    Percent,
    /// `%H` (padded) or `%k` (unpadded) 24-hour clock hour.
    Hour24 {
        /// Whether the hour is zero-padded to two digits.
        padded: bool,
    },
    /// `%I` (padded) or `%l` (unpadded) hour within the day period.
    Hour12 {
        /// Whether the hour is zero-padded to two digits.
        padded: bool,
    },
    /// `%M`.
    Minute,
    /// `%S`.
    Second,
    /// `%p` (short name) or `%P` (lowercased short name).
    DayPeriod {
        /// Whether the name is lowercased.
        lowercase: bool,
    },
    /// Any other escape; formats as the escaped character.
    Unknown(char),
}

impl TimeToken {
    const fn is_hour(self) -> bool {
        matches!(self, Self::Hour24 { .. } | Self::Hour12 { .. })
    }

    fn is_separator(self) -> bool {
        matches!(self, Self::Space) || matches!(self, Self::Literal(c) if is_punctuation(c))
    }
}

fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && c != '%'
}

const WITHOUT_SECONDS: usize = 1;
const FOLD_HOURS: usize = 2;
const WITHOUT_AM_PM: usize = 4;
const VARIANTS: usize = 8;

/// A tokenized time template together with its rewritten variants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeTemplate {
    source: String,
    variants: [Vec<TimeToken>; VARIANTS],
}

impl Default for TimeTemplate {
    fn default() -> Self {
        Self::parse("%H:%M:%S")
    }
}

impl TimeTemplate {
    /// Tokenize `source` and precompute every rewrite variant.
    ///
    /// ```
    /// use parlance::time::{TimeOptions, TimeTemplate};
    ///
    /// let template = TimeTemplate::parse("%I:%M:%S %p");
    /// let options = TimeOptions::default().without_seconds().without_am_pm();
    /// assert_eq!(template.rewritten(options), "%I:%M");
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let tokens = tokenize(source);
        let variants = std::array::from_fn(|mask| rewrite(&tokens, mask));
        Self {
            source: source.to_owned(),
            variants,
        }
    }

    /// The template text as configured.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokens after the rewrite passes selected by `options`.
    #[must_use]
    pub fn tokens(&self, options: TimeOptions) -> &[TimeToken] {
        self.variants
            .get(variant_index(options))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the template renders hours relative to a day period.
    #[must_use]
    pub fn uses_day_periods(&self) -> bool {
        self.tokens(TimeOptions::default())
            .iter()
            .any(|token| matches!(token, TimeToken::Hour12 { .. }))
    }

    /// The rewritten template for `options`, in template syntax.
    #[must_use]
    pub fn rewritten(&self, options: TimeOptions) -> String {
        self.tokens(options).iter().map(|token| spell(*token)).collect()
    }
}

impl fmt::Display for TimeTemplate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.source)
    }
}

const fn variant_index(options: TimeOptions) -> usize {
    let mut index = 0;
    if options.without_seconds {
        index |= WITHOUT_SECONDS;
    }
    if options.fold_hours {
        index |= FOLD_HOURS;
    }
    if options.without_am_pm {
        index |= WITHOUT_AM_PM;
    }
    index
}

fn tokenize(source: &str) -> Vec<TimeToken> {
    let mut tokens = Vec::new();
    let mut chars = source.trim().chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '%' => match chars.next() {
                Some('%') => TimeToken::Percent,
                Some('H') => TimeToken::Hour24 { padded: true },
                Some('k') => TimeToken::Hour24 { padded: false },
                Some('I') => TimeToken::Hour12 { padded: true },
                Some('l') => TimeToken::Hour12 { padded: false },
                Some('M') => TimeToken::Minute,
                Some('S') => TimeToken::Second,
                Some('p') => TimeToken::DayPeriod { lowercase: false },
                Some('P') => TimeToken::DayPeriod { lowercase: true },
                Some(other) => TimeToken::Unknown(other),
                None => break,
            },
            _ if c.is_whitespace() => {
                if tokens.last() == Some(&TimeToken::Space) {
                    continue;
                }
                TimeToken::Space
            }
            _ => TimeToken::Literal(c),
        };
        tokens.push(token);
    }
    tokens
}

fn rewrite(tokens: &[TimeToken], mask: usize) -> Vec<TimeToken> {
    let mut rewritten = tokens.to_vec();
    if mask & WITHOUT_SECONDS != 0 {
        strip_with_preceding(&mut rewritten, |token| token == TimeToken::Second);
    }
    if mask & FOLD_HOURS != 0 {
        while strip_with_succeeding(&mut rewritten, TimeToken::is_hour) {}
    }
    if mask & WITHOUT_AM_PM != 0 {
        strip_day_period(&mut rewritten);
    }
    rewritten
}

/// Remove the first match, the whitespace before it, and at most one
/// punctuation character among that whitespace.
fn strip_with_preceding(tokens: &mut Vec<TimeToken>, target: impl Fn(TimeToken) -> bool) {
    let Some(index) = tokens.iter().position(|token| target(*token)) else {
        return;
    };
    let mut start = index;
    start = skip_spaces_back(tokens, start);
    if start > 0
        && matches!(tokens.get(start - 1), Some(TimeToken::Literal(c)) if is_punctuation(*c))
    {
        start -= 1;
    }
    start = skip_spaces_back(tokens, start);
    tokens.drain(start..=index);
}

fn skip_spaces_back(tokens: &[TimeToken], mut start: usize) -> usize {
    while start > 0 && tokens.get(start - 1) == Some(&TimeToken::Space) {
        start -= 1;
    }
    start
}

/// Remove the first match and the punctuation and whitespace run after it.
fn strip_with_succeeding(tokens: &mut Vec<TimeToken>, target: impl Fn(TimeToken) -> bool) -> bool {
    let Some(index) = tokens.iter().position(|token| target(*token)) else {
        return false;
    };
    let mut end = index + 1;
    while tokens.get(end).is_some_and(|token| token.is_separator()) {
        end += 1;
    }
    tokens.drain(index..end);
    true
}

fn strip_day_period(tokens: &mut Vec<TimeToken>) {
    let is_period = |token: TimeToken| matches!(token, TimeToken::DayPeriod { .. });
    if tokens.first().is_some_and(|token| is_period(*token)) {
        strip_with_succeeding(tokens, is_period);
    } else {
        strip_with_preceding(tokens, is_period);
    }
}

fn spell(token: TimeToken) -> String {
    match token {
        TimeToken::Literal(c) => c.to_string(),
        TimeToken::Space => String::from(" "),
        TimeToken::Percent => String::from("%%"),
        TimeToken::Hour24 { padded: true } => String::from("%H"),
        TimeToken::Hour24 { padded: false } => String::from("%k"),
        TimeToken::Hour12 { padded: true } => String::from("%I"),
        TimeToken::Hour12 { padded: false } => String::from("%l"),
        TimeToken::Minute => String::from("%M"),
        TimeToken::Second => String::from("%S"),
        TimeToken::DayPeriod { lowercase: false } => String::from("%p"),
        TimeToken::DayPeriod { lowercase: true } => String::from("%P"),
        TimeToken::Unknown(c) => format!("%{c}"),
    }
}
