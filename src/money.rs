//! Monetary amounts.
//!
//! Amounts use the monetary variants of every numeric setting. The sign is
//! placed according to [`SignPosition`] and the currency symbol is joined to
//! the signed amount with one space, in front or behind as configured.

use parlance_common::{DigitSet, render_digits};

use crate::error::ReadError;
use crate::number::{NumberShape, Sign, parse_unsigned, round_decimal_string, strip_sign};
use crate::settings::{LocaleSettings, SignPosition};

/// Formats and reads monetary amounts with one locale's settings.
#[derive(Clone, Copy, Debug)]
pub struct MoneyFormatter<'a> {
    settings: &'a LocaleSettings,
}

impl<'a> MoneyFormatter<'a> {
    /// Borrow the settings to format with.
    #[must_use]
    pub const fn new(settings: &'a LocaleSettings) -> Self {
        Self { settings }
    }

    /// Format `value` as an amount.
    ///
    /// `symbol` defaults to the configured currency symbol and `precision`
    /// to the monetary decimal places.
    ///
    /// ```
    /// use parlance::{LocaleSettings, MoneyFormatter};
    ///
    /// let settings = LocaleSettings::default();
    /// let money = MoneyFormatter::new(&settings);
    /// assert_eq!(money.format(-42.5, Some("$"), Some(2)), "($ 42.50)");
    /// assert_eq!(money.format(1234.5, None, None), "$ 1,234.50");
    /// ```
    #[must_use]
    pub fn format(&self, value: f64, symbol: Option<&str>, precision: Option<usize>) -> String {
        let settings = self.settings;
        let places = precision.unwrap_or(settings.monetary_decimal_places());
        let magnitude = if value.is_finite() {
            value.abs().to_string()
        } else {
            String::from("0")
        };
        let decimal = settings.monetary_decimal_symbol();
        let rounded = round_decimal_string(&magnitude, places).replacen('.', decimal, 1);
        let mut amount = settings.monetary_grouping().insert(
            &rounded,
            settings.monetary_thousands_separator(),
            decimal,
        );
        let mut marker = symbol.unwrap_or(settings.currency_symbol()).to_owned();

        let (sign, position, prefix) = if value < 0.0 {
            (
                settings.negative_sign(),
                settings.negative_sign_position(),
                settings.negative_prefix_currency_symbol(),
            )
        } else {
            (
                settings.positive_sign(),
                settings.positive_sign_position(),
                settings.positive_prefix_currency_symbol(),
            )
        };
        match position {
            SignPosition::ParensAround => {}
            SignPosition::BeforeQuantityMoney => amount.insert_str(0, sign),
            SignPosition::AfterQuantityMoney => amount.push_str(sign),
            SignPosition::BeforeMoney => marker.insert_str(0, sign),
            SignPosition::AfterMoney => marker.push_str(sign),
        }

        let mut text = if marker.is_empty() {
            amount
        } else if prefix {
            format!("{marker} {amount}")
        } else {
            format!("{amount} {marker}")
        };
        if position == SignPosition::ParensAround {
            text = format!("({text})");
        }
        match settings.monetary_digit_set() {
            DigitSet::Arabic => text,
            set => render_digits(&text, set, settings.digit_language()),
        }
    }

    /// Read an amount written in this locale.
    ///
    /// The currency symbol may sit at either edge, outside or inside the
    /// sign. Parentheses mean a negative amount only when that is the
    /// configured negative style.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when nothing remains after removing symbol and
    /// sign, or when the remainder is not a well-grouped number.
    #[expect(clippy::float_arithmetic, reason = "negative amounts are negated")]
    pub fn read(&self, text: &str) -> Result<f64, ReadError> {
        let settings = self.settings;
        let symbol = settings.currency_symbol();
        let mut remaining = text.trim();
        let mut symbol_found = false;
        if let Some(rest) = strip_symbol(remaining, symbol) {
            remaining = rest;
            symbol_found = true;
        }
        if remaining.is_empty() {
            return Err(ReadError::Empty);
        }

        let parens = if settings.negative_sign_position() == SignPosition::ParensAround {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let (sign, body) = remaining
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .map_or_else(
                || strip_sign(remaining, settings.positive_sign(), settings.negative_sign()),
                |inner| (parens, inner.trim()),
            );
        remaining = body;
        if !symbol_found {
            remaining = strip_symbol(remaining, symbol).unwrap_or(remaining);
        }
        if remaining.is_empty() {
            return Err(ReadError::Empty);
        }

        let shape = NumberShape {
            separator: settings.monetary_thousands_separator(),
            grouping: settings.monetary_grouping(),
            decimal: settings.monetary_decimal_symbol(),
        };
        let magnitude = parse_unsigned(remaining, shape, false)?;
        Ok(match sign {
            Sign::Negative => -magnitude,
            Sign::Positive => magnitude,
        })
    }
}

fn strip_symbol<'t>(text: &'t str, symbol: &str) -> Option<&'t str> {
    if symbol.is_empty() {
        return None;
    }
    text.strip_prefix(symbol)
        .map(str::trim_start)
        .or_else(|| text.strip_suffix(symbol).map(str::trim_end))
}
