//! Plain number formatting and reading.
//!
//! Formatting rounds on the decimal text, swaps in the locale's decimal
//! symbol, inserts group separators, prepends the sign and finally renders
//! the digits in the locale's digit set. Reading undoes each step and
//! rejects separators that formatting would never have produced.

use parlance_common::{DigitSet, render_digits};

use crate::error::ReadError;
use crate::settings::LocaleSettings;

mod read;
mod rounding;

pub(crate) use read::{NumberShape, Sign, parse_unsigned, strip_sign};
pub use rounding::round_decimal_string;

/// Formats and reads numbers with one locale's settings.
#[derive(Clone, Copy, Debug)]
pub struct NumberFormatter<'a> {
    settings: &'a LocaleSettings,
}

impl<'a> NumberFormatter<'a> {
    /// Borrow the settings to format with.
    #[must_use]
    pub const fn new(settings: &'a LocaleSettings) -> Self {
        Self { settings }
    }

    /// Format `value` with `precision` fractional digits, or the configured
    /// number of decimal places when `None`.
    ///
    /// ```
    /// use parlance::{LocaleSettings, NumberFormatter};
    ///
    /// let settings = LocaleSettings::default();
    /// let numbers = NumberFormatter::new(&settings);
    /// assert_eq!(numbers.format(-1234567.891, None), "-1,234,567.89");
    /// assert_eq!(numbers.format(0.5, Some(0)), "1");
    /// ```
    #[must_use]
    pub fn format(&self, value: f64, precision: Option<usize>) -> String {
        let places = precision.unwrap_or(self.settings.decimal_places());
        let magnitude = if value.is_finite() {
            value.abs().to_string()
        } else {
            String::from("0")
        };
        let rounded = round_decimal_string(&magnitude, places);
        let signed = self.localize(&rounded, value < 0.0);
        self.render(&signed)
    }

    /// Format an integer without a fractional part.
    #[must_use]
    pub fn format_integer(&self, value: i64) -> String {
        let signed = self.localize(&value.unsigned_abs().to_string(), value < 0);
        self.render(&signed)
    }

    /// Format a decimal string such as `-1234.5e3`.
    ///
    /// A leading `+` or `-` is honoured and a lowercase `e` exponent is kept
    /// as written. A mantissa that does not start with a digit formats as
    /// zero. The mantissa is rounded only when `round` is set.
    #[must_use]
    pub fn format_numeric_str(&self, text: &str, round: bool, precision: Option<usize>) -> String {
        let places = precision.unwrap_or(self.settings.decimal_places());
        let negative = text.starts_with('-');
        let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
        let (written, suffix) = unsigned
            .find('e')
            .map_or((unsigned, ""), |index| unsigned.split_at(index));
        let exponent = if suffix.len() == 1 { "" } else { suffix };
        let mantissa = if written.starts_with(|c: char| c.is_ascii_digit()) {
            written
        } else {
            "0"
        };
        let rounded = if round {
            round_decimal_string(mantissa, places)
        } else {
            mantissa.to_owned()
        };
        let signed = self.localize(&rounded, negative);
        self.render(&format!("{signed}{exponent}"))
    }

    /// Read a number written in this locale.
    ///
    /// A leading or trailing sign is accepted, digits of any known script
    /// are understood, and an `e`/`E` exponent may follow the mantissa.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] for empty input, misplaced group separators,
    /// non-digit characters, or text the float parser rejects.
    #[expect(clippy::float_arithmetic, reason = "negative numbers are negated")]
    pub fn read(&self, text: &str) -> Result<f64, ReadError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ReadError::Empty);
        }
        let (sign, body) = strip_sign(
            trimmed,
            self.settings.positive_sign(),
            self.settings.negative_sign(),
        );
        let shape = NumberShape {
            separator: self.settings.thousands_separator(),
            grouping: self.settings.numeric_grouping(),
            decimal: self.settings.decimal_symbol(),
        };
        let magnitude = parse_unsigned(body, shape, true)?;
        Ok(match sign {
            Sign::Negative => -magnitude,
            Sign::Positive => magnitude,
        })
    }

    fn localize(&self, canonical: &str, negative: bool) -> String {
        let decimal = self.settings.decimal_symbol();
        let with_symbol = canonical.replacen('.', decimal, 1);
        let grouped = self.settings.numeric_grouping().insert(
            &with_symbol,
            self.settings.thousands_separator(),
            decimal,
        );
        let sign = if negative {
            self.settings.negative_sign()
        } else {
            self.settings.positive_sign()
        };
        format!("{sign}{grouped}")
    }

    fn render(&self, text: &str) -> String {
        match self.settings.digit_set() {
            DigitSet::Arabic => text.to_owned(),
            set => render_digits(text, set, self.settings.digit_language()),
        }
    }
}
