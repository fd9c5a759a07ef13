//! Per-locale formatting settings.
//!
//! [`LocaleSettings`] holds every value the number, money, time and byte-size
//! formatters consult. Values come from [`LocaleSettings::from_config`] and
//! change only through the explicit setters, each of which touches exactly
//! one field.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use parlance_common::{DigitSet, GroupingPattern, LocaleConfig};

use crate::currency::CurrencyMetadata;
use crate::time::TimeTemplate;

/// Where the sign goes in a formatted monetary amount.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SignPosition {
    /// `($ 42.50)`.
    ParensAround,
    /// `$ -42.50`.
    #[default]
    BeforeQuantityMoney,
    /// `$ 42.50-`.
    AfterQuantityMoney,
    /// `-$ 42.50`.
    BeforeMoney,
    /// `$- 42.50`.
    AfterMoney,
}

impl SignPosition {
    /// Map a configuration identifier (0–4) to a position.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::ParensAround),
            1 => Some(Self::BeforeQuantityMoney),
            2 => Some(Self::AfterQuantityMoney),
            3 => Some(Self::BeforeMoney),
            4 => Some(Self::AfterMoney),
            _ => None,
        }
    }

    /// The configuration identifier.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::ParensAround => 0,
            Self::BeforeQuantityMoney => 1,
            Self::AfterQuantityMoney => 2,
            Self::BeforeMoney => 3,
            Self::AfterMoney => 4,
        }
    }
}

impl FromStr for SignPosition {
    type Err = String;

    /// Accepts the identifier or a name such as `ParensAround` or
    /// `BeforeQuantity`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return Self::from_id(id).ok_or_else(|| format!("unknown sign position {id}"));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "parensaround" => Ok(Self::ParensAround),
            "beforequantity" | "beforequantitymoney" => Ok(Self::BeforeQuantityMoney),
            "afterquantity" | "afterquantitymoney" => Ok(Self::AfterQuantityMoney),
            "beforemoney" => Ok(Self::BeforeMoney),
            "aftermoney" => Ok(Self::AfterMoney),
            _ => Err(format!("unknown sign position `{trimmed}`")),
        }
    }
}

impl fmt::Display for SignPosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ParensAround => "ParensAround",
            Self::BeforeQuantityMoney => "BeforeQuantity",
            Self::AfterQuantityMoney => "AfterQuantity",
            Self::BeforeMoney => "BeforeMoney",
            Self::AfterMoney => "AfterMoney",
        };
        formatter.write_str(name)
    }
}

/// Unit names and multipliers used for byte sizes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum BinaryUnitDialect {
    /// KiB, MiB, … powers of 1024.
    #[default]
    Iec,
    /// KB, MB, … powers of 1024.
    Jedec,
    /// kB, MB, … powers of 1000.
    Metric,
}

impl BinaryUnitDialect {
    /// Map a configuration identifier to a dialect; unknown ids yield IEC.
    #[must_use]
    pub fn from_id(id: i64) -> Self {
        match id {
            0 => Self::Iec,
            1 => Self::Jedec,
            2 => Self::Metric,
            other => {
                debug!(target: "settings", "unknown binary unit dialect {other}; using IEC");
                Self::Iec
            }
        }
    }

    /// The size of one step between units.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Iec | Self::Jedec => 1024.0,
            Self::Metric => 1000.0,
        }
    }
}

/// Every value the formatters read for one locale.
#[derive(Clone, Debug, PartialEq)]
pub struct LocaleSettings {
    language: String,
    language_sensitive_digits: bool,

    decimal_symbol: String,
    thousands_separator: String,
    numeric_grouping: GroupingPattern,
    positive_sign: String,
    negative_sign: String,
    digit_set: DigitSet,
    decimal_places: usize,

    monetary_decimal_symbol: String,
    monetary_thousands_separator: String,
    monetary_grouping: GroupingPattern,
    monetary_digit_set: DigitSet,
    currency_code: String,
    currency_symbol: String,
    monetary_decimal_places: usize,
    positive_sign_position: SignPosition,
    negative_sign_position: SignPosition,
    positive_prefix_currency_symbol: bool,
    negative_prefix_currency_symbol: bool,

    time_template: TimeTemplate,
    date_format: String,
    date_format_short: String,
    date_time_digit_set: DigitSet,
    week_start_day: u8,

    binary_unit_dialect: BinaryUnitDialect,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            language: String::from(parlance_common::DEFAULT_LANGUAGE),
            language_sensitive_digits: true,
            decimal_symbol: String::from("."),
            thousands_separator: String::from(","),
            numeric_grouping: GroupingPattern::new([3]),
            positive_sign: String::new(),
            negative_sign: String::from("-"),
            digit_set: DigitSet::Arabic,
            decimal_places: 2,
            monetary_decimal_symbol: String::from("."),
            monetary_thousands_separator: String::from(","),
            monetary_grouping: GroupingPattern::new([3]),
            monetary_digit_set: DigitSet::Arabic,
            currency_code: String::from("USD"),
            currency_symbol: String::from("$"),
            monetary_decimal_places: 2,
            positive_sign_position: SignPosition::BeforeQuantityMoney,
            negative_sign_position: SignPosition::ParensAround,
            positive_prefix_currency_symbol: true,
            negative_prefix_currency_symbol: true,
            time_template: TimeTemplate::default(),
            date_format: String::from("%A %d %B %Y"),
            date_format_short: String::from("%Y-%m-%d"),
            date_time_digit_set: DigitSet::Arabic,
            week_start_day: 1,
            binary_unit_dialect: BinaryUnitDialect::Iec,
        }
    }
}

impl LocaleSettings {
    /// Read every setting from `config`, falling back to defaults for
    /// absent or malformed values.
    ///
    /// The currency symbol and monetary precision default to what
    /// `currencies` reports for the configured currency code.
    #[must_use]
    pub fn from_config(config: &LocaleConfig, currencies: &dyn CurrencyMetadata) -> Self {
        let defaults = Self::default();
        let currency_code = config.entry_or("CurrencyCode", &defaults.currency_code);
        let currency_symbol = config
            .entry("CurrencySymbol")
            .or_else(|| currencies.symbol(&currency_code))
            .unwrap_or_else(|| currency_code.clone());
        let currency_places = currencies
            .decimal_places(&currency_code)
            .unwrap_or(defaults.monetary_decimal_places);

        let mut settings = Self {
            language: defaults.language.clone(),
            language_sensitive_digits: config.bool(
                "LanguageSensitiveDigits",
                defaults.language_sensitive_digits,
            ),
            decimal_symbol: config.entry_or("DecimalSymbol", &defaults.decimal_symbol),
            thousands_separator: config
                .entry("ThousandsSeparator")
                .unwrap_or_else(|| defaults.thousands_separator.clone()),
            numeric_grouping: config
                .entry("DigitGroupFormat")
                .map_or_else(|| defaults.numeric_grouping.clone(), |raw| GroupingPattern::parse(&raw)),
            positive_sign: config.entry_or("PositiveSign", &defaults.positive_sign),
            negative_sign: config.entry_or("NegativeSign", &defaults.negative_sign),
            digit_set: DigitSet::from_id(config.int("DigitSet", 0)),
            decimal_places: places(config, "DecimalPlaces", defaults.decimal_places),
            monetary_decimal_symbol: config
                .entry_or("MonetaryDecimalSymbol", &defaults.monetary_decimal_symbol),
            monetary_thousands_separator: config.entry_or(
                "MonetaryThousandsSeparator",
                &defaults.monetary_thousands_separator,
            ),
            monetary_grouping: config
                .entry("MonetaryDigitGroupFormat")
                .map_or_else(|| defaults.monetary_grouping.clone(), |raw| GroupingPattern::parse(&raw)),
            monetary_digit_set: DigitSet::from_id(config.int("MonetaryDigitSet", 0)),
            currency_code,
            currency_symbol,
            monetary_decimal_places: places(config, "MonetaryDecimalPlaces", currency_places),
            positive_sign_position: sign_position(
                config,
                "PositiveMonetarySignPosition",
                defaults.positive_sign_position,
            ),
            negative_sign_position: sign_position(
                config,
                "NegativeMonetarySignPosition",
                defaults.negative_sign_position,
            ),
            positive_prefix_currency_symbol: config.bool(
                "PositivePrefixCurrencySymbol",
                defaults.positive_prefix_currency_symbol,
            ),
            negative_prefix_currency_symbol: config.bool(
                "NegativePrefixCurrencySymbol",
                defaults.negative_prefix_currency_symbol,
            ),
            time_template: config
                .entry("TimeFormat")
                .map_or_else(TimeTemplate::default, |raw| TimeTemplate::parse(&raw)),
            date_format: config.entry_or("DateFormat", &defaults.date_format),
            date_format_short: config.entry_or("DateFormatShort", &defaults.date_format_short),
            date_time_digit_set: DigitSet::from_id(config.int("DateTimeDigitSet", 0)),
            week_start_day: defaults.week_start_day,
            binary_unit_dialect: BinaryUnitDialect::from_id(config.int("BinaryUnitDialect", 0)),
        };
        let week_start = config.int("WeekStartDay", i64::from(defaults.week_start_day));
        if let Ok(day) = u8::try_from(week_start) {
            settings.set_week_start_day(day);
        }
        settings
    }

    /// Language whose digit conventions gate digit-set rendering.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Set the language used for digit-set gating.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Whether digit sets are honoured only for languages that use them.
    #[must_use]
    pub const fn language_sensitive_digits(&self) -> bool {
        self.language_sensitive_digits
    }

    /// Toggle language-sensitive digit rendering.
    pub const fn set_language_sensitive_digits(&mut self, enabled: bool) {
        self.language_sensitive_digits = enabled;
    }

    /// Language context to pass to digit rendering, if any.
    #[must_use]
    pub fn digit_language(&self) -> Option<&str> {
        self.language_sensitive_digits.then_some(self.language.as_str())
    }

    /// Decimal symbol for plain numbers.
    #[must_use]
    pub fn decimal_symbol(&self) -> &str {
        &self.decimal_symbol
    }

    /// Set the decimal symbol for plain numbers.
    pub fn set_decimal_symbol(&mut self, symbol: impl Into<String>) {
        self.decimal_symbol = symbol.into();
    }

    /// Thousands separator for plain numbers.
    #[must_use]
    pub fn thousands_separator(&self) -> &str {
        &self.thousands_separator
    }

    /// Set the thousands separator for plain numbers.
    pub fn set_thousands_separator(&mut self, separator: impl Into<String>) {
        self.thousands_separator = separator.into();
    }

    /// Grouping pattern for plain numbers.
    #[must_use]
    pub const fn numeric_grouping(&self) -> &GroupingPattern {
        &self.numeric_grouping
    }

    /// Set the grouping pattern for plain numbers.
    pub fn set_numeric_grouping(&mut self, pattern: GroupingPattern) {
        self.numeric_grouping = pattern;
    }

    /// Sign shown before non-negative values.
    #[must_use]
    pub fn positive_sign(&self) -> &str {
        &self.positive_sign
    }

    /// Set the positive sign.
    pub fn set_positive_sign(&mut self, sign: impl Into<String>) {
        self.positive_sign = sign.into();
    }

    /// Sign shown before negative values.
    #[must_use]
    pub fn negative_sign(&self) -> &str {
        &self.negative_sign
    }

    /// Set the negative sign.
    pub fn set_negative_sign(&mut self, sign: impl Into<String>) {
        self.negative_sign = sign.into();
    }

    /// Digit set for plain numbers.
    #[must_use]
    pub const fn digit_set(&self) -> DigitSet {
        self.digit_set
    }

    /// Set the digit set for plain numbers.
    pub const fn set_digit_set(&mut self, set: DigitSet) {
        self.digit_set = set;
    }

    /// Default precision for plain numbers.
    #[must_use]
    pub const fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    /// Set the default precision for plain numbers.
    pub const fn set_decimal_places(&mut self, places: usize) {
        self.decimal_places = places;
    }

    /// Decimal symbol for amounts.
    #[must_use]
    pub fn monetary_decimal_symbol(&self) -> &str {
        &self.monetary_decimal_symbol
    }

    /// Set the decimal symbol for amounts.
    pub fn set_monetary_decimal_symbol(&mut self, symbol: impl Into<String>) {
        self.monetary_decimal_symbol = symbol.into();
    }

    /// Thousands separator for amounts.
    #[must_use]
    pub fn monetary_thousands_separator(&self) -> &str {
        &self.monetary_thousands_separator
    }

    /// Set the thousands separator for amounts.
    pub fn set_monetary_thousands_separator(&mut self, separator: impl Into<String>) {
        self.monetary_thousands_separator = separator.into();
    }

    /// Grouping pattern for amounts.
    #[must_use]
    pub const fn monetary_grouping(&self) -> &GroupingPattern {
        &self.monetary_grouping
    }

    /// Set the grouping pattern for amounts.
    pub fn set_monetary_grouping(&mut self, pattern: GroupingPattern) {
        self.monetary_grouping = pattern;
    }

    /// Digit set for amounts.
    #[must_use]
    pub const fn monetary_digit_set(&self) -> DigitSet {
        self.monetary_digit_set
    }

    /// Set the digit set for amounts.
    pub const fn set_monetary_digit_set(&mut self, set: DigitSet) {
        self.monetary_digit_set = set;
    }

    /// ISO 4217 code of the local currency.
    #[must_use]
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Set the currency code. The symbol and precision are left alone.
    pub fn set_currency_code(&mut self, code: impl Into<String>) {
        self.currency_code = code.into();
    }

    /// Symbol used by [`crate::MoneyFormatter`] when none is given.
    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Set the currency symbol.
    pub fn set_currency_symbol(&mut self, symbol: impl Into<String>) {
        self.currency_symbol = symbol.into();
    }

    /// Default precision for amounts.
    #[must_use]
    pub const fn monetary_decimal_places(&self) -> usize {
        self.monetary_decimal_places
    }

    /// Set the default precision for amounts.
    pub const fn set_monetary_decimal_places(&mut self, places: usize) {
        self.monetary_decimal_places = places;
    }

    /// Sign placement for non-negative amounts.
    #[must_use]
    pub const fn positive_sign_position(&self) -> SignPosition {
        self.positive_sign_position
    }

    /// Set the sign placement for non-negative amounts.
    pub const fn set_positive_sign_position(&mut self, position: SignPosition) {
        self.positive_sign_position = position;
    }

    /// Sign placement for negative amounts.
    #[must_use]
    pub const fn negative_sign_position(&self) -> SignPosition {
        self.negative_sign_position
    }

    /// Set the sign placement for negative amounts.
    pub const fn set_negative_sign_position(&mut self, position: SignPosition) {
        self.negative_sign_position = position;
    }

    /// Whether the symbol precedes non-negative amounts.
    #[must_use]
    pub const fn positive_prefix_currency_symbol(&self) -> bool {
        self.positive_prefix_currency_symbol
    }

    /// Place the symbol before or after non-negative amounts.
    pub const fn set_positive_prefix_currency_symbol(&mut self, prefix: bool) {
        self.positive_prefix_currency_symbol = prefix;
    }

    /// Whether the symbol precedes negative amounts.
    #[must_use]
    pub const fn negative_prefix_currency_symbol(&self) -> bool {
        self.negative_prefix_currency_symbol
    }

    /// Place the symbol before or after negative amounts.
    pub const fn set_negative_prefix_currency_symbol(&mut self, prefix: bool) {
        self.negative_prefix_currency_symbol = prefix;
    }

    /// The parsed time template.
    #[must_use]
    pub const fn time_template(&self) -> &TimeTemplate {
        &self.time_template
    }

    /// Replace the time template; it is tokenized once here.
    pub fn set_time_format(&mut self, template: &str) {
        self.time_template = TimeTemplate::parse(template);
    }

    /// Long date template, carried for callers that format dates.
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Set the long date template.
    pub fn set_date_format(&mut self, template: impl Into<String>) {
        self.date_format = template.into();
    }

    /// Short date template.
    #[must_use]
    pub fn date_format_short(&self) -> &str {
        &self.date_format_short
    }

    /// Set the short date template.
    pub fn set_date_format_short(&mut self, template: impl Into<String>) {
        self.date_format_short = template.into();
    }

    /// Digit set for dates and times.
    #[must_use]
    pub const fn date_time_digit_set(&self) -> DigitSet {
        self.date_time_digit_set
    }

    /// Set the digit set for dates and times.
    pub const fn set_date_time_digit_set(&mut self, set: DigitSet) {
        self.date_time_digit_set = set;
    }

    /// First day of the week, 1 (Monday) to 7 (Sunday).
    #[must_use]
    pub const fn week_start_day(&self) -> u8 {
        self.week_start_day
    }

    /// Set the first day of the week. Values outside 1–7 are rejected and
    /// leave the current day in place.
    pub fn set_week_start_day(&mut self, day: u8) -> bool {
        if (1..=7).contains(&day) {
            self.week_start_day = day;
            true
        } else {
            warn!(target: "settings", "ignoring week start day {day}; expected 1 to 7");
            false
        }
    }

    /// Unit dialect for byte sizes.
    #[must_use]
    pub const fn binary_unit_dialect(&self) -> BinaryUnitDialect {
        self.binary_unit_dialect
    }

    /// Set the unit dialect for byte sizes.
    pub const fn set_binary_unit_dialect(&mut self, dialect: BinaryUnitDialect) {
        self.binary_unit_dialect = dialect;
    }
}

fn places(config: &LocaleConfig, key: &str, default: usize) -> usize {
    let fallback = i64::try_from(default).unwrap_or_default();
    usize::try_from(config.int(key, fallback)).unwrap_or(default)
}

fn sign_position(config: &LocaleConfig, key: &str, default: SignPosition) -> SignPosition {
    config
        .entry(key)
        .and_then(|raw| {
            raw.parse()
                .map_err(|reason| debug!(target: "settings", "{key}: {reason}"))
                .ok()
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::BuiltinCurrencies;
    use parlance_common::ConfigLayer;
    use rstest::rstest;

    fn configured(layer: &str) -> LocaleSettings {
        let config = LocaleConfig::new()
            .with_layer(ConfigLayer::User, layer)
            .expect("valid TOML");
        LocaleSettings::from_config(&config, &BuiltinCurrencies)
    }

    #[rstest]
    fn empty_configuration_yields_defaults() {
        let settings = configured("");
        assert_eq!(settings, LocaleSettings::default());
        assert_eq!(settings.negative_sign_position(), SignPosition::ParensAround);
        assert_eq!(settings.time_template().source(), "%H:%M:%S");
    }

    #[rstest]
    fn reads_locale_table() {
        let settings = configured(
            r#"
            [Locale]
            DecimalSymbol = ","
            ThousandsSeparator = "."
            DigitGroupFormat = "3;2"
            CurrencyCode = "JPY"
            NegativeMonetarySignPosition = "BeforeMoney"
            PositivePrefixCurrencySymbol = false
            TimeFormat = "%l:%M %p"
            DigitSet = 3
            WeekStartDay = 7
            "#,
        );
        assert_eq!(settings.decimal_symbol(), ",");
        assert_eq!(settings.thousands_separator(), ".");
        assert_eq!(settings.numeric_grouping().groups(), [3, 2]);
        assert_eq!(settings.currency_symbol(), "¥");
        assert_eq!(settings.monetary_decimal_places(), 0);
        assert_eq!(settings.negative_sign_position(), SignPosition::BeforeMoney);
        assert!(!settings.positive_prefix_currency_symbol());
        assert!(settings.time_template().uses_day_periods());
        assert_eq!(settings.digit_set(), DigitSet::Devanagari);
        assert_eq!(settings.week_start_day(), 7);
    }

    #[rstest]
    #[case("WeekStartDay = 0")]
    #[case("WeekStartDay = 8")]
    #[case("WeekStartDay = \"soon\"")]
    fn rejects_out_of_range_week_start(#[case] entry: &str) {
        let settings = configured(&format!("[Locale]\n{entry}\n"));
        assert_eq!(settings.week_start_day(), 1);
    }

    #[rstest]
    #[case("0", SignPosition::ParensAround)]
    #[case("BeforeQuantity", SignPosition::BeforeQuantityMoney)]
    #[case("afterquantitymoney", SignPosition::AfterQuantityMoney)]
    #[case(" 4 ", SignPosition::AfterMoney)]
    fn parses_sign_positions(#[case] raw: &str, #[case] expected: SignPosition) {
        assert_eq!(raw.parse::<SignPosition>(), Ok(expected));
    }

    #[rstest]
    fn sign_position_ids_resolve_at_compile_time() {
        const PARENS: Option<SignPosition> = SignPosition::from_id(0);
        const UNKNOWN: Option<SignPosition> = SignPosition::from_id(5);
        assert_eq!(PARENS, Some(SignPosition::ParensAround));
        assert_eq!(UNKNOWN, None);
    }

    #[rstest]
    fn setters_touch_one_field() {
        let mut settings = LocaleSettings::default();
        settings.set_negative_sign("−");
        let mut expected = LocaleSettings::default();
        assert_ne!(settings, expected);
        expected.set_negative_sign("−");
        assert_eq!(settings, expected);
    }

    #[rstest]
    fn digit_language_follows_sensitivity() {
        let mut settings = LocaleSettings::default();
        settings.set_language("hi_IN");
        assert_eq!(settings.digit_language(), Some("hi_IN"));
        settings.set_language_sensitive_digits(false);
        assert_eq!(settings.digit_language(), None);
    }

    #[rstest]
    fn unknown_dialects_fall_back_to_iec() {
        assert_eq!(BinaryUnitDialect::from_id(2), BinaryUnitDialect::Metric);
        assert_eq!(BinaryUnitDialect::from_id(9), BinaryUnitDialect::Iec);
    }
}
