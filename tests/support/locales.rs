//! Sample locales named by the scenarios.

use parlance::{LocaleSettings, SignPosition};
use parlance_common::{DigitSet, GroupingPattern};

/// Settings for one of the sample locales used across the scenarios.
///
/// # Panics
///
/// Panics for names the suites do not define.
pub fn sample_locale(name: &str) -> LocaleSettings {
    let mut settings = LocaleSettings::default();
    match name {
        "en_US" => {}
        "de_DE" => {
            settings.set_language("de");
            settings.set_decimal_symbol(",");
            settings.set_thousands_separator(".");
            settings.set_monetary_decimal_symbol(",");
            settings.set_monetary_thousands_separator(".");
            settings.set_currency_code("EUR");
            settings.set_currency_symbol("€");
            settings.set_positive_prefix_currency_symbol(false);
            settings.set_negative_prefix_currency_symbol(false);
            settings.set_negative_sign_position(SignPosition::BeforeQuantityMoney);
        }
        "hi_IN" => {
            settings.set_language("hi_IN");
            settings.set_numeric_grouping(GroupingPattern::new([3, 2]));
            settings.set_monetary_grouping(GroupingPattern::new([3, 2]));
            settings.set_digit_set(DigitSet::Devanagari);
            settings.set_currency_code("INR");
            settings.set_currency_symbol("₹");
        }
        "sv_SE" => {
            settings.set_language("sv");
            settings.set_decimal_symbol(",");
            settings.set_thousands_separator(" ");
            settings.set_monetary_decimal_symbol(",");
            settings.set_monetary_thousands_separator(" ");
            settings.set_currency_code("SEK");
            settings.set_currency_symbol("kr");
            settings.set_positive_prefix_currency_symbol(false);
            settings.set_negative_prefix_currency_symbol(false);
            settings.set_negative_sign_position(SignPosition::BeforeQuantityMoney);
        }
        other => panic!("no sample locale named {other}"),
    }
    settings
}
