//! Shared building blocks for Parlance: digit-set transliteration, digit
//! grouping, layered locale configuration, and language-list helpers.

pub mod config;
pub mod digits;
pub mod grouping;
pub mod i18n;

pub use config::{ConfigError, ConfigLayer, LocaleConfig};
pub use digits::{
    DigitSet, all_digit_sets, digit_value, glyphs_for, render_digits, to_canonical_digits,
};
pub use grouping::{GroupingError, GroupingPattern};
pub use i18n::{
    DEFAULT_LANGUAGE, LanguageEnvironment, LanguageList, LanguageSelection, LanguageSource,
    LocaleParts, is_language_code, normalise_locale, primary_subtag, resolve_languages,
    split_locale,
};
