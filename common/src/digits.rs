//! Digit-set transliteration.
//!
//! Every supported script is described by a ten-glyph table indexed by digit
//! value. Rendering maps canonical (ASCII) digits, or digits from any other
//! known table, into the requested script; canonicalisation maps them back.
//! Characters that are not digits pass through untouched in both directions.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use once_cell::sync::Lazy;

use crate::i18n::primary_subtag;

/// A script-specific set of decimal digit glyphs.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DigitSet {
    /// `0123456789`, the canonical set.
    #[default]
    Arabic,
    /// Eastern Arabic dialects.
    ArabicIndic,
    /// Persian and Urdu.
    EasternArabicIndic,
    /// Hindi and Nepali.
    Devanagari,
    /// Bengali and Assamese.
    Bengali,
    /// Gujarati.
    Gujarati,
    /// Punjabi.
    Gurmukhi,
    /// Kannada.
    Kannada,
    /// Khmer.
    Khmer,
    /// Malayalam.
    Malayalam,
    /// Oriya.
    Oriya,
    /// Tamil.
    Tamil,
    /// Telugu.
    Telugu,
    /// Thai.
    Thai,
}

const ALL_SETS: [DigitSet; 14] = [
    DigitSet::Arabic,
    DigitSet::ArabicIndic,
    DigitSet::EasternArabicIndic,
    DigitSet::Devanagari,
    DigitSet::Bengali,
    DigitSet::Gujarati,
    DigitSet::Gurmukhi,
    DigitSet::Kannada,
    DigitSet::Khmer,
    DigitSet::Malayalam,
    DigitSet::Oriya,
    DigitSet::Tamil,
    DigitSet::Telugu,
    DigitSet::Thai,
];

impl DigitSet {
    /// Map a configuration identifier to a digit set.
    ///
    /// Unknown identifiers fall back to [`DigitSet::Arabic`].
    #[must_use]
    pub fn from_id(id: i64) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|index| ALL_SETS.get(index).copied())
            .unwrap_or_else(|| {
                debug!(target: "digits", "unknown digit set id {id}; using ASCII digits");
                Self::Arabic
            })
    }

    /// Return the configuration identifier for this set.
    #[must_use]
    pub fn id(self) -> i64 {
        ALL_SETS
            .iter()
            .position(|candidate| *candidate == self)
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or_default()
    }

    /// English display name of the set.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arabic => "Arabic",
            Self::ArabicIndic => "Arabic-Indic",
            Self::EasternArabicIndic => "Eastern Arabic-Indic",
            Self::Devanagari => "Devanagari",
            Self::Bengali => "Bengali",
            Self::Gujarati => "Gujarati",
            Self::Gurmukhi => "Gurmukhi",
            Self::Kannada => "Kannada",
            Self::Khmer => "Khmer",
            Self::Malayalam => "Malayalam",
            Self::Oriya => "Oriya",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
            Self::Thai => "Thai",
        }
    }

    /// Languages (primary subtags) that write numbers in this set.
    ///
    /// The canonical set is usable everywhere and reports an empty slice.
    #[must_use]
    pub const fn languages(self) -> &'static [&'static str] {
        match self {
            Self::Arabic => &[],
            Self::ArabicIndic => &["ar", "ps"],
            Self::EasternArabicIndic => &["fa", "ur"],
            Self::Devanagari => &["hi", "ne"],
            Self::Bengali => &["bn", "as"],
            Self::Gujarati => &["gu"],
            Self::Gurmukhi => &["pa"],
            Self::Kannada => &["kn"],
            Self::Khmer => &["km"],
            Self::Malayalam => &["ml"],
            Self::Oriya => &["or"],
            Self::Tamil => &["ta"],
            Self::Telugu => &["te"],
            Self::Thai => &["th"],
        }
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} ({})", self.name(), glyphs_for(*self))
    }
}

/// Return every supported digit set in identifier order.
#[must_use]
pub const fn all_digit_sets() -> &'static [DigitSet] {
    &ALL_SETS
}

/// Return the ten glyphs of `set`, indexed by digit value.
#[must_use]
pub const fn glyphs_for(set: DigitSet) -> &'static str {
    match set {
        DigitSet::Arabic => "0123456789",
        DigitSet::ArabicIndic => "٠١٢٣٤٥٦٧٨٩",
        DigitSet::EasternArabicIndic => "۰۱۲۳۴۵۶۷۸۹",
        DigitSet::Devanagari => "०१२३४५६७८९",
        DigitSet::Bengali => "০১২৩৪৫৬৭৮৯",
        DigitSet::Gujarati => "૦૧૨૩૪૫૬૭૮૯",
        DigitSet::Gurmukhi => "੦੧੨੩੪੫੬੭੮੯",
        DigitSet::Kannada => "೦೧೨೩೪೫೬೭೮೯",
        DigitSet::Khmer => "០១២៣៤៥៦៧៨៩",
        DigitSet::Malayalam => "൦൧൨൩൪൫൬൭൮൯",
        DigitSet::Oriya => "୦୧୨୩୪୫୬୭୮୯",
        DigitSet::Tamil => "௦௧௨௩௪௫௬௭௮௯",
        DigitSet::Telugu => "౦౧౨౩౪౫౬౭౮౯",
        DigitSet::Thai => "๐๑๒๓๔๕๖๗๘๙",
    }
}

static DIGIT_VALUES: Lazy<HashMap<char, usize>> = Lazy::new(|| {
    ALL_SETS
        .iter()
        .flat_map(|set| glyphs_for(*set).chars().enumerate())
        .map(|(value, glyph)| (glyph, value))
        .collect()
});

/// Return the value of `glyph` if it is a digit from any known set.
#[must_use]
pub fn digit_value(glyph: char) -> Option<usize> {
    DIGIT_VALUES.get(&glyph).copied()
}

/// Map digits of every known set back to ASCII.
#[must_use]
pub fn to_canonical_digits(input: &str) -> String {
    render_with(input, DigitSet::Arabic)
}

/// Render the digits in `input` using `set`.
///
/// When `language` is supplied the set is only honoured if that language
/// writes numbers with it; otherwise the canonical set is used. Passing
/// `None` ignores the language context.
#[must_use]
pub fn render_digits(input: &str, set: DigitSet, language: Option<&str>) -> String {
    let effective = match language {
        Some(code) => {
            let subtag = primary_subtag(code);
            if set.languages().iter().any(|candidate| *candidate == subtag) {
                set
            } else {
                DigitSet::Arabic
            }
        }
        None => set,
    };
    render_with(input, effective)
}

fn render_with(input: &str, set: DigitSet) -> String {
    let table: Vec<char> = glyphs_for(set).chars().collect();
    input
        .chars()
        .map(|glyph| {
            digit_value(glyph)
                .and_then(|value| table.get(value).copied())
                .unwrap_or(glyph)
        })
        .collect()
}
