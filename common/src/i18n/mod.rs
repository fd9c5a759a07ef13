//! Language codes, locale strings, and language-priority lists.
//!
//! Languages are identified by POSIX-style codes such as `de`, `pt_BR`, or
//! `sr@latin`. [`LanguageList`] keeps them in decreasing priority and always
//! ends with [`DEFAULT_LANGUAGE`], the language source strings are written
//! in. Candidate languages are gathered from explicit input, configuration,
//! and the process environment by [`resolve_languages`].

use std::str::FromStr;

use unic_langid::LanguageIdentifier;

mod selection;

pub use selection::{
    LanguageEnvironment, LanguageSelection, LanguageSource, normalise_locale, resolve_languages,
};

/// Language that never carries catalog data; messages fall back to it.
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// Components of a POSIX locale string (`lang_CTRY.charset@modifier`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocaleParts {
    /// Primary language subtag.
    pub language: String,
    /// Country or region, without the leading `_`.
    pub country: Option<String>,
    /// Character set, without the leading `.`.
    pub charset: Option<String>,
    /// Modifier, without the leading `@`.
    pub modifier: Option<String>,
}

impl LocaleParts {
    /// Expand into language codes from most to least specific.
    ///
    /// `de_DE.UTF-8@euro` yields `de_DE@euro`, `de@euro`, `de_DE`, `de`.
    #[must_use]
    pub fn expand(&self) -> Vec<String> {
        let mut expanded = Vec::with_capacity(4);
        if let Some(modifier) = &self.modifier {
            if let Some(country) = &self.country {
                expanded.push(format!("{}_{country}@{modifier}", self.language));
            }
            expanded.push(format!("{}@{modifier}", self.language));
        }
        if let Some(country) = &self.country {
            expanded.push(format!("{}_{country}", self.language));
        }
        expanded.push(self.language.clone());
        expanded
    }
}

/// Split a locale string into language, country, charset, and modifier.
///
/// ```
/// use parlance_common::i18n::split_locale;
///
/// let parts = split_locale("sr_RS.UTF-8@latin");
/// assert_eq!(parts.language, "sr");
/// assert_eq!(parts.country.as_deref(), Some("RS"));
/// assert_eq!(parts.charset.as_deref(), Some("UTF-8"));
/// assert_eq!(parts.modifier.as_deref(), Some("latin"));
/// ```
#[must_use]
pub fn split_locale(locale: &str) -> LocaleParts {
    let (rest, modifier) = split_suffix(locale.trim(), '@');
    let (rest, charset) = split_suffix(rest, '.');
    let (language, country) = split_suffix(rest, '_');
    LocaleParts {
        language: language.to_owned(),
        country,
        charset,
        modifier,
    }
}

fn split_suffix(input: &str, marker: char) -> (&str, Option<String>) {
    match input.split_once(marker) {
        Some((head, tail)) if !tail.is_empty() => (head, Some(tail.to_owned())),
        Some((head, _)) => (head, None),
        None => (input, None),
    }
}

/// Return the primary language subtag of `code` (`hi_IN` → `hi`).
#[must_use]
pub fn primary_subtag(code: &str) -> &str {
    code.split(['_', '-', '@', '.'])
        .next()
        .unwrap_or(code)
}

/// Whether `code` names a language rather than a placeholder locale.
///
/// `C` and `POSIX` select untranslated output and are never languages.
/// Anything else must parse as a language identifier once the modifier and
/// charset are removed.
#[must_use]
pub fn is_language_code(code: &str) -> bool {
    let parts = split_locale(code);
    if parts.language.is_empty() || matches!(parts.language.as_str(), "C" | "POSIX") {
        return false;
    }
    let tag = match &parts.country {
        Some(country) => format!("{}-{country}", parts.language),
        None => parts.language,
    };
    LanguageIdentifier::from_str(&tag).is_ok()
}

/// Ordered, duplicate-free languages ending with [`DEFAULT_LANGUAGE`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LanguageList {
    languages: Vec<String>,
}

impl Default for LanguageList {
    fn default() -> Self {
        Self {
            languages: vec![DEFAULT_LANGUAGE.to_owned()],
        }
    }
}

impl LanguageList {
    /// Build a list from candidates in decreasing priority.
    ///
    /// Blank entries and repeats are dropped. Candidates after an explicit
    /// [`DEFAULT_LANGUAGE`] can never be reached and are discarded; the
    /// default is appended when the input does not mention it.
    ///
    /// ```
    /// use parlance_common::i18n::LanguageList;
    ///
    /// let list = LanguageList::new(["de", "", "fr", "de", "en_US", "it"]);
    /// assert_eq!(list.as_slice(), ["de", "fr", "en_US"]);
    /// ```
    #[must_use]
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut languages: Vec<String> = Vec::new();
        for candidate in candidates {
            let code = candidate.as_ref().trim();
            if code.is_empty() || languages.iter().any(|known| known == code) {
                continue;
            }
            languages.push(code.to_owned());
            if code == DEFAULT_LANGUAGE {
                break;
            }
        }
        if languages.last().map(String::as_str) != Some(DEFAULT_LANGUAGE) {
            languages.push(DEFAULT_LANGUAGE.to_owned());
        }
        Self { languages }
    }

    /// Keep only the languages accepted by `keep`; the default always stays.
    #[must_use]
    pub fn retain(mut self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.languages
            .retain(|code| code == DEFAULT_LANGUAGE || keep(code.as_str()));
        self
    }

    /// Languages in priority order, default last.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.languages
    }

    /// The highest-priority language.
    #[must_use]
    pub fn primary(&self) -> &str {
        self.languages
            .first()
            .map_or(DEFAULT_LANGUAGE, String::as_str)
    }

    /// Whether `code` appears in the list.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.languages.iter().any(|known| known == code)
    }

    /// Iterate over the languages in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(String::as_str)
    }
}
