use std::env;
use std::fmt;

use log::{debug, warn};

use super::{DEFAULT_LANGUAGE, LanguageList, is_language_code, split_locale};

/// Where a candidate language came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LanguageSource {
    /// Language supplied explicitly by the caller.
    Explicit,
    /// Colon-separated list in the `PARLANCE_LANG` environment variable.
    EnvironmentOverride,
    /// The configured `Language` list.
    Configuration,
    /// Colon-separated list in the `LANGUAGE` environment variable.
    LanguageVariable,
    /// Locale string in `LC_ALL`.
    LcAll,
    /// Locale string in `LC_MESSAGES`.
    LcMessages,
    /// Locale string in `LANG`.
    Lang,
    /// The default language appended to every list.
    Default,
}

impl fmt::Display for LanguageSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => formatter.write_str("explicit language"),
            Self::EnvironmentOverride => formatter.write_str("PARLANCE_LANG"),
            Self::Configuration => formatter.write_str("configured language"),
            Self::LanguageVariable => formatter.write_str("LANGUAGE"),
            Self::LcAll => formatter.write_str("LC_ALL"),
            Self::LcMessages => formatter.write_str("LC_MESSAGES"),
            Self::Lang => formatter.write_str("LANG"),
            Self::Default => formatter.write_str("default language"),
        }
    }
}

/// Snapshot of the environment variables that name languages.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LanguageEnvironment {
    /// `PARLANCE_LANG`.
    pub parlance_lang: Option<String>,
    /// `LANGUAGE`.
    pub language: Option<String>,
    /// `LC_ALL`.
    pub lc_all: Option<String>,
    /// `LC_MESSAGES`.
    pub lc_messages: Option<String>,
    /// `LANG`.
    pub lang: Option<String>,
}

impl LanguageEnvironment {
    /// Read the language variables of the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            parlance_lang: read_variable("PARLANCE_LANG"),
            language: read_variable("LANGUAGE"),
            lc_all: read_variable("LC_ALL"),
            lc_messages: read_variable("LC_MESSAGES"),
            lang: read_variable("LANG"),
        }
    }
}

fn read_variable(name: &str) -> Option<String> {
    env::var_os(name).and_then(|value| value.into_string().ok())
}

/// Outcome of language resolution including the provenance of each entry.
#[derive(Clone, Debug)]
pub struct LanguageSelection {
    languages: LanguageList,
    origins: Vec<(String, LanguageSource)>,
}

impl LanguageSelection {
    /// Returns the resolved language list.
    #[must_use]
    pub fn languages(&self) -> &LanguageList {
        &self.languages
    }

    /// Consumes the selection, yielding the [`LanguageList`].
    #[must_use]
    pub fn into_languages(self) -> LanguageList {
        self.languages
    }

    /// Returns the source that first contributed `code`.
    #[must_use]
    pub fn source_of(&self, code: &str) -> Option<LanguageSource> {
        if code == DEFAULT_LANGUAGE {
            return Some(LanguageSource::Default);
        }
        self.origins
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, source)| *source)
    }

    /// Emit a debug log summarising the resolved languages.
    pub fn log_outcome(&self, target: &str) {
        for code in self.languages.iter() {
            let source = self.source_of(code).unwrap_or(LanguageSource::Default);
            debug!(target: target, "language `{code}` from {source}");
        }
    }
}

/// Resolve the language list from every source in priority order.
///
/// Candidates are gathered in this order, keeping all of them:
///
/// 1. The explicit language supplied by the caller.
/// 2. `PARLANCE_LANG` (colon-separated).
/// 3. The configured `Language` list.
/// 4. `LANGUAGE` (colon-separated).
/// 5. `LC_ALL`, `LC_MESSAGES`, and `LANG`, each expanded from
///    `lang_CTRY@mod` down to `lang`.
///
/// Candidates that are not language codes, or that `supports` rejects, are
/// skipped. The default language always closes the list.
#[must_use]
pub fn resolve_languages(
    explicit: Option<&str>,
    configured: &[String],
    environment: &LanguageEnvironment,
    mut supports: impl FnMut(&str) -> bool,
) -> LanguageSelection {
    let mut candidates: Vec<(String, LanguageSource)> = Vec::new();
    if let Some(code) = normalise_locale(explicit) {
        candidates.push((code.to_owned(), LanguageSource::Explicit));
    }
    push_list(
        &mut candidates,
        LanguageSource::EnvironmentOverride,
        environment.parlance_lang.as_deref(),
    );
    candidates.extend(
        configured
            .iter()
            .filter_map(|code| normalise_locale(Some(code)))
            .map(|code| (code.to_owned(), LanguageSource::Configuration)),
    );
    push_list(
        &mut candidates,
        LanguageSource::LanguageVariable,
        environment.language.as_deref(),
    );
    let locales = [
        (LanguageSource::LcAll, environment.lc_all.as_deref()),
        (LanguageSource::LcMessages, environment.lc_messages.as_deref()),
        (LanguageSource::Lang, environment.lang.as_deref()),
    ];
    for (source, raw) in locales {
        if let Some(locale) = normalise_locale(raw) {
            candidates.extend(
                split_locale(locale)
                    .expand()
                    .into_iter()
                    .map(|code| (code, source)),
            );
        }
    }

    let accepted: Vec<(String, LanguageSource)> = candidates
        .into_iter()
        .filter(|(code, source)| accept_candidate(code, *source, &mut supports))
        .collect();
    let languages = LanguageList::new(accepted.iter().map(|(code, _)| code.as_str()));
    LanguageSelection {
        languages,
        origins: accepted,
    }
}

fn push_list(
    candidates: &mut Vec<(String, LanguageSource)>,
    source: LanguageSource,
    raw: Option<&str>,
) {
    if let Some(list) = normalise_locale(raw) {
        candidates.extend(
            list.split(':')
                .filter_map(|code| normalise_locale(Some(code)))
                .map(|code| (code.to_owned(), source)),
        );
    }
}

fn accept_candidate(
    code: &str,
    source: LanguageSource,
    supports: &mut impl FnMut(&str) -> bool,
) -> bool {
    if code == DEFAULT_LANGUAGE {
        return true;
    }
    if !is_language_code(code) {
        debug!(target: "i18n::selection", "ignoring {source} `{code}`; not a language");
        return false;
    }
    if supports(code) {
        return true;
    }
    if source == LanguageSource::Explicit {
        warn!(
            target: "i18n::selection",
            "skipping unsupported {source} `{code}`; no catalogs are installed for it",
        );
    } else {
        debug!(target: "i18n::selection", "skipping unsupported {source} `{code}`");
    }
    false
}

/// Trim whitespace and discard empty language candidates.
#[must_use]
pub fn normalise_locale(input: Option<&str>) -> Option<&str> {
    input
        .map(str::trim)
        .and_then(|value| if value.is_empty() { None } else { Some(value) })
}
