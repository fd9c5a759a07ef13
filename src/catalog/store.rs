//! Translation catalogs backed by Fluent resources.
//!
//! A catalog is one Fluent resource per `(domain, language)` pair. On disk
//! they live at `<root>/<language>/<domain>.ftl`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use fluent_templates::fluent_bundle::concurrent::FluentBundle;
use fluent_templates::fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use log::{debug, warn};
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Fluent arguments passed to message lookups.
pub type Arguments<'a> = HashMap<Cow<'a, str>, FluentValue<'a>>;

/// Copy lookup arguments into the form Fluent formats with.
pub(crate) fn fluent_args<'a>(args: &Arguments<'a>) -> FluentArgs<'a> {
    args.iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Errors raised while loading catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The directory scan pattern could not be built.
    #[error("invalid catalog pattern `{pattern}`: {source}")]
    Pattern {
        /// Pattern handed to the glob matcher.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },
    /// A catalog file could not be read.
    #[error("failed to read catalog `{path}`: {source}")]
    Read {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A catalog source is not valid Fluent.
    #[error("catalog `{domain}` for `{language}` has {count} syntax errors")]
    Syntax {
        /// Domain being loaded.
        domain: String,
        /// Language being loaded.
        language: String,
        /// Number of parser errors.
        count: usize,
    },
    /// The language code is not a valid identifier.
    #[error("`{language}` is not a valid language identifier")]
    Language {
        /// The rejected code.
        language: String,
    },
}

/// Source of translated messages for `(domain, language)` pairs.
pub trait CatalogStore: Send {
    /// Whether a catalog exists for the pair.
    fn contains(&self, domain: &str, language: &str) -> bool;

    /// The formatted message `id`, or `None` when the catalog lacks it.
    fn message(
        &self,
        domain: &str,
        language: &str,
        id: &str,
        args: Option<&Arguments<'_>>,
    ) -> Option<String>;

    /// Languages with at least one catalog.
    fn languages(&self) -> Vec<String>;
}

/// Catalog store holding one Fluent bundle per `(domain, language)`.
#[derive(Default)]
pub struct FluentCatalogStore {
    bundles: HashMap<(String, String), FluentBundle<FluentResource>>,
}

impl std::fmt::Debug for FluentCatalogStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.bundles.keys().collect();
        keys.sort();
        formatter
            .debug_struct("FluentCatalogStore")
            .field("catalogs", &keys)
            .finish()
    }
}

impl FluentCatalogStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `<root>/<language>/<domain>.ftl` file.
    ///
    /// Files that fail to parse are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the scan pattern is invalid or a file
    /// cannot be read.
    pub fn from_directory(root: &Utf8Path) -> Result<Self, CatalogError> {
        let mut store = Self::new();
        let pattern = format!("{}/*/*.ftl", glob::Pattern::escape(root.as_str()));
        let paths = glob::glob(&pattern).map_err(|source| CatalogError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        for entry in paths {
            let native = match entry {
                Ok(native) => native,
                Err(error) => {
                    warn!(target: "catalog", "skipping unreadable catalog entry: {error}");
                    continue;
                }
            };
            let Ok(path) = Utf8PathBuf::from_path_buf(native) else {
                warn!(target: "catalog", "skipping catalog with a non UTF-8 path");
                continue;
            };
            let (Some(domain), Some(language)) = (
                path.file_stem(),
                path.parent().and_then(Utf8Path::file_name),
            ) else {
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
                path: path.clone(),
                source,
            })?;
            if let Err(error) = store.add_source(domain, language, &source) {
                warn!(target: "catalog", "skipping `{path}`: {error}");
            }
        }
        Ok(store)
    }

    /// Add or extend the catalog for `(domain, language)` from Fluent text.
    ///
    /// Messages already present keep their first definition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for an invalid language code or Fluent syntax
    /// errors; the store is left unchanged.
    pub fn add_source(
        &mut self,
        domain: &str,
        language: &str,
        source: &str,
    ) -> Result<(), CatalogError> {
        let identifier =
            LanguageIdentifier::from_str(language).map_err(|_| CatalogError::Language {
                language: language.to_owned(),
            })?;
        let resource = FluentResource::try_new(source.to_owned()).map_err(|(_, errors)| {
            CatalogError::Syntax {
                domain: domain.to_owned(),
                language: language.to_owned(),
                count: errors.len(),
            }
        })?;
        let bundle = self
            .bundles
            .entry((domain.to_owned(), language.to_owned()))
            .or_insert_with(|| {
                let mut bundle = FluentBundle::new_concurrent(vec![identifier]);
                bundle.set_use_isolating(false);
                bundle
            });
        if let Err(duplicates) = bundle.add_resource(resource) {
            warn!(
                target: "catalog",
                "ignored {} duplicate messages in `{domain}` for `{language}`",
                duplicates.len()
            );
        }
        debug!(target: "catalog", "loaded catalog `{domain}` for `{language}`");
        Ok(())
    }

    /// Builder form of [`Self::add_source`].
    ///
    /// # Errors
    ///
    /// As for [`Self::add_source`].
    pub fn with_source(
        mut self,
        domain: &str,
        language: &str,
        source: &str,
    ) -> Result<Self, CatalogError> {
        self.add_source(domain, language, source)?;
        Ok(self)
    }
}

impl CatalogStore for FluentCatalogStore {
    fn contains(&self, domain: &str, language: &str) -> bool {
        self.bundles
            .contains_key(&(domain.to_owned(), language.to_owned()))
    }

    fn message(
        &self,
        domain: &str,
        language: &str,
        id: &str,
        args: Option<&Arguments<'_>>,
    ) -> Option<String> {
        let bundle = self.bundles.get(&(domain.to_owned(), language.to_owned()))?;
        let pattern = bundle.get_message(id)?.value()?;
        let arguments = args.map(fluent_args);
        let mut errors = Vec::new();
        let text = bundle.format_pattern(pattern, arguments.as_ref(), &mut errors);
        if !errors.is_empty() {
            debug!(target: "catalog", "`{id}` in `{domain}`/`{language}` formatted with errors: {errors:?}");
        }
        Some(text.into_owned())
    }

    fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .bundles
            .keys()
            .map(|(_, language)| language.clone())
            .collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn formats_messages_with_arguments() {
        let store = FluentCatalogStore::new()
            .with_source(
                "app",
                "fr",
                "greeting = Bonjour { $name }\nfiles = { $count ->\n    [one] un fichier\n   *[other] { $count } fichiers\n}\n",
            )
            .expect("valid catalog");
        let mut args = Arguments::new();
        args.insert(Cow::Borrowed("name"), FluentValue::from("Ada"));
        assert!(store.contains("app", "fr"));
        assert!(!store.contains("app", "de"));
        assert_eq!(
            store.message("app", "fr", "greeting", Some(&args)),
            Some(String::from("Bonjour Ada"))
        );
        let mut count = Arguments::new();
        count.insert(Cow::Borrowed("count"), FluentValue::from(3));
        assert_eq!(
            store.message("app", "fr", "files", Some(&count)),
            Some(String::from("3 fichiers"))
        );
        assert_eq!(store.message("app", "fr", "missing", None), None);
    }

    #[rstest]
    fn rejects_malformed_sources() {
        let mut store = FluentCatalogStore::new();
        let error = store
            .add_source("app", "fr", "= broken")
            .expect_err("syntax error");
        assert!(matches!(error, CatalogError::Syntax { .. }));
        assert!(!store.contains("app", "fr"));
        assert!(matches!(
            store.add_source("app", "not a language!", "a = b"),
            Err(CatalogError::Language { .. })
        ));
    }

    #[rstest]
    fn loads_catalog_directories() {
        let root = TempDir::new().expect("temp dir");
        let base = Utf8Path::from_path(root.path()).expect("utf-8 temp dir");
        for (language, domain, body) in [
            ("fr", "app", "title = Titre\n"),
            ("de", "app", "title = Titel\n"),
            ("de", "lib", "= broken\n"),
        ] {
            fs::create_dir_all(base.join(language)).expect("language dir");
            fs::write(base.join(language).join(format!("{domain}.ftl")), body).expect("catalog");
        }
        let store = FluentCatalogStore::from_directory(base).expect("scan");
        assert_eq!(store.languages(), ["de", "fr"]);
        assert!(!store.contains("lib", "de"));
        assert_eq!(store.message("app", "de", "title", None), Some(String::from("Titel")));
    }
}
