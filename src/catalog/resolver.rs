//! Catalog instance ordering and message lookup.

use std::borrow::Cow;

use fluent_templates::fluent_bundle::{FluentBundle, FluentResource, FluentValue};
use log::debug;
use parlance_common::{DEFAULT_LANGUAGE, LanguageList};
use unic_langid::LanguageIdentifier;

use super::store::{Arguments, CatalogStore, fluent_args};

/// A domain resolved for one language, confirmed to exist in the store.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CatalogInstance {
    /// Translation domain.
    pub domain: String,
    /// Language of the catalog.
    pub language: String,
}

/// Build the lookup order: languages by priority, then domains by
/// priority, keeping only pairs the store has.
///
/// The walk stops at the default language, which never has catalogs.
#[must_use]
pub fn recompute(
    domains: &[&str],
    languages: &LanguageList,
    store: &dyn CatalogStore,
) -> Vec<CatalogInstance> {
    let mut instances = Vec::new();
    for language in languages.iter() {
        if language == DEFAULT_LANGUAGE {
            break;
        }
        for domain in domains {
            if store.contains(domain, language) {
                instances.push(CatalogInstance {
                    domain: (*domain).to_owned(),
                    language: language.to_owned(),
                });
            } else {
                debug!(target: "catalog", "no catalog `{domain}` for `{language}`");
            }
        }
    }
    debug!(target: "catalog", "recomputed {} catalog instances", instances.len());
    instances
}

/// Translated text and the language it was found in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Translation {
    /// The message text.
    pub text: String,
    /// Language of the catalog that supplied it, or the default language
    /// for the fallback.
    pub language: String,
}

/// Walks resolved catalog instances to translate messages.
#[derive(Clone, Copy)]
pub struct TranslationResolver<'a> {
    instances: &'a [CatalogInstance],
    languages: &'a LanguageList,
    store: &'a dyn CatalogStore,
}

impl<'a> TranslationResolver<'a> {
    /// Borrow the instance order, language list and store.
    #[must_use]
    pub fn new(
        instances: &'a [CatalogInstance],
        languages: &'a LanguageList,
        store: &'a dyn CatalogStore,
    ) -> Self {
        Self {
            instances,
            languages,
            store,
        }
    }

    /// Translate message `id`, limited to `domain` when given.
    ///
    /// `fallback` is the untranslated Fluent pattern; it is formatted with
    /// `args` by [`format_fallback`] when no catalog has the message.
    #[must_use]
    pub fn translate(
        &self,
        domain: Option<&str>,
        id: &str,
        fallback: &str,
        args: Option<&Arguments<'_>>,
    ) -> Translation {
        if self.languages.primary() == DEFAULT_LANGUAGE {
            return fallback_translation(fallback, args);
        }
        for instance in self.instances {
            if instance.language == DEFAULT_LANGUAGE {
                break;
            }
            if domain.is_some_and(|wanted| wanted != instance.domain) {
                continue;
            }
            if let Some(text) = self
                .store
                .message(&instance.domain, &instance.language, id, args)
            {
                return Translation {
                    text,
                    language: instance.language.clone(),
                };
            }
        }
        fallback_translation(fallback, args)
    }

    /// Translate a message whose English form depends on `count`.
    ///
    /// Catalogs receive `count` as the `count` argument so Fluent selectors
    /// can pick the plural form; the fallback picks `singular` for exactly
    /// one.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the count is compared with one")]
    pub fn translate_plural(
        &self,
        domain: Option<&str>,
        id: &str,
        count: f64,
        singular: &str,
        plural: &str,
        args: &Arguments<'_>,
    ) -> Translation {
        let mut with_count = args.clone();
        with_count.insert(Cow::Borrowed("count"), FluentValue::from(count));
        let fallback = if (count - 1.0).abs() < f64::EPSILON {
            singular
        } else {
            plural
        };
        self.translate(domain, id, fallback, Some(&with_count))
    }
}

fn fallback_translation(fallback: &str, args: Option<&Arguments<'_>>) -> Translation {
    Translation {
        text: format_fallback(fallback, args),
        language: DEFAULT_LANGUAGE.to_owned(),
    }
}

/// Format an untranslated Fluent pattern with `args`, as a catalog
/// message would be.
///
/// Placeholders without a matching argument render as `{$name}`. Text that
/// is not a valid Fluent pattern is returned unchanged.
///
/// ```
/// use std::borrow::Cow;
/// use fluent_templates::fluent_bundle::FluentValue;
/// use parlance::catalog::{Arguments, format_fallback};
///
/// let mut args = Arguments::new();
/// args.insert(Cow::Borrowed("count"), FluentValue::from(2));
/// let files = "{ $count ->\n    [one] one file\n   *[other] { $count } files\n}";
/// assert_eq!(format_fallback(files, Some(&args)), "2 files");
/// ```
#[must_use]
pub fn format_fallback(template: &str, args: Option<&Arguments<'_>>) -> String {
    let source = format!("{FALLBACK_ID} = {}\n", template.replace('\n', "\n    "));
    let resource = match FluentResource::try_new(source) {
        Ok(resource) => resource,
        Err((_, errors)) => {
            debug!(target: "catalog", "fallback `{template}` is not a Fluent pattern: {errors:?}");
            return template.to_owned();
        }
    };
    let mut bundle = FluentBundle::new(vec![fallback_language()]);
    bundle.set_use_isolating(false);
    if bundle.add_resource(resource).is_err() {
        return template.to_owned();
    }
    let Some(pattern) = bundle
        .get_message(FALLBACK_ID)
        .and_then(|message| message.value())
    else {
        return template.to_owned();
    };
    let arguments = args.map(fluent_args);
    let mut errors = Vec::new();
    let text = bundle.format_pattern(pattern, arguments.as_ref(), &mut errors);
    if !errors.is_empty() {
        debug!(target: "catalog", "fallback `{template}` formatted with errors: {errors:?}");
    }
    text.into_owned()
}

const FALLBACK_ID: &str = "fallback";

fn fallback_language() -> LanguageIdentifier {
    DEFAULT_LANGUAGE
        .replace('_', "-")
        .parse()
        .unwrap_or_default()
}
