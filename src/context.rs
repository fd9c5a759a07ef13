//! The locale a program formats and translates with.
//!
//! [`LocaleContext`] owns the settings, day periods, catalog registry,
//! language list and catalog store. All of it sits behind one re-entrant
//! lock: mutations update their state and recompute the catalog instances
//! in a single critical section, and formatting calls lock only to read.

use std::cell::RefCell;
use std::fmt;

use log::{debug, warn};
use parking_lot::ReentrantMutex;
use parlance_common::{LanguageEnvironment, LanguageList, LocaleConfig, resolve_languages};

use crate::LIBRARY_DOMAIN;
use crate::byte_size::{ByteSizeFormatter, ByteUnit};
use crate::catalog::{
    Arguments, CatalogInstance, CatalogRegistry, CatalogStore, Translation, TranslationResolver,
    recompute,
};
use crate::currency::BuiltinCurrencies;
use crate::day_period::{DayPeriod, DayPeriods};
use crate::duration::DurationFormatter;
use crate::error::ReadError;
use crate::money::MoneyFormatter;
use crate::number::NumberFormatter;
use crate::settings::LocaleSettings;
use crate::time::{ClockTime, ReadStrictness, TimeOptions, TimeTemplateEngine};

struct State {
    settings: LocaleSettings,
    periods: DayPeriods,
    registry: CatalogRegistry,
    languages: LanguageList,
    instances: Vec<CatalogInstance>,
    store: Box<dyn CatalogStore>,
}

impl State {
    fn recompute(&mut self) {
        let names = self.registry.names();
        self.instances = recompute(&names, &self.languages, self.store.as_ref());
    }

    fn resolver(&self) -> TranslationResolver<'_> {
        TranslationResolver::new(&self.instances, &self.languages, self.store.as_ref())
    }

    fn durations(&self) -> DurationFormatter<'_> {
        DurationFormatter::new(NumberFormatter::new(&self.settings), self.resolver())
    }
}

/// Settings, languages and catalogs shared by every formatting call.
pub struct LocaleContext {
    state: ReentrantMutex<RefCell<State>>,
}

impl fmt::Debug for LocaleContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.state.lock();
        let state = guard.borrow();
        formatter
            .debug_struct("LocaleContext")
            .field("languages", &state.languages)
            .field("catalogs", &state.registry.names())
            .field("instances", &state.instances)
            .finish_non_exhaustive()
    }
}

impl LocaleContext {
    /// A context with default settings, the default language, and
    /// `application` as the highest-priority catalog.
    ///
    /// The library's own phrases live in the [`LIBRARY_DOMAIN`] system
    /// catalog, which always sorts last.
    #[must_use]
    pub fn new(application: &str, store: impl CatalogStore + 'static) -> Self {
        Self::from_parts(
            application,
            LocaleSettings::default(),
            DayPeriods::default(),
            LanguageList::default(),
            Box::new(store),
        )
    }

    /// Build a context from layered configuration and the language
    /// environment.
    ///
    /// Languages without catalogs in `store` are dropped. Digit-set gating
    /// follows the resulting primary language.
    #[must_use]
    pub fn from_config(
        application: &str,
        config: &LocaleConfig,
        explicit_language: Option<&str>,
        environment: &LanguageEnvironment,
        store: impl CatalogStore + 'static,
    ) -> Self {
        let mut settings = LocaleSettings::from_config(config, &BuiltinCurrencies);
        let configured = config.list("Language", ':').unwrap_or_default();
        let available = store.languages();
        let selection = resolve_languages(explicit_language, &configured, environment, |code| {
            available.iter().any(|known| known == code)
        });
        selection.log_outcome("context");
        let languages = selection.into_languages();
        settings.set_language(languages.primary());

        let periods = configured_periods(config);
        Self::from_parts(application, settings, periods, languages, Box::new(store))
    }

    fn from_parts(
        application: &str,
        settings: LocaleSettings,
        periods: DayPeriods,
        languages: LanguageList,
        store: Box<dyn CatalogStore>,
    ) -> Self {
        let mut state = State {
            settings,
            periods,
            registry: CatalogRegistry::new(application, [LIBRARY_DOMAIN]),
            languages,
            instances: Vec::new(),
            store,
        };
        state.recompute();
        Self {
            state: ReentrantMutex::new(RefCell::new(state)),
        }
    }

    fn read<R>(&self, view: impl FnOnce(&State) -> R) -> R {
        let guard = self.state.lock();
        let state = guard.borrow();
        view(&state)
    }

    fn mutate<R>(&self, change: impl FnOnce(&mut State) -> R) -> R {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        change(&mut state)
    }

    /// A copy of the current settings.
    #[must_use]
    pub fn settings(&self) -> LocaleSettings {
        self.read(|state| state.settings.clone())
    }

    /// Apply `update` to the settings under the lock.
    ///
    /// `update` works on a copy that replaces the settings once it
    /// returns, so it may call back into this context and will observe
    /// the previous values. The language belongs to the language list:
    /// it is taken from the context when the copy is written back, so a
    /// [`Self::set_languages`] call made from `update` survives and a
    /// language set on the copy is ignored. Settings changed by a nested
    /// `update_settings` call are replaced by the outer copy.
    pub fn update_settings<R>(&self, update: impl FnOnce(&mut LocaleSettings) -> R) -> R {
        let guard = self.state.lock();
        let mut settings = guard.borrow().settings.clone();
        let result = update(&mut settings);
        let mut state = guard.borrow_mut();
        settings.set_language(state.settings.language());
        state.settings = settings;
        result
    }

    /// The configured day periods.
    #[must_use]
    pub fn day_periods(&self) -> DayPeriods {
        self.read(|state| state.periods.clone())
    }

    /// Replace the day periods; invalid lists are rejected with `false`.
    pub fn set_day_periods(&self, periods: Vec<DayPeriod>) -> bool {
        self.mutate(|state| state.periods.set(periods))
    }

    /// The active language list.
    #[must_use]
    pub fn languages(&self) -> LanguageList {
        self.read(|state| state.languages.clone())
    }

    /// Replace the language list, keeping only languages the store has
    /// catalogs for.
    ///
    /// Returns `false` when no requested language survives, in which case
    /// the current list is kept.
    pub fn set_languages<I, S>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested = LanguageList::new(candidates);
        self.mutate(|state| {
            let available = state.store.languages();
            let languages = requested
                .clone()
                .retain(|code| available.iter().any(|known| known == code));
            if languages.as_slice().len() == 1 && requested.as_slice().len() > 1 {
                warn!(
                    target: "context",
                    "no catalogs for any of {:?}; keeping current languages",
                    requested.as_slice()
                );
                return false;
            }
            state.settings.set_language(languages.primary());
            state.languages = languages;
            state.recompute();
            true
        })
    }

    /// Register a catalog domain, or count another load of it.
    pub fn insert_catalog(&self, name: &str) {
        self.mutate(|state| {
            if state.registry.insert(name).needs_recompute() {
                state.recompute();
            }
        });
    }

    /// Release one load of a catalog domain.
    pub fn remove_catalog(&self, name: &str) {
        self.mutate(|state| {
            if state.registry.remove(name).needs_recompute() {
                state.recompute();
            }
        });
    }

    /// Give a catalog domain the highest priority.
    pub fn activate_catalog(&self, name: &str) {
        self.mutate(|state| {
            if state.registry.activate_to_front(name).needs_recompute() {
                state.recompute();
            }
        });
    }

    /// Catalog domains in priority order.
    #[must_use]
    pub fn catalog_names(&self) -> Vec<String> {
        self.read(|state| {
            state
                .registry
                .names()
                .into_iter()
                .map(str::to_owned)
                .collect()
        })
    }

    /// The resolved `(domain, language)` lookup order.
    #[must_use]
    pub fn catalog_instances(&self) -> Vec<CatalogInstance> {
        self.read(|state| state.instances.clone())
    }

    /// Swap the catalog store and recompute against it.
    pub fn replace_store(&self, store: impl CatalogStore + 'static) {
        self.mutate(|state| {
            state.store = Box::new(store);
            state.recompute();
        });
        debug!(target: "context", "catalog store replaced");
    }

    /// Translate message `id`; see [`TranslationResolver::translate`].
    #[must_use]
    pub fn translate(
        &self,
        domain: Option<&str>,
        id: &str,
        fallback: &str,
        args: Option<&Arguments<'_>>,
    ) -> Translation {
        self.read(|state| state.resolver().translate(domain, id, fallback, args))
    }

    /// Translate a count-dependent message; see
    /// [`TranslationResolver::translate_plural`].
    #[must_use]
    pub fn translate_plural(
        &self,
        domain: Option<&str>,
        id: &str,
        count: f64,
        forms: (&str, &str),
        args: &Arguments<'_>,
    ) -> Translation {
        self.read(|state| {
            state
                .resolver()
                .translate_plural(domain, id, count, forms.0, forms.1, args)
        })
    }

    /// Format a number; see [`NumberFormatter::format`].
    #[must_use]
    pub fn format_number(&self, value: f64, precision: Option<usize>) -> String {
        self.read(|state| NumberFormatter::new(&state.settings).format(value, precision))
    }

    /// Format an integer; see [`NumberFormatter::format_integer`].
    #[must_use]
    pub fn format_integer(&self, value: i64) -> String {
        self.read(|state| NumberFormatter::new(&state.settings).format_integer(value))
    }

    /// Localize a decimal string; see [`NumberFormatter::format_numeric_str`].
    #[must_use]
    pub fn format_numeric_str(&self, text: &str, round: bool, precision: Option<usize>) -> String {
        self.read(|state| {
            NumberFormatter::new(&state.settings).format_numeric_str(text, round, precision)
        })
    }

    /// Read a localized number.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when `text` is not a number in this locale.
    pub fn read_number(&self, text: &str) -> Result<f64, ReadError> {
        self.read(|state| NumberFormatter::new(&state.settings).read(text))
    }

    /// Format a monetary amount; see [`MoneyFormatter::format`].
    #[must_use]
    pub fn format_money(&self, value: f64, symbol: Option<&str>, precision: Option<usize>) -> String {
        self.read(|state| MoneyFormatter::new(&state.settings).format(value, symbol, precision))
    }

    /// Read a localized monetary amount.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when `text` is not an amount in this locale.
    pub fn read_money(&self, text: &str) -> Result<f64, ReadError> {
        self.read(|state| MoneyFormatter::new(&state.settings).read(text))
    }

    /// Format a byte count in the configured dialect.
    #[must_use]
    pub fn format_byte_size(&self, size: f64, precision: usize, unit: Option<ByteUnit>) -> String {
        self.read(|state| {
            ByteSizeFormatter::new(
                NumberFormatter::new(&state.settings),
                state.resolver(),
                state.settings.binary_unit_dialect(),
            )
            .format(size, precision, unit)
        })
    }

    /// Format a duration in its largest unit.
    #[must_use]
    pub fn format_duration(&self, milliseconds: u64) -> String {
        self.read(|state| state.durations().format_duration(milliseconds))
    }

    /// Format a duration as its two most significant units.
    #[must_use]
    pub fn pretty_format_duration(&self, milliseconds: u64) -> String {
        self.read(|state| state.durations().pretty_format_duration(milliseconds))
    }

    /// Format a wall-clock time with the locale's time template.
    #[must_use]
    pub fn format_time(&self, time: ClockTime, options: TimeOptions) -> String {
        self.read(|state| TimeTemplateEngine::new(&state.settings, &state.periods).format(time, options))
    }

    /// Read a wall-clock time with the locale's time template.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when `text` does not follow the template.
    pub fn read_time_with(
        &self,
        text: &str,
        options: TimeOptions,
        strictness: ReadStrictness,
    ) -> Result<ClockTime, ReadError> {
        self.read(|state| {
            TimeTemplateEngine::new(&state.settings, &state.periods).read(text, options, strictness)
        })
    }

    /// Read a time with or without seconds, strictly.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when neither form matches.
    pub fn read_time(&self, text: &str) -> Result<ClockTime, ReadError> {
        self.read(|state| TimeTemplateEngine::new(&state.settings, &state.periods).read_time(text))
    }
}

fn configured_periods(config: &LocaleConfig) -> DayPeriods {
    let mut periods = DayPeriods::default();
    let entries = config.numbered_entries("DayPeriod");
    if entries.is_empty() {
        return periods;
    }
    let Some(list) = entries
        .iter()
        .map(|raw| DayPeriod::parse_config(raw))
        .collect::<Option<Vec<_>>>()
    else {
        warn!(target: "context", "ignoring malformed DayPeriod entries");
        return periods;
    };
    periods.set(list);
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FluentCatalogStore;
    use crate::settings::SignPosition;
    use parlance_common::ConfigLayer;
    use rstest::{fixture, rstest};
    use std::sync::Arc;
    use std::thread;

    #[fixture]
    fn store() -> FluentCatalogStore {
        FluentCatalogStore::new()
            .with_source("app", "fr", "title = Titre\n")
            .and_then(|store| store.with_source("widgets", "fr", "title = Titre (widgets)\nok = D'accord\n"))
            .and_then(|store| store.with_source("widgets", "de", "ok = OK\n"))
            .and_then(|store| store.with_source(LIBRARY_DOMAIN, "fr", "duration-pair = { $first } et { $second }\n"))
            .expect("valid catalogs")
    }

    #[rstest]
    fn defaults_to_untranslated_english(store: FluentCatalogStore) {
        let context = LocaleContext::new("app", store);
        assert_eq!(context.languages().as_slice(), ["en_US"]);
        assert!(context.catalog_instances().is_empty());
        assert_eq!(context.translate(None, "title", "Title", None).text, "Title");
        assert_eq!(context.catalog_names(), ["app", LIBRARY_DOMAIN]);
    }

    #[rstest]
    fn language_changes_recompute_instances(store: FluentCatalogStore) {
        let context = LocaleContext::new("app", store);
        assert!(context.set_languages(["fr", "it"]));
        assert_eq!(context.languages().as_slice(), ["fr", "en_US"]);
        assert_eq!(context.settings().language(), "fr");
        assert_eq!(context.translate(None, "title", "Title", None).text, "Titre");
        assert_eq!(
            context.pretty_format_duration(3_660_000),
            "1 hour et 1 minute"
        );

        assert!(!context.set_languages(["it"]));
        assert_eq!(context.languages().primary(), "fr");
    }

    #[rstest]
    fn catalog_priority_follows_the_registry(store: FluentCatalogStore) {
        let context = LocaleContext::new("app", store);
        context.set_languages(["fr", "de"]);
        context.insert_catalog("widgets");
        assert_eq!(context.catalog_names(), ["app", "widgets", LIBRARY_DOMAIN]);
        assert_eq!(context.translate(None, "title", "Title", None).text, "Titre");

        context.activate_catalog("widgets");
        assert_eq!(
            context.translate(None, "title", "Title", None).text,
            "Titre (widgets)"
        );

        context.remove_catalog("widgets");
        let ok = context.translate(None, "ok", "OK", None);
        assert_eq!((ok.text.as_str(), ok.language.as_str()), ("OK", "en_US"));
    }

    #[rstest]
    fn settings_updates_apply_to_formatting() {
        let context = LocaleContext::new("app", FluentCatalogStore::new());
        assert_eq!(context.format_number(1234.5, Some(2)), "1,234.50");
        context.update_settings(|settings| {
            settings.set_decimal_symbol(",");
            settings.set_thousands_separator(".");
        });
        assert_eq!(context.format_number(1234.5, Some(2)), "1.234,50");
        assert_eq!(context.read_number("1.234,50"), Ok(1234.5));
    }

    #[rstest]
    fn settings_updates_may_call_back_in() {
        let context = LocaleContext::new("app", FluentCatalogStore::new());
        let before = context.update_settings(|settings| {
            settings.set_negative_sign_position(SignPosition::BeforeQuantityMoney);
            context.format_money(-1.0, Some("$"), Some(2))
        });
        assert_eq!(before, "($ 1.00)");
        assert_eq!(context.format_money(-1.0, Some("$"), Some(2)), "$ -1.00");
    }

    #[rstest]
    fn language_changes_made_during_an_update_survive(store: FluentCatalogStore) {
        let context = LocaleContext::new("app", store);
        let switched = context.update_settings(|settings| {
            settings.set_decimal_symbol(",");
            context.set_languages(["fr"])
        });
        assert!(switched);
        assert_eq!(context.languages().primary(), "fr");
        assert_eq!(context.settings().language(), "fr");
        assert_eq!(context.settings().decimal_symbol(), ",");
        assert_eq!(context.translate(None, "title", "Title", None).text, "Titre");
    }

    #[rstest]
    fn the_language_list_owns_the_language_setting(store: FluentCatalogStore) {
        let context = LocaleContext::new("app", store);
        context.update_settings(|settings| settings.set_language("fr"));
        assert_eq!(context.settings().language(), context.languages().primary());
    }

    #[rstest]
    fn builds_from_configuration(store: FluentCatalogStore) {
        let config = LocaleConfig::new()
            .with_layer(
                ConfigLayer::Region,
                concat!(
                    "[Locale]\n",
                    "DecimalSymbol = \",\"\n",
                    "ThousandsSeparator = \" \"\n",
                    "TimeFormat = \"%H.%M\"\n",
                    "Language = \"de:fr\"\n",
                    "DayPeriod1 = \"am,AM,AM,A,00:00:00.000,11:59:59.999,0,12\"\n",
                    "DayPeriod2 = \"pm,PM,PM,P,12:00:00.000,23:59:59.999,0,12\"\n",
                ),
            )
            .expect("valid layer");
        let context = LocaleContext::from_config(
            "app",
            &config,
            None,
            &LanguageEnvironment::default(),
            store,
        );
        assert_eq!(context.languages().as_slice(), ["de", "fr", "en_US"]);
        assert_eq!(context.format_number(1234.5, Some(1)), "1 234,5");
        let time = ClockTime::hms(9, 5, 0).expect("valid time");
        assert_eq!(context.format_time(time, TimeOptions::default()), "09.05");
        assert_eq!(context.read_time("09.05"), Ok(time));
        assert_eq!(context.day_periods().as_slice().len(), 2);
    }

    #[rstest]
    fn explicit_language_leads(store: FluentCatalogStore) {
        let environment = LanguageEnvironment {
            lang: Some(String::from("de_DE.UTF-8")),
            ..LanguageEnvironment::default()
        };
        let context = LocaleContext::from_config(
            "app",
            &LocaleConfig::new(),
            Some("fr"),
            &environment,
            store,
        );
        assert_eq!(context.languages().as_slice(), ["fr", "de", "en_US"]);
    }

    #[rstest]
    fn shared_across_threads(store: FluentCatalogStore) {
        let context = Arc::new(LocaleContext::new("app", store));
        let writer = {
            let context = Arc::clone(&context);
            thread::spawn(move || {
                for _ in 0..50 {
                    context.set_languages(["fr"]);
                    context.set_languages(["de"]);
                }
            })
        };
        for _ in 0..50 {
            let title = context.translate(Some("app"), "title", "Title", None);
            assert!(matches!(title.text.as_str(), "Titre" | "Title"));
        }
        writer.join().expect("writer thread");
    }

    #[rstest]
    fn byte_sizes_follow_the_dialect() {
        let context = LocaleContext::new("app", FluentCatalogStore::new());
        assert_eq!(context.format_byte_size(2048.0, 1, None), "2.0 KiB");
        context.update_settings(|settings| {
            settings.set_binary_unit_dialect(crate::settings::BinaryUnitDialect::Metric);
        });
        assert_eq!(context.format_byte_size(2048.0, 1, None), "2.0 kB");
        assert_eq!(context.format_duration(1_500), "1.50 seconds");
    }
}
