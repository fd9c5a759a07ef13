//! Layered locale configuration read from TOML.
//!
//! Settings live in a `[Locale]` table. Up to three layers contribute: the
//! region defaults, the language defaults, and the user's own file. A value
//! in a later layer overrides earlier ones unless it is empty, so a blank
//! user entry never hides a regional default.
//!
//! ```
//! use parlance_common::config::{ConfigLayer, LocaleConfig};
//!
//! let config = LocaleConfig::new()
//!     .with_layer(ConfigLayer::Region, "[Locale]\nDecimalSymbol = \",\"\n")?
//!     .with_layer(ConfigLayer::User, "[Locale]\nDecimalSymbol = \"\"\nFracDigits = 3\n")?;
//! assert_eq!(config.entry("DecimalSymbol").as_deref(), Some(","));
//! assert_eq!(config.int("FracDigits", 2), 3);
//! # Ok::<(), parlance_common::config::ConfigError>(())
//! ```

use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use thiserror::Error;

/// Name of the table holding locale settings.
pub const LOCALE_TABLE: &str = "Locale";

/// Errors raised while loading configuration layers.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer file could not be read.
    #[error("failed to read {layer} configuration at {path}: {source}")]
    Read {
        /// Layer the file was meant for.
        layer: ConfigLayer,
        /// Path that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A layer is not valid TOML.
    #[error("invalid {layer} configuration: {reason}")]
    Parse {
        /// Layer being parsed.
        layer: ConfigLayer,
        /// Description of the parse error.
        reason: String,
    },

    /// The `[Locale]` entry exists but is not a table.
    #[error("`Locale` in the {layer} configuration must be a table")]
    NotATable {
        /// Layer being parsed.
        layer: ConfigLayer,
    },
}

/// Configuration layers, lowest precedence first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConfigLayer {
    /// Defaults for the user's country or region.
    Region,
    /// Defaults shipped with the primary language.
    Language,
    /// The user's own settings.
    User,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region => formatter.write_str("region"),
            Self::Language => formatter.write_str("language"),
            Self::User => formatter.write_str("user"),
        }
    }
}

/// Locale settings merged from the configured layers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocaleConfig {
    layers: Vec<(ConfigLayer, toml::Table)>,
}

impl LocaleConfig {
    /// An empty configuration; every lookup yields its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer from TOML source text.
    ///
    /// Adding a layer that is already present replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::NotATable`] when `Locale` is not a table.
    pub fn with_layer(mut self, layer: ConfigLayer, source: &str) -> Result<Self, ConfigError> {
        let table = parse_layer(layer, source)?;
        self.layers.retain(|(existing, _)| *existing != layer);
        self.layers.push((layer, table));
        self.layers.sort_by_key(|(existing, _)| *existing);
        Ok(self)
    }

    /// Add a layer read from `path`. A missing file leaves the layer empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file exists but cannot be read,
    /// and the errors of [`Self::with_layer`] for its contents.
    pub fn with_layer_file(self, layer: ConfigLayer, path: &Utf8Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(source) => self.with_layer(layer, &source),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(target: "config", "no {layer} configuration at {path}");
                Ok(self)
            }
            Err(source) => Err(ConfigError::Read {
                layer,
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// The highest-precedence non-empty value for `key`, as text.
    ///
    /// Strings, integers, floats, and booleans are rendered as text. Arrays
    /// are joined with `:`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<String> {
        self.layers
            .iter()
            .rev()
            .filter_map(|(_, table)| table.get(key))
            .filter_map(scalar_text)
            .find(|value| !value.is_empty())
    }

    /// The value for `key`, or `default` when absent or empty.
    #[must_use]
    pub fn entry_or(&self, key: &str, default: &str) -> String {
        self.entry(key).unwrap_or_else(|| default.to_owned())
    }

    /// The value for `key` as a list.
    ///
    /// Arrays yield their elements; strings are split at `separator`. Blank
    /// elements are dropped. An empty list counts as absent.
    #[must_use]
    pub fn list(&self, key: &str, separator: char) -> Option<Vec<String>> {
        self.layers
            .iter()
            .rev()
            .filter_map(|(_, table)| table.get(key))
            .map(|value| list_items(value, separator))
            .find(|items| !items.is_empty())
    }

    /// The value for `key` as an integer, or `default` when absent or not
    /// numeric.
    #[must_use]
    pub fn int(&self, key: &str, default: i64) -> i64 {
        match self.entry(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                debug!(target: "config", "`{key}` is not an integer: `{raw}`");
                default
            }),
            None => default,
        }
    }

    /// The value for `key` as a boolean, or `default` when absent or not a
    /// recognised truth value.
    #[must_use]
    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.entry(key).as_deref().map(str::trim) {
            Some("true" | "1" | "yes" | "on") => true,
            Some("false" | "0" | "no" | "off") => false,
            Some(other) => {
                debug!(target: "config", "`{key}` is not a boolean: `{other}`");
                default
            }
            None => default,
        }
    }

    /// Keys prefixed with `prefix` and followed by a number, in numeric order.
    ///
    /// Used for enumerated entries such as `DayPeriod1`, `DayPeriod2`.
    #[must_use]
    pub fn numbered_entries(&self, prefix: &str) -> Vec<String> {
        let mut found: Vec<(u32, String)> = Vec::new();
        for (_, table) in &self.layers {
            for key in table.keys() {
                let Some(index) = key
                    .strip_prefix(prefix)
                    .and_then(|suffix| suffix.parse::<u32>().ok())
                else {
                    continue;
                };
                if found.iter().all(|(known, _)| *known != index) {
                    found.push((index, key.clone()));
                }
            }
        }
        found.sort_by_key(|(index, _)| *index);
        found
            .into_iter()
            .filter_map(|(_, key)| self.entry(&key))
            .collect()
    }
}

fn parse_layer(layer: ConfigLayer, source: &str) -> Result<toml::Table, ConfigError> {
    let mut document: toml::Table = source.parse().map_err(|e| ConfigError::Parse {
        layer,
        reason: format!("TOML parse error: {e}"),
    })?;
    match document.remove(LOCALE_TABLE) {
        Some(toml::Value::Table(table)) => Ok(table),
        Some(_) => Err(ConfigError::NotATable { layer }),
        None => Ok(toml::Table::new()),
    }
}

fn scalar_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.trim().to_owned()),
        toml::Value::Integer(number) => Some(number.to_string()),
        toml::Value::Float(number) => Some(number.to_string()),
        toml::Value::Boolean(flag) => Some(flag.to_string()),
        toml::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(":"),
        ),
        toml::Value::Datetime(_) | toml::Value::Table(_) => None,
    }
}

fn list_items(value: &toml::Value, separator: char) -> Vec<String> {
    let items: Vec<String> = match value {
        toml::Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other)
            .map(|text| text.split(separator).map(str::to_owned).collect())
            .unwrap_or_default(),
    };
    items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect()
}
