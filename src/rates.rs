//! Euro reference rates for converting between currencies.
//!
//! [`RateCache`] keeps a [`RateTable`] of units per euro. At most once per
//! day it reloads the table, first from its cache file and otherwise from a
//! [`RateSource`]. Failures are logged and the last good table stays in
//! use, so conversions never depend on the network succeeding.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::sync::OnceLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;
use log::{debug, warn};
use parking_lot::Mutex;
use roxmltree::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The ECB daily reference rate document.
pub const ECB_DAILY_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

const REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const CACHE_FILENAME: &str = "currency-rates.toml";

/// Currencies irrevocably fixed to the euro, in units per euro.
const FIXED_RATES: &[(&str, f64)] = &[
    ("ATS", 13.7603),
    ("BEF", 40.3399),
    ("CYP", 0.585_274),
    ("DEM", 1.955_83),
    ("ESP", 166.386),
    ("FIM", 5.945_73),
    ("FRF", 6.559_57),
    ("GRD", 340.75),
    ("IEP", 0.787_564),
    ("ITL", 1936.27),
    ("LUF", 40.3399),
    ("MTL", 0.4293),
    ("NLG", 2.203_71),
    ("PTE", 200.482),
    ("SIT", 239.64),
    ("SKK", 30.126),
];

/// Errors raised while refreshing rates.
#[derive(Debug, Error)]
pub enum RateError {
    /// The rate document could not be downloaded.
    #[error("rate download failed for {url}: {reason}")]
    Http {
        /// Requested URL.
        url: String,
        /// Description of the failure.
        reason: String,
    },
    /// The document is not well-formed XML.
    #[error("rate document is not valid XML: {source}")]
    Malformed {
        /// Underlying parse error.
        #[source]
        source: roxmltree::Error,
    },
    /// The document holds no usable rates.
    #[error("rate document contains no rates")]
    NoRates,
    /// The cache file could not be read or written.
    #[error("rate cache {path} is not accessible: {source}")]
    CacheIo {
        /// Cache file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The cache file is not valid TOML for a rate table.
    #[error("rate cache {path} is malformed: {source}")]
    CacheDecode {
        /// Cache file path.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: toml::de::Error,
    },
    /// The rate table could not be encoded.
    #[error("failed to encode rate cache: {source}")]
    CacheEncode {
        /// Underlying encode error.
        #[source]
        source: toml::ser::Error,
    },
}

/// Rates in units of each currency per euro.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    date: String,
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// The rates of currencies fixed to the euro; floating currencies are
    /// unknown until a refresh succeeds.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            date: String::new(),
            rates: FIXED_RATES
                .iter()
                .map(|(code, rate)| ((*code).to_owned(), *rate))
                .collect(),
        }
    }

    /// Parse the ECB `eurofxref` XML document.
    ///
    /// Rates are read from `Cube` elements carrying `currency` and `rate`
    /// attributes, in any namespace; the date comes from the `Cube` with a
    /// `time` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::Malformed`] when the document is not XML and
    /// [`RateError::NoRates`] when it lists no positive rates.
    pub fn parse_ecb(document: &str) -> Result<Self, RateError> {
        let tree = Document::parse(document).map_err(|source| RateError::Malformed { source })?;
        let mut table = Self::default();
        let cubes = tree
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == "Cube");
        for cube in cubes {
            if let Some(date) = cube.attribute("time") {
                date.trim().clone_into(&mut table.date);
            }
            let (Some(code), Some(rate)) = (cube.attribute("currency"), cube.attribute("rate"))
            else {
                continue;
            };
            match rate.trim().parse::<f64>() {
                Ok(value) if value > 0.0 => {
                    table.rates.insert(code.trim().to_ascii_uppercase(), value);
                }
                _ => debug!(target: "rates", "skipping rate `{rate}` for {code}"),
            }
        }
        if table.rates.is_empty() {
            return Err(RateError::NoRates);
        }
        Ok(table)
    }

    /// Publication date of the rates, empty for the built-in table.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Units of `code` per euro.
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<f64> {
        if code.eq_ignore_ascii_case("EUR") {
            return Some(1.0);
        }
        self.rates.get(&code.to_ascii_uppercase()).copied()
    }

    /// Currency codes with a known rate, euro included.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        if !self.rates.contains_key("EUR") {
            codes.push("EUR");
            codes.sort_unstable();
        }
        codes
    }

    /// Convert `amount` between two currencies via the euro.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "amounts pass through the euro")]
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        Some(amount / self.rate(from)? * self.rate(to)?)
    }

    fn merge(&mut self, newer: Self) {
        self.date = newer.date;
        self.rates.extend(newer.rates);
    }
}

/// Supplier of the raw ECB rate document.
#[cfg_attr(test, mockall::automock)]
pub trait RateSource: Send + Sync {
    /// Fetch the rate document.
    ///
    /// # Errors
    ///
    /// Returns [`RateError`] when the document cannot be retrieved.
    fn fetch(&self) -> Result<String, RateError>;
}

/// Downloads rates from the ECB over HTTPS.
#[derive(Clone, Debug)]
pub struct EcbRateSource {
    url: String,
}

impl Default for EcbRateSource {
    fn default() -> Self {
        Self {
            url: ECB_DAILY_URL.to_owned(),
        }
    }
}

impl EcbRateSource {
    /// Fetch from `url` instead of the ECB.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RateSource for EcbRateSource {
    fn fetch(&self) -> Result<String, RateError> {
        let failure = |reason: String| RateError::Http {
            url: self.url.clone(),
            reason,
        };
        let response = http_agent()
            .get(&self.url)
            .call()
            .map_err(|error| failure(error.to_string()))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|error| failure(error.to_string()))
    }
}

fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Location of the rate cache in the user's cache directory.
#[must_use]
pub fn default_cache_path() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", "parlance")?;
    Utf8PathBuf::from_path_buf(dirs.cache_dir().join(CACHE_FILENAME)).ok()
}

#[derive(Serialize, Deserialize)]
struct CacheFile {
    fetched_at: u64,
    date: String,
    rates: BTreeMap<String, f64>,
}

struct CacheState {
    table: RateTable,
    checked: Option<SystemTime>,
}

/// Rate table refreshed at most once a day.
pub struct RateCache {
    source: Box<dyn RateSource>,
    path: Option<Utf8PathBuf>,
    state: Mutex<CacheState>,
}

impl std::fmt::Debug for RateCache {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("RateCache")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RateCache {
    /// A cache fed by `source`, persisting to `path` when given.
    #[must_use]
    pub fn new(source: impl RateSource + 'static, path: Option<Utf8PathBuf>) -> Self {
        Self {
            source: Box::new(source),
            path,
            state: Mutex::new(CacheState {
                table: RateTable::builtin(),
                checked: None,
            }),
        }
    }

    /// A cache reading the ECB and persisting to [`default_cache_path`].
    #[must_use]
    pub fn ecb() -> Self {
        Self::new(EcbRateSource::default(), default_cache_path())
    }

    /// Convert `amount` between currency codes, refreshing first if the
    /// rates are a day old. Unknown codes yield `None`.
    #[must_use]
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        self.table().convert(amount, from, to)
    }

    /// The current rates, refreshing first if they are a day old.
    ///
    /// The lock is released while the source is fetched, so other callers
    /// keep getting the previous table until the refresh lands.
    #[must_use]
    pub fn table(&self) -> RateTable {
        self.table_at(SystemTime::now())
    }

    fn table_at(&self, now: SystemTime) -> RateTable {
        {
            let mut state = self.state.lock();
            if state.checked.is_some_and(|checked| !is_stale(checked, now)) {
                return state.table.clone();
            }
            state.checked = Some(now);
        }

        let fetched = self.refresh(now);
        let mut state = self.state.lock();
        let swapped = fetched.map(|fresh| {
            let mut table = RateTable::builtin();
            table.merge(fresh);
            state.table = table;
        });
        if let Err(error) = swapped {
            warn!(target: "rates", "keeping previous rates: {error}");
        }
        state.table.clone()
    }

    fn refresh(&self, now: SystemTime) -> Result<RateTable, RateError> {
        if let Some(path) = &self.path {
            match load_cache(path) {
                Ok(Some(cached)) if !is_stale(seconds_to_time(cached.fetched_at), now) => {
                    debug!(target: "rates", "using cached rates from {path}");
                    return Ok(RateTable {
                        date: cached.date,
                        rates: cached.rates,
                    });
                }
                Ok(_) => {}
                Err(error) => warn!(target: "rates", "ignoring rate cache: {error}"),
            }
        }

        debug!(target: "rates", "fetching currency rates");
        let table = RateTable::parse_ecb(&self.source.fetch()?)?;
        if let Some(path) = &self.path {
            if let Err(error) = store_cache(path, &table, now) {
                warn!(target: "rates", "could not persist rates: {error}");
            }
        }
        Ok(table)
    }
}

fn is_stale(checked: SystemTime, now: SystemTime) -> bool {
    now.duration_since(checked)
        .is_ok_and(|age| age > REFRESH_INTERVAL)
}

fn seconds_to_time(seconds: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(seconds)
}

fn load_cache(path: &Utf8Path) -> Result<Option<CacheFile>, RateError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(RateError::CacheIo {
                path: path.to_owned(),
                source,
            });
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|source| RateError::CacheDecode {
            path: path.to_owned(),
            source,
        })
}

fn store_cache(path: &Utf8Path, table: &RateTable, now: SystemTime) -> Result<(), RateError> {
    let fetched_at = now
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since| since.as_secs());
    let file = CacheFile {
        fetched_at,
        date: table.date.clone(),
        rates: table.rates.clone(),
    };
    let text = toml::to_string(&file).map_err(|source| RateError::CacheEncode { source })?;
    let io_error = |source| RateError::CacheIo {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, text).map_err(io_error)
}
