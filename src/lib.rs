//! Locale-aware formatting and reading of numbers, money, byte sizes,
//! durations and wall-clock times, with translation catalogs resolved by
//! language and catalog priority.
//!
//! Most programs build one [`LocaleContext`] and format through it:
//!
//! ```
//! use parlance::LocaleContext;
//! use parlance::catalog::FluentCatalogStore;
//!
//! let context = LocaleContext::new("app", FluentCatalogStore::new());
//! assert_eq!(context.format_number(-1234.567, Some(2)), "-1,234.57");
//! assert_eq!(context.read_number("-1,234.57"), Ok(-1234.57));
//! assert_eq!(context.format_byte_size(1536.0, 1, None), "1.5 KiB");
//! ```
//!
//! The formatters are also usable directly against a [`LocaleSettings`].

pub mod byte_size;
pub mod catalog;
pub mod context;
pub mod currency;
pub mod day_period;
pub mod duration;
pub mod error;
pub mod money;
pub mod number;
pub mod rates;
pub mod settings;
pub mod time;
pub mod units;

pub use byte_size::{ByteSizeFormatter, ByteUnit};
pub use context::LocaleContext;
pub use day_period::{DayPeriod, DayPeriods, PeriodNameFormat};
pub use duration::DurationFormatter;
pub use error::ReadError;
pub use money::MoneyFormatter;
pub use number::NumberFormatter;
pub use settings::{BinaryUnitDialect, LocaleSettings, SignPosition};
pub use time::{ClockTime, ReadStrictness, TimeOptions, TimeTemplateEngine};

/// Catalog domain holding the library's own phrases, such as unit and
/// duration wording. It is registered as a system catalog in every
/// [`LocaleContext`].
pub const LIBRARY_DOMAIN: &str = "parlance";
