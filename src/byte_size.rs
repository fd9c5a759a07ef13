//! Human-readable byte sizes.

use std::borrow::Cow;

use fluent_templates::fluent_bundle::FluentValue;

use crate::LIBRARY_DOMAIN;
use crate::catalog::{Arguments, TranslationResolver};
use crate::number::NumberFormatter;
use crate::settings::BinaryUnitDialect;

/// Magnitude of a byte-size unit, from bytes to yottabytes.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ByteUnit {
    /// Bytes.
    Byte,
    /// 1024 or 1000 bytes.
    Kilo,
    /// Mega.
    Mega,
    /// Giga.
    Giga,
    /// Tera.
    Tera,
    /// Peta.
    Peta,
    /// Exa.
    Exa,
    /// Zetta.
    Zetta,
    /// Yotta.
    Yotta,
}

const UNITS: [ByteUnit; 9] = [
    ByteUnit::Byte,
    ByteUnit::Kilo,
    ByteUnit::Mega,
    ByteUnit::Giga,
    ByteUnit::Tera,
    ByteUnit::Peta,
    ByteUnit::Exa,
    ByteUnit::Zetta,
    ByteUnit::Yotta,
];

impl ByteUnit {
    const fn exponent(self) -> i32 {
        match self {
            Self::Byte => 0,
            Self::Kilo => 1,
            Self::Mega => 2,
            Self::Giga => 3,
            Self::Tera => 4,
            Self::Peta => 5,
            Self::Exa => 6,
            Self::Zetta => 7,
            Self::Yotta => 8,
        }
    }

    /// The unit symbol in `dialect`, e.g. `KiB`, `KB` or `kB`.
    #[must_use]
    pub const fn symbol(self, dialect: BinaryUnitDialect) -> &'static str {
        match (self, dialect) {
            (Self::Byte, _) => "B",
            (Self::Kilo, BinaryUnitDialect::Iec) => "KiB",
            (Self::Kilo, BinaryUnitDialect::Jedec) => "KB",
            (Self::Kilo, BinaryUnitDialect::Metric) => "kB",
            (Self::Mega, BinaryUnitDialect::Iec) => "MiB",
            (Self::Mega, _) => "MB",
            (Self::Giga, BinaryUnitDialect::Iec) => "GiB",
            (Self::Giga, _) => "GB",
            (Self::Tera, BinaryUnitDialect::Iec) => "TiB",
            (Self::Tera, _) => "TB",
            (Self::Peta, BinaryUnitDialect::Iec) => "PiB",
            (Self::Peta, _) => "PB",
            (Self::Exa, BinaryUnitDialect::Iec) => "EiB",
            (Self::Exa, _) => "EB",
            (Self::Zetta, BinaryUnitDialect::Iec) => "ZiB",
            (Self::Zetta, _) => "ZB",
            (Self::Yotta, BinaryUnitDialect::Iec) => "YiB",
            (Self::Yotta, _) => "YB",
        }
    }
}

/// Formats byte counts with a unit chosen from a dialect.
#[derive(Clone, Copy)]
pub struct ByteSizeFormatter<'a> {
    numbers: NumberFormatter<'a>,
    resolver: TranslationResolver<'a>,
    dialect: BinaryUnitDialect,
}

impl<'a> ByteSizeFormatter<'a> {
    /// Combine a number formatter, a resolver for the unit phrases, and a
    /// dialect.
    #[must_use]
    pub const fn new(
        numbers: NumberFormatter<'a>,
        resolver: TranslationResolver<'a>,
        dialect: BinaryUnitDialect,
    ) -> Self {
        Self {
            numbers,
            resolver,
            dialect,
        }
    }

    /// Format `size` bytes.
    ///
    /// Without a `unit` the largest unit that keeps the value at or above
    /// one is chosen. Byte counts are always shown without decimals.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "sizes are scaled by the dialect multiplier"
    )]
    pub fn format(&self, size: f64, precision: usize, requested: Option<ByteUnit>) -> String {
        let multiplier = self.dialect.multiplier();
        let (value, unit) = requested.map_or_else(
            || {
                let mut value = size;
                let mut index = 0;
                while value.abs() >= multiplier && index + 1 < UNITS.len() {
                    value /= multiplier;
                    index += 1;
                }
                (value, UNITS.get(index).copied().unwrap_or(ByteUnit::Byte))
            },
            |unit| (size / multiplier.powi(unit.exponent()), unit),
        );
        let digits = if unit == ByteUnit::Byte { 0 } else { precision };
        let number = self.numbers.format(value, Some(digits));
        let symbol = unit.symbol(self.dialect);

        let mut args = Arguments::new();
        args.insert(Cow::Borrowed("value"), FluentValue::from(number));
        let id = format!("byte-size-{}", symbol.to_ascii_lowercase());
        self.resolver
            .translate(
                Some(LIBRARY_DOMAIN),
                &id,
                &format!("{{ $value }} {symbol}"),
                Some(&args),
            )
            .text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FluentCatalogStore;
    use crate::settings::LocaleSettings;
    use parlance_common::LanguageList;
    use rstest::rstest;

    fn format_with(
        dialect: BinaryUnitDialect,
        size: f64,
        precision: usize,
        unit: Option<ByteUnit>,
    ) -> String {
        let settings = LocaleSettings::default();
        let languages = LanguageList::default();
        let store = FluentCatalogStore::new();
        let resolver = TranslationResolver::new(&[], &languages, &store);
        ByteSizeFormatter::new(NumberFormatter::new(&settings), resolver, dialect)
            .format(size, precision, unit)
    }

    #[rstest]
    #[case(BinaryUnitDialect::Iec, 512.0, "512 B")]
    #[case(BinaryUnitDialect::Iec, 1024.0, "1.0 KiB")]
    #[case(BinaryUnitDialect::Iec, 1536.0, "1.5 KiB")]
    #[case(BinaryUnitDialect::Jedec, 1_048_576.0, "1.0 MB")]
    #[case(BinaryUnitDialect::Metric, 1000.0, "1.0 kB")]
    #[case(BinaryUnitDialect::Metric, 999.0, "999 B")]
    #[case(BinaryUnitDialect::Metric, 2.5e9, "2.5 GB")]
    #[case(BinaryUnitDialect::Iec, -2048.0, "-2.0 KiB")]
    fn picks_the_largest_fitting_unit(
        #[case] dialect: BinaryUnitDialect,
        #[case] size: f64,
        #[case] expected: &str,
    ) {
        assert_eq!(format_with(dialect, size, 1, None), expected);
    }

    #[rstest]
    fn stops_at_yotta() {
        assert_eq!(format_with(BinaryUnitDialect::Metric, 1e27, 0, None), "1,000 YB");
    }

    #[rstest]
    fn honours_a_requested_unit() {
        assert_eq!(
            format_with(BinaryUnitDialect::Iec, 1_048_576.0, 2, Some(ByteUnit::Kilo)),
            "1,024.00 KiB"
        );
        assert_eq!(
            format_with(BinaryUnitDialect::Iec, 1536.4, 2, Some(ByteUnit::Byte)),
            "1,536 B"
        );
    }

    #[rstest]
    fn unit_phrases_are_translatable() {
        let settings = LocaleSettings::default();
        let languages = LanguageList::new(["fr"]);
        let store = FluentCatalogStore::new()
            .with_source(LIBRARY_DOMAIN, "fr", "byte-size-kib = { $value } Kio\n")
            .expect("valid catalog");
        let instances = crate::catalog::recompute(&[LIBRARY_DOMAIN], &languages, &store);
        let resolver = TranslationResolver::new(&instances, &languages, &store);
        let sizes = ByteSizeFormatter::new(
            NumberFormatter::new(&settings),
            resolver,
            BinaryUnitDialect::Iec,
        );
        assert_eq!(sizes.format(2048.0, 1, None), "2.0 Kio");
        assert_eq!(sizes.format(2.0, 1, None), "2 B");
    }
}
