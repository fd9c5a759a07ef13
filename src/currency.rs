//! Currency metadata consulted when settings do not name a symbol or
//! monetary precision explicitly.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Source of per-currency display metadata.
pub trait CurrencyMetadata {
    /// Default display symbol for the ISO 4217 `code`.
    fn symbol(&self, code: &str) -> Option<String>;

    /// Minor-unit precision for `code`.
    fn decimal_places(&self, code: &str) -> Option<usize>;
}

/// Display metadata for one currency.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CurrencyInfo {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Default symbol.
    pub symbol: &'static str,
    /// Digits after the monetary decimal symbol.
    pub decimal_places: usize,
}

const CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "AUD", symbol: "A$", decimal_places: 2 },
    CurrencyInfo { code: "BRL", symbol: "R$", decimal_places: 2 },
    CurrencyInfo { code: "CAD", symbol: "CA$", decimal_places: 2 },
    CurrencyInfo { code: "CHF", symbol: "CHF", decimal_places: 2 },
    CurrencyInfo { code: "CNY", symbol: "¥", decimal_places: 2 },
    CurrencyInfo { code: "EUR", symbol: "€", decimal_places: 2 },
    CurrencyInfo { code: "GBP", symbol: "£", decimal_places: 2 },
    CurrencyInfo { code: "INR", symbol: "₹", decimal_places: 2 },
    CurrencyInfo { code: "JPY", symbol: "¥", decimal_places: 0 },
    CurrencyInfo { code: "KRW", symbol: "₩", decimal_places: 0 },
    CurrencyInfo { code: "KWD", symbol: "KD", decimal_places: 3 },
    CurrencyInfo { code: "SEK", symbol: "kr", decimal_places: 2 },
    CurrencyInfo { code: "USD", symbol: "$", decimal_places: 2 },
];

static BY_CODE: Lazy<HashMap<&'static str, CurrencyInfo>> =
    Lazy::new(|| CURRENCIES.iter().map(|info| (info.code, *info)).collect());

/// Built-in table covering commonly used currencies.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinCurrencies;

impl BuiltinCurrencies {
    /// Look up the full record for `code`.
    #[must_use]
    pub fn info(code: &str) -> Option<CurrencyInfo> {
        BY_CODE.get(code).copied()
    }

    /// Every currency in the table, ordered by code.
    #[must_use]
    pub const fn all() -> &'static [CurrencyInfo] {
        CURRENCIES
    }
}

impl CurrencyMetadata for BuiltinCurrencies {
    fn symbol(&self, code: &str) -> Option<String> {
        Self::info(code).map(|info| info.symbol.to_owned())
    }

    fn decimal_places(&self, code: &str) -> Option<usize> {
        Self::info(code).map(|info| info.decimal_places)
    }
}
