//! Unit categories and conversions between their units.
//!
//! Each [`UnitCategory`] has a default unit; every [`Unit`] knows how to
//! move a value to and from that default through its [`Conversion`].

use thiserror::Error;

use crate::rates::RateTable;

/// How a unit relates to its category's default unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Conversion {
    /// `default = value * factor`.
    Factor(f64),
    /// `default = value * factor + offset`.
    Affine {
        /// Scale applied first.
        factor: f64,
        /// Offset added after scaling.
        offset: f64,
    },
}

#[expect(
    clippy::float_arithmetic,
    reason = "conversions scale and offset unit values"
)]
impl Conversion {
    /// Express `value` in the default unit.
    #[must_use]
    pub fn to_default(self, value: f64) -> f64 {
        match self {
            Self::Factor(factor) => value * factor,
            Self::Affine { factor, offset } => value.mul_add(factor, offset),
        }
    }

    /// Express a default-unit `value` in this unit.
    #[must_use]
    pub const fn from_default(self, value: f64) -> f64 {
        match self {
            Self::Factor(factor) => value / factor,
            Self::Affine { factor, offset } => (value - offset) / factor,
        }
    }
}

/// A named unit within a category.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    symbol: String,
    conversion: Conversion,
}

impl Unit {
    /// A unit written as `symbol`.
    #[must_use]
    pub fn new(symbol: impl Into<String>, conversion: Conversion) -> Self {
        Self {
            symbol: symbol.into(),
            conversion,
        }
    }

    /// The unit symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The conversion to the category default.
    #[must_use]
    pub const fn conversion(&self) -> Conversion {
        self.conversion
    }
}

/// Errors raised by unit conversion.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// The symbol is not a unit of the category.
    #[error("`{symbol}` is not a {category} unit")]
    UnknownUnit {
        /// Category searched.
        category: String,
        /// The unmatched symbol.
        symbol: String,
    },
}

/// A set of mutually convertible units.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitCategory {
    name: String,
    units: Vec<Unit>,
}

impl UnitCategory {
    /// A category whose first unit is the default.
    #[must_use]
    pub fn new(name: impl Into<String>, units: Vec<Unit>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }

    /// Kelvin, Celsius, and Fahrenheit, with kelvin as the default.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the Fahrenheit scale is derived")]
    pub fn temperature() -> Self {
        let fahrenheit = 5.0 / 9.0;
        Self::new(
            "temperature",
            vec![
                Unit::new("K", Conversion::Factor(1.0)),
                Unit::new(
                    "°C",
                    Conversion::Affine {
                        factor: 1.0,
                        offset: 273.15,
                    },
                ),
                Unit::new(
                    "°F",
                    Conversion::Affine {
                        factor: fahrenheit,
                        offset: 459.67 * fahrenheit,
                    },
                ),
            ],
        )
    }

    /// Currencies in `rates`, with the euro as the default.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "rates are inverted into factors")]
    pub fn currency(rates: &RateTable) -> Self {
        let mut units = vec![Unit::new("EUR", Conversion::Factor(1.0))];
        units.extend(
            rates
                .codes()
                .into_iter()
                .filter(|code| *code != "EUR")
                .filter_map(|code| {
                    rates
                        .rate(code)
                        .map(|rate| Unit::new(code, Conversion::Factor(1.0 / rate)))
                }),
        );
        Self::new("currency", units)
    }

    /// The category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default unit, if the category has any units.
    #[must_use]
    pub fn default_unit(&self) -> Option<&Unit> {
        self.units.first()
    }

    /// Units in declaration order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// The unit written as `symbol`.
    #[must_use]
    pub fn unit(&self, symbol: &str) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.symbol == symbol)
    }

    /// Convert `value` from one unit symbol to another.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::UnknownUnit`] when either symbol is not part of
    /// this category.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        Ok(target
            .conversion
            .from_default(source.conversion.to_default(value)))
    }

    fn require(&self, symbol: &str) -> Result<&Unit, UnitError> {
        self.unit(symbol).ok_or_else(|| UnitError::UnknownUnit {
            category: self.name.clone(),
            symbol: symbol.to_owned(),
        })
    }
}
