//! Reading localized numbers back into `f64`.

use parlance_common::{GroupingPattern, digit_value, to_canonical_digits};

use crate::error::ReadError;

/// Separator, grouping and decimal symbol of one number style.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NumberShape<'a> {
    pub separator: &'a str,
    pub grouping: &'a GroupingPattern,
    pub decimal: &'a str,
}

/// Outcome of looking for a sign token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Sign {
    Positive,
    Negative,
}

/// Strip a sign from either end of `text`.
///
/// The negative sign is tried before the positive one. When the negative
/// sign is empty but the positive sign is not, an unsigned number is
/// negative.
pub(crate) fn strip_sign<'t>(text: &'t str, positive: &str, negative: &str) -> (Sign, &'t str) {
    if let Some(rest) = strip_either_end(text, negative) {
        return (Sign::Negative, rest);
    }
    if let Some(rest) = strip_either_end(text, positive) {
        return (Sign::Positive, rest);
    }
    let starts_with_digit = text.chars().next().is_some_and(|c| digit_value(c).is_some());
    let ends_with_digit = text.chars().next_back().is_some_and(|c| digit_value(c).is_some());
    if negative.is_empty() && !positive.is_empty() && starts_with_digit && ends_with_digit {
        (Sign::Negative, text)
    } else {
        (Sign::Positive, text)
    }
}

fn strip_either_end<'t>(text: &'t str, token: &str) -> Option<&'t str> {
    if token.is_empty() {
        return None;
    }
    text.strip_prefix(token)
        .map(str::trim_start)
        .or_else(|| text.strip_suffix(token).map(str::trim_end))
}

/// Parse an unsigned localized number, validating group separators.
///
/// `exponent` permits a trailing `e`/`E` suffix.
pub(crate) fn parse_unsigned(
    text: &str,
    shape: NumberShape<'_>,
    exponent: bool,
) -> Result<f64, ReadError> {
    let (written, suffix) = text
        .find(['e', 'E'])
        .filter(|_| exponent)
        .map_or((text, ""), |index| text.split_at(index));
    let mantissa = to_canonical_digits(written);
    let ungrouped = if !shape.separator.is_empty() && mantissa.contains(shape.separator) {
        shape
            .grouping
            .remove(&mantissa, shape.separator, shape.decimal)?
    } else {
        mantissa
    };

    let (major, minor) = if shape.decimal.is_empty() {
        (ungrouped.as_str(), "")
    } else {
        ungrouped
            .split_once(shape.decimal)
            .unwrap_or((ungrouped.as_str(), ""))
    };
    if major.is_empty() && minor.is_empty() {
        return Err(ReadError::Empty);
    }
    for part in [major, minor] {
        if !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(ReadError::NotDigits {
                text: part.to_owned(),
            });
        }
    }

    let mut canonical = if major.is_empty() {
        String::from("0")
    } else {
        major.to_owned()
    };
    if !minor.is_empty() {
        canonical.push('.');
        canonical.push_str(minor);
    }
    canonical.push_str(&to_canonical_digits(suffix));
    canonical
        .parse()
        .map_err(|_| ReadError::InvalidNumber { text: canonical })
}
