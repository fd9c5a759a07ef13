//! Rejections reported by the number, money, and time readers.
//!
//! Readers never panic and never abort; every rejection is a [`ReadError`].
//! Callers that want the historical fallback values use
//! [`ReadError::FALLBACK_NUMBER`] for numbers and amounts, or treat the error
//! as "no time" via `.ok()`.

use parlance_common::GroupingError;
use thiserror::Error;

/// Reasons a localized string could not be read back.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    /// Nothing was left to read once signs and symbols were removed.
    #[error("nothing to read")]
    Empty,

    /// Group separators were found where the grouping pattern forbids them.
    #[error(transparent)]
    Grouping(#[from] GroupingError),

    /// The integer or fractional part contains characters other than digits.
    #[error("`{text}` contains characters that are not digits")]
    NotDigits {
        /// The offending part.
        text: String,
    },

    /// The reassembled canonical text is not a number.
    #[error("`{text}` is not a number")]
    InvalidNumber {
        /// Canonical text handed to the float parser.
        text: String,
    },

    /// No configured day period name matches the input.
    #[error("no day period matches `{text}`")]
    UnknownDayPeriod {
        /// Input from the point where a day period was expected.
        text: String,
    },

    /// Template and input ran out at different points or disagreed on a
    /// literal character.
    #[error("input does not match the time template at `{remaining}`")]
    TemplateMismatch {
        /// Unconsumed input at the point of failure.
        remaining: String,
    },

    /// A numeric time field was expected but not present.
    #[error("expected digits for the {field}")]
    MissingDigits {
        /// Field being read.
        field: &'static str,
    },

    /// The template never supplied a value for a field.
    #[error("the time template does not provide the {field}")]
    MissingField {
        /// Field that was never read.
        field: &'static str,
    },

    /// The fields read do not form a valid wall-clock time.
    #[error("{hour:02}:{minute:02}:{second:02} is not a valid time")]
    InvalidTime {
        /// Hour as read (before any day-period conversion).
        hour: u32,
        /// Minute as read.
        minute: u32,
        /// Second as read.
        second: u32,
    },
}

impl ReadError {
    /// Value historically returned alongside a failed number or money read.
    pub const FALLBACK_NUMBER: f64 = 0.0;
}
