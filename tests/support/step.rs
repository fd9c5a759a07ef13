//! Quoted step parameters.

use std::convert::Infallible;
use std::str::FromStr;

/// A step parameter with surrounding quotes removed.
#[derive(Clone, Debug)]
pub struct StepText {
    raw: String,
}

impl FromStr for StepText {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input
            .trim()
            .trim_matches(|candidate| matches!(candidate, '"' | '\''))
            .to_owned();

        Ok(Self { raw })
    }
}

impl StepText {
    /// Consumes the step value, yielding the unquoted text.
    pub fn into_inner(self) -> String {
        self.raw
    }
}
