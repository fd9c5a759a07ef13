//! Digit grouping insertion and validated removal.
//!
//! A [`GroupingPattern`] lists group sizes from the decimal symbol outward.
//! Once the list is exhausted the last size repeats, unless the configured
//! pattern ended with a non-positive entry (for example `3;-1`), which stops
//! grouping after the listed sizes.
//!
//! Removal is the strict inverse of insertion: every separator must sit
//! exactly where [`GroupingPattern::insert`] would have placed it. Anything
//! else is reported as [`GroupingError`].

use std::fmt;

use thiserror::Error;

/// Raised when separators in a number do not follow the grouping pattern.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("group separator `{separator}` misplaced in `{number}`")]
pub struct GroupingError {
    /// The number text as it was supplied.
    pub number: String,
    /// The configured separator.
    pub separator: String,
}

/// Ordered digit-group sizes, least significant group first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupingPattern {
    groups: Vec<usize>,
    repeat_last: bool,
}

impl GroupingPattern {
    /// Build a pattern whose last group repeats indefinitely.
    ///
    /// Zero-sized groups terminate the list.
    #[must_use]
    pub fn new(groups: impl IntoIterator<Item = usize>) -> Self {
        let mut repeat_last = true;
        let mut collected = Vec::new();
        for size in groups {
            if size == 0 {
                repeat_last = false;
                break;
            }
            collected.push(size);
        }
        Self {
            groups: collected,
            repeat_last,
        }
    }

    /// A pattern that never inserts separators.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            groups: Vec::new(),
            repeat_last: false,
        }
    }

    /// Parse the semicolon-separated configuration form, e.g. `"3;2"`.
    ///
    /// Entries that are not integers, or are zero or negative, end the
    /// pattern. An empty string disables grouping.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let sizes = raw
            .split(';')
            .map(|entry| entry.trim().parse::<i64>().unwrap_or(0))
            .map(|size| usize::try_from(size).unwrap_or(0));
        Self::new(sizes)
    }

    /// Whether the pattern places any separators at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Group sizes as configured, least significant first.
    #[must_use]
    pub fn groups(&self) -> &[usize] {
        &self.groups
    }

    fn sizes(&self) -> GroupSizes<'_> {
        GroupSizes {
            pattern: self,
            index: 0,
        }
    }

    /// Insert `separator` into `number`, anchored at `decimal`.
    ///
    /// The walk starts at the first occurrence of `decimal` (or the end of
    /// the string when absent) and moves towards the most significant digit.
    #[must_use]
    pub fn insert(&self, number: &str, separator: &str, decimal: &str) -> String {
        if !self.is_enabled() || separator.is_empty() {
            return number.to_owned();
        }

        let mut result = number.to_owned();
        let mut position = anchor(number, decimal);
        for size in self.sizes() {
            match position.checked_sub(size) {
                Some(next) if next > 0 && result.is_char_boundary(next) => {
                    result.insert_str(next, separator);
                    position = next;
                }
                _ => break,
            }
        }
        result
    }

    /// Remove `separator` from `number`, validating each position.
    ///
    /// # Errors
    ///
    /// Returns [`GroupingError`] when a separator is found anywhere other
    /// than the positions [`Self::insert`] produces.
    pub fn remove(&self, number: &str, separator: &str, decimal: &str) -> Result<String, GroupingError> {
        if separator.is_empty() || !number.contains(separator) {
            return Ok(number.to_owned());
        }

        let mut result = number.to_owned();
        if self.is_enabled() {
            let mut position = anchor(number, decimal);
            for size in self.sizes() {
                let Some(start) = position
                    .checked_sub(size + separator.len())
                    .filter(|start| *start > 0)
                else {
                    break;
                };
                if result.get(start..start + separator.len()) != Some(separator) {
                    return Err(misplaced(number, separator));
                }
                result.replace_range(start..start + separator.len(), "");
                position = start;
            }
        }

        if result.contains(separator) {
            return Err(misplaced(number, separator));
        }
        Ok(result)
    }
}

impl fmt::Display for GroupingPattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.groups.iter().map(ToString::to_string).collect();
        formatter.write_str(&rendered.join(";"))?;
        if !self.repeat_last && self.is_enabled() {
            formatter.write_str(";-1")?;
        }
        Ok(())
    }
}

fn misplaced(number: &str, separator: &str) -> GroupingError {
    GroupingError {
        number: number.to_owned(),
        separator: separator.to_owned(),
    }
}

fn anchor(number: &str, decimal: &str) -> usize {
    if decimal.is_empty() {
        return number.len();
    }
    number.find(decimal).unwrap_or(number.len())
}

struct GroupSizes<'a> {
    pattern: &'a GroupingPattern,
    index: usize,
}

impl Iterator for GroupSizes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let groups = &self.pattern.groups;
        let size = match groups.get(self.index) {
            Some(size) => *size,
            None if self.pattern.repeat_last => *groups.last()?,
            None => return None,
        };
        self.index += 1;
        Some(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", &[3], "1234567.89", "1,234,567.89")]
    #[case("3;2", &[3, 2], "1234567", "12,34,567")]
    #[case("3;2", &[3, 2], "123456789.01", "12,34,56,789.01")]
    #[case("3;-1", &[3], "123456789", "123456,789")]
    #[case("", &[], "123456789", "123456789")]
    #[case("3", &[3], "123", "123")]
    #[case("3", &[3], "1234", "1,234")]
    fn inserts_groups(
        #[case] raw: &str,
        #[case] groups: &[usize],
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        let pattern = GroupingPattern::parse(raw);
        assert_eq!(pattern.groups(), groups);
        assert_eq!(pattern.insert(input, ",", "."), expected);
    }

    #[rstest]
    fn multi_character_separators_are_supported() {
        let pattern = GroupingPattern::new([3]);
        let grouped = pattern.insert("1234567,5", "\u{202f}", ",");
        assert_eq!(grouped, "1\u{202f}234\u{202f}567,5");
        assert_eq!(
            pattern.remove(&grouped, "\u{202f}", ","),
            Ok(String::from("1234567,5"))
        );
    }

    #[rstest]
    #[case("12,100", Some("12100"))]
    #[case("12,146,131.12", Some("12146131.12"))]
    #[case("12,1", None)]
    #[case("12,,34", None)]
    #[case("12,,100,000", None)]
    #[case("12,1000,000", None)]
    #[case("12,100000000", None)]
    #[case("12,0000000,000", None)]
    #[case("123456789", Some("123456789"))]
    fn removes_groups_strictly(#[case] input: &str, #[case] expected: Option<&str>) {
        let pattern = GroupingPattern::new([3]);
        let outcome = pattern.remove(input, ",", ".").ok();
        assert_eq!(outcome.as_deref(), expected);
    }

    #[rstest]
    #[case("12,34,56,789", Some("123456789"))]
    #[case("12,34,56,789.01", Some("123456789.01"))]
    #[case("123,456,789", None)]
    #[case("123456,789", None)]
    fn removes_indian_groups(#[case] input: &str, #[case] expected: Option<&str>) {
        let pattern = GroupingPattern::parse("3;2");
        let outcome = pattern.remove(input, ",", ".").ok();
        assert_eq!(outcome.as_deref(), expected);
    }

    #[rstest]
    fn disabled_pattern_rejects_any_separator() {
        let pattern = GroupingPattern::disabled();
        assert!(pattern.remove("123,456", ",", ".").is_err());
        assert_eq!(pattern.remove("123456", ",", "."), Ok(String::from("123456")));
    }

    #[rstest]
    fn insertion_and_removal_are_inverse() {
        for raw in ["3", "3;2", "2", "4;3;2", "3;-1"] {
            let pattern = GroupingPattern::parse(raw);
            for digits in ["1", "12", "1234", "987654321", "1000000000000.25"] {
                let grouped = pattern.insert(digits, ",", ".");
                assert_eq!(
                    pattern.remove(&grouped, ",", "."),
                    Ok(digits.to_owned()),
                    "pattern {raw} on {digits}",
                );
            }
        }
    }

    #[rstest]
    fn display_round_trips_configuration() {
        assert_eq!(GroupingPattern::parse("3;2").to_string(), "3;2");
        assert_eq!(GroupingPattern::parse("3;-1").to_string(), "3;-1");
    }
}
