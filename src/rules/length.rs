//! Length rule - checks the trimmed value's minimum length.

use super::Rule;

/// Returns `true` if the trimmed value holds at least `min` characters.
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Builds a rule requiring at least `min` characters after trimming.
///
/// # Returns
/// A [`Rule`] reporting `message` when the trimmed value is shorter than `min`.
pub fn min_length(min: usize, message: impl Into<String>) -> Rule {
    Rule::new(move |value| has_min_length(value, min), message)
}
