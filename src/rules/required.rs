//! Required rule - the value must not be blank.

use super::Rule;

/// Returns `true` if the value has content once leading and trailing
/// whitespace is stripped.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Builds a rule rejecting blank values.
///
/// # Returns
/// A [`Rule`] reporting `message` when the value is empty or whitespace only.
pub fn required(message: impl Into<String>) -> Rule {
    Rule::new(is_present, message)
}
