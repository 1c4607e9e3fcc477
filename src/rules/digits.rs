//! Digits rule - the value is exactly `n` ASCII digits.

use super::Rule;

/// Returns `true` if the trimmed value is made only of ASCII digits and
/// holds exactly `count` of them.
pub fn is_exact_digits(value: &str, count: usize) -> bool {
    let value = value.trim();
    value.chars().all(|c| c.is_ascii_digit()) && value.chars().count() == count
}

/// Builds a rule requiring exactly `count` ASCII digits.
///
/// # Returns
/// A [`Rule`] reporting `message` for any other digit count or for non-digit
/// characters.
pub fn exact_digits(count: usize, message: impl Into<String>) -> Rule {
    Rule::new(move |value| is_exact_digits(value, count), message)
}
