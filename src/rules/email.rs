//! Pattern rules - email format and caller-supplied regexes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Rule;

// Not RFC 5322. TLDs outside 2..=6 letters are rejected on purpose.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$")
        .expect("email pattern is a valid regex")
});

/// Returns `true` if the trimmed value looks like `local@domain.tld`.
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Builds the email format rule.
///
/// # Returns
/// A [`Rule`] reporting `message` when [`is_email`] rejects the value.
pub fn email_format(message: impl Into<String>) -> Rule {
    Rule::new(is_email, message)
}

/// Builds a rule that passes when the trimmed value matches `pattern`.
///
/// # Returns
/// A [`Rule`] reporting `message` when the trimmed value does not match.
pub fn matches(pattern: Regex, message: impl Into<String>) -> Rule {
    Rule::new(move |value| pattern.is_match(value.trim()), message)
}
