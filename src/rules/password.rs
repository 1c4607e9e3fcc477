//! Password composite rule - length, uppercase, lowercase, number.

use super::Rule;

pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const MSG_PASSWORD_LENGTH: &str = "Password must be at least 8 characters";
pub const MSG_PASSWORD_UPPERCASE: &str = "Password must contain uppercase letter";
pub const MSG_PASSWORD_LOWERCASE: &str = "Password must contain lowercase letter";
pub const MSG_PASSWORD_NUMBER: &str = "Password must contain a number";

// The password is never trimmed: surrounding spaces count toward its length.
pub(crate) fn is_long_enough(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
}

pub(crate) fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub(crate) fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

pub(crate) fn has_number(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

/// Returns the password sub-rules in priority order.
///
/// Appended after a `required` rule, the first failing sub-rule decides the
/// reported message: length, then uppercase, then lowercase, then number.
pub fn password_composite() -> Vec<Rule> {
    vec![
        Rule::new(is_long_enough, MSG_PASSWORD_LENGTH),
        Rule::new(has_uppercase, MSG_PASSWORD_UPPERCASE),
        Rule::new(has_lowercase, MSG_PASSWORD_LOWERCASE),
        Rule::new(has_number, MSG_PASSWORD_NUMBER),
    ]
}
