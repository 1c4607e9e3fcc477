//! Live input sanitizers.
//!
//! A sanitizer rewrites a value on every input event, before any rule sees
//! it. It never reports an error.

/// Value-rewriting transform applied on each input event.
pub type Sanitizer = fn(&str) -> String;

/// Drops every character that is not an ASCII digit.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
