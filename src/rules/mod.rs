//! Field rules
//!
//! A rule pairs a predicate over the current field value with the message
//! reported when the predicate fails. Each submodule provides one family of
//! built-in rules.

mod digits;
mod email;
mod length;
pub(crate) mod password;
mod required;

use std::fmt;
use std::sync::Arc;

pub use digits::{exact_digits, is_exact_digits};
pub use email::{email_format, is_email, matches};
pub use length::{has_min_length, min_length};
pub use password::{
    password_composite, MSG_PASSWORD_LENGTH, MSG_PASSWORD_LOWERCASE, MSG_PASSWORD_NUMBER,
    MSG_PASSWORD_UPPERCASE, PASSWORD_MIN_LENGTH,
};
pub use required::{is_present, required};

/// Predicate applied to a field's current value.
pub type Check = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A predicate and the message reported when it fails.
#[derive(Clone)]
pub struct Rule {
    test: Check,
    message: String,
}

impl Rule {
    /// Pairs a predicate with its failure message.
    ///
    /// # Returns
    /// A cloneable [`Rule`]; the predicate is shared between clones.
    pub fn new<F>(test: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
            message: message.into(),
        }
    }

    /// Runs the predicate.
    ///
    /// # Returns
    /// - `Some(message)` if the value fails this rule
    /// - `None` if the value passes
    pub fn check(&self, value: &str) -> Option<&str> {
        if (self.test)(value) {
            None
        } else {
            Some(&self.message)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("message", &self.message).finish_non_exhaustive()
    }
}

/// Builds a rule from an arbitrary predicate.
pub fn custom<F>(test: F, message: impl Into<String>) -> Rule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Rule::new(test, message)
}
