//! Configuration errors.
//!
//! Invalid user input is never an error here: it is reported as a
//! [`ValidationResult`](crate::ValidationResult) with `valid == false`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Field already registered: {0}")]
    DuplicateField(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Field cannot confirm itself: {0}")]
    SelfConfirmation(String),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidSetting { key: &'static str, value: String },
}
