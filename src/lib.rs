//! Headless form validation library
//!
//! This library evaluates form fields against ordered rule sets and reports
//! per-field results and an aggregate verdict as plain data, leaving all
//! rendering to the caller.
//!
//! # Features
//!
//! - `async` (default): Enables the deferred post-submit reset
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `FORM_RESET_DELAY_MS`: Delay before an accepted form is cleared
//!   (default: `3000`)
//! - `FORM_RESET_POLICY`: `unconditional` (default) or `cancel-on-input`
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use form_rules::{rules, FormValidator};
//!
//! let mut validator = FormValidator::new();
//! validator
//!     .register_field(
//!         "email",
//!         vec![
//!             rules::required("Email is required"),
//!             rules::email_format("Please enter valid email format"),
//!         ],
//!     )
//!     .expect("field registered once");
//!
//! let result = validator.validate_field("email", "user@@example.com").unwrap();
//! assert!(!result.valid);
//! assert_eq!(result.message, "Please enter valid email format");
//!
//! let mut values = HashMap::new();
//! values.insert("email".to_string(), "user@example.com".to_string());
//! assert!(validator.validate_all(&values).is_valid());
//! ```

// Internal modules
mod config;
mod error;
mod presets;
mod sanitize;
mod session;
mod strength;
mod validator;

#[cfg(feature = "async")]
mod reset;

pub mod rules;

// Public API
pub use config::{FormConfig, ResetPolicy, DEFAULT_RESET_DELAY, RESET_DELAY_ENV, RESET_POLICY_ENV};
pub use error::ConfigError;
pub use presets::{contact_form, contact_session, signup_form, signup_session, PHONE_DIGITS};
pub use rules::Rule;
pub use sanitize::{digits_only, Sanitizer};
pub use session::{
    FormMessage, FormSession, InputUpdate, MessageKind, SubmitOutcome, Visibility,
    MSG_SUBMIT_ERROR, MSG_SUBMIT_SUCCESS,
};
pub use strength::{evaluate_password_requirements, Requirement, RequirementChecklist};
pub use validator::{
    FieldRule, FieldValues, FormState, FormValidator, ValidationResult,
    DEFAULT_CONFIRMATION_MESSAGE,
};

#[cfg(feature = "async")]
pub use reset::{shared, submit_and_schedule_reset, SharedSession};
