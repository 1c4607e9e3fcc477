//! Ready-made forms.
//!
//! `contact_form` is the name / email / phone / password form with its
//! stock messages; `signup_form` adds a password confirmation field.

use crate::config::FormConfig;
use crate::error::ConfigError;
use crate::rules::{email_format, exact_digits, password_composite, required};
use crate::sanitize::digits_only;
use crate::session::FormSession;
use crate::validator::FormValidator;

pub const PHONE_DIGITS: usize = 10;

pub fn contact_form() -> Result<FormValidator, ConfigError> {
    let mut validator = FormValidator::new();
    validator.register_field("name", vec![required("Name is required")])?;
    validator.register_field(
        "email",
        vec![
            required("Email is required"),
            email_format("Please enter valid email format"),
        ],
    )?;
    validator.register_field(
        "phone",
        vec![
            required("Phone number is required"),
            exact_digits(PHONE_DIGITS, "Phone number must be 10 digits"),
        ],
    )?;

    let mut password = vec![required("Password is required")];
    password.extend(password_composite());
    validator.register_field("password", password)?;
    Ok(validator)
}

pub fn signup_form() -> Result<FormValidator, ConfigError> {
    let mut validator = contact_form()?;
    validator.register_field(
        "confirmPassword",
        vec![required("Please confirm your password")],
    )?;
    validator.register_confirmation("confirmPassword", "password", "Passwords do not match")?;
    Ok(validator)
}

fn wire(validator: FormValidator, config: FormConfig) -> FormSession {
    FormSession::new(validator, config)
        .with_sanitizer("phone", digits_only)
        .with_strength_field("password")
        .with_toggle("toggleBtn", "password")
}

/// Session over [`contact_form`] with the phone digit filter, the password
/// checklist and the `toggleBtn` visibility toggle wired in.
pub fn contact_session(config: FormConfig) -> Result<FormSession, ConfigError> {
    Ok(wire(contact_form()?, config))
}

/// Like [`contact_session`], over [`signup_form`].
pub fn signup_session(config: FormConfig) -> Result<FormSession, ConfigError> {
    Ok(wire(signup_form()?, config))
}
