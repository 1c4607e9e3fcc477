//! Form validator - rule registration and evaluation.

use std::collections::{BTreeMap, HashMap};

use crate::error::ConfigError;
use crate::rules::{is_present, Rule};

/// Message used by [`FormValidator::matches_confirmation`] when no link was
/// registered for the confirm field.
pub const DEFAULT_CONFIRMATION_MESSAGE: &str = "Values do not match";

/// Read access to the current field values, keyed by field id.
pub trait FieldValues {
    fn value_of(&self, field_id: &str) -> Option<&str>;
}

impl FieldValues for HashMap<String, String> {
    fn value_of(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).map(String::as_str)
    }
}

impl FieldValues for BTreeMap<String, String> {
    fn value_of(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).map(String::as_str)
    }
}

impl FieldValues for HashMap<&str, &str> {
    fn value_of(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).copied()
    }
}

/// The ordered rule set of one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field_id: String,
    pub rules: Vec<Rule>,
}

/// Outcome of validating one field. `message` is empty when `valid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub field_id: String,
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn pass(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            valid: false,
            message: message.into(),
        }
    }
}

/// Per-field results of one full evaluation, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    results: Vec<ValidationResult>,
}

impl FormState {
    /// Aggregate verdict: every field is valid.
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|r| r.valid)
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn result(&self, field_id: &str) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.field_id == field_id)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.valid)
    }
}

impl IntoIterator for FormState {
    type Item = ValidationResult;
    type IntoIter = std::vec::IntoIter<ValidationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[derive(Debug, Clone)]
struct Confirmation {
    confirm_id: String,
    primary_id: String,
    message: String,
}

/// Holds the rule sets of a form and evaluates values against them.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    fields: Vec<FieldRule>,
    confirmations: Vec<Confirmation>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rule set of a new field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateField` if `field_id` already has rules.
    /// Use [`replace_field`](Self::replace_field) to overwrite them.
    pub fn register_field(
        &mut self,
        field_id: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Result<(), ConfigError> {
        let field_id = field_id.into();
        if self.find(&field_id).is_some() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Duplicate registration for field {}", field_id);
            return Err(ConfigError::DuplicateField(field_id));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Registered field {} with {} rules", field_id, rules.len());

        self.fields.push(FieldRule { field_id, rules });
        Ok(())
    }

    /// Replaces the rules of a registered field, keeping its position.
    pub fn replace_field(&mut self, field_id: &str, rules: Vec<Rule>) -> Result<(), ConfigError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.field_id == field_id)
            .ok_or_else(|| ConfigError::UnknownField(field_id.to_string()))?;
        field.rules = rules;
        Ok(())
    }

    /// Links `confirm_id` to `primary_id`: once its own rules pass, the
    /// confirm field is valid only while it equals the primary value.
    pub fn register_confirmation(
        &mut self,
        confirm_id: &str,
        primary_id: &str,
        message: impl Into<String>,
    ) -> Result<(), ConfigError> {
        self.require(primary_id)?;
        self.require(confirm_id)?;
        if confirm_id == primary_id {
            return Err(ConfigError::SelfConfirmation(confirm_id.to_string()));
        }
        if self.confirmation_for(confirm_id).is_some() {
            return Err(ConfigError::DuplicateField(confirm_id.to_string()));
        }
        self.confirmations.push(Confirmation {
            confirm_id: confirm_id.to_string(),
            primary_id: primary_id.to_string(),
            message: message.into(),
        });
        Ok(())
    }

    /// Registered field ids, in registration order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field_id.as_str())
    }

    /// Confirm fields that must be re-evaluated when `field_id` changes.
    pub fn dependents_of(&self, field_id: &str) -> Vec<&str> {
        self.confirmations
            .iter()
            .filter(|c| c.primary_id == field_id)
            .map(|c| c.confirm_id.as_str())
            .collect()
    }

    /// The primary field a confirm field is linked to.
    pub fn primary_of(&self, confirm_id: &str) -> Option<&str> {
        self.confirmation_for(confirm_id).map(|c| c.primary_id.as_str())
    }

    /// Validates a single value against the rules of `field_id`.
    ///
    /// Rules run in registration order and the first failure wins. Cross-field
    /// links are not consulted; see [`validate_all`](Self::validate_all).
    pub fn validate_field(
        &self,
        field_id: &str,
        value: &str,
    ) -> Result<ValidationResult, ConfigError> {
        let field = self.require(field_id)?;
        Ok(Self::evaluate(field, value))
    }

    /// Validates every registered field. Missing values count as `""`.
    pub fn validate_all<V: FieldValues + ?Sized>(&self, values: &V) -> FormState {
        let results = self
            .fields
            .iter()
            .map(|field| {
                let value = values.value_of(&field.field_id).unwrap_or("");
                let result = Self::evaluate(field, value);
                match self.confirmation_for(&field.field_id) {
                    Some(link) if result.valid => Self::confirm(link, &link.message, values),
                    _ => result,
                }
            })
            .collect();

        FormState { results }
    }

    /// Checks that `confirm_id` is non-empty and equal to `primary_id`.
    pub fn matches_confirmation<V: FieldValues + ?Sized>(
        &self,
        primary_id: &str,
        confirm_id: &str,
        values: &V,
    ) -> Result<ValidationResult, ConfigError> {
        self.require(primary_id)?;
        self.require(confirm_id)?;
        let message = self
            .confirmation_for(confirm_id)
            .filter(|c| c.primary_id == primary_id)
            .map_or(DEFAULT_CONFIRMATION_MESSAGE, |c| c.message.as_str());
        let link = Confirmation {
            confirm_id: confirm_id.to_string(),
            primary_id: primary_id.to_string(),
            message: String::new(),
        };
        Ok(Self::confirm(&link, message, values))
    }

    /// Validates `field_id` with its cross-field link, if any.
    pub(crate) fn validate_linked<V: FieldValues + ?Sized>(
        &self,
        field_id: &str,
        values: &V,
    ) -> Result<ValidationResult, ConfigError> {
        let result = self.validate_field(field_id, values.value_of(field_id).unwrap_or(""))?;
        Ok(match self.confirmation_for(field_id) {
            Some(link) if result.valid => Self::confirm(link, &link.message, values),
            _ => result,
        })
    }

    fn evaluate(field: &FieldRule, value: &str) -> ValidationResult {
        match field.rules.iter().find_map(|rule| rule.check(value)) {
            Some(message) => ValidationResult::fail(&field.field_id, message),
            None => ValidationResult::pass(&field.field_id),
        }
    }

    fn confirm<V: FieldValues + ?Sized>(
        link: &Confirmation,
        message: &str,
        values: &V,
    ) -> ValidationResult {
        let primary = values.value_of(&link.primary_id).unwrap_or("");
        let confirm = values.value_of(&link.confirm_id).unwrap_or("");
        if is_present(confirm) && confirm == primary {
            ValidationResult::pass(&link.confirm_id)
        } else {
            ValidationResult::fail(&link.confirm_id, message)
        }
    }

    fn find(&self, field_id: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }

    fn require(&self, field_id: &str) -> Result<&FieldRule, ConfigError> {
        self.find(field_id)
            .ok_or_else(|| ConfigError::UnknownField(field_id.to_string()))
    }

    fn confirmation_for(&self, confirm_id: &str) -> Option<&Confirmation> {
        self.confirmations.iter().find(|c| c.confirm_id == confirm_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{email_format, exact_digits, password_composite, required};

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn password_form() -> FormValidator {
        let mut validator = FormValidator::new();
        let mut password_rules = vec![required("Password is required")];
        password_rules.extend(password_composite());
        validator.register_field("password", password_rules).unwrap();
        validator
            .register_field("confirm", vec![required("Please confirm your password")])
            .unwrap();
        validator
            .register_confirmation("confirm", "password", "Passwords do not match")
            .unwrap();
        validator
    }

    #[test]
    fn test_register_duplicate_field() {
        let mut validator = FormValidator::new();
        validator.register_field("name", vec![required("Name is required")]).unwrap();
        let result = validator.register_field("name", vec![]);
        assert_eq!(result, Err(ConfigError::DuplicateField("name".to_string())));
    }

    #[test]
    fn test_replace_field_keeps_order() {
        let mut validator = FormValidator::new();
        validator.register_field("a", vec![]).unwrap();
        validator.register_field("b", vec![]).unwrap();
        validator.replace_field("a", vec![required("A is required")]).unwrap();

        assert_eq!(validator.field_ids().collect::<Vec<_>>(), vec!["a", "b"]);
        let result = validator.validate_field("a", "").unwrap();
        assert_eq!(result.message, "A is required");
    }

    #[test]
    fn test_replace_unknown_field() {
        let mut validator = FormValidator::new();
        assert!(matches!(
            validator.replace_field("ghost", vec![]),
            Err(ConfigError::UnknownField(_))
        ));
    }

    #[test]
    fn test_validate_unknown_field() {
        let validator = FormValidator::new();
        assert_eq!(
            validator.validate_field("email", "user@example.com"),
            Err(ConfigError::UnknownField("email".to_string()))
        );
    }

    #[test]
    fn test_validate_field_first_failure_wins() {
        let mut validator = FormValidator::new();
        validator
            .register_field(
                "email",
                vec![
                    required("Email is required"),
                    email_format("Please enter valid email format"),
                ],
            )
            .unwrap();

        let empty = validator.validate_field("email", "   ").unwrap();
        assert_eq!(empty, ValidationResult::fail("email", "Email is required"));

        let malformed = validator.validate_field("email", "user@@example.com").unwrap();
        assert_eq!(malformed.message, "Please enter valid email format");

        let ok = validator.validate_field("email", "user@example.com").unwrap();
        assert_eq!(ok, ValidationResult::pass("email"));
        assert!(ok.message.is_empty());
    }

    #[test]
    fn test_validate_field_is_pure() {
        let mut validator = FormValidator::new();
        validator
            .register_field("phone", vec![exact_digits(10, "Phone number must be 10 digits")])
            .unwrap();
        let first = validator.validate_field("phone", "123456789").unwrap();
        let second = validator.validate_field("phone", "123456789").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_all_missing_values_are_empty() {
        let mut validator = FormValidator::new();
        validator.register_field("name", vec![required("Name is required")]).unwrap();
        validator.register_field("nickname", vec![]).unwrap();

        let state = validator.validate_all(&HashMap::<String, String>::new());
        assert!(!state.is_valid());
        assert_eq!(state.result("name").unwrap().message, "Name is required");
        assert!(state.result("nickname").unwrap().valid);
    }

    #[test]
    fn test_validate_all_registration_order() {
        let mut validator = FormValidator::new();
        for id in ["z", "a", "m"] {
            validator.register_field(id, vec![]).unwrap();
        }
        let state = validator.validate_all(&HashMap::<&str, &str>::new());
        let ids: Vec<_> = state.results().iter().map(|r| r.field_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_aggregate_is_and_of_results() {
        let validator = password_form();
        let cases = [
            (values(&[("password", "GoodPass1"), ("confirm", "GoodPass1")]), true),
            (values(&[("password", "GoodPass1"), ("confirm", "")]), false),
            (values(&[("password", "bad"), ("confirm", "bad")]), false),
        ];
        for (input, expected) in cases {
            let state = validator.validate_all(&input);
            assert_eq!(state.is_valid(), expected);
            assert_eq!(state.is_valid(), state.results().iter().all(|r| r.valid));
            assert_eq!(state.failures().count() == 0, expected);
        }
    }

    #[test]
    fn test_confirmation_follows_primary() {
        let validator = password_form();
        let mut input = values(&[("password", "Secret1A"), ("confirm", "Secret1A")]);
        let result = validator.matches_confirmation("password", "confirm", &input).unwrap();
        assert!(result.valid);

        input.insert("password".to_string(), "Secret1B".to_string());
        let result = validator.matches_confirmation("password", "confirm", &input).unwrap();
        assert_eq!(result, ValidationResult::fail("confirm", "Passwords do not match"));
    }

    #[test]
    fn test_confirmation_empty_never_matches() {
        let validator = password_form();
        let input = values(&[("password", ""), ("confirm", "")]);
        let result = validator.matches_confirmation("password", "confirm", &input).unwrap();
        assert!(!result.valid);
    }

    #[test]
    fn test_confirmation_own_rules_run_first() {
        let validator = password_form();
        let state = validator.validate_all(&values(&[("password", "Secret1A")]));
        assert_eq!(state.result("confirm").unwrap().message, "Please confirm your password");

        let input = values(&[("password", "Secret1A"), ("confirm", "Secret1")]);
        let state = validator.validate_all(&input);
        assert_eq!(state.result("confirm").unwrap().message, "Passwords do not match");
    }

    #[test]
    fn test_confirmation_default_message() {
        let mut validator = FormValidator::new();
        validator.register_field("email", vec![]).unwrap();
        validator.register_field("email2", vec![]).unwrap();
        let input = values(&[("email", "a@b.cd"), ("email2", "x@b.cd")]);
        let result = validator.matches_confirmation("email", "email2", &input).unwrap();
        assert_eq!(result.message, DEFAULT_CONFIRMATION_MESSAGE);
    }

    #[test]
    fn test_confirmation_unknown_fields() {
        let validator = password_form();
        let input = values(&[]);
        assert!(matches!(
            validator.matches_confirmation("password", "ghost", &input),
            Err(ConfigError::UnknownField(_))
        ));

        let mut validator = password_form();
        assert!(matches!(
            validator.register_confirmation("confirm", "ghost", "x"),
            Err(ConfigError::UnknownField(_))
        ));
        assert!(matches!(
            validator.register_confirmation("confirm", "password", "x"),
            Err(ConfigError::DuplicateField(_))
        ));
    }

    #[test]
    fn test_confirmation_cannot_link_field_to_itself() {
        let mut validator = FormValidator::new();
        validator.register_field("password", vec![]).unwrap();
        assert_eq!(
            validator.register_confirmation("password", "password", "x"),
            Err(ConfigError::SelfConfirmation("password".to_string()))
        );
        assert!(validator.dependents_of("password").is_empty());
    }

    #[test]
    fn test_dependents_of_primary() {
        let validator = password_form();
        assert_eq!(validator.dependents_of("password"), vec!["confirm"]);
        assert!(validator.dependents_of("confirm").is_empty());
    }
}
