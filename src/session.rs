//! Headless form session - turns UI events into validation data.
//!
//! The presentation layer forwards input, blur, submit and toggle events and
//! renders whatever comes back. Nothing here touches a DOM.

use std::collections::HashMap;

use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::FormConfig;
#[cfg(feature = "async")]
use crate::config::ResetPolicy;
use crate::error::ConfigError;
use crate::sanitize::Sanitizer;
use crate::strength::{self, RequirementChecklist};
use crate::validator::{FormState, FormValidator, ValidationResult};

pub const MSG_SUBMIT_SUCCESS: &str = "Form submitted successfully!";
pub const MSG_SUBMIT_ERROR: &str = "Please fix the errors above";

/// Whether a password field shows its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Masked,
    Plain,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Masked => Visibility::Plain,
            Visibility::Plain => Visibility::Masked,
        }
    }

    /// Input type the field should render with.
    pub fn input_type(self) -> &'static str {
        match self {
            Visibility::Masked => "password",
            Visibility::Plain => "text",
        }
    }

    /// Glyph shown on the toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            Visibility::Masked => "👁️",
            Visibility::Plain => "🙈",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Content of the aggregate message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// What the UI must update after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputUpdate {
    /// The value after sanitizing; the UI writes it back into the field.
    pub value: String,
    /// Fresh checklist when the event hit the tracked password field.
    pub checklist: Option<RequirementChecklist>,
    /// Inline results that changed because a linked field was edited.
    pub revalidated: Vec<ValidationResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub state: FormState,
    pub message: FormMessage,
}

impl SubmitOutcome {
    pub fn accepted(&self) -> bool {
        self.state.is_valid()
    }
}

#[derive(Debug, Clone)]
struct Toggle {
    toggle_id: String,
    field_id: String,
    visibility: Visibility,
}

/// Current values and visible feedback of one form.
#[derive(Debug)]
pub struct FormSession {
    validator: FormValidator,
    config: FormConfig,
    values: HashMap<String, String>,
    sanitizers: HashMap<String, Sanitizer>,
    strength_field: Option<String>,
    checklist: RequirementChecklist,
    toggles: Vec<Toggle>,
    shown: HashMap<String, ValidationResult>,
    message: Option<FormMessage>,
    #[cfg(feature = "async")]
    pending_resets: Vec<(u64, CancellationToken)>,
    #[cfg(feature = "async")]
    next_reset_id: u64,
}

impl FormSession {
    pub fn new(validator: FormValidator, config: FormConfig) -> Self {
        Self {
            validator,
            config,
            values: HashMap::new(),
            sanitizers: HashMap::new(),
            strength_field: None,
            checklist: RequirementChecklist::default(),
            toggles: Vec::new(),
            shown: HashMap::new(),
            message: None,
            #[cfg(feature = "async")]
            pending_resets: Vec::new(),
            #[cfg(feature = "async")]
            next_reset_id: 0,
        }
    }

    /// Applies `sanitizer` to every input event of `field_id`.
    pub fn with_sanitizer(mut self, field_id: impl Into<String>, sanitizer: Sanitizer) -> Self {
        self.sanitizers.insert(field_id.into(), sanitizer);
        self
    }

    /// Recomputes the requirement checklist on every input of `field_id`.
    pub fn with_strength_field(mut self, field_id: impl Into<String>) -> Self {
        self.strength_field = Some(field_id.into());
        self
    }

    /// Binds a visibility toggle button to a password field.
    pub fn with_toggle(
        mut self,
        toggle_id: impl Into<String>,
        field_id: impl Into<String>,
    ) -> Self {
        self.toggles.push(Toggle {
            toggle_id: toggle_id.into(),
            field_id: field_id.into(),
            visibility: Visibility::Masked,
        });
        self
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn value(&self, field_id: &str) -> &str {
        self.values.get(field_id).map_or("", String::as_str)
    }

    /// Inline result currently displayed for `field_id`, if any.
    pub fn shown(&self, field_id: &str) -> Option<&ValidationResult> {
        self.shown.get(field_id)
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn checklist(&self) -> RequirementChecklist {
        self.checklist
    }

    pub fn visibility(&self, toggle_id: &str) -> Option<Visibility> {
        self.toggles
            .iter()
            .find(|t| t.toggle_id == toggle_id)
            .map(|t| t.visibility)
    }

    /// Password field controlled by `toggle_id`.
    pub fn toggle_field(&self, toggle_id: &str) -> Option<&str> {
        self.toggles
            .iter()
            .find(|t| t.toggle_id == toggle_id)
            .map(|t| t.field_id.as_str())
    }

    /// Handles an input-changed event.
    ///
    /// The sanitizer runs first, so rules only ever see the rewritten value.
    pub fn input_changed(
        &mut self,
        field_id: &str,
        raw: &str,
    ) -> Result<InputUpdate, ConfigError> {
        if !self.validator.field_ids().any(|id| id == field_id) {
            return Err(ConfigError::UnknownField(field_id.to_string()));
        }

        #[cfg(feature = "async")]
        if self.config.reset_policy == ResetPolicy::CancelOnInput {
            for (_, token) in self.pending_resets.drain(..) {
                #[cfg(feature = "tracing")]
                tracing::debug!("Pending form reset cancelled by input on {}", field_id);
                token.cancel();
            }
        }

        let value = match self.sanitizers.get(field_id) {
            Some(sanitize) => sanitize(raw),
            None => raw.to_string(),
        };
        self.values.insert(field_id.to_string(), value.clone());

        let checklist = if self.strength_field.as_deref() == Some(field_id) {
            let password = SecretString::new(value.clone().into());
            self.checklist = strength::evaluate_password_requirements(&password);
            Some(self.checklist)
        } else {
            None
        };

        // Editing either side of a confirmation link changes the confirm
        // field's verdict; only refresh results the user can already see.
        let mut targets: Vec<&str> = self.validator.dependents_of(field_id);
        if self.validator.primary_of(field_id).is_some() {
            targets.push(field_id);
        }
        let targets: Vec<String> = targets
            .into_iter()
            .filter(|id| self.shown.contains_key(*id))
            .map(str::to_string)
            .collect();
        let revalidated = self.refresh(targets)?;

        Ok(InputUpdate {
            value,
            checklist,
            revalidated,
        })
    }

    /// Handles a blur event: validates the field and any confirm fields
    /// already on display that depend on it.
    pub fn blur(&mut self, field_id: &str) -> Result<Vec<ValidationResult>, ConfigError> {
        let mut targets = vec![field_id.to_string()];
        targets.extend(
            self.validator
                .dependents_of(field_id)
                .into_iter()
                .filter(|id| self.shown.contains_key(*id))
                .map(str::to_string),
        );
        self.refresh(targets)
    }

    /// Handles a submit event. Submission proceeds only if every field is
    /// valid; the caller schedules the reset on acceptance.
    pub fn submit(&mut self) -> SubmitOutcome {
        let state = self.validator.validate_all(&self.values);

        self.shown = state
            .results()
            .iter()
            .map(|r| (r.field_id.clone(), r.clone()))
            .collect();

        let message = if state.is_valid() {
            FormMessage {
                kind: MessageKind::Success,
                text: MSG_SUBMIT_SUCCESS.to_string(),
            }
        } else {
            FormMessage {
                kind: MessageKind::Error,
                text: MSG_SUBMIT_ERROR.to_string(),
            }
        };
        self.message = Some(message.clone());

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Form submitted: valid={}, failures={}",
            state.is_valid(),
            state.failures().count()
        );

        SubmitOutcome { state, message }
    }

    /// Flips the visibility of the field bound to `toggle_id`.
    pub fn toggle_visibility(&mut self, toggle_id: &str) -> Result<Visibility, ConfigError> {
        let toggle = self
            .toggles
            .iter_mut()
            .find(|t| t.toggle_id == toggle_id)
            .ok_or_else(|| ConfigError::UnknownField(toggle_id.to_string()))?;
        toggle.visibility = toggle.visibility.toggled();

        #[cfg(feature = "tracing")]
        tracing::debug!("Field {} is now {:?}", toggle.field_id, toggle.visibility);

        Ok(toggle.visibility)
    }

    /// Clears values, inline results, checklist and message. Toggles keep
    /// their current visibility.
    pub fn reset(&mut self) {
        self.values.clear();
        self.shown.clear();
        self.checklist = RequirementChecklist::default();
        self.message = None;

        #[cfg(feature = "tracing")]
        tracing::info!("Form reset");
    }

    #[cfg(feature = "async")]
    pub(crate) fn arm_reset(&mut self) -> (u64, CancellationToken) {
        let id = self.next_reset_id;
        self.next_reset_id += 1;
        let token = CancellationToken::new();
        self.pending_resets.push((id, token.clone()));
        (id, token)
    }

    /// Runs the scheduled reset `id` unless input cancelled it in the
    /// meantime. Other pending resets stay armed.
    #[cfg(feature = "async")]
    pub(crate) fn fire_reset(&mut self, id: u64) -> bool {
        let Some(pos) = self.pending_resets.iter().position(|(i, _)| *i == id) else {
            return false;
        };
        let (_, token) = self.pending_resets.remove(pos);
        if token.is_cancelled() {
            return false;
        }
        self.reset();
        true
    }

    #[cfg(all(test, feature = "async"))]
    pub(crate) fn pending_reset_count(&self) -> usize {
        self.pending_resets.len()
    }

    fn refresh(&mut self, targets: Vec<String>) -> Result<Vec<ValidationResult>, ConfigError> {
        let mut results = Vec::with_capacity(targets.len());
        for id in targets {
            let result = self.validator.validate_linked(&id, &self.values)?;
            self.shown.insert(id, result.clone());
            results.push(result);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{contact_session, signup_session};
    use crate::rules::MSG_PASSWORD_UPPERCASE;
    use crate::strength::Requirement;

    fn fill_valid(session: &mut FormSession) {
        session.input_changed("name", "Ada Lovelace").unwrap();
        session.input_changed("email", "ada@example.com").unwrap();
        session.input_changed("phone", "5551234567").unwrap();
        session.input_changed("password", "GoodPass1").unwrap();
    }

    #[test]
    fn test_phone_input_is_sanitized_before_validation() {
        let mut session = contact_session(FormConfig::default()).unwrap();
        let update = session.input_changed("phone", "12a3-4").unwrap();
        assert_eq!(update.value, "1234");
        assert_eq!(session.value("phone"), "1234");

        let results = session.blur("phone").unwrap();
        assert_eq!(results[0].message, "Phone number must be 10 digits");
    }

    #[test]
    fn test_unknown_field_input() {
        let mut session = contact_session(FormConfig::default()).unwrap();
        assert!(matches!(
            session.input_changed("age", "42"),
            Err(ConfigError::UnknownField(_))
        ));
    }

    #[test]
    fn test_checklist_updates_on_every_keystroke() {
        let mut session = contact_session(FormConfig::default()).unwrap();

        let update = session.input_changed("password", "g").unwrap();
        let checklist = update.checklist.unwrap();
        assert!(checklist.is_met(Requirement::HasLowercase));
        assert!(!checklist.is_met(Requirement::HasUppercase));

        let update = session.input_changed("password", "gG").unwrap();
        assert!(update.checklist.unwrap().is_met(Requirement::HasUppercase));

        let update = session.input_changed("name", "Ada").unwrap();
        assert!(update.checklist.is_none());
        assert!(session.checklist().is_met(Requirement::HasUppercase));
    }

    #[test]
    fn test_blur_reports_inline_result() {
        let mut session = contact_session(FormConfig::default()).unwrap();
        session.input_changed("password", "alllowercase1").unwrap();
        let results = session.blur("password").unwrap();
        assert_eq!(results, vec![ValidationResult::fail("password", MSG_PASSWORD_UPPERCASE)]);
        assert_eq!(session.shown("password"), Some(&results[0]));
    }

    #[test]
    fn test_submit_with_errors() {
        let mut session = contact_session(FormConfig::default()).unwrap();
        session.input_changed("name", "Ada").unwrap();

        let outcome = session.submit();
        assert!(!outcome.accepted());
        assert_eq!(outcome.message.kind, MessageKind::Error);
        assert_eq!(outcome.message.text, MSG_SUBMIT_ERROR);
        assert_eq!(session.shown("email").unwrap().message, "Email is required");
        assert_eq!(session.shown("phone").unwrap().message, "Phone number is required");
        assert!(session.shown("name").unwrap().valid);
    }

    #[test]
    fn test_submit_success() {
        let mut session = contact_session(FormConfig::default()).unwrap();
        fill_valid(&mut session);

        let outcome = session.submit();
        assert!(outcome.accepted());
        assert_eq!(session.message().unwrap().text, MSG_SUBMIT_SUCCESS);
    }

    #[test]
    fn test_editing_primary_invalidates_shown_confirmation() {
        let mut session = signup_session(FormConfig::default()).unwrap();
        session.input_changed("password", "Secret1A").unwrap();
        session.input_changed("confirmPassword", "Secret1A").unwrap();
        assert!(session.blur("confirmPassword").unwrap()[0].valid);

        let update = session.input_changed("password", "Secret1B").unwrap();
        assert_eq!(update.revalidated.len(), 1);
        assert_eq!(update.revalidated[0].field_id, "confirmPassword");
        assert!(!update.revalidated[0].valid);
        assert!(!session.shown("confirmPassword").unwrap().valid);

        let update = session.input_changed("confirmPassword", "Secret1B").unwrap();
        assert!(update.revalidated[0].valid);
    }

    #[test]
    fn test_unshown_confirmation_is_not_revalidated() {
        let mut session = signup_session(FormConfig::default()).unwrap();
        let update = session.input_changed("password", "Secret1A").unwrap();
        assert!(update.revalidated.is_empty());
        assert!(session.shown("confirmPassword").is_none());
    }

    #[test]
    fn test_toggle_visibility() {
        let mut session = contact_session(FormConfig::default()).unwrap();
        assert_eq!(session.visibility("toggleBtn"), Some(Visibility::Masked));

        let visibility = session.toggle_visibility("toggleBtn").unwrap();
        assert_eq!(visibility, Visibility::Plain);
        assert_eq!(visibility.input_type(), "text");
        assert_eq!(visibility.icon(), "🙈");

        assert_eq!(session.toggle_visibility("toggleBtn").unwrap(), Visibility::Masked);
        assert!(session.toggle_visibility("nope").is_err());
    }

    #[test]
    fn test_reset_clears_feedback_but_keeps_toggle() {
        let mut session = contact_session(FormConfig::default()).unwrap();
        fill_valid(&mut session);
        session.toggle_visibility("toggleBtn").unwrap();
        session.submit();

        session.reset();
        assert_eq!(session.value("name"), "");
        assert!(session.shown("name").is_none());
        assert!(session.message().is_none());
        assert_eq!(session.checklist(), RequirementChecklist::default());
        assert_eq!(session.visibility("toggleBtn"), Some(Visibility::Plain));
    }
}
