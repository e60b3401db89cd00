//! Form validation for the compose dialog.
//!
//! Every rule runs on every pass, and each field keeps the first message
//! reported for it. A missing recipient is reported on the `email` field,
//! next to the recipient input.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::directory::User;

use super::recipients::RecipientSet;

// ============================================================================
// Constants
// ============================================================================

/// Minimum description length (in characters).
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Maximum description length (in characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 3000;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email";
pub const SUBJECT_REQUIRED_MESSAGE: &str = "Subject is required.";
pub const DESCRIPTION_REQUIRED_MESSAGE: &str = "Description is required.";
pub const DESCRIPTION_TOO_SHORT_MESSAGE: &str = "Must be at least 10 characters";
pub const DESCRIPTION_TOO_LONG_MESSAGE: &str = "You have reached max length";
pub const NO_RECIPIENTS_MESSAGE: &str = "Please add at least one recipient";

// The leading-dot and double-dot rules are checked separately since the
// regex crate has no lookahead.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9_'+\-.]*[a-zA-Z0-9_+\-]@([a-zA-Z0-9][a-zA-Z0-9\-]*\.)+[a-zA-Z]{2,}$",
    )
    .expect("email regex should be valid")
});

/// Whether `email` is a syntactically valid address
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

// ============================================================================
// Form types
// ============================================================================

/// Editable fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Subject,
    Description,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Email, Field::Subject, Field::Description];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Email => write!(f, "email"),
            Field::Subject => write!(f, "subject"),
            Field::Description => write!(f, "description"),
        }
    }
}

/// Raw field contents as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Recipient search buffer; not itself a recipient
    pub email: String,
    pub subject: String,
    pub description: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Description => self.description = value,
        }
    }
}

/// At most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormErrors {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Description => &mut self.description,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => self.email.as_deref(),
            Field::Subject => self.subject.as_deref(),
            Field::Description => self.description.as_deref(),
        }
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn report(&mut self, field: Field, message: &str) {
        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(message.to_string());
        }
    }

    pub fn clear(&mut self, field: Field) {
        *self.slot(field) = None;
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.subject.is_none() && self.description.is_none()
    }

    /// Field errors in form order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|msg| (field, msg)))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("  {field}: {msg}"))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// The committed payload of a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedForm {
    pub subject: String,
    pub description: String,
    pub recipients: Vec<User>,
}

// ============================================================================
// Validation
// ============================================================================

/// Validate the form against the current recipients.
///
/// Values are trimmed before checking, so whitespace-only input counts as
/// empty. On success the trimmed values are returned with the recipients in
/// selection order.
pub fn validate(
    values: &FormValues,
    recipients: &RecipientSet,
) -> std::result::Result<ValidatedForm, FormErrors> {
    let mut errors = FormErrors::default();

    let email = values.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.report(Field::Email, INVALID_EMAIL_MESSAGE);
    }

    let subject = values.subject.trim();
    if subject.is_empty() {
        errors.report(Field::Subject, SUBJECT_REQUIRED_MESSAGE);
    }

    let description = values.description.trim();
    let description_len = description.chars().count();
    if description.is_empty() {
        errors.report(Field::Description, DESCRIPTION_REQUIRED_MESSAGE);
    } else if description_len < MIN_DESCRIPTION_LENGTH {
        errors.report(Field::Description, DESCRIPTION_TOO_SHORT_MESSAGE);
    } else if description_len > MAX_DESCRIPTION_LENGTH {
        errors.report(Field::Description, DESCRIPTION_TOO_LONG_MESSAGE);
    }

    if recipients.is_empty() {
        errors.report(Field::Email, NO_RECIPIENTS_MESSAGE);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedForm {
        subject: subject.to_string(),
        description: description.to_string(),
        recipients: recipients.to_vec(),
    })
}
