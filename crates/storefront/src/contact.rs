//! Contact form validation and submission.
//!
//! Nothing leaves the page: a valid submission shows a thank-you message and
//! resets the form. Validation is split from the page update so the rules
//! can be checked on plain strings.

use corner_shop_core::{Email, EmailError};

use crate::config::{Messages, Selectors};
use crate::document::Document;

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
}

/// A failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    NameRequired,
    InvalidEmail(EmailError),
}

impl FieldError {
    #[must_use]
    pub const fn field(&self) -> ContactField {
        match self {
            Self::NameRequired => ContactField::Name,
            Self::InvalidEmail(_) => ContactField::Email,
        }
    }

    /// Message shown next to the field.
    #[must_use]
    pub fn message<'a>(&self, messages: &'a Messages) -> &'a str {
        match self {
            Self::NameRequired => &messages.name_required,
            Self::InvalidEmail(_) => &messages.email_invalid,
        }
    }
}

/// A validated contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
}

/// Validate raw form values.
///
/// The name must contain something other than whitespace. Every failing
/// field is reported, in form order.
///
/// # Errors
///
/// Returns the list of field errors when any check fails.
pub fn validate_contact(name: &str, email: &str) -> Result<ContactSubmission, Vec<FieldError>> {
    let name = name.trim();
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(FieldError::NameRequired);
    }
    let email = match Email::parse(email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push(FieldError::InvalidEmail(e));
            None
        }
    };

    match email {
        Some(email) if errors.is_empty() => Ok(ContactSubmission {
            name: name.to_string(),
            email,
        }),
        _ => Err(errors),
    }
}

/// Result of a contact form submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// There is no contact form on the page.
    Ignored,
    Invalid(Vec<FieldError>),
    Submitted(ContactSubmission),
}

/// Validate the form currently on the page and update it.
///
/// Error and status texts from an earlier attempt are cleared first. On success the
/// status line shows the thank-you message and the fields are reset.
pub fn submit_contact_form(
    doc: &mut impl Document,
    selectors: &Selectors,
    messages: &Messages,
) -> ContactOutcome {
    if !doc.contains(&selectors.contact_form) {
        return ContactOutcome::Ignored;
    }

    doc.set_text(&selectors.contact_name_error, "");
    doc.set_text(&selectors.contact_email_error, "");
    doc.set_text(&selectors.contact_status, "");

    let name = doc.value(&selectors.contact_name).unwrap_or_default();
    let email = doc.value(&selectors.contact_email).unwrap_or_default();

    match validate_contact(&name, &email) {
        Ok(submission) => {
            doc.set_text(&selectors.contact_status, &messages.contact_thanks);
            doc.reset_form(&selectors.contact_form);
            ContactOutcome::Submitted(submission)
        }
        Err(errors) => {
            for error in &errors {
                let slot = match error.field() {
                    ContactField::Name => &selectors.contact_name_error,
                    ContactField::Email => &selectors.contact_email_error,
                };
                doc.set_text(slot, error.message(messages));
            }
            ContactOutcome::Invalid(errors)
        }
    }
}
