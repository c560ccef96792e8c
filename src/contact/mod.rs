//! Contact form handling: validation, the JSON body sent to the form
//! endpoint, and the `mailto:` link opened when delivery fails.
//!
//! The HTTP request itself is issued by the host page; this module only
//! decides what to send and what to do with the answer. On wasm32 the
//! handler is exported to the page through `wasm_bindgen`.

pub mod handler;
pub mod mailto;
pub mod submission;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub use handler::{ContactHandler, ContactResult, visitor_message};
pub use mailto::{encode_component, mailto_link};
pub use submission::{
    ContactSubmission, MISSING_FIELDS_NOTICE, SENDING_LABEL, SUCCESS_NOTICE, SubmissionRequest,
    SubmitButton, SubmitOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("a submission is already in flight")]
    AlreadySending,
    #[error("no submission is in flight")]
    NotSending,
    #[error("failed to encode form payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ContactError {
    /// Message shown to the visitor, if this error is theirs to fix
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ContactError::MissingField(_) => Some(MISSING_FIELDS_NOTICE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Every field must hold something other than whitespace
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Subject, &self.subject),
            (Field::Message, &self.message),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ContactError::MissingField(*field)),
            None => Ok(()),
        }
    }

    /// JSON body for the form endpoint
    pub fn payload(&self) -> Result<String, ContactError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Plain-text body used by the mail fallback
    pub fn mail_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
