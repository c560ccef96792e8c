use std::fmt::Display;

use super::{ContactError, ContactForm, mailto_link};
use crate::config::ContactConfig;

pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_NOTICE: &str = "Message sent successfully! Thank you for contacting me.";
pub const MISSING_FIELDS_NOTICE: &str = "Please fill in all fields";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

/// What the host page should POST, and where to go if that fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub endpoint: String,
    /// `Accept` and `Content-Type` are both `application/json`
    pub body: String,
    pub fallback_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Form was accepted; show the notice and clear the fields
    Delivered { notice: &'static str },
    /// Endpoint failed; send the visitor to their mail client
    MailFallback { url: String },
}

/// A contact form plus its submit button across one send attempt
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub form: ContactForm,
    pub button: SubmitButton,
    idle_label: String,
    pending: Option<SubmissionRequest>,
}

impl ContactSubmission {
    pub fn new(form: ContactForm, button_label: impl Into<String>) -> Self {
        let idle_label = button_label.into();
        Self {
            form,
            button: SubmitButton {
                label: idle_label.clone(),
                disabled: false,
            },
            idle_label,
            pending: None,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate and lock the button. The returned request is what the page sends.
    pub fn begin(&mut self, config: &ContactConfig) -> Result<SubmissionRequest, ContactError> {
        if self.pending.is_some() {
            return Err(ContactError::AlreadySending);
        }
        self.form.validate()?;

        let request = SubmissionRequest {
            endpoint: config.endpoint.clone(),
            body: self.form.payload()?,
            fallback_url: mailto_link(&config.recipient, &self.form),
        };

        self.button.label = SENDING_LABEL.to_string();
        self.button.disabled = true;
        self.pending = Some(request.clone());
        Ok(request)
    }

    /// Settle the attempt with the endpoint's HTTP status or a transport error.
    /// The button is restored either way.
    pub fn finish<E: Display>(
        &mut self,
        response: Result<u16, E>,
    ) -> Result<SubmitOutcome, ContactError> {
        let request = self.pending.take().ok_or(ContactError::NotSending)?;

        self.button.label = self.idle_label.clone();
        self.button.disabled = false;

        let outcome = match response {
            Ok(status) if (200..300).contains(&status) => {
                log::info!("Contact form delivered to {}", request.endpoint);
                self.form.clear();
                SubmitOutcome::Delivered {
                    notice: SUCCESS_NOTICE,
                }
            }
            Ok(status) => {
                log::warn!("Form endpoint answered {status}, opening mail client instead");
                SubmitOutcome::MailFallback {
                    url: request.fallback_url,
                }
            }
            Err(err) => {
                log::warn!("Form endpoint unreachable ({err}), opening mail client instead");
                SubmitOutcome::MailFallback {
                    url: request.fallback_url,
                }
            }
        };
        Ok(outcome)
    }
}
