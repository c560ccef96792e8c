//! Page-facing contact form driver. The wasm build exports it to the host
//! page (see `contact::wasm`); native builds use it directly.

use super::{ContactError, ContactForm, ContactSubmission, SubmissionRequest, SubmitOutcome};
use crate::config::{ContactConfig, EffectsConfig};

/// What the page shows once a send attempt settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactResult {
    pub delivered: bool,
    /// Success message, present when delivered
    pub notice: Option<String>,
    /// `mailto:` link to open, present when delivery failed
    pub fallback_url: Option<String>,
}

impl From<SubmitOutcome> for ContactResult {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Delivered { notice } => Self {
                delivered: true,
                notice: Some(notice.to_string()),
                fallback_url: None,
            },
            SubmitOutcome::MailFallback { url } => Self {
                delivered: false,
                notice: None,
                fallback_url: Some(url),
            },
        }
    }
}

/// Text shown to the visitor for a rejected submit
pub fn visitor_message(err: &ContactError) -> String {
    err.notice()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}

/// One contact form on the page, with the endpoint settings it posts to
#[derive(Debug, Clone)]
pub struct ContactHandler {
    submission: ContactSubmission,
    config: ContactConfig,
}

impl ContactHandler {
    /// Handler using the embedded site config
    pub fn new(button_label: &str) -> Self {
        let config = match EffectsConfig::load() {
            Ok(config) => config.contact,
            Err(err) => {
                log::warn!("Contact settings unavailable ({err}), using defaults");
                ContactConfig::default()
            }
        };
        Self::with_config(button_label, config)
    }

    pub fn with_config(button_label: &str, config: ContactConfig) -> Self {
        Self {
            submission: ContactSubmission::new(ContactForm::default(), button_label),
            config,
        }
    }

    /// Copy the current field values from the page
    pub fn set_fields(&mut self, name: &str, email: &str, subject: &str, message: &str) {
        self.submission.form = ContactForm::new(name, email, subject, message);
    }

    pub fn form(&self) -> &ContactForm {
        &self.submission.form
    }

    pub fn button_label(&self) -> &str {
        &self.submission.button.label
    }

    pub fn button_disabled(&self) -> bool {
        self.submission.button.disabled
    }

    /// Start a send attempt; the page POSTs the returned request
    pub fn submit(&mut self) -> Result<SubmissionRequest, ContactError> {
        self.submission.begin(&self.config)
    }

    /// Settle the attempt with the HTTP status, or the transport error when
    /// there was no response
    pub fn settle(
        &mut self,
        status: Option<u16>,
        error: Option<String>,
    ) -> Result<ContactResult, ContactError> {
        let response = match status {
            Some(status) => Ok(status),
            None => Err(error.unwrap_or_else(|| "no response".to_string())),
        };
        Ok(self.submission.finish(response)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{MISSING_FIELDS_NOTICE, SENDING_LABEL, SUCCESS_NOTICE};

    fn handler() -> ContactHandler {
        let mut handler = ContactHandler::with_config(
            "Send Message",
            ContactConfig {
                endpoint: "https://forms.example.com/f/abc".into(),
                recipient: "me@example.com".into(),
            },
        );
        handler.set_fields("Ada", "ada@example.com", "Hello", "Nice site");
        handler
    }

    #[test]
    fn test_embedded_settings_are_used() {
        let handler = ContactHandler::new("Send");
        assert_eq!(handler.config.recipient, ContactConfig::default().recipient);
        assert_eq!(handler.button_label(), "Send");
    }

    #[test]
    fn test_delivered_attempt() {
        let mut handler = handler();

        let request = handler.submit().unwrap();
        assert_eq!(request.endpoint, "https://forms.example.com/f/abc");
        assert_eq!(handler.button_label(), SENDING_LABEL);
        assert!(handler.button_disabled());

        let result = handler.settle(Some(204), None).unwrap();
        assert_eq!(
            result,
            ContactResult {
                delivered: true,
                notice: Some(SUCCESS_NOTICE.to_string()),
                fallback_url: None,
            }
        );
        assert_eq!(handler.button_label(), "Send Message");
        assert_eq!(handler.form(), &ContactForm::default());
    }

    #[test]
    fn test_unreachable_endpoint_opens_mail() {
        let mut handler = handler();
        let request = handler.submit().unwrap();

        let result = handler
            .settle(None, Some("TypeError: Failed to fetch".into()))
            .unwrap();

        assert!(!result.delivered);
        assert_eq!(result.fallback_url, Some(request.fallback_url));
        assert!(!handler.button_disabled());
        assert_eq!(handler.form().name, "Ada");
    }

    #[test]
    fn test_missing_field_message() {
        let mut handler = handler();
        handler.set_fields("Ada", "", "Hello", "Nice site");

        let err = handler.submit().unwrap_err();
        assert_eq!(visitor_message(&err), MISSING_FIELDS_NOTICE);
        assert!(!handler.button_disabled());
    }

    #[test]
    fn test_settle_without_submit() {
        let mut handler = handler();
        let err = handler.settle(Some(200), None).unwrap_err();
        assert_eq!(visitor_message(&err), "no submission is in flight");
    }
}
