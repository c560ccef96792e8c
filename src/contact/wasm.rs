//! JavaScript bindings for the contact form

use wasm_bindgen::prelude::*;

use super::{
    ContactForm, ContactHandler, ContactResult, SubmissionRequest, mailto_link, visitor_message,
};

/// Request the page should POST as JSON
#[wasm_bindgen]
pub struct ContactRequest {
    inner: SubmissionRequest,
}

#[wasm_bindgen]
impl ContactRequest {
    #[wasm_bindgen(getter)]
    pub fn endpoint(&self) -> String {
        self.inner.endpoint.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn body(&self) -> String {
        self.inner.body.clone()
    }

    #[wasm_bindgen(getter, js_name = "fallbackUrl")]
    pub fn fallback_url(&self) -> String {
        self.inner.fallback_url.clone()
    }
}

#[wasm_bindgen]
pub struct ContactOutcome {
    inner: ContactResult,
}

#[wasm_bindgen]
impl ContactOutcome {
    #[wasm_bindgen(getter)]
    pub fn delivered(&self) -> bool {
        self.inner.delivered
    }

    #[wasm_bindgen(getter)]
    pub fn notice(&self) -> Option<String> {
        self.inner.notice.clone()
    }

    #[wasm_bindgen(getter, js_name = "fallbackUrl")]
    pub fn fallback_url(&self) -> Option<String> {
        self.inner.fallback_url.clone()
    }
}

#[wasm_bindgen]
pub struct ContactFormHandle {
    inner: ContactHandler,
}

#[wasm_bindgen]
impl ContactFormHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(button_label: &str) -> ContactFormHandle {
        ContactFormHandle {
            inner: ContactHandler::new(button_label),
        }
    }

    #[wasm_bindgen(js_name = "setFields")]
    pub fn set_fields(&mut self, name: &str, email: &str, subject: &str, message: &str) {
        self.inner.set_fields(name, email, subject, message);
    }

    /// Rejects with the text to show the visitor
    pub fn submit(&mut self) -> Result<ContactRequest, String> {
        self.inner
            .submit()
            .map(|inner| ContactRequest { inner })
            .map_err(|err| visitor_message(&err))
    }

    pub fn settle(
        &mut self,
        status: Option<u16>,
        error: Option<String>,
    ) -> Result<ContactOutcome, String> {
        self.inner
            .settle(status, error)
            .map(|inner| ContactOutcome { inner })
            .map_err(|err| visitor_message(&err))
    }

    #[wasm_bindgen(getter, js_name = "buttonLabel")]
    pub fn button_label(&self) -> String {
        self.inner.button_label().to_string()
    }

    #[wasm_bindgen(getter, js_name = "buttonDisabled")]
    pub fn button_disabled(&self) -> bool {
        self.inner.button_disabled()
    }
}

#[wasm_bindgen(js_name = "contactMailto")]
pub fn contact_mailto(
    recipient: &str,
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> String {
    mailto_link(recipient, &ContactForm::new(name, email, subject, message))
}
