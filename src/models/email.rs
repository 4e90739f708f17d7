// Email flow contracts
// The transport behind these is a placeholder; see flows::send_email.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, Violations};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// Input for sending an email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailInput {
    /// Recipient email address
    pub to: String,
    /// Email subject
    pub subject: String,
    /// Email body, may contain HTML
    pub body: String,
}

impl SendEmailInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut out = Violations::new();
        if !email_re().is_match(&self.to) {
            out.push("to", "must be a valid email address");
        }
        if self.subject.trim().is_empty() {
            out.push("subject", "must be a non-empty string");
        }
        if self.body.trim().is_empty() {
            out.push("body", "must be a non-empty string");
        }
        out.into_result()
    }
}

/// Output of the email flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailOutput {
    pub success: bool,
}
