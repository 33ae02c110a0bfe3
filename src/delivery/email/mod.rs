//! Report delivery by email
//!
//! [`ReportMailer`] is the transport seam. [`SmtpReportMailer`] talks to a
//! real SMTP relay. [`LoggingMailer`] only logs and is used when no mail
//! server is configured; [`RecordingMailer`] keeps emails for inspection.

pub mod outbox;
pub mod smtp;
pub mod template;

pub use outbox::{LoggingMailer, RecordingMailer};
pub use smtp::SmtpReportMailer;
pub use template::{ReportEmailContext, format_file_size, render_summary_html};

use crate::core::error::DeliveryError;
use async_trait::async_trait;

pub const DEFAULT_SUBJECT: &str = "Admin Report";
pub const DEFAULT_BODY: &str = "Please find the requested report attached.";

/// An email carrying one report attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    /// Optional HTML alternative to `text_body`
    pub html_body: Option<String>,
    pub attachment_name: String,
    pub content_type: String,
    pub attachment: Vec<u8>,
}

impl ReportEmail {
    /// Email with the default body; a blank subject falls back to the default
    pub fn new(
        to: impl Into<String>,
        subject: Option<&str>,
        attachment_name: impl Into<String>,
        content_type: impl Into<String>,
        attachment: Vec<u8>,
    ) -> Self {
        let subject = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT);

        Self {
            to: to.into(),
            subject: subject.to_string(),
            text_body: DEFAULT_BODY.to_string(),
            html_body: None,
            attachment_name: attachment_name.into(),
            content_type: content_type.into(),
            attachment,
        }
    }

    pub fn with_html_body(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }
}

/// Sends report emails
#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send(&self, email: ReportEmail) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let email = ReportEmail::new("a@b.com", None, "r.pdf", "application/pdf", vec![]);
        assert_eq!(email.subject, "Admin Report");
        assert_eq!(email.text_body, "Please find the requested report attached.");
        assert_eq!(email.html_body, None);

        let email = ReportEmail::new("a@b.com", Some("  "), "r.pdf", "application/pdf", vec![]);
        assert_eq!(email.subject, "Admin Report");

        let email = ReportEmail::new("a@b.com", Some("Weekly"), "r.pdf", "application/pdf", vec![]);
        assert_eq!(email.subject, "Weekly");
    }
}
