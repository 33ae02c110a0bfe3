//! Mailers that do not talk to a mail server

use super::{ReportEmail, ReportMailer};
use crate::core::error::DeliveryError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Logs every email and drops it
///
/// Installed when no SMTP server is configured. Nothing is retained.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMailer;

impl LoggingMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportMailer for LoggingMailer {
    async fn send(&self, email: ReportEmail) -> Result<(), DeliveryError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            attachment = %email.attachment_name,
            bytes = email.attachment.len(),
            "Email not sent, no SMTP server configured"
        );
        Ok(())
    }
}

/// Keeps every email in memory so callers can inspect what was sent
///
/// Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<ReportEmail>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails sent so far, oldest first
    pub fn sent(&self) -> Vec<ReportEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReportMailer for RecordingMailer {
    async fn send(&self, email: ReportEmail) -> Result<(), DeliveryError> {
        tracing::debug!(to = %email.to, attachment = %email.attachment_name, "Email recorded");

        self.sent
            .lock()
            .map_err(|_| DeliveryError::Email {
                message: "Failed to acquire outbox lock".to_string(),
            })?
            .push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> ReportEmail {
        ReportEmail::new("ops@example.com", None, "r.xlsx", "x", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_logging_mailer_keeps_nothing() {
        let mailer = LoggingMailer::new();

        for _ in 0..3 {
            mailer.send(email()).await.unwrap();
        }

        assert_eq!(std::mem::size_of::<LoggingMailer>(), 0);
    }

    #[tokio::test]
    async fn test_recording_mailer_shares_outbox_between_clones() {
        let mailer = RecordingMailer::new();
        let handle = mailer.clone();

        mailer.send(email()).await.unwrap();

        assert_eq!(handle.sent(), vec![email()]);
    }
}
