//! SMTP mailer using lettre

use super::{ReportEmail, ReportMailer};
use crate::config::MailConfig;
use crate::core::error::DeliveryError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Sends report emails through an SMTP relay
///
/// With `starttls` the connection is upgraded with STARTTLS; otherwise it
/// stays plaintext, which is only meant for local relays such as MailHog.
#[derive(Clone)]
pub struct SmtpReportMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpReportMailer {
    pub fn new(config: &MailConfig) -> Result<Self, DeliveryError> {
        let from = parse_mailbox(&config.from)?;

        let builder = if config.starttls {
            SmtpTransport::starttls_relay(&config.host).map_err(|e| DeliveryError::Email {
                message: format!("SMTP relay error: {e}"),
            })?
        } else {
            SmtpTransport::builder_dangerous(&config.host)
        };
        let builder = builder.port(config.port);
        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: ReportEmail) -> Result<Message, DeliveryError> {
        let to = parse_mailbox(&email.to)?;
        let content_type =
            ContentType::parse(&email.content_type).unwrap_or(ContentType::TEXT_PLAIN);

        let body = match email.html_body {
            Some(html) => MultiPart::alternative_plain_html(email.text_body, html),
            None => MultiPart::mixed().singlepart(SinglePart::plain(email.text_body)),
        };
        let attachment = Attachment::new(email.attachment_name).body(email.attachment, content_type);

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .multipart(MultiPart::mixed().multipart(body).singlepart(attachment))
            .map_err(|e| DeliveryError::Email {
                message: format!("Failed to build email: {e}"),
            })
    }
}

#[async_trait]
impl ReportMailer for SmtpReportMailer {
    async fn send(&self, email: ReportEmail) -> Result<(), DeliveryError> {
        let recipient = email.to.clone();
        let message = self.build_message(email)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| DeliveryError::Email {
                message: format!("Email task failed: {e}"),
            })?
            .map_err(|e| DeliveryError::Email {
                message: format!("Failed to send email: {e}"),
            })?;

        tracing::info!(to = %recipient, "Report email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address.parse().map_err(|e: lettre::address::AddressError| {
        DeliveryError::InvalidAddress {
            address: address.to_string(),
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            from: "reports@example.com".to_string(),
            starttls: false,
        }
    }

    #[test]
    fn test_invalid_sender_is_rejected() {
        let mut config = config();
        config.from = "not an address".to_string();

        assert!(matches!(
            SmtpReportMailer::new(&config),
            Err(DeliveryError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_message_carries_attachment_and_html() {
        let mailer = SmtpReportMailer::new(&config()).unwrap();
        let email = ReportEmail::new(
            "ops@example.com",
            Some("Weekly"),
            "admin_report_1_week.pdf",
            "application/pdf",
            b"%PDF-1.5".to_vec(),
        )
        .with_html_body("<p>Summary</p>");

        let message = mailer.build_message(email).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(raw.contains("Subject: Weekly"));
        assert!(raw.contains("admin_report_1_week.pdf"));
        assert!(raw.contains("application/pdf"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let mailer = SmtpReportMailer::new(&config()).unwrap();
        let email = ReportEmail::new("nope", None, "r.pdf", "application/pdf", vec![]);

        assert!(matches!(
            mailer.build_message(email),
            Err(DeliveryError::InvalidAddress { .. })
        ));
    }
}
