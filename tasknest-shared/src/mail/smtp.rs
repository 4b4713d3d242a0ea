/// SMTP mailer backed by lettre
///
/// Production deployments relay through an authenticated SMTP submission
/// endpoint over TLS. For local development there is an unencrypted
/// constructor aimed at mail catchers (Mailpit, MailHog).
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::mail::{Mailer, SmtpConfig, SmtpMailer};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mailer = SmtpMailer::new(SmtpConfig {
///     host: "smtp.example.com".to_string(),
///     username: "tasknest".to_string(),
///     password: "app-password".to_string(),
///     from: "TaskNest <no-reply@example.com>".to_string(),
/// })?;
///
/// mailer
///     .send("alice@example.com", "Hello", "<p>Hi Alice</p>")
///     .await?;
/// # Ok(())
/// # }
/// ```
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, Mailer};

/// SMTP connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay hostname
    pub host: String,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Sender, e.g. `TaskNest <no-reply@example.com>`
    pub from: String,
}

/// Mailer that delivers through an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Creates a mailer relaying through `host` with TLS and credentials
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let from = parse_mailbox(&config.from)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self { transport, from })
    }

    /// Creates an unencrypted mailer for local mail catchers
    ///
    /// Never point this at a real relay.
    pub fn new_insecure(host: &str, port: u16, from: &str) -> Result<Self, MailError> {
        let from = parse_mailbox(from)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Ok(Self { transport, from })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mailbox_with_display_name() {
        assert!(parse_mailbox("TaskNest <no-reply@example.com>").is_ok());
        assert!(parse_mailbox("plain@example.com").is_ok());
    }

    #[test]
    fn test_parse_mailbox_rejects_garbage() {
        let result = parse_mailbox("not-an-address");
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_send_rejects_invalid_recipient_before_transport() {
        let mailer =
            SmtpMailer::new_insecure("localhost", 1025, "no-reply@example.com").unwrap();

        // Fails on address parsing, so no connection is attempted
        let result = mailer.send("broken recipient", "Subject", "<p>Body</p>").await;
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }
}
