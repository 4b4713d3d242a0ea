/// Email delivery
///
/// The rest of the system only sees the [`Mailer`] trait; the SMTP transport
/// behind it is a construction-time choice. Both the API server (verification
/// emails) and the worker (deadline reminders) receive their mailer by
/// injection; there is no process-global transporter.
///
/// # Modules
///
/// - `smtp`: lettre-based SMTP mailer
/// - `templates`: the two HTML email bodies the system sends
use async_trait::async_trait;

pub mod smtp;
pub mod templates;

pub use smtp::{SmtpConfig, SmtpMailer};

/// Error type for mail delivery
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Recipient or sender address did not parse
    #[error("Invalid email address '{0}'")]
    InvalidAddress(String),

    /// Message could not be assembled
    #[error("Failed to build email: {0}")]
    Build(String),

    /// SMTP transport failure
    #[error("Failed to send email: {0}")]
    Transport(String),
}

/// Interface for sending a single email
///
/// Implementations must be safe to share across tasks; senders are held in
/// an `Arc<dyn Mailer>`.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one HTML email
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}
