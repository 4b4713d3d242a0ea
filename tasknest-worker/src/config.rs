/// Configuration management for the worker
///
/// Configuration comes from environment variables (a `.env` file is loaded
/// in development).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
/// - `REMINDER_HOUR`: local wall-clock hour for the daily scan, 0-23
///   (default: 8)
/// - `SMTP_HOST` / `SMTP_USERNAME` / `SMTP_PASSWORD`: SMTP relay (required)
/// - `MAIL_FROM`: sender mailbox (default: `TaskNest <no-reply@tasknest.app>`)
use std::env;
use tasknest_shared::mail::SmtpConfig;

/// Complete worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Maximum number of connections in pool
    pub database_max_connections: u32,

    /// Local hour of day the scan fires (0-23)
    pub reminder_hour: u32,

    /// SMTP relay settings
    pub smtp: SmtpConfig,
}

impl WorkerConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing, numeric values do
    /// not parse, or `REMINDER_HOUR` is outside 0-23.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let reminder_hour = env::var("REMINDER_HOUR")
            .unwrap_or_else(|_| "8".to_string())
            .parse::<u32>()?;

        if reminder_hour > 23 {
            anyhow::bail!("REMINDER_HOUR must be between 0 and 23");
        }

        let smtp_host = env::var("SMTP_HOST")
            .map_err(|_| anyhow::anyhow!("SMTP_HOST environment variable is required"))?;
        let smtp_username = env::var("SMTP_USERNAME")
            .map_err(|_| anyhow::anyhow!("SMTP_USERNAME environment variable is required"))?;
        let smtp_password = env::var("SMTP_PASSWORD")
            .map_err(|_| anyhow::anyhow!("SMTP_PASSWORD environment variable is required"))?;
        let mail_from = env::var("MAIL_FROM")
            .unwrap_or_else(|_| "TaskNest <no-reply@tasknest.app>".to_string());

        Ok(Self {
            database_url,
            database_max_connections,
            reminder_hour,
            smtp: SmtpConfig {
                host: smtp_host,
                username: smtp_username,
                password: smtp_password,
                from: mail_from,
            },
        })
    }
}
