/// Configuration management for the API server
///
/// Configuration comes from environment variables (a `.env` file is loaded
/// in development).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `API_HOST`: host to bind (default: 0.0.0.0)
/// - `API_PORT`: port to bind (default: 8080)
/// - `JWT_SECRET`: session token signing key, >= 32 chars (required)
/// - `API_KEY_HASH`: SHA-256 hex digest of the pre-shared API key (required)
/// - `CORS_ORIGINS`: comma-separated allowed origins (default: `*`)
/// - `SMTP_HOST` / `SMTP_USERNAME` / `SMTP_PASSWORD`: SMTP relay (required)
/// - `MAIL_FROM`: sender mailbox (default: `TaskNest <no-reply@tasknest.app>`)
///
/// # Example
///
/// ```no_run
/// use tasknest_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Listening on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use std::env;
use tasknest_shared::auth::api_key::is_valid_key_digest;
use tasknest_shared::mail::SmtpConfig;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// Pre-shared API key gate configuration
    pub gate: GateConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `["*"]` means permissive
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Pre-shared API key gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// SHA-256 hex digest of the pre-shared key
    ///
    /// The plaintext key is never configured server-side.
    /// Generate with: `echo -n "$KEY" | sha256sum`
    pub api_key_hash: String,
}

/// Outbound mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP relay hostname
    pub smtp_host: String,

    /// SMTP username
    pub smtp_username: String,

    /// SMTP password
    pub smtp_password: String,

    /// Sender mailbox
    pub from: String,
}

impl MailConfig {
    /// Converts into the shared SMTP settings struct
    pub fn smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.smtp_host.clone(),
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from: self.from.clone(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing, numeric values do
    /// not parse, the JWT secret is too short, or `API_KEY_HASH` is not a
    /// SHA-256 hex digest.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let api_key_hash = env::var("API_KEY_HASH")
            .map_err(|_| anyhow::anyhow!("API_KEY_HASH environment variable is required"))?;

        if !is_valid_key_digest(&api_key_hash) {
            anyhow::bail!(
                "API_KEY_HASH must be a 64-char SHA-256 hex digest, not the plaintext key"
            );
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
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig { secret: jwt_secret },
            gate: GateConfig { api_key_hash },
            mail: MailConfig {
                smtp_host,
                smtp_username,
                smtp_password,
                from: mail_from,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasknest_shared::auth::api_key::hash_api_key;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            gate: GateConfig {
                api_key_hash: hash_api_key("test-key"),
            },
            mail: MailConfig {
                smtp_host: "localhost".to_string(),
                smtp_username: "user".to_string(),
                smtp_password: "pass".to_string(),
                from: "TaskNest <no-reply@example.com>".to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_smtp_config_conversion() {
        let smtp = test_config().mail.smtp_config();
        assert_eq!(smtp.host, "localhost");
        assert_eq!(smtp.from, "TaskNest <no-reply@example.com>");
    }
}
