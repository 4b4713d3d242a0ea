/// Shared fixtures for API integration tests
///
/// These tests drive the real router against a live PostgreSQL instance.
/// Outbound email is captured by a recording mailer so tests can read the
/// verification code the way a user would read their inbox.
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use tasknest_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, GateConfig, JwtConfig, MailConfig},
};
use tasknest_shared::{
    auth::api_key::hash_api_key,
    db,
    mail::{MailError, Mailer},
};
use tower::ServiceExt;

/// The plaintext pre-shared key tests send in `x-api-key`
pub const TEST_API_KEY: &str = "integration-test-key";

/// One captured outbound email
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Mailer that records messages instead of sending them
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<SentMail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}

/// Pulls the 8-character verification code out of a captured email body
pub fn verification_code(mail: &SentMail) -> String {
    let marker = "<h2 style=\"color: #2c3e50;\">";
    let start = mail
        .html_body
        .find(marker)
        .expect("verification email has no code heading")
        + marker.len();
    let end = mail.html_body[start..]
        .find("</h2>")
        .expect("unterminated code heading")
        + start;

    mail.html_body[start..end].to_string()
}

/// A wired-up application over a clean database
pub struct TestContext {
    pub app: Router,
    pub db: PgPool,
    pub mailer: Arc<RecordingMailer>,
}

/// Connects to `DATABASE_URL`, migrates, truncates, and builds the router
pub async fn setup() -> TestContext {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    let pool = db::pool::create_pool(db::pool::DatabaseConfig {
        url: database_url.clone(),
        max_connections: 5,
        ..Default::default()
    })
    .await
    .expect("failed to connect to test database");

    db::migrations::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    sqlx::query("TRUNCATE users CASCADE")
        .execute(&pool)
        .await
        .expect("failed to truncate");

    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".to_string(),
        },
        gate: GateConfig {
            api_key_hash: hash_api_key(TEST_API_KEY),
        },
        mail: MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_username: "unused".to_string(),
            smtp_password: "unused".to_string(),
            from: "TaskNest <no-reply@example.com>".to_string(),
        },
    };

    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(pool.clone(), config, mailer.clone());

    TestContext {
        app: build_router(state),
        db: pool,
        mailer,
    }
}

/// Request builder for the test router
pub struct TestRequest {
    method: Method,
    uri: String,
    api_key: Option<String>,
    bearer: Option<String>,
    body: Option<serde_json::Value>,
}

impl TestRequest {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            api_key: Some(TEST_API_KEY.to_string()),
            bearer: None,
            body: None,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sends the request, returning the status and raw body
    pub async fn send_raw(self, app: &Router) -> (StatusCode, String) {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);

        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }
        if let Some(token) = &self.bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match self.body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Sends the request, parsing the body as JSON
    pub async fn send(self, app: &Router) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send_raw(app).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|_| panic!("non-JSON response ({}): {}", status, body));

        (status, json)
    }
}
