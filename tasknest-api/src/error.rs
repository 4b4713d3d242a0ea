/// Error handling for the API server
///
/// One unified error type mapped onto HTTP responses. Every handler returns
/// `Result<T, ApiError>`; the response body for any failure is the envelope
/// `{"success": false, "message": "..."}` that the clients expect.
///
/// # Taxonomy
///
/// - `BadRequest` (400): malformed input, bad verification token
/// - `Unauthorized` (401): missing pre-shared key, bad credentials,
///   invalid/expired session token, wrong current password
/// - `Forbidden` (403): valid credentials on an unverified account
/// - `NotFound` (404): unknown user/task/category
/// - `Conflict` (409): duplicate active email
/// - `Validation` (422): field-level request validation failures
/// - `Internal` (500): store or transport failure
///
/// Internal errors surface the underlying message to the client. That leaks
/// implementation detail and is preserved deliberately for protocol
/// compatibility; the message is also logged server-side.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidationErrors;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403) - account not verified
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate active email
    Conflict(String),

    /// Unprocessable entity (422) - request validation failures
    Validation(String),

    /// Internal server error (500)
    Internal(String),
}

/// Failure response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false for failures
    pub success: bool,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref msg) = self {
            tracing::error!("Internal error: {}", msg);
        }

        let status = self.status_code();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg)
            | ApiError::Internal(msg) => msg,
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// A unique-constraint violation on the users email column means two
/// registrations raced; the store-level conflict is surfaced as 409 rather
/// than 500.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict(
                            "User already exists and is active".to_string(),
                        );
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }
                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert session token errors to API errors
impl From<tasknest_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: tasknest_shared::auth::jwt::JwtError) -> Self {
        use tasknest_shared::auth::jwt::JwtError;
        match err {
            JwtError::Expired | JwtError::Invalid(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            JwtError::CreateError(msg) => ApiError::Internal(msg),
        }
    }
}

/// Convert mail errors to API errors
///
/// A failed verification email is a 500; the registration row may already
/// exist, and re-registering re-sends.
impl From<tasknest_shared::mail::MailError> for ApiError {
    fn from(err: tasknest_shared::mail::MailError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Convert validator errors to API errors
///
/// Field errors are folded into one message, e.g.
/// `email: Invalid email format`.
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let detail = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "invalid value".to_string());
                    format!("{}: {}", field, detail)
                })
            })
            .collect();
        parts.sort();

        ApiError::Validation(parts.join("; "))
    }
}
