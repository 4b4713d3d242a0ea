/// Identity lifecycle endpoints
///
/// This module provides the account lifecycle:
/// - Registration (creates an inactive account and emails a verification code)
/// - Email verification (activates the account, issues a session token)
/// - Login
/// - Password change
/// - Session token check
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register new user
/// - `POST /v1/auth/verify` - Verify email, activate account
/// - `POST /v1/auth/login` - Login and get a session token
/// - `PUT /v1/auth/updatePassword/:id` - Change password
/// - `GET /v1/auth/verifyToken` - Validate a Bearer session token
///
/// Verification is stateless: the server never stores the verification code.
/// Registration returns the code's digest to the client; verification takes
/// back the digest plus the code the user typed and checks that one hashes
/// to the other.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tasknest_shared::{
    auth::{jwt, password, verification},
    mail::templates,
    models::user::{CreateUser, PublicUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (no strength requirements are enforced)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,

    /// Created (or existing inactive) user id
    pub user_id: Uuid,

    /// Email the verification code was sent to
    pub email: String,

    /// Digest of the emailed verification code
    ///
    /// The client holds this and sends it back on `/verify` together with
    /// the code the user typed.
    pub verify_token: String,
}

/// Verify request
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Digest handed out at registration
    #[serde(rename = "encryptedToken")]
    pub encrypted_token: String,

    /// The code the user typed
    #[serde(rename = "originalToken")]
    pub original_token: String,
}

/// Verify / login response: a session token plus the public user
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,

    /// Signed session token, valid 7 days
    pub token: String,

    /// Public projection of the account
    pub user: PublicUser,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    /// Current password, checked before the change
    #[serde(rename = "currentPassword")]
    pub current_password: String,

    /// Replacement password
    #[serde(rename = "newPassword")]
    #[validate(length(min = 1, message = "New password must not be empty"))]
    pub new_password: String,
}

/// Plain success envelope
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Token check response: the decoded session claims
#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub message: String,

    /// Decoded claims (`id`, `iat`, `exp`)
    pub user: jwt::SessionClaims,
}

/// Register a new user
///
/// Creates an inactive account and emails an 8-character verification code.
/// Registering an email that already has an inactive account re-sends a
/// fresh code instead of failing; an active account is a conflict.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "password": "hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: email already registered and verified
/// - `422 Unprocessable Entity`: validation failed
/// - `500 Internal Server Error`: store or mail transport failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    let (raw_token, token_digest) = verification::issue_verification_token();

    // Existing account: conflict if active, re-send if still unverified
    if let Some(existing) = User::find_by_email(&state.db, &req.email).await? {
        if existing.status.is_active() {
            return Err(ApiError::Conflict(
                "User already exists and is active".to_string(),
            ));
        }

        let mail = templates::verification_email(&existing.name, &raw_token);
        state
            .mailer
            .send(&existing.email, &mail.subject, &mail.html_body)
            .await?;

        tracing::info!(user_id = %existing.id, "Re-sent verification email");

        return Ok((
            StatusCode::OK,
            Json(RegisterResponse {
                success: true,
                message: "User already exists. Verification email resent".to_string(),
                user_id: existing.id,
                email: existing.email,
                verify_token: token_digest,
            }),
        ));
    }

    // A racing registration for the same email loses at the unique
    // constraint and surfaces as 409 via the sqlx error conversion.
    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_digest: password::hash_password(&req.password),
        },
    )
    .await?;

    let mail = templates::verification_email(&user.name, &raw_token);
    state
        .mailer
        .send(&user.email, &mail.subject, &mail.html_body)
        .await?;

    tracing::info!(user_id = %user.id, "Registered new user, verification email sent");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered. Verification email sent".to_string(),
            user_id: user.id,
            email: user.email,
            verify_token: token_digest,
        }),
    ))
}

/// Verify an email address and activate the account
///
/// Checks that the code the user typed hashes to the digest handed out at
/// registration, then flips the account to active and issues a session
/// token. Verifying an already-active account succeeds without changing
/// anything.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/verify
/// Content-Type: application/json
///
/// {
///   "email": "jane@example.com",
///   "encryptedToken": "5e884898...",
///   "originalToken": "aB3$xY9!"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: code does not match the digest
/// - `404 Not Found`: unknown email
pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> ApiResult<Json<SessionResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !password::verify_password(&req.original_token, &req.encrypted_token) {
        return Err(ApiError::BadRequest(
            "Invalid verification token".to_string(),
        ));
    }

    let user = User::activate(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let token = jwt::issue_session_token(user.id, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "Email verified, account active");

    Ok(Json(SessionResponse {
        success: true,
        message: "Email verified successfully".to_string(),
        token,
        user: user.public(),
    }))
}

/// Login
///
/// Matches email and password digest in a single query, so an unknown email
/// and a wrong password produce the same 401. Valid credentials on an
/// unverified account are a 403.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "jane@example.com",
///   "password": "hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: invalid email or password
/// - `403 Forbidden`: account exists but is not verified
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    req.validate()?;

    let digest = password::hash_password(&req.password);
    let user = User::find_by_credentials(&state.db, &req.email, &digest)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !user.status.is_active() {
        return Err(ApiError::Forbidden(
            "Account not verified. Please verify your email first".to_string(),
        ));
    }

    let token = jwt::issue_session_token(user.id, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(SessionResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: user.public(),
    }))
}

/// Change a user's password
///
/// Requires the current password; a missing user and a wrong current
/// password both come back 401.
///
/// # Endpoint
///
/// ```text
/// PUT /v1/auth/updatePassword/:id
/// Content-Type: application/json
///
/// {
///   "currentPassword": "hunter2",
///   "newPassword": "hunter3"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown user or wrong current password
pub async fn update_password(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !password::verify_password(&req.current_password, &user.password_digest) {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    User::update_password(&state.db, id, &password::hash_password(&req.new_password)).await?;

    tracing::info!(user_id = %id, "Password updated");

    Ok(Json(MessageResponse {
        success: true,
        message: "Password updated successfully".to_string(),
    }))
}

/// Validate a Bearer session token
///
/// # Endpoint
///
/// ```text
/// GET /v1/auth/verifyToken
/// Authorization: Bearer eyJ...
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: missing/malformed header, bad signature, or expired
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<VerifyTokenResponse>> {
    let token = bearer_token(&headers)?;
    let claims = jwt::verify_session_token(token, state.jwt_secret())?;

    Ok(Json(VerifyTokenResponse {
        success: true,
        message: "Token is valid".to_string(),
        user: claims,
    }))
}

/// Extracts the token from an `Authorization: Bearer ...` header
fn bearer_token(headers: &HeaderMap) -> ApiResult<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing or malformed Bearer token".to_string()))
}
