/// Session tokens
///
/// Signed bearer tokens representing an authenticated identity. A token is a
/// JWT (HS256) carrying the user id; validity is purely a function of the
/// signature and the embedded expiry. Nothing is stored server-side, so
/// there is no revocation and no refresh. A client whose token expires logs
/// in again.
///
/// # Claims
///
/// - `id`: user id (UUID)
/// - `iat`: issued-at (Unix timestamp)
/// - `exp`: expiry, issued-at + 7 days
///
/// # Example
///
/// ```
/// use tasknest_shared::auth::jwt::{issue_session_token, verify_session_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "a-secret-key-of-at-least-32-bytes!!";
///
/// let token = issue_session_token(user_id, secret)?;
/// let claims = verify_session_token(&token, secret)?;
/// assert_eq!(claims.id, user_id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a session token stays valid after issuance
pub const SESSION_TTL_DAYS: i64 = 7;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to sign a token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Session token has expired")]
    Expired,

    /// Signature check failed or the token is malformed
    #[error("Invalid session token: {0}")]
    Invalid(String),
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id the session belongs to
    pub id: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for a user with the standard 7-day expiry
    pub fn new(user_id: Uuid) -> Self {
        Self::with_ttl(user_id, Duration::days(SESSION_TTL_DAYS))
    }

    /// Creates claims with a custom time-to-live
    ///
    /// Negative durations produce an already-expired token; tests use this
    /// to exercise expiry handling.
    pub fn with_ttl(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Whether the expiry timestamp has passed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues a signed session token for a user
///
/// The token embeds a 7-day expiry and is signed with HS256 using the
/// server-held secret.
pub fn issue_session_token(user_id: Uuid, secret: &str) -> Result<String, JwtError> {
    sign_claims(&SessionClaims::new(user_id), secret)
}

/// Signs an explicit claims struct
///
/// Exposed separately so tests can sign tokens with non-standard expiries.
pub fn sign_claims(claims: &SessionClaims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key).map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Verifies a session token and returns its claims
///
/// Checks the HS256 signature and the `exp` claim. Nothing else is
/// validated; there is no issuer claim and no server-side state.
///
/// # Errors
///
/// - [`JwtError::Expired`] when the token is past its expiry
/// - [`JwtError::Invalid`] on a bad signature or malformed token
pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(e.to_string()),
    })?;

    Ok(data.claims)
}
