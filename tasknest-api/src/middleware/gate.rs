/// Pre-shared API key gate
///
/// Every `/v1/*` route requires the deployment's static pre-shared key in
/// the `x-api-key` header. The server holds only the SHA-256 digest of the
/// key; incoming values are hashed then compared in constant time, so the
/// plaintext never shows up in configuration or logs.
///
/// A missing or wrong key gets a 401 with a small static HTML page rather
/// than the JSON envelope. The gate sits in front of the API proper and
/// answers browsers poking at it directly.
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use tasknest_shared::auth::api_key::verify_api_key;

use crate::app::AppState;

/// Header carrying the pre-shared key
pub const API_KEY_HEADER: &str = "x-api-key";

const UNAUTHORIZED_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Unauthorized Access</title></head>
  <body style="font-family: Arial, sans-serif; color: #333; text-align: center; margin-top: 10vh;">
    <h1>Unauthorized Access</h1>
    <p>You do not have permission to access this resource.</p>
    <p>Please contact the administrator if you believe this is an error.</p>
  </body>
</html>
"#;

/// Middleware enforcing the pre-shared key
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if verify_api_key(key, &state.config.gate.api_key_hash) => next.run(req).await,
        _ => unauthorized_page(),
    }
}

/// The 401 HTML response for rejected requests
pub fn unauthorized_page() -> Response {
    (StatusCode::UNAUTHORIZED, Html(UNAUTHORIZED_PAGE)).into_response()
}
