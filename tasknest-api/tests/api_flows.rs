//! End-to-end API tests against a live PostgreSQL instance
//!
//! Run with a database available:
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/tasknest_test cargo test -- --ignored
//! ```

mod common;

use axum::http::StatusCode;
use common::{setup, verification_code, TestRequest};
use serde_json::json;

/// Registers a user and returns (user_id, verify_token digest)
async fn register(ctx: &common::TestContext, name: &str, email: &str, password: &str) -> (String, String) {
    let (status, body) = TestRequest::post("/v1/auth/register")
        .json(json!({ "name": name, "email": email, "password": password }))
        .send(&ctx.app)
        .await;

    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    (
        body["user_id"].as_str().unwrap().to_string(),
        body["verify_token"].as_str().unwrap().to_string(),
    )
}

/// Registers and verifies a user, returning (user_id, session token)
async fn register_and_verify(ctx: &common::TestContext, email: &str) -> (String, String) {
    let (user_id, digest) = register(ctx, "Jane Doe", email, "hunter2").await;

    let mail = ctx.mailer.last().expect("no verification email captured");
    assert_eq!(mail.to, email);
    let code = verification_code(&mail);

    let (status, body) = TestRequest::post("/v1/auth/verify")
        .json(json!({ "email": email, "encryptedToken": digest, "originalToken": code }))
        .send(&ctx.app)
        .await;

    assert_eq!(status, StatusCode::OK, "verify failed: {}", body);
    (user_id, body["token"].as_str().unwrap().to_string())
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL, run with -- --ignored)"]
async fn register_verify_login_flow() {
    let ctx = setup().await;

    let (_, digest) = register(&ctx, "Jane Doe", "jane@example.com", "hunter2").await;

    // The captured email carries an 8-character code that hashes to the digest
    let mail = ctx.mailer.last().unwrap();
    let code = verification_code(&mail);
    assert_eq!(code.len(), 8);
    assert!(mail.subject.contains("Verification"));

    // Login before verification: valid credentials, unverified account
    let (status, body) = TestRequest::post("/v1/auth/login")
        .json(json!({ "email": "jane@example.com", "password": "hunter2" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    // Wrong code is a 400
    let (status, _) = TestRequest::post("/v1/auth/verify")
        .json(json!({
            "email": "jane@example.com",
            "encryptedToken": digest,
            "originalToken": "wrong!!!"
        }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Correct code activates the account and issues a session token
    let (status, body) = TestRequest::post("/v1/auth/verify")
        .json(json!({
            "email": "jane@example.com",
            "encryptedToken": digest,
            "originalToken": code
        }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "jane@example.com");
    let token = body["token"].as_str().unwrap().to_string();

    // Re-verifying an active account is a no-op success
    let (status, _) = TestRequest::post("/v1/auth/verify")
        .json(json!({
            "email": "jane@example.com",
            "encryptedToken": digest,
            "originalToken": code
        }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Login now succeeds
    let (status, body) = TestRequest::post("/v1/auth/login")
        .json(json!({ "email": "jane@example.com", "password": "hunter2" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    // The session token checks out
    let (status, body) = TestRequest::get("/v1/auth/verifyToken")
        .bearer(&token)
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"]["id"].as_str().is_some());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL, run with -- --ignored)"]
async fn login_failure_taxonomy() {
    let ctx = setup().await;
    register_and_verify(&ctx, "jane@example.com").await;

    // Unknown email and wrong password are indistinguishable 401s
    let (status, body) = TestRequest::post("/v1/auth/login")
        .json(json!({ "email": "nobody@example.com", "password": "hunter2" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let unknown_email_message = body["message"].clone();

    let (status, body) = TestRequest::post("/v1/auth/login")
        .json(json!({ "email": "jane@example.com", "password": "wrong" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], unknown_email_message);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL, run with -- --ignored)"]
async fn register_conflict_and_resend() {
    let ctx = setup().await;

    register(&ctx, "Jane Doe", "jane@example.com", "hunter2").await;
    assert_eq!(ctx.mailer.sent().len(), 1);

    // Same email, still inactive: a fresh code is emailed, 200 not 201
    let (status, body) = TestRequest::post("/v1/auth/register")
        .json(json!({ "name": "Jane Doe", "email": "jane@example.com", "password": "hunter2" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("resent"));
    assert_eq!(ctx.mailer.sent().len(), 2);

    // After verification the same registration is a conflict
    let digest = body["verify_token"].as_str().unwrap().to_string();
    let code = verification_code(&ctx.mailer.last().unwrap());
    let (status, _) = TestRequest::post("/v1/auth/verify")
        .json(json!({
            "email": "jane@example.com",
            "encryptedToken": digest,
            "originalToken": code
        }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = TestRequest::post("/v1/auth/register")
        .json(json!({ "name": "Jane Doe", "email": "jane@example.com", "password": "hunter2" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL, run with -- --ignored)"]
async fn password_change() {
    let ctx = setup().await;
    let (user_id, _) = register_and_verify(&ctx, "jane@example.com").await;

    // Wrong current password
    let (status, _) = TestRequest::put(&format!("/v1/auth/updatePassword/{}", user_id))
        .json(json!({ "currentPassword": "wrong", "newPassword": "hunter3" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Correct current password
    let (status, _) = TestRequest::put(&format!("/v1/auth/updatePassword/{}", user_id))
        .json(json!({ "currentPassword": "hunter2", "newPassword": "hunter3" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer works; new one does
    let (status, _) = TestRequest::post("/v1/auth/login")
        .json(json!({ "email": "jane@example.com", "password": "hunter2" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = TestRequest::post("/v1/auth/login")
        .json(json!({ "email": "jane@example.com", "password": "hunter3" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL, run with -- --ignored)"]
async fn category_and_task_crud() {
    let ctx = setup().await;
    let (user_id, _) = register_and_verify(&ctx, "jane@example.com").await;

    // Create a category
    let (status, body) = TestRequest::post(&format!("/v1/category/create/{}", user_id))
        .json(json!({ "name": "Work", "color_code": "#e74c3c" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = body["category"]["id"].as_str().unwrap().to_string();

    // Create a task filed under it
    let (status, body) = TestRequest::post(&format!("/v1/task/create/{}", user_id))
        .json(json!({
            "title": "File taxes",
            "description": "Federal and state",
            "deadline": "2025-06-15T09:30:00Z",
            "category_id": category_id
        }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = body["task"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["task"]["is_completed"], false);

    // Listing joins the category fields
    let (status, body) = TestRequest::get(&format!("/v1/task/get/{}", user_id))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"][0]["category"]["name"], "Work");

    // Merge update: only the title changes
    let (status, body) = TestRequest::put(&format!("/v1/task/update/{}", task_id))
        .json(json!({ "title": "File taxes early" }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["title"], "File taxes early");
    assert_eq!(body["task"]["description"], "Federal and state");

    // Toggle completion
    let (status, body) = TestRequest::put(&format!("/v1/task/toggleStatus/{}", task_id))
        .json(json!({ "is_completed": true }))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["is_completed"], true);

    // Deleting the category detaches the task instead of deleting it
    let (status, _) = TestRequest::delete(&format!("/v1/category/delete/{}", category_id))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = TestRequest::get(&format!("/v1/task/get/{}", user_id))
        .send(&ctx.app)
        .await;
    assert_eq!(body["tasks"][0]["category"], serde_json::Value::Null);

    // Delete the task; unknown ids 404 afterwards
    let (status, _) = TestRequest::delete(&format!("/v1/task/delete/{}", task_id))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = TestRequest::delete(&format!("/v1/task/delete/{}", task_id))
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL, run with -- --ignored)"]
async fn api_key_gate() {
    let ctx = setup().await;

    // Health is public and reports the probe outcome plus pool stats
    let (status, body) = TestRequest::get("/health")
        .without_api_key()
        .send(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["pool_size"].as_u64().is_some());

    // Everything under /v1 wants the key; rejection is an HTML page
    let (status, body) = TestRequest::post("/v1/auth/login")
        .without_api_key()
        .json(json!({ "email": "a@b.com", "password": "x" }))
        .send_raw(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Unauthorized Access"));

    // Wrong key is rejected the same way
    let (status, body) = TestRequest::post("/v1/auth/login")
        .with_api_key("not-the-key")
        .json(json!({ "email": "a@b.com", "password": "x" }))
        .send_raw(&ctx.app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Unauthorized Access"));
}
