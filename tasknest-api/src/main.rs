//! # TaskNest API Server
//!
//! This is the main API server for TaskNest, providing the identity
//! lifecycle (register, email verification, login, password change) and
//! per-user category/task CRUD.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Identity endpoints with email verification and 7-day session tokens
//! - Category and task CRUD scoped by user id
//! - A pre-shared `x-api-key` gate in front of all `/v1` routes
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasknest-api
//! ```

use std::sync::Arc;
use tasknest_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasknest_shared::{db, mail::SmtpMailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasknest_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskNest API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // Database pool + migrations
    let pool = db::pool::create_pool(db::pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    db::migrations::run_migrations(&pool).await?;

    // Outbound mail transport
    let mailer = SmtpMailer::new(config.mail.smtp_config())?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config, Arc::new(mailer));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    db::pool::close_pool(pool).await;

    Ok(())
}
