//! # TaskNest Worker
//!
//! This is the background worker for TaskNest, responsible for the daily
//! deadline reminder scan.
//!
//! ## Architecture
//!
//! The worker:
//! - Wakes at a fixed local hour every day (08:00 by default)
//! - Finds incomplete tasks due on the next calendar day
//! - Emails each task's owner one reminder, isolating per-send failures
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasknest-worker
//! ```

use std::sync::Arc;
use tasknest_shared::{db, mail::SmtpMailer};
use tasknest_worker::{config::WorkerConfig, reminder::ReminderJob, scheduler::ReminderScheduler};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasknest_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskNest Worker v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = WorkerConfig::from_env()?;

    let pool = db::pool::create_pool(db::pool::DatabaseConfig {
        url: config.database_url.clone(),
        max_connections: config.database_max_connections,
        ..Default::default()
    })
    .await?;
    db::migrations::run_migrations(&pool).await?;

    let mailer = Arc::new(SmtpMailer::new(config.smtp.clone())?);
    let job = ReminderJob::new(pool.clone(), mailer);
    let scheduler = ReminderScheduler::new(job, config.reminder_hour);

    let shutdown = CancellationToken::new();
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown.clone()));

    tracing::info!(
        reminder_hour = config.reminder_hour,
        "Worker ready, daily scan scheduled"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, exiting...");

    shutdown.cancel();
    scheduler_handle.await?;
    db::pool::close_pool(pool).await;

    Ok(())
}
