/// Daily deadline reminder scan
///
/// Once a day the worker looks for incomplete tasks whose deadline falls on
/// the next calendar day, in the server's local time, and emails each task's
/// owner a reminder. The window is the half-open interval
/// `[tomorrow 00:00:00, day-after-tomorrow 00:00:00)`: a deadline exactly at
/// the second midnight belongs to the next day's scan.
///
/// Delivery is sequential and per-task failures are isolated. One bounced
/// address never stops the rest of the batch; the failure is logged and the
/// scan moves on. There is no sent-reminder state, so a scan re-run after a
/// crash can re-send. At-least-once is the accepted behavior.
///
/// # Example
///
/// ```no_run
/// use tasknest_worker::reminder::ReminderJob;
/// use tasknest_shared::mail::SmtpMailer;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example(pool: PgPool, mailer: Arc<SmtpMailer>) -> anyhow::Result<()> {
/// let job = ReminderJob::new(pool, mailer);
/// let summary = job.run_scan().await?;
/// println!("sent {} of {} reminders", summary.sent, summary.matched);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tasknest_shared::{
    mail::{templates, Mailer},
    models::task::{DueTask, Task},
};

/// Outcome of one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Tasks whose deadline fell in the window
    pub matched: usize,

    /// Reminders delivered
    pub sent: usize,

    /// Reminders that failed to send
    pub failed: usize,
}

/// The deadline reminder job
///
/// Holds its dependencies; nothing here reads process globals, so tests can
/// construct one with a mock mailer.
pub struct ReminderJob {
    db: PgPool,
    mailer: Arc<dyn Mailer>,
}

impl ReminderJob {
    /// Creates a new reminder job
    pub fn new(db: PgPool, mailer: Arc<dyn Mailer>) -> Self {
        Self { db, mailer }
    }

    /// Runs one scan: query the window, send one reminder per task
    ///
    /// # Errors
    ///
    /// Returns an error only if the window query itself fails. Send failures
    /// are counted in the summary, not propagated.
    pub async fn run_scan(&self) -> anyhow::Result<ScanSummary> {
        let (start, end) = reminder_window(Local::now().date_naive());

        tracing::info!(
            start = %start,
            end = %end,
            "Scanning for tasks due tomorrow"
        );

        let due = Task::due_between(&self.db, start, end).await?;
        let summary = self.deliver(&due).await;

        tracing::info!(
            matched = summary.matched,
            sent = summary.sent,
            failed = summary.failed,
            "Reminder scan complete"
        );

        Ok(summary)
    }

    /// Sends one reminder per due task, isolating per-send failures
    pub async fn deliver(&self, due: &[DueTask]) -> ScanSummary {
        let mut summary = ScanSummary {
            matched: due.len(),
            ..Default::default()
        };

        for task in due {
            let mail =
                templates::deadline_reminder_email(&task.owner_name, &task.title, &task.deadline);

            match self
                .mailer
                .send(&task.owner_email, &mail.subject, &mail.html_body)
                .await
            {
                Ok(()) => {
                    tracing::debug!(task_id = %task.id, "Reminder sent");
                    summary.sent += 1;
                }
                Err(err) => {
                    tracing::error!(
                        task_id = %task.id,
                        error = %err,
                        "Failed to send reminder, continuing with remaining tasks"
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

/// Computes the scan window for a given "today", in UTC
///
/// The window is `[tomorrow 00:00:00, day after 00:00:00)` in local time,
/// converted to UTC for the deadline comparison. Local midnights that do not
/// exist or are ambiguous (DST transitions) resolve to the earliest valid
/// instant.
pub fn reminder_window(today: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(today + Duration::days(1));
    let end = local_midnight(today + Duration::days(2));

    (start.with_timezone(&Utc), end.with_timezone(&Utc))
}

/// Local midnight of a date, resolving DST gaps and overlaps
fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN);

    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt,
        chrono::LocalResult::Ambiguous(earliest, _) => earliest,
        // Midnight does not exist locally (DST gap): take the first valid
        // instant after it.
        chrono::LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| Local.timestamp_opt(0, 0).unwrap()),
    }
}
