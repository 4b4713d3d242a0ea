/// Fixed-time daily scheduler for the reminder scan
///
/// The scan fires at a configured local wall-clock hour (08:00 by default).
/// The scheduler computes the next occurrence of that hour and sleeps until
/// it, rather than ticking on a fixed interval, so a slow scan or a restart
/// never drifts the firing time.
///
/// Shutdown is cooperative via a `CancellationToken`: cancellation wakes the
/// sleep and the loop exits without starting another scan.
///
/// # Example
///
/// ```no_run
/// use tasknest_worker::{reminder::ReminderJob, scheduler::ReminderScheduler};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(job: ReminderJob) {
/// let shutdown = CancellationToken::new();
/// let scheduler = ReminderScheduler::new(job, 8);
///
/// tokio::spawn(scheduler.run(shutdown.clone()));
///
/// // Later:
/// shutdown.cancel();
/// # }
/// ```
use crate::reminder::ReminderJob;
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use tokio_util::sync::CancellationToken;

/// Default local hour for the daily scan
pub const DEFAULT_REMINDER_HOUR: u32 = 8;

/// Runs the reminder job once a day at a fixed local hour
pub struct ReminderScheduler {
    job: ReminderJob,
    hour: u32,
}

impl ReminderScheduler {
    /// Creates a scheduler firing daily at `hour` local time (0-23)
    pub fn new(job: ReminderJob, hour: u32) -> Self {
        Self {
            job,
            hour: hour.min(23),
        }
    }

    /// Runs until the token is cancelled
    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            let now = Local::now();
            let next = next_run_after(now, self.hour);
            let wait = (next - now).to_std().unwrap_or_default();

            tracing::info!(next_run = %next, "Sleeping until next reminder scan");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    if let Err(err) = self.job.run_scan().await {
                        tracing::error!(error = %err, "Reminder scan failed");
                    }
                }
                _ = shutdown.cancelled() => {
                    tracing::info!("Scheduler shutting down");
                    return;
                }
            }
        }
    }
}

/// Computes the next occurrence of `hour:00:00` local time strictly after `now`
///
/// Firing exactly at the hour schedules the following day; the scan that is
/// about to run covers today. A DST gap or overlap at the target hour
/// resolves to the earliest valid instant of that day's remaining hours.
pub fn next_run_after(now: DateTime<Local>, hour: u32) -> DateTime<Local> {
    let target_time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);

    let mut date = now.date_naive();
    if now.time() >= target_time {
        date += Duration::days(1);
    }

    loop {
        match Local.from_local_datetime(&date.and_time(target_time)) {
            chrono::LocalResult::Single(dt) => return dt,
            chrono::LocalResult::Ambiguous(earliest, _) => return earliest,
            // The target hour does not exist locally (DST gap): try the
            // next hour, then fall through to the next day.
            chrono::LocalResult::None => {
                if let Some(dt) = Local
                    .from_local_datetime(&(date.and_time(target_time) + Duration::hours(1)))
                    .earliest()
                {
                    return dt;
                }
                date += Duration::days(1);
            }
        }
    }
}
