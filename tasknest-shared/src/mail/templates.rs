/// Email templates
///
/// The system sends exactly two kinds of email: the registration
/// verification code and the day-before deadline reminder. Both are small
/// inline-HTML bodies; there is no templating engine.
use chrono::{DateTime, Utc};

/// A rendered email: subject plus HTML body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html_body: String,
}

/// Renders the registration verification email
///
/// The raw token appears prominently; the user copies it into the
/// verification form.
pub fn verification_email(name: &str, raw_token: &str) -> EmailContent {
    let html_body = format!(
        "<p>Dear {name},</p>\
         <p>Thank you for registering with <strong>TaskNest</strong>.</p>\
         <p>To complete your registration, enter the following verification code:</p>\
         <h2 style=\"color: #2c3e50;\">{raw_token}</h2>\
         <p>If you did not create an account, please disregard this email.</p>\
         <br>\
         <p>Best regards,<br>The TaskNest Team</p>"
    );

    EmailContent {
        subject: "Email Verification - TaskNest".to_string(),
        html_body,
    }
}

/// Renders the deadline reminder email
///
/// Sent the day before a task's deadline by the daily scan.
pub fn deadline_reminder_email(
    name: &str,
    task_title: &str,
    deadline: &DateTime<Utc>,
) -> EmailContent {
    let deadline_text = deadline.format("%Y-%m-%d %H:%M UTC");

    let html_body = format!(
        "<p>Dear {name},</p>\
         <p>This is a reminder that your task <strong>\"{task_title}\"</strong> \
         is due <strong>tomorrow</strong> ({deadline_text}).</p>\
         <p>Please make sure it is completed on time.</p>\
         <br>\
         <p>Best regards,<br>The TaskNest Team</p>"
    );

    EmailContent {
        subject: "Reminder: Task Deadline Tomorrow".to_string(),
        html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_verification_email_contains_token_and_name() {
        let content = verification_email("Alice", "aB3$xY7!");

        assert!(content.subject.contains("Verification"));
        assert!(content.html_body.contains("Alice"));
        assert!(content.html_body.contains("aB3$xY7!"));
    }

    #[test]
    fn test_deadline_reminder_contains_title_and_date() {
        let deadline = Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap();
        let content = deadline_reminder_email("Bob", "File taxes", &deadline);

        assert!(content.subject.contains("Deadline"));
        assert!(content.html_body.contains("Bob"));
        assert!(content.html_body.contains("File taxes"));
        assert!(content.html_body.contains("2025-06-15 09:30"));
    }

    #[test]
    fn test_reminder_says_tomorrow() {
        let deadline = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let content = deadline_reminder_email("Bob", "Anything", &deadline);
        assert!(content.html_body.contains("tomorrow"));
    }
}
