use crate::reminders::Reminder;
use time::{macros::format_description, UtcOffset};

/// Plain-text email delivered for a due reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEmail {
    pub subject: String,
    pub text: String,
}

impl ReminderEmail {
    /// Composes email for the reminder. The zone the reminder was created in isn't persisted, so
    /// the scheduled instant is displayed in UTC.
    pub fn compose(reminder: &Reminder) -> Self {
        let mut text = format!(
            "This is a reminder for your task: {}",
            reminder.task_description
        );
        if let Ok(scheduled_at) = reminder
            .scheduled_at
            .to_offset(UtcOffset::UTC)
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        {
            text.push_str(&format!("\n\nScheduled for {scheduled_at} UTC."));
        }

        Self {
            subject: format!("Reminder: {}", reminder.task_description),
            text,
        }
    }
}
