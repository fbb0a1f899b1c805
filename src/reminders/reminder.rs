use crate::reminders::ReminderStatus;
use time::OffsetDateTime;
use uuid::Uuid;

/// Unique identifier of the reminder.
pub type ReminderId = Uuid;

/// Defines a one-shot email reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Unique id of the reminder.
    pub id: ReminderId,
    /// Email address the reminder is delivered to.
    pub recipient: String,
    /// Free-form description of the task the user wants to be reminded about.
    pub task_description: String,
    /// The absolute instant at which the reminder becomes due. Derived once from the local date,
    /// time and zone at creation and never recomputed.
    pub scheduled_at: OffsetDateTime,
    /// Current lifecycle status.
    pub status: ReminderStatus,
    /// The time at which the reminder was persisted.
    pub created_at: OffsetDateTime,
}

impl Reminder {
    /// Indicates whether the reminder should be dispatched at `now`.
    pub fn is_due(&self, now: OffsetDateTime) -> bool {
        self.status == ReminderStatus::Pending && self.scheduled_at <= now
    }
}
