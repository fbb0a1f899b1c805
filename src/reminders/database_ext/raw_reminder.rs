use crate::reminders::Reminder;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub(super) struct RawReminder {
    pub id: Uuid,
    pub recipient: String,
    pub task_description: String,
    pub scheduled_at: OffsetDateTime,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<RawReminder> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw_reminder: RawReminder) -> Result<Self, Self::Error> {
        Ok(Reminder {
            id: raw_reminder.id,
            recipient: raw_reminder.recipient,
            task_description: raw_reminder.task_description,
            scheduled_at: raw_reminder.scheduled_at,
            status: raw_reminder.status.parse()?,
            created_at: raw_reminder.created_at,
        })
    }
}

impl From<&Reminder> for RawReminder {
    fn from(reminder: &Reminder) -> Self {
        RawReminder {
            id: reminder.id,
            recipient: reminder.recipient.clone(),
            task_description: reminder.task_description.clone(),
            scheduled_at: reminder.scheduled_at,
            status: reminder.status.as_str().to_string(),
            created_at: reminder.created_at,
        }
    }
}
