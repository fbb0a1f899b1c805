use crate::reminders::{Reminder, ReminderId, ReminderStatus};
use async_trait::async_trait;
use time::OffsetDateTime;

/// Describes failures of the reminder store operations.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Reminder `{0}` is not found.")]
    NotFound(ReminderId),
    #[error("Reminder `{0}` already exists.")]
    AlreadyExists(ReminderId),
    #[error("Reminder `{id}` cannot transition from `{from}` to `{to}` status.")]
    InvalidTransition {
        id: ReminderId,
        from: ReminderStatus,
        to: ReminderStatus,
    },
    #[error("Reminder store is unavailable: {0:#}")]
    Unavailable(anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.into())
    }
}

/// Read/write contract for the persisted reminders collection. This is the only durability
/// boundary of the dispatch loop, it doesn't hold any reminder state between ticks.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Returns `Pending` reminders scheduled at or before `now`, ascending by scheduled instant.
    async fn find_due(&self, now: OffsetDateTime) -> Result<Vec<Reminder>, StoreError>;

    /// Returns all reminders, ascending by scheduled instant and creation time.
    async fn find_all(&self) -> Result<Vec<Reminder>, StoreError>;

    /// Returns reminder with the specified ID, if any.
    async fn find(&self, id: ReminderId) -> Result<Option<Reminder>, StoreError>;

    /// Persists a new reminder.
    async fn create(&self, reminder: &Reminder) -> Result<(), StoreError>;

    /// Moves reminder to the `status`. Setting the status the reminder already has is a no-op,
    /// any other move must be allowed by [`ReminderStatus::can_transition_to`].
    async fn update_status(&self, id: ReminderId, status: ReminderStatus)
        -> Result<(), StoreError>;

    /// Marks reminder as `Sent`. Calling it for an already sent reminder is a no-op.
    async fn mark_sent(&self, id: ReminderId) -> Result<(), StoreError> {
        self.update_status(id, ReminderStatus::Sent).await
    }

    /// Removes reminder from the store.
    async fn delete(&self, id: ReminderId) -> Result<(), StoreError>;
}

/// Checks whether the reminder in `current` status can be moved to `next` status. Returns
/// `false` if there is nothing to update.
pub(crate) fn check_transition(
    id: ReminderId,
    current: ReminderStatus,
    next: ReminderStatus,
) -> Result<bool, StoreError> {
    if current == next {
        Ok(false)
    } else if current.can_transition_to(next) {
        Ok(true)
    } else {
        Err(StoreError::InvalidTransition {
            id,
            from: current,
            to: next,
        })
    }
}
