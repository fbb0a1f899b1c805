use crate::reminders::{
    reminder_store::check_transition, Reminder, ReminderId, ReminderStatus, ReminderStore,
    StoreError,
};
use async_trait::async_trait;
use std::collections::{hash_map::Entry, HashMap};
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Reminder store that keeps reminders in process memory.
#[derive(Default)]
pub struct MemoryReminderStore {
    reminders: RwLock<HashMap<ReminderId, Reminder>>,
}

impl MemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
        reminders.sort_by_key(|reminder| (reminder.scheduled_at, reminder.created_at, reminder.id));
        reminders
    }
}

#[async_trait]
impl ReminderStore for MemoryReminderStore {
    async fn find_due(&self, now: OffsetDateTime) -> Result<Vec<Reminder>, StoreError> {
        let reminders = self.reminders.read().await;
        Ok(Self::sorted(
            reminders
                .values()
                .filter(|reminder| reminder.is_due(now))
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<Reminder>, StoreError> {
        let reminders = self.reminders.read().await;
        Ok(Self::sorted(reminders.values().cloned().collect()))
    }

    async fn find(&self, id: ReminderId) -> Result<Option<Reminder>, StoreError> {
        Ok(self.reminders.read().await.get(&id).cloned())
    }

    async fn create(&self, reminder: &Reminder) -> Result<(), StoreError> {
        match self.reminders.write().await.entry(reminder.id) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(reminder.id)),
            Entry::Vacant(entry) => {
                entry.insert(reminder.clone());
                Ok(())
            }
        }
    }

    async fn update_status(
        &self,
        id: ReminderId,
        status: ReminderStatus,
    ) -> Result<(), StoreError> {
        let mut reminders = self.reminders.write().await;
        let reminder = reminders.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if check_transition(id, reminder.status, status)? {
            reminder.status = status;
        }

        Ok(())
    }

    async fn delete(&self, id: ReminderId) -> Result<(), StoreError> {
        self.reminders
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
