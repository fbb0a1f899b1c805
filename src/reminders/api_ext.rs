use crate::{
    api::Api,
    database::Database,
    network::{EmailTransport, EmailTransportError},
    notifications::ReminderEmail,
    reminders::{
        InvalidTimeInput, LocalDateTime, Reminder, ReminderCreateParams, ReminderId,
        ReminderStatus, StoreError, TimeNormalizer,
    },
};
use futures::{stream, StreamExt};
use lettre::Address;
use std::collections::HashSet;
use time::OffsetDateTime;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Describes why the reminder couldn't be created.
#[derive(thiserror::Error, Debug)]
pub enum ReminderCreateError {
    #[error("Invalid recipient email address `{0}`.")]
    InvalidRecipient(String),
    #[error("Task description cannot be empty.")]
    EmptyTaskDescription,
    #[error(transparent)]
    InvalidTime(#[from] InvalidTimeInput),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of the single reminder dispatch attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Email was accepted and the reminder is marked as `Sent`.
    Sent,
    /// Email wasn't accepted, reminder stays `Pending` and will be re-selected on the next tick.
    SendFailed,
    /// Email was accepted, but the reminder status couldn't be updated.
    StoreFailed,
}

/// Summary of a single dispatch tick.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of reminders that were due at the tick snapshot time.
    pub due: usize,
    pub sent: usize,
    pub send_failures: usize,
    pub store_failures: usize,
}

impl DispatchReport {
    fn record(&mut self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Sent => self.sent += 1,
            DispatchOutcome::SendFailed => self.send_failures += 1,
            DispatchOutcome::StoreFailed => self.store_failures += 1,
        }
    }
}

/// Describes the API to work with reminders.
pub struct RemindersApi<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> RemindersApi<'a, ET>
where
    ET::Error: EmailTransportError,
{
    /// Creates Reminders API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Validates parameters and persists a new `Pending` reminder.
    pub async fn create_reminder(
        &self,
        params: ReminderCreateParams,
    ) -> Result<Reminder, ReminderCreateError> {
        let recipient = params.recipient.trim();
        if recipient.parse::<Address>().is_err() {
            return Err(ReminderCreateError::InvalidRecipient(
                params.recipient.clone(),
            ));
        }

        let task_description = params.task_description.trim();
        if task_description.is_empty() {
            return Err(ReminderCreateError::EmptyTaskDescription);
        }

        let zone_name = params
            .zone_name
            .as_deref()
            .unwrap_or(&self.api.config.reminders.default_zone);
        let local = LocalDateTime::parse(&params.local_date, &params.local_time)?;
        let scheduled_at = TimeNormalizer::to_canonical(&local, zone_name)?;

        let reminder = Reminder {
            id: Uuid::now_v7(),
            recipient: recipient.to_string(),
            task_description: task_description.to_string(),
            scheduled_at,
            status: ReminderStatus::Pending,
            created_at: Database::utc_now(),
        };
        self.api.store.create(&reminder).await?;

        debug!(
            reminder.id = %reminder.id,
            reminder.scheduled_at = %reminder.scheduled_at,
            "Created reminder for {local} ({zone_name})."
        );

        Ok(reminder)
    }

    /// Returns reminder by its ID.
    pub async fn get_reminder(&self, id: ReminderId) -> Result<Option<Reminder>, StoreError> {
        self.api.store.find(id).await
    }

    /// Returns all reminders, ascending by scheduled instant.
    pub async fn list_reminders(&self) -> Result<Vec<Reminder>, StoreError> {
        self.api.store.find_all().await
    }

    /// Returns scheduled date and time of the reminder in the specified zone, or in the default
    /// zone if not specified.
    pub fn local_time(
        &self,
        reminder: &Reminder,
        zone_name: Option<&str>,
    ) -> Result<LocalDateTime, InvalidTimeInput> {
        TimeNormalizer::to_local(
            reminder.scheduled_at,
            zone_name.unwrap_or(&self.api.config.reminders.default_zone),
        )
    }

    /// Cancels pending reminder. Cancelling already cancelled reminder is a no-op.
    pub async fn cancel_reminder(&self, id: ReminderId) -> Result<(), StoreError> {
        self.api
            .store
            .update_status(id, ReminderStatus::Cancelled)
            .await
    }

    /// Removes reminder regardless of its status.
    pub async fn remove_reminder(&self, id: ReminderId) -> Result<(), StoreError> {
        self.api.store.delete(id).await
    }

    /// Returns reminders due at `now`, each reminder is returned at most once.
    pub async fn find_due_reminders(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<Reminder>, StoreError> {
        let mut seen_ids = HashSet::new();
        let mut due_reminders = self
            .api
            .store
            .find_due(now)
            .await?
            .into_iter()
            .filter(|reminder| reminder.is_due(now) && seen_ids.insert(reminder.id))
            .collect::<Vec<_>>();
        due_reminders.sort_by_key(|reminder| (reminder.scheduled_at, reminder.created_at));

        Ok(due_reminders)
    }

    /// Sends emails for all reminders due at `now` and marks them as sent. Failure to dispatch
    /// one reminder doesn't affect the others. Fails only if due reminders cannot be retrieved.
    pub async fn dispatch_due_reminders(
        &self,
        now: OffsetDateTime,
    ) -> Result<DispatchReport, StoreError> {
        let due_reminders = self.find_due_reminders(now).await?;

        let mut report = DispatchReport {
            due: due_reminders.len(),
            ..Default::default()
        };
        if due_reminders.is_empty() {
            return Ok(report);
        }

        let outcomes = stream::iter(due_reminders)
            .map(|reminder| async move { self.dispatch_reminder(&reminder).await })
            .buffer_unordered(self.api.config.scheduler.dispatch_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;
        for outcome in outcomes {
            report.record(outcome);
        }

        Ok(report)
    }

    /// Sends email for a single reminder and marks it as sent if the email was accepted.
    pub async fn dispatch_reminder(&self, reminder: &Reminder) -> DispatchOutcome {
        let email = ReminderEmail::compose(reminder);
        if let Err(failure) = self
            .api
            .notifier()
            .send(&reminder.recipient, &email.subject, &email.text)
            .await
        {
            warn!(
                reminder.id = %reminder.id,
                email.failure_kind = %failure.kind,
                email.response_code = failure.response_code,
                "Failed to send reminder, it will be retried on the next tick: {failure}"
            );
            return DispatchOutcome::SendFailed;
        }

        match self.api.store.mark_sent(reminder.id).await {
            Ok(()) => {
                debug!(reminder.id = %reminder.id, "Successfully dispatched reminder.");
                DispatchOutcome::Sent
            }
            Err(err) => {
                error!(
                    reminder.id = %reminder.id,
                    "Reminder email was sent, but the reminder couldn't be marked as sent: {err}"
                );
                DispatchOutcome::StoreFailed
            }
        }
    }
}

impl<ET: EmailTransport> Api<ET>
where
    ET::Error: EmailTransportError,
{
    /// Returns an API to work with reminders.
    pub fn reminders(&self) -> RemindersApi<ET> {
        RemindersApi::new(self)
    }
}
