mod raw_reminder;

use crate::{
    database::Database,
    reminders::{
        reminder_store::check_transition, Reminder, ReminderId, ReminderStatus, ReminderStore,
        StoreError,
    },
};
use async_trait::async_trait;
use raw_reminder::RawReminder;
use sqlx::{query, query_as, query_scalar};
use time::OffsetDateTime;

/// Extends primary database with the reminders-related methods.
#[async_trait]
impl ReminderStore for Database {
    async fn find_due(&self, now: OffsetDateTime) -> Result<Vec<Reminder>, StoreError> {
        query_as::<_, RawReminder>(
            r#"SELECT * FROM reminders WHERE status = $1 AND scheduled_at <= $2 ORDER BY scheduled_at, created_at"#,
        )
        .bind(ReminderStatus::Pending.as_str())
        .bind(now)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|raw_reminder| Reminder::try_from(raw_reminder).map_err(StoreError::Unavailable))
        .collect()
    }

    async fn find_all(&self) -> Result<Vec<Reminder>, StoreError> {
        query_as::<_, RawReminder>(r#"SELECT * FROM reminders ORDER BY scheduled_at, created_at"#)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|raw_reminder| Reminder::try_from(raw_reminder).map_err(StoreError::Unavailable))
            .collect()
    }

    async fn find(&self, id: ReminderId) -> Result<Option<Reminder>, StoreError> {
        query_as::<_, RawReminder>(r#"SELECT * FROM reminders WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|raw_reminder| Reminder::try_from(raw_reminder).map_err(StoreError::Unavailable))
            .transpose()
    }

    async fn create(&self, reminder: &Reminder) -> Result<(), StoreError> {
        let raw_reminder = RawReminder::from(reminder);
        let result = query(
            r#"
INSERT INTO reminders (id, recipient, task_description, scheduled_at, status, created_at)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (id) DO NOTHING
        "#,
        )
        .bind(raw_reminder.id)
        .bind(raw_reminder.recipient)
        .bind(raw_reminder.task_description)
        .bind(raw_reminder.scheduled_at)
        .bind(raw_reminder.status)
        .bind(raw_reminder.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(reminder.id));
        }

        Ok(())
    }

    async fn update_status(
        &self,
        id: ReminderId,
        status: ReminderStatus,
    ) -> Result<(), StoreError> {
        // Only `Pending` reminders can change status, so the conditional write is enough to
        // guard against concurrent updates.
        let result = query(r#"UPDATE reminders SET status = $2 WHERE id = $1 AND status = $3"#)
            .bind(id)
            .bind(status.as_str())
            .bind(ReminderStatus::Pending.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() > 0 {
            return Ok(());
        }

        let current_status =
            query_scalar::<_, String>(r#"SELECT status FROM reminders WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound(id))?
                .parse::<ReminderStatus>()
                .map_err(StoreError::Unavailable)?;

        check_transition(id, current_status, status).map(|_| ())
    }

    async fn delete(&self, id: ReminderId) -> Result<(), StoreError> {
        let result = query(r#"DELETE FROM reminders WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        database::Database,
        reminders::{Reminder, ReminderStatus, ReminderStore, StoreError},
        tests::mock_reminder,
    };
    use insta::assert_debug_snapshot;
    use sqlx::PgPool;
    use time::macros::datetime;
    use uuid::uuid;

    async fn seeded_db(pool: PgPool) -> anyhow::Result<Database> {
        let db = Database::create(pool).await?;
        db.create(&mock_reminder(3, datetime!(2025-10-25 06:00 UTC)))
            .await?;
        db.create(&mock_reminder(1, datetime!(2025-10-25 05:00 UTC)))
            .await?;
        db.create(&mock_reminder(2, datetime!(2025-10-25 05:30 UTC)))
            .await?;
        db.create(&Reminder {
            status: ReminderStatus::Sent,
            ..mock_reminder(4, datetime!(2025-10-25 04:00 UTC))
        })
        .await?;
        db.create(&Reminder {
            status: ReminderStatus::Cancelled,
            ..mock_reminder(5, datetime!(2025-10-25 04:30 UTC))
        })
        .await?;

        Ok(db)
    }

    fn ids(reminders: Vec<Reminder>) -> Vec<u128> {
        reminders
            .into_iter()
            .map(|reminder| reminder.id.as_u128())
            .collect()
    }

    #[sqlx::test]
    async fn can_create_and_retrieve_reminders(pool: PgPool) -> anyhow::Result<()> {
        let db = seeded_db(pool).await?;

        assert!(db
            .find(uuid!("00000000-0000-0000-0000-000000000010"))
            .await?
            .is_none());
        assert_eq!(
            db.find(uuid!("00000000-0000-0000-0000-000000000001"))
                .await?,
            Some(mock_reminder(1, datetime!(2025-10-25 05:00 UTC)))
        );
        assert_eq!(ids(db.find_all().await?), vec![4, 5, 1, 2, 3]);

        assert_debug_snapshot!(
            db.create(&mock_reminder(1, datetime!(2025-10-26 05:00 UTC))).await,
            @r###"
        Err(
            AlreadyExists(
                00000000-0000-0000-0000-000000000001,
            ),
        )
        "###
        );
        assert_eq!(
            db.find(uuid!("00000000-0000-0000-0000-000000000001"))
                .await?
                .map(|reminder| reminder.scheduled_at),
            Some(datetime!(2025-10-25 05:00 UTC))
        );

        Ok(())
    }

    #[sqlx::test]
    async fn finds_only_pending_due_reminders_in_order(pool: PgPool) -> anyhow::Result<()> {
        let db = seeded_db(pool).await?;

        assert!(db
            .find_due(datetime!(2025-10-25 04:59 UTC))
            .await?
            .is_empty());
        assert_eq!(
            ids(db.find_due(datetime!(2025-10-25 05:30 UTC)).await?),
            vec![1, 2]
        );
        assert_eq!(
            ids(db.find_due(datetime!(2025-10-26 00:00 UTC)).await?),
            vec![1, 2, 3]
        );

        Ok(())
    }

    #[sqlx::test]
    async fn mark_sent_is_idempotent(pool: PgPool) -> anyhow::Result<()> {
        let db = seeded_db(pool).await?;
        let id = uuid!("00000000-0000-0000-0000-000000000001");

        db.mark_sent(id).await?;
        db.mark_sent(id).await?;

        assert_eq!(
            db.find(id).await?.map(|reminder| reminder.status),
            Some(ReminderStatus::Sent)
        );
        assert_eq!(
            ids(db.find_due(datetime!(2025-10-26 00:00 UTC)).await?),
            vec![2, 3]
        );

        Ok(())
    }

    #[sqlx::test]
    async fn rejects_invalid_transitions(pool: PgPool) -> anyhow::Result<()> {
        let db = seeded_db(pool).await?;

        let sent_id = uuid!("00000000-0000-0000-0000-000000000004");
        assert_debug_snapshot!(db.update_status(sent_id, ReminderStatus::Pending).await, @r###"
        Err(
            InvalidTransition {
                id: 00000000-0000-0000-0000-000000000004,
                from: Sent,
                to: Pending,
            },
        )
        "###);
        assert!(matches!(
            db.update_status(sent_id, ReminderStatus::Cancelled).await,
            Err(StoreError::InvalidTransition { .. })
        ));

        let cancelled_id = uuid!("00000000-0000-0000-0000-000000000005");
        db.update_status(cancelled_id, ReminderStatus::Cancelled)
            .await?;
        assert!(matches!(
            db.mark_sent(cancelled_id).await,
            Err(StoreError::InvalidTransition { .. })
        ));

        let pending_id = uuid!("00000000-0000-0000-0000-000000000001");
        db.update_status(pending_id, ReminderStatus::Cancelled)
            .await?;
        assert_eq!(
            db.find(pending_id).await?.map(|reminder| reminder.status),
            Some(ReminderStatus::Cancelled)
        );

        assert!(matches!(
            db.mark_sent(uuid!("00000000-0000-0000-0000-000000000010"))
                .await,
            Err(StoreError::NotFound(_))
        ));

        Ok(())
    }

    #[sqlx::test]
    async fn can_delete_reminders(pool: PgPool) -> anyhow::Result<()> {
        let db = seeded_db(pool).await?;

        db.delete(uuid!("00000000-0000-0000-0000-000000000004"))
            .await?;
        db.delete(uuid!("00000000-0000-0000-0000-000000000002"))
            .await?;
        assert_eq!(ids(db.find_all().await?), vec![5, 1, 3]);

        assert!(matches!(
            db.delete(uuid!("00000000-0000-0000-0000-000000000002"))
                .await,
            Err(StoreError::NotFound(_))
        ));

        Ok(())
    }
}
