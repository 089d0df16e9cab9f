use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDateTime;
use sqlx::{types::Uuid, FromRow, PgPool};
use weekfitter_notifier_domain::{Reminder, ReminderKind, ID};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    event_uid: Uuid,
    user_uid: Uuid,
    remind_at: NaiveDateTime,
    sent: bool,
    kind: Option<String>,
}

impl From<ReminderRaw> for Reminder {
    fn from(r: ReminderRaw) -> Self {
        Self {
            id: r.reminder_uid.into(),
            event_id: r.event_uid.into(),
            user_id: r.user_uid.into(),
            remind_at: r.remind_at,
            sent: r.sent,
            kind: r.kind.as_deref().and_then(ReminderKind::parse),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for reminder in reminders {
            sqlx::query(
                r#"
            INSERT INTO reminders
            (reminder_uid, event_uid, user_uid, remind_at, sent, kind)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
            )
            .bind(reminder.id.inner_ref())
            .bind(reminder.event_id.inner_ref())
            .bind(reminder.user_id.inner_ref())
            .bind(reminder.remind_at)
            .bind(reminder.sent)
            .bind(reminder.kind.map(|k| k.as_str()))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.event_uid = $1
            ORDER BY r.remind_at
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_upcoming_by_user(
        &self,
        user_id: &ID,
        from: NaiveDateTime,
    ) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1 AND r.sent = false AND r.remind_at >= $2
            ORDER BY r.remind_at
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_due(&self, now: NaiveDateTime) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT r.* FROM reminders AS r
            INNER JOIN calendar_events AS e
                ON e.event_uid = r.event_uid
            WHERE r.sent = false
                AND r.remind_at <= $1
                AND (e.start_time IS NULL OR e.start_time > $1)
            ORDER BY r.remind_at
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn suppress_stale(&self, now: NaiveDateTime) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE reminders AS r
                SET sent = true
            FROM calendar_events AS e
            WHERE e.event_uid = r.event_uid
                AND r.sent = false
                AND r.remind_at <= $1
                AND e.start_time <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn save_remind_at(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for reminder in reminders {
            sqlx::query(
                r#"
            UPDATE reminders
                SET remind_at = $2
            WHERE reminder_uid = $1
            "#,
            )
            .bind(reminder.id.inner_ref())
            .bind(reminder.remind_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn claim(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
                SET sent = true
            WHERE reminder_uid = $1 AND sent = false
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders AS r
            WHERE r.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected(),
        })
    }
}
