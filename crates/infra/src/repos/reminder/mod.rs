mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDateTime;
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use weekfitter_notifier_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Unsent `Reminder`s of the `User` firing at or after `from`, earliest first
    async fn find_upcoming_by_user(
        &self,
        user_id: &ID,
        from: NaiveDateTime,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Unsent `Reminder`s with `remind_at <= now` whose event has not started yet
    /// (or is unscheduled). `Reminder`s of deleted events are never due.
    async fn find_due(&self, now: NaiveDateTime) -> anyhow::Result<Vec<Reminder>>;
    /// Marks unsent `Reminder`s with `remind_at <= now` whose event already
    /// started at or before `now` as sent. Returns how many were suppressed.
    async fn suppress_stale(&self, now: NaiveDateTime) -> anyhow::Result<u64>;
    /// Persists new `remind_at` values. The `sent` flag is left untouched.
    async fn save_remind_at(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
    /// Flips `sent` from `false` to `true`. Returns `false` if the `Reminder`
    /// was already sent (or does not exist), so at most one caller wins.
    async fn claim(&self, reminder_id: &ID) -> anyhow::Result<bool>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult>;
}
