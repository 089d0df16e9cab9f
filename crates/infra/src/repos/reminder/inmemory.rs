use super::IReminderRepo;
use crate::repos::event::InMemoryEventRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDateTime;
use std::sync::Arc;
use weekfitter_notifier_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
    // Needed to evaluate the event start condition of the due query
    events: Arc<InMemoryEventRepo>,
}

impl InMemoryReminderRepo {
    pub fn new(events: Arc<InMemoryEventRepo>) -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
            events,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            insert(reminder, &self.reminders);
        }
        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.event_id == *event_id))
    }

    async fn find_upcoming_by_user(
        &self,
        user_id: &ID,
        from: NaiveDateTime,
    ) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| {
            r.user_id == *user_id && !r.sent && r.remind_at >= from
        });
        reminders.sort_by_key(|r| r.remind_at);
        Ok(reminders)
    }

    async fn find_due(&self, now: NaiveDateTime) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| {
            r.is_due(&now)
                && match self.events.start_time_of(&r.event_id) {
                    Some(Some(start)) => start > now,
                    Some(None) => true,
                    None => false,
                }
        }))
    }

    async fn suppress_stale(&self, now: NaiveDateTime) -> anyhow::Result<u64> {
        let stale = find_by(&self.reminders, |r| {
            r.is_due(&now)
                && matches!(self.events.start_time_of(&r.event_id), Some(Some(start)) if start <= now)
        })
        .into_iter()
        .map(|r| r.id)
        .collect::<Vec<_>>();

        Ok(update_many(
            &self.reminders,
            |r| stale.contains(&r.id),
            |r| r.sent = true,
        ))
    }

    async fn save_remind_at(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            update_many(
                &self.reminders,
                |r| r.id == reminder.id,
                |r| r.remind_at = reminder.remind_at,
            );
        }
        Ok(())
    }

    async fn claim(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        let claimed = update_many(
            &self.reminders,
            |r| r.id == *reminder_id && !r.sent,
            |r| r.sent = true,
        );
        Ok(claimed == 1)
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| r.event_id == *event_id))
    }
}
