use super::{
    create_reminders::CreateRemindersUseCase, delete_reminders::DeleteRemindersUseCase,
    deliver_due_reminders::DeliverDueRemindersUseCase, deliver_due_reminders::DeliveryReport,
    get_event_reminder_offsets::GetEventReminderOffsetsUseCase,
    get_upcoming_reminders::GetUpcomingRemindersUseCase, rebase_reminders::RebaseRemindersUseCase,
};
use crate::shared::usecase::execute;
use chrono::NaiveDateTime;
use thiserror::Error;
use weekfitter_notifier_domain::{CalendarEvent, Reminder, ID};
use weekfitter_notifier_infra::NotifierContext;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotificationError {
    #[error("The reminder store could not be reached")]
    Storage,
}

/// Owns the reminder lifecycle of calendar events: creating reminders from
/// offsets, moving them along with their event, deleting them and finally
/// delivering them by email.
#[derive(Clone)]
pub struct NotificationEngine {
    ctx: NotifierContext,
}

impl NotificationEngine {
    pub fn new(ctx: NotifierContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &NotifierContext {
        &self.ctx
    }

    pub async fn create_reminders_for_event(
        &self,
        event: &CalendarEvent,
        offsets: &[i64],
    ) -> Result<Vec<Reminder>, NotificationError> {
        let usecase = CreateRemindersUseCase {
            event: event.clone(),
            offsets: offsets.to_vec(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(|_| NotificationError::Storage)
    }

    pub async fn delete_reminders_for_event(&self, event_id: &ID) -> Result<u64, NotificationError> {
        let usecase = DeleteRemindersUseCase {
            event_id: *event_id,
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(|_| NotificationError::Storage)
    }

    pub async fn rebase_reminders_for_event(
        &self,
        event_id: &ID,
        old_start: NaiveDateTime,
        new_start: NaiveDateTime,
    ) -> Result<Vec<Reminder>, NotificationError> {
        let usecase = RebaseRemindersUseCase {
            event_id: *event_id,
            old_start,
            new_start,
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(|_| NotificationError::Storage)
    }

    pub async fn deliver_due_reminders(
        &self,
        now: NaiveDateTime,
    ) -> Result<DeliveryReport, NotificationError> {
        let usecase = DeliverDueRemindersUseCase { now };
        execute(usecase, &self.ctx)
            .await
            .map_err(|_| NotificationError::Storage)
    }

    pub async fn offsets_for_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<Vec<i64>, NotificationError> {
        let usecase = GetEventReminderOffsetsUseCase {
            event: event.clone(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(|_| NotificationError::Storage)
    }

    pub async fn upcoming_reminders(&self, user_id: &ID) -> Result<Vec<Reminder>, NotificationError> {
        let usecase = GetUpcomingRemindersUseCase { user_id: *user_id };
        execute(usecase, &self.ctx)
            .await
            .map_err(|_| NotificationError::Storage)
    }
}
