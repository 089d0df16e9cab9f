use crate::shared::usecase::UseCase;
use tracing::{info, warn};
use weekfitter_notifier_domain::{derive_remind_at, CalendarEvent, Reminder, ReminderKind};
use weekfitter_notifier_infra::NotifierContext;

/// Attaches one unsent `Reminder` per positive offset (in minutes) to the
/// `CalendarEvent`. Calling it twice creates duplicates.
#[derive(Debug)]
pub struct CreateRemindersUseCase {
    pub event: CalendarEvent,
    pub offsets: Vec<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for CreateRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminders";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let (user_id, start) = match (self.event.user_id, self.event.start_time) {
            (Some(user_id), Some(start)) => (user_id, start),
            _ => return Ok(Vec::new()),
        };

        let mut reminders = Vec::with_capacity(self.offsets.len());
        for offset in &self.offsets {
            if *offset <= 0 {
                continue;
            }
            match derive_remind_at(start, *offset) {
                Some(remind_at) => reminders.push(Reminder::new(
                    self.event.id,
                    user_id,
                    remind_at,
                    ReminderKind::from_minutes(*offset),
                )),
                None => warn!(
                    "Skipping reminder {} minutes before event {}: the time is out of range",
                    offset, self.event.id
                ),
            }
        }

        if reminders.is_empty() {
            return Ok(reminders);
        }

        ctx.repos
            .reminders
            .bulk_insert(&reminders)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        for reminder in &reminders {
            info!(
                "Created reminder {} for event {} at {} ({})",
                reminder.id,
                reminder.event_id,
                reminder.remind_at,
                reminder.kind.map(|k| k.label()).unwrap_or("custom offset")
            );
        }

        Ok(reminders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{dt, insert_user_and_event, setup};

    #[tokio::test]
    async fn creates_one_reminder_per_positive_offset() {
        let test = setup(dt(1, 8, 0));
        let (user, event) = insert_user_and_event(&test.ctx, Some(dt(1, 10, 0))).await;

        let mut usecase = CreateRemindersUseCase {
            event: event.clone(),
            offsets: vec![30, 0, -15, 1440],
        };
        let reminders = usecase.execute(&test.ctx).await.unwrap();

        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].remind_at, dt(1, 9, 30));
        assert_eq!(reminders[0].kind, Some(ReminderKind::Minutes30));
        assert_eq!(reminders[1].kind, Some(ReminderKind::Day1));
        assert!(reminders.iter().all(|r| r.user_id == user.id && !r.sent));

        let stored = test.ctx.repos.reminders.find_by_event(&event.id).await.unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn skips_offsets_out_of_time_range() {
        let test = setup(dt(1, 8, 0));
        let (_, event) = insert_user_and_event(&test.ctx, Some(dt(1, 10, 0))).await;

        let mut usecase = CreateRemindersUseCase {
            event: event.clone(),
            offsets: vec![30, 10_000_000_000_000, i64::MAX],
        };
        let reminders = usecase.execute(&test.ctx).await.unwrap();

        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].remind_at, dt(1, 9, 30));
        let stored = test.ctx.repos.reminders.find_by_event(&event.id).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn ownerless_event_gets_no_reminders() {
        let test = setup(dt(1, 8, 0));
        let mut event = CalendarEvent::new("Swim", None);
        event.start_time = Some(dt(1, 10, 0));
        test.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = CreateRemindersUseCase {
            event: event.clone(),
            offsets: vec![30],
        };
        assert!(usecase.execute(&test.ctx).await.unwrap().is_empty());
        assert!(test
            .ctx
            .repos
            .reminders
            .find_by_event(&event.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn unscheduled_event_gets_no_reminders() {
        let test = setup(dt(1, 8, 0));
        let (_, event) = insert_user_and_event(&test.ctx, None).await;

        let mut usecase = CreateRemindersUseCase {
            event,
            offsets: vec![15],
        };
        assert!(usecase.execute(&test.ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_calls_are_not_deduplicated() {
        let test = setup(dt(1, 8, 0));
        let (_, event) = insert_user_and_event(&test.ctx, Some(dt(1, 10, 0))).await;

        for _ in 0..2 {
            let mut usecase = CreateRemindersUseCase {
                event: event.clone(),
                offsets: vec![15],
            };
            usecase.execute(&test.ctx).await.unwrap();
        }

        let stored = test.ctx.repos.reminders.find_by_event(&event.id).await.unwrap();
        assert_eq!(stored.len(), 2);
    }
}
