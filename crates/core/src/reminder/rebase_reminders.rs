use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use tracing::{info, warn};
use weekfitter_notifier_domain::{rebase_reminders, Reminder, ID};
use weekfitter_notifier_infra::NotifierContext;

/// Moves the reminders of a rescheduled event so that each one keeps its
/// lead time relative to the new start.
#[derive(Debug)]
pub struct RebaseRemindersUseCase {
    pub event_id: ID,
    pub old_start: NaiveDateTime,
    pub new_start: NaiveDateTime,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for RebaseRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "RebaseReminders";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let mut reminders = ctx
            .repos
            .reminders
            .find_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if reminders.is_empty() {
            return Ok(reminders);
        }

        for reminder_id in rebase_reminders(&mut reminders, self.old_start, self.new_start) {
            warn!(
                "Reminder {} of event {} cannot be moved to start {} and keeps its time",
                reminder_id, self.event_id, self.new_start
            );
        }

        ctx.repos
            .reminders
            .save_remind_at(&reminders)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        info!(
            "Moved {} reminders of event {} from start {} to {}",
            reminders.len(),
            self.event_id,
            self.old_start,
            self.new_start
        );

        Ok(reminders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::create_reminders::CreateRemindersUseCase;
    use crate::shared::test_helpers::{dt, insert_user_and_event, setup};

    #[tokio::test]
    async fn keeps_lead_time_of_every_reminder() {
        let test = setup(dt(1, 8, 0));
        let (_, event) = insert_user_and_event(&test.ctx, Some(dt(1, 10, 0))).await;
        CreateRemindersUseCase {
            event: event.clone(),
            offsets: vec![30, 120],
        }
        .execute(&test.ctx)
        .await
        .unwrap();

        let mut usecase = RebaseRemindersUseCase {
            event_id: event.id,
            old_start: dt(1, 10, 0),
            new_start: dt(2, 8, 0),
        };
        usecase.execute(&test.ctx).await.unwrap();

        let stored = test.ctx.repos.reminders.find_by_event(&event.id).await.unwrap();
        let mut remind_ats = stored.iter().map(|r| r.remind_at).collect::<Vec<_>>();
        remind_ats.sort();
        assert_eq!(remind_ats, vec![dt(2, 6, 0), dt(2, 7, 30)]);
    }

    #[tokio::test]
    async fn nothing_to_rebase() {
        let test = setup(dt(1, 8, 0));
        let mut usecase = RebaseRemindersUseCase {
            event_id: ID::default(),
            old_start: dt(1, 10, 0),
            new_start: dt(2, 8, 0),
        };
        assert!(usecase.execute(&test.ctx).await.unwrap().is_empty());
    }
}
