use super::{subscribers::SyncRemindersOnEventUpdated, EventAttributes, SavedEvent};
use crate::shared::usecase::{Subscriber, UseCase};
use thiserror::Error;
use weekfitter_notifier_domain::ID;
use weekfitter_notifier_infra::NotifierContext;

/// Replaces the attributes of an event. Its reminders follow: an explicit
/// offset list recreates them, otherwise a new start moves them.
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
    pub attributes: EventAttributes,
    pub reminders: Option<Vec<i64>>,
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("The calendar event with id: {0}, was not found.")]
    NotFound(ID),
    #[error("The calendar event could not be stored")]
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for UpdateEventUseCase {
    type Response = SavedEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let mut e = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.is_owned_by(&self.user_id) => event,
            _ => return Err(UseCaseError::NotFound(self.event_id)),
        };

        let previous_start = e.start_time;
        self.attributes.apply_to(&mut e);

        ctx.repos
            .events
            .save(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(SavedEvent {
            event: e,
            previous_start,
            reminders: self.reminders.take(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnEventUpdated)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::create_event::CreateEventUseCase;
    use crate::shared::test_helpers::{dt, setup, TestContext};
    use crate::shared::usecase::execute;
    use chrono::NaiveDateTime;
    use weekfitter_notifier_domain::User;

    fn attributes(start: Option<NaiveDateTime>) -> EventAttributes {
        EventAttributes {
            title: "Tempo run".into(),
            start_time: start,
            ..Default::default()
        }
    }

    async fn create(test: &TestContext, reminders: Vec<i64>) -> SavedEvent {
        let user = User::new("runner@weekfitter.app");
        test.ctx.repos.users.insert(&user).await.unwrap();
        let usecase = CreateEventUseCase {
            user_id: user.id,
            attributes: attributes(Some(dt(1, 10, 0))),
            reminders: Some(reminders),
        };
        execute(usecase, &test.ctx).await.unwrap()
    }

    async fn update(
        test: &TestContext,
        saved: &SavedEvent,
        start: Option<NaiveDateTime>,
        reminders: Option<Vec<i64>>,
    ) -> Vec<NaiveDateTime> {
        let usecase = UpdateEventUseCase {
            user_id: saved.event.user_id.unwrap(),
            event_id: saved.event.id,
            attributes: attributes(start),
            reminders,
        };
        execute(usecase, &test.ctx).await.unwrap();

        let mut remind_ats = test
            .ctx
            .repos
            .reminders
            .find_by_event(&saved.event.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.remind_at)
            .collect::<Vec<_>>();
        remind_ats.sort();
        remind_ats
    }

    #[tokio::test]
    async fn reschedule_moves_reminders() {
        let test = setup(dt(1, 8, 0));
        let saved = create(&test, vec![30]).await;

        let remind_ats = update(&test, &saved, Some(dt(2, 8, 0)), None).await;

        assert_eq!(remind_ats, vec![dt(2, 7, 30)]);
    }

    #[tokio::test]
    async fn explicit_offsets_replace_reminders() {
        let test = setup(dt(1, 8, 0));
        let saved = create(&test, vec![30, 60]).await;

        let remind_ats = update(&test, &saved, Some(dt(1, 10, 0)), Some(vec![5])).await;
        assert_eq!(remind_ats, vec![dt(1, 9, 55)]);

        let remind_ats = update(&test, &saved, Some(dt(1, 10, 0)), Some(Vec::new())).await;
        assert!(remind_ats.is_empty());
    }

    #[tokio::test]
    async fn unchanged_start_keeps_reminders() {
        let test = setup(dt(1, 8, 0));
        let saved = create(&test, vec![30]).await;

        let remind_ats = update(&test, &saved, Some(dt(1, 10, 0)), None).await;

        assert_eq!(remind_ats, vec![dt(1, 9, 30)]);
    }

    #[tokio::test]
    async fn unscheduling_drops_reminders() {
        let test = setup(dt(1, 8, 0));
        let saved = create(&test, vec![30]).await;

        assert!(update(&test, &saved, None, None).await.is_empty());
    }

    #[tokio::test]
    async fn only_the_owner_can_update() {
        let test = setup(dt(1, 8, 0));
        let saved = create(&test, vec![30]).await;

        let mut usecase = UpdateEventUseCase {
            user_id: ID::default(),
            event_id: saved.event.id,
            attributes: attributes(Some(dt(3, 10, 0))),
            reminders: None,
        };
        assert!(matches!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
