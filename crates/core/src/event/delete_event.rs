use crate::reminder::delete_reminders::DeleteRemindersUseCase;
use crate::shared::usecase::{execute, UseCase};
use thiserror::Error;
use weekfitter_notifier_domain::{CalendarEvent, ID};
use weekfitter_notifier_infra::NotifierContext;

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("The calendar event with id: {0}, was not found.")]
    NotFound(ID),
    #[error("The calendar event could not be deleted")]
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for DeleteEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.is_owned_by(&self.user_id) => event,
            _ => return Err(UseCaseError::NotFound(self.event_id)),
        };

        // Reminders go first, the storage cascade only catches leftovers
        execute(DeleteRemindersUseCase { event_id: event.id }, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.repos
            .events
            .delete(&event.id)
            .await
            .ok_or(UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::create_reminders::CreateRemindersUseCase;
    use crate::shared::test_helpers::{dt, insert_user_and_event, setup};

    #[tokio::test]
    async fn deletes_reminders_with_the_event() {
        let test = setup(dt(1, 8, 0));
        let (user, event) = insert_user_and_event(&test.ctx, Some(dt(1, 10, 0))).await;
        CreateRemindersUseCase {
            event: event.clone(),
            offsets: vec![15, 30, 60],
        }
        .execute(&test.ctx)
        .await
        .unwrap();

        let usecase = DeleteEventUseCase {
            user_id: user.id,
            event_id: event.id,
        };
        let deleted = execute(usecase, &test.ctx).await.unwrap();

        assert_eq!(deleted.id, event.id);
        assert!(test.ctx.repos.events.find(&event.id).await.is_none());
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
    async fn deleting_missing_event_fails() {
        let test = setup(dt(1, 8, 0));
        let usecase = DeleteEventUseCase {
            user_id: ID::default(),
            event_id: ID::default(),
        };
        assert!(matches!(
            execute(usecase, &test.ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
