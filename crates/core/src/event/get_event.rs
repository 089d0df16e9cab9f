use super::EventView;
use crate::reminder::get_event_reminder_offsets::GetEventReminderOffsetsUseCase;
use crate::shared::usecase::{execute, UseCase};
use thiserror::Error;
use weekfitter_notifier_domain::ID;
use weekfitter_notifier_infra::NotifierContext;

#[derive(Debug)]
pub struct GetEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("The calendar event with id: {0}, was not found.")]
    NotFound(ID),
    #[error("The reminders of the calendar event could not be read")]
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for GetEventUseCase {
    type Response = EventView;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.is_owned_by(&self.user_id) => event,
            _ => return Err(UseCaseError::NotFound(self.event_id)),
        };

        let reminders = execute(
            GetEventReminderOffsetsUseCase {
                event: event.clone(),
            },
            ctx,
        )
        .await
        .map_err(|_| UseCaseError::StorageError)?;

        Ok(EventView { event, reminders })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::create_reminders::CreateRemindersUseCase;
    use crate::shared::test_helpers::{dt, insert_user_and_event, setup};

    #[tokio::test]
    async fn shows_offsets_instead_of_reminders() {
        let test = setup(dt(1, 8, 0));
        let (user, event) = insert_user_and_event(&test.ctx, Some(dt(1, 10, 0))).await;
        CreateRemindersUseCase {
            event: event.clone(),
            offsets: vec![60, 15],
        }
        .execute(&test.ctx)
        .await
        .unwrap();

        let mut usecase = GetEventUseCase {
            user_id: user.id,
            event_id: event.id,
        };
        let view = usecase.execute(&test.ctx).await.unwrap();

        assert_eq!(view.event, event);
        assert_eq!(view.reminders, vec![15, 60]);
    }
}
