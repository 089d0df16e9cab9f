use super::{subscribers::CreateRemindersOnEventCreated, EventAttributes, SavedEvent};
use crate::shared::usecase::{Subscriber, UseCase};
use thiserror::Error;
use weekfitter_notifier_domain::{CalendarEvent, ID};
use weekfitter_notifier_infra::NotifierContext;

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub user_id: ID,
    pub attributes: EventAttributes,
    /// Offsets in minutes before the start
    pub reminders: Option<Vec<i64>>,
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("The user with id: {0}, was not found.")]
    UserNotFound(ID),
    #[error("The calendar event could not be stored")]
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for CreateEventUseCase {
    type Response = SavedEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id)),
        };

        let mut e = CalendarEvent::new(self.attributes.title.clone(), Some(user.id));
        self.attributes.apply_to(&mut e);

        ctx.repos
            .events
            .insert(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(SavedEvent {
            event: e,
            previous_start: None,
            reminders: self.reminders.take(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CreateRemindersOnEventCreated)]
    }
}
