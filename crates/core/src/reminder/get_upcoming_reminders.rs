use crate::shared::usecase::UseCase;
use weekfitter_notifier_domain::{Reminder, ID};
use weekfitter_notifier_infra::NotifierContext;

/// The unsent reminders of a `User` that fire from now on, earliest first
#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingReminders";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.clock().now();
        ctx.repos
            .reminders
            .find_upcoming_by_user(&self.user_id, now)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
