use crate::shared::usecase::UseCase;
use tracing::info;
use weekfitter_notifier_domain::ID;
use weekfitter_notifier_infra::NotifierContext;

/// Removes every `Reminder` of the event in one go. Deleting reminders of
/// an event that has none is not an error.
#[derive(Debug)]
pub struct DeleteRemindersUseCase {
    pub event_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for DeleteRemindersUseCase {
    /// Number of deleted reminders
    type Response = u64;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminders";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let res = ctx
            .repos
            .reminders
            .delete_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if res.deleted_count > 0 {
            info!(
                "Deleted {} reminders of event {}",
                res.deleted_count, self.event_id
            );
        }
        Ok(res.deleted_count)
    }
}
