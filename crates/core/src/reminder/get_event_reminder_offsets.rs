use crate::shared::usecase::UseCase;
use weekfitter_notifier_domain::{reminder_offsets, CalendarEvent};
use weekfitter_notifier_infra::NotifierContext;

/// Reconstructs the offsets (minutes before start, ascending) the reminders
/// of the event were created with
#[derive(Debug)]
pub struct GetEventReminderOffsetsUseCase {
    pub event: CalendarEvent,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for GetEventReminderOffsetsUseCase {
    type Response = Vec<i64>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventReminderOffsets";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let start = match self.event.start_time {
            Some(start) => start,
            None => return Ok(Vec::new()),
        };

        let reminders = ctx
            .repos
            .reminders
            .find_by_event(&self.event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder_offsets(start, &reminders))
    }
}
