use super::{create_event::CreateEventUseCase, update_event::UpdateEventUseCase, SavedEvent};
use crate::reminder::{
    create_reminders::CreateRemindersUseCase, delete_reminders::DeleteRemindersUseCase,
    rebase_reminders::RebaseRemindersUseCase,
};
use crate::shared::usecase::{execute, Subscriber};
use weekfitter_notifier_infra::NotifierContext;

async fn replace_reminders(saved: &SavedEvent, offsets: &[i64], ctx: &NotifierContext) {
    let delete = DeleteRemindersUseCase {
        event_id: saved.event.id,
    };
    if execute(delete, ctx).await.is_err() {
        // Creating now would leave the old reminders next to the new ones
        return;
    }

    let create = CreateRemindersUseCase {
        event: saved.event.clone(),
        offsets: offsets.to_vec(),
    };
    // Sideeffect, ignore result
    let _ = execute(create, ctx).await;
}

pub struct CreateRemindersOnEventCreated;

#[async_trait::async_trait]
impl Subscriber<CreateEventUseCase> for CreateRemindersOnEventCreated {
    async fn notify(&self, saved: &SavedEvent, ctx: &NotifierContext) {
        if let Some(offsets) = &saved.reminders {
            let create = CreateRemindersUseCase {
                event: saved.event.clone(),
                offsets: offsets.clone(),
            };
            // Sideeffect, ignore result
            let _ = execute(create, ctx).await;
        }
    }
}

pub struct SyncRemindersOnEventUpdated;

#[async_trait::async_trait]
impl Subscriber<UpdateEventUseCase> for SyncRemindersOnEventUpdated {
    async fn notify(&self, saved: &SavedEvent, ctx: &NotifierContext) {
        if let Some(offsets) = &saved.reminders {
            replace_reminders(saved, offsets, ctx).await;
            return;
        }

        match (saved.previous_start, saved.event.start_time) {
            (Some(old_start), Some(new_start)) if old_start != new_start => {
                let rebase = RebaseRemindersUseCase {
                    event_id: saved.event.id,
                    old_start,
                    new_start,
                };
                // Sideeffect, ignore result
                let _ = execute(rebase, ctx).await;
            }
            // Reminders cannot point at a start that no longer exists
            (Some(_), None) => {
                let delete = DeleteRemindersUseCase {
                    event_id: saved.event.id,
                };
                let _ = execute(delete, ctx).await;
            }
            _ => (),
        }
    }
}
