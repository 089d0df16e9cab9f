use super::message::format_reminder_email;
use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use tracing::{error, info, warn};
use weekfitter_notifier_domain::Reminder;
use weekfitter_notifier_infra::NotifierContext;

/// Sends an email for every reminder that is due at `now`.
///
/// A reminder is delivered at most once: it is claimed (marked as sent)
/// before the email is handed to the gateway, so a failed or lost email is
/// never retried. Reminders whose event has already started are marked as
/// sent without an email.
#[derive(Debug)]
pub struct DeliverDueRemindersUseCase {
    pub now: NaiveDateTime,
}

/// What happened to the reminders looked at during one delivery pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Handed to the delivery gateway
    pub delivered: u64,
    /// Marked as sent without an email because the event already started
    pub suppressed: u64,
    /// Marked as sent but the delivery gateway rejected the email
    pub failed: u64,
    /// Left unsent because the event or the recipient is gone
    pub skipped: u64,
}

impl DeliveryReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

enum Outcome {
    Delivered,
    Suppressed,
    Failed,
    Skipped,
    ClaimedElsewhere,
}

async fn deliver(reminder: &Reminder, now: NaiveDateTime, ctx: &NotifierContext) -> Outcome {
    let event = match ctx.repos.events.find(&reminder.event_id).await {
        Some(event) => event,
        None => {
            warn!(
                "Skipping reminder {} because event {} was not found",
                reminder.id, reminder.event_id
            );
            return Outcome::Skipped;
        }
    };

    if matches!(event.start_time, Some(start) if start < now) {
        return match ctx.repos.reminders.claim(&reminder.id).await {
            Ok(true) => {
                info!(
                    "Suppressed reminder {} because event {} already started",
                    reminder.id, event.id
                );
                Outcome::Suppressed
            }
            Ok(false) => Outcome::ClaimedElsewhere,
            Err(e) => {
                error!("Unable to claim reminder {}. Err: {:?}", reminder.id, e);
                Outcome::Failed
            }
        };
    }

    let user = match ctx.repos.users.find(&reminder.user_id).await {
        Some(user) => user,
        None => {
            warn!(
                "Skipping reminder {} because user {} was not found",
                reminder.id, reminder.user_id
            );
            return Outcome::Skipped;
        }
    };

    match ctx.repos.reminders.claim(&reminder.id).await {
        Ok(true) => (),
        Ok(false) => return Outcome::ClaimedElsewhere,
        Err(e) => {
            error!("Unable to claim reminder {}. Err: {:?}", reminder.id, e);
            return Outcome::Failed;
        }
    }

    let email = format_reminder_email(&event);
    match ctx
        .mailer
        .send_email(&user.email, &email.subject, &email.body)
        .await
    {
        Ok(_) => {
            info!(
                "Delivered reminder {} of event '{}' to {}",
                reminder.id, event.title, user.email
            );
            Outcome::Delivered
        }
        Err(e) => {
            error!(
                "Unable to deliver reminder {} to {}. It will not be retried. Err: {:?}",
                reminder.id, user.email, e
            );
            Outcome::Failed
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeliverDueRemindersUseCase {
    type Response = DeliveryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "DeliverDueReminders";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let now = self.now;
        let mut report = DeliveryReport {
            suppressed: ctx
                .repos
                .reminders
                .suppress_stale(now)
                .await
                .map_err(|_| UseCaseError::StorageError)?,
            ..Default::default()
        };

        let due = ctx
            .repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        for reminder in &due {
            match deliver(reminder, now, ctx).await {
                Outcome::Delivered => report.delivered += 1,
                Outcome::Suppressed => report.suppressed += 1,
                Outcome::Failed => report.failed += 1,
                Outcome::Skipped => report.skipped += 1,
                Outcome::ClaimedElsewhere => (),
            }
        }

        Ok(report)
    }
}
