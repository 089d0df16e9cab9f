pub mod create_reminders;
pub mod delete_reminders;
pub mod deliver_due_reminders;
mod engine;
pub mod get_event_reminder_offsets;
pub mod get_upcoming_reminders;
mod message;
pub mod rebase_reminders;

pub use deliver_due_reminders::DeliveryReport;
pub use engine::{NotificationEngine, NotificationError};
pub use message::{format_reminder_email, ReminderEmail};
