mod event;
mod reminder;
mod shared;
mod user;

pub use event::{ActivityType, CalendarEvent, InvalidEnumValue, SportType};
pub use reminder::{derive_remind_at, rebase_reminders, reminder_offsets, Reminder, ReminderKind};
pub use shared::entity::{Entity, ID};
pub use user::User;
