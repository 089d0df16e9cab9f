pub mod event;
mod job_schedulers;
pub mod reminder;
mod shared;

pub use job_schedulers::ReminderScheduler;
pub use reminder::{DeliveryReport, NotificationEngine, NotificationError};
pub use shared::usecase::{execute, Subscriber, UseCase};
