pub mod create_event;
pub mod delete_event;
pub mod get_event;
mod subscribers;
pub mod update_event;

use chrono::NaiveDateTime;
use weekfitter_notifier_domain::{ActivityType, CalendarEvent, SportType};

/// The client editable fields of a `CalendarEvent`
#[derive(Debug, Clone, Default)]
pub struct EventAttributes {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `ActivityType::Other`
    pub category: Option<ActivityType>,
    pub sport_type: Option<SportType>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub all_day: bool,
    pub duration: Option<f64>,
    pub distance: Option<f64>,
    pub sport_description: Option<String>,
}

impl EventAttributes {
    fn apply_to(&self, event: &mut CalendarEvent) {
        event.title = self.title.clone();
        event.description = self.description.clone();
        event.category = self.category.unwrap_or_default();
        event.sport_type = self.sport_type;
        event.start_time = self.start_time;
        event.end_time = self.end_time;
        event.all_day = self.all_day;
        event.duration = self.duration;
        event.distance = self.distance;
        event.sport_description = self.sport_description.clone();
        event.apply_defaults();
    }
}

/// A persisted `CalendarEvent` together with what its reminders should
/// become
#[derive(Debug, Clone)]
pub struct SavedEvent {
    pub event: CalendarEvent,
    /// The start before the save, `None` for new events
    pub previous_start: Option<NaiveDateTime>,
    /// Offsets in minutes sent along with the save. `Some` (even when
    /// empty) replaces all existing reminders.
    pub reminders: Option<Vec<i64>>,
}

/// An event as shown to clients, with reminder offsets instead of reminders
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    pub event: CalendarEvent,
    pub reminders: Vec<i64>,
}
