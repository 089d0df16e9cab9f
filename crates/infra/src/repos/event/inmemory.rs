use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDateTime;
use weekfitter_notifier_domain::{CalendarEvent, ID};

pub struct InMemoryEventRepo {
    calendar_events: std::sync::Mutex<Vec<CalendarEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            calendar_events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// `None` if the event does not exist, `Some(None)` if it is unscheduled
    pub(crate) fn start_time_of(&self, event_id: &ID) -> Option<Option<NaiveDateTime>> {
        find(event_id, &self.calendar_events).map(|e| e.start_time)
    }
}

impl Default for InMemoryEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        insert(e, &self.calendar_events);
        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        save(e, &self.calendar_events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        find(event_id, &self.calendar_events)
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        delete(event_id, &self.calendar_events)
    }
}
