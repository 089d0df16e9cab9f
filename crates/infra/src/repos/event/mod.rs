mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;
use weekfitter_notifier_domain::{CalendarEvent, ID};

/// The slice of the event store the notifier depends on. Creating and
/// editing events is owned by the event CRUD layer.
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<CalendarEvent>;
    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn generate_default_event() -> CalendarEvent {
        let mut event = CalendarEvent::new("Morning run", Some(ID::default()));
        event.start_time = NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0));
        event.apply_defaults();
        event
    }

    #[tokio::test]
    async fn create_and_delete() {
        let repo = InMemoryEventRepo::new();
        let event = generate_default_event();

        // Insert
        assert!(repo.insert(&event).await.is_ok());

        // Find
        let get_event_res = repo.find(&event.id).await.unwrap();
        assert_eq!(get_event_res, event);

        // Delete
        let delete_res = repo.delete(&event.id).await.expect("To delete event by id");
        assert_eq!(delete_res, event);

        // Find
        assert!(repo.find(&event.id).await.is_none());
    }

    #[tokio::test]
    async fn update() {
        let repo = InMemoryEventRepo::new();
        let mut event = generate_default_event();

        // Insert
        assert!(repo.insert(&event).await.is_ok());

        event.title = "Evening run".into();

        // Save
        assert!(repo.save(&event).await.is_ok());

        // Find
        let saved = repo.find(&event.id).await.expect("To be event");
        assert_eq!(saved.title, "Evening run");
    }
}
