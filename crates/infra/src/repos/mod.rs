mod event;
mod reminder;
mod shared;
mod user;

pub use event::IEventRepo;
use event::{InMemoryEventRepo, PostgresEventRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
pub use shared::repo::DeleteResult;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let events = Arc::new(InMemoryEventRepo::new());
        Self {
            events: events.clone(),
            users: Arc::new(InMemoryUserRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new(events)),
        }
    }
}
