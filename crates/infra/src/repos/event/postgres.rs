use super::IEventRepo;
use anyhow::Context;
use chrono::NaiveDateTime;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use weekfitter_notifier_domain::{CalendarEvent, ID};

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    user_uid: Option<Uuid>,
    title: String,
    description: Option<String>,
    category: String,
    sport_type: Option<String>,
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    all_day: bool,
    duration: Option<f64>,
    distance: Option<f64>,
    sport_description: Option<String>,
}

impl TryFrom<EventRaw> for CalendarEvent {
    type Error = anyhow::Error;

    fn try_from(e: EventRaw) -> anyhow::Result<Self> {
        let sport_type = match e.sport_type {
            Some(sport_type) => Some(sport_type.parse()?),
            None => None,
        };
        Ok(Self {
            id: e.event_uid.into(),
            title: e.title,
            description: e.description,
            category: e.category.parse()?,
            sport_type,
            start_time: e.start_time,
            end_time: e.end_time,
            all_day: e.all_day,
            duration: e.duration,
            distance: e.distance,
            sport_description: e.sport_description,
            user_id: e.user_uid.map(ID::from),
        })
    }
}

fn into_event(raw: EventRaw) -> Option<CalendarEvent> {
    let event_uid = raw.event_uid;
    match CalendarEvent::try_from(raw) {
        Ok(event) => Some(event),
        Err(e) => {
            error!("Unable to read calendar event {}. Err: {:?}", event_uid, e);
            None
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calendar_events(
                event_uid,
                user_uid,
                title,
                description,
                category,
                sport_type,
                start_time,
                end_time,
                all_day,
                duration,
                distance,
                sport_description
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.user_id.map(|id| id.inner()))
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.category.as_str())
        .bind(e.sport_type.map(|s| s.as_str()))
        .bind(e.start_time)
        .bind(e.end_time)
        .bind(e.all_day)
        .bind(e.duration)
        .bind(e.distance)
        .bind(&e.sport_description)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to insert calendar event {}", e.id))?;

        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE calendar_events SET
                user_uid = $2,
                title = $3,
                description = $4,
                category = $5,
                sport_type = $6,
                start_time = $7,
                end_time = $8,
                all_day = $9,
                duration = $10,
                distance = $11,
                sport_description = $12
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.user_id.map(|id| id.inner()))
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.category.as_str())
        .bind(e.sport_type.map(|s| s.as_str()))
        .bind(e.start_time)
        .bind(e.end_time)
        .bind(e.all_day)
        .bind(e.duration)
        .bind(e.distance)
        .bind(&e.sport_description)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to save calendar event {}", e.id))?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        let res = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.and_then(into_event),
            Err(e) => {
                error!("Unable to find calendar event {}. Err: {:?}", event_id, e);
                None
            }
        }
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        let res = sqlx::query_as::<_, EventRaw>(
            r#"
            DELETE FROM calendar_events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.and_then(into_event),
            Err(e) => {
                error!("Unable to delete calendar event {}. Err: {:?}", event_id, e);
                None
            }
        }
    }
}
