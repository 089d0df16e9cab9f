use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use weekfitter_notifier_domain::{CalendarEvent, User};
use weekfitter_notifier_infra::{
    Config, ISys, InMemoryDeliveryGateway, NotifierContext, Repos, StaticTimeSys,
};

pub struct TestContext {
    pub ctx: NotifierContext,
    pub sys: Arc<StaticTimeSys>,
    pub mailer: Arc<InMemoryDeliveryGateway>,
}

impl TestContext {
    pub fn set_now(&self, now: NaiveDateTime) {
        let at = StaticTimeSys::at_local(&self.ctx.config.timezone, now);
        self.sys.set(at.get_timestamp_millis());
    }
}

/// A wall clock time in June 2025
pub fn dt(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

pub fn setup(now: NaiveDateTime) -> TestContext {
    let config = Config::inmemory();
    let sys = Arc::new(StaticTimeSys::at_local(&config.timezone, now));
    let mailer = Arc::new(InMemoryDeliveryGateway::new());
    let ctx = NotifierContext {
        repos: Repos::create_inmemory(),
        config,
        sys: sys.clone(),
        mailer: mailer.clone(),
    };
    TestContext { ctx, sys, mailer }
}

pub async fn insert_user_and_event(
    ctx: &NotifierContext,
    start: Option<NaiveDateTime>,
) -> (User, CalendarEvent) {
    let user = User::new("runner@weekfitter.app");
    ctx.repos.users.insert(&user).await.unwrap();

    let mut event = CalendarEvent::new("Long run", Some(user.id));
    event.start_time = start;
    event.apply_defaults();
    ctx.repos.events.insert(&event).await.unwrap();

    (user, event)
}
