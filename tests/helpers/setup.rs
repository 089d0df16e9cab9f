use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use weekfitter_notifier_core::NotificationEngine;
use weekfitter_notifier_domain::User;
use weekfitter_notifier_infra::{
    Config, ISys, InMemoryDeliveryGateway, NotifierContext, Repos, StaticTimeSys,
};

pub struct TestApp {
    pub ctx: NotifierContext,
    pub engine: NotificationEngine,
    pub sys: Arc<StaticTimeSys>,
    pub mailer: Arc<InMemoryDeliveryGateway>,
    pub user: User,
}

impl TestApp {
    /// Moves the fixed clock to the given wall clock time
    pub fn set_now(&self, now: NaiveDateTime) {
        let at = StaticTimeSys::at_local(&self.ctx.config.timezone, now);
        self.sys.set(at.get_timestamp_millis());
    }

    pub fn now(&self) -> NaiveDateTime {
        self.ctx.clock().now()
    }
}

pub fn datetime(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .expect("Valid date")
}

// In memory application with a fixed clock and a recording mailer
pub async fn spawn_app(now: NaiveDateTime) -> TestApp {
    let config = Config::inmemory();
    let sys = Arc::new(StaticTimeSys::at_local(&config.timezone, now));
    let mailer = Arc::new(InMemoryDeliveryGateway::new());
    let ctx = NotifierContext {
        repos: Repos::create_inmemory(),
        config,
        sys: sys.clone(),
        mailer: mailer.clone(),
    };

    let user = User::new("athlete@weekfitter.app");
    ctx.repos
        .users
        .insert(&user)
        .await
        .expect("To insert user");

    TestApp {
        engine: NotificationEngine::new(ctx.clone()),
        ctx,
        sys,
        mailer,
        user,
    }
}
