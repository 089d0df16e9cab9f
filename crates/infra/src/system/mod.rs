use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to
pub struct StaticTimeSys {
    timestamp_millis: AtomicI64,
}

impl StaticTimeSys {
    pub fn new(timestamp_millis: i64) -> Self {
        Self {
            timestamp_millis: AtomicI64::new(timestamp_millis),
        }
    }

    /// A clock showing the given wall clock time in `tz`
    pub fn at_local(tz: &Tz, local: NaiveDateTime) -> Self {
        let timestamp_millis = tz
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| Utc.from_utc_datetime(&local).timestamp_millis());
        Self::new(timestamp_millis)
    }

    pub fn set(&self, timestamp_millis: i64) {
        self.timestamp_millis.store(timestamp_millis, Ordering::SeqCst);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.timestamp_millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis.load(Ordering::SeqCst)
    }
}

/// Tells the time in the application time zone.
///
/// Stored event and reminder times carry no zone, so every comparison
/// against them must go through `Clock::now`.
#[derive(Clone)]
pub struct Clock {
    sys: Arc<dyn ISys>,
    timezone: Tz,
}

impl Clock {
    pub fn new(sys: Arc<dyn ISys>, timezone: Tz) -> Self {
        Self { sys, timezone }
    }

    pub fn now(&self) -> NaiveDateTime {
        let millis = self.sys.get_timestamp_millis();
        match self.timezone.timestamp_millis_opt(millis).single() {
            Some(dt) => dt.naive_local(),
            None => Utc::now().with_timezone(&self.timezone).naive_local(),
        }
    }
}
