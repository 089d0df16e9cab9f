use chrono_tz::Tz;
use tracing::{info, warn};

const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Prague;
const DEFAULT_TICK_INTERVAL_SECS: u64 = 30;
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";
const DEFAULT_RESEND_FROM_EMAIL: &str = "WeekFitter <notifications@weekfitter.app>";

#[derive(Debug, Clone)]
pub struct Config {
    /// The zone every stored wall clock time (event start, reminder time)
    /// is expressed in. "Now" is always computed in this zone before it is
    /// compared to stored values.
    pub timezone: Tz,
    /// Seconds between two runs of the reminder delivery job
    pub reminder_tick_interval_secs: u64,
    /// Postgres connection string. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Settings for the Resend email API. Emails are only logged when absent.
    pub resend: Option<ResendConfig>,
}

#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub api_url: String,
    pub from_email: String,
}

impl Config {
    pub fn new() -> Self {
        let timezone = match std::env::var("APP_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given APP_TIMEZONE: {} is not a valid IANA time zone, falling back to: {}.",
                        tz, DEFAULT_TIMEZONE
                    );
                    DEFAULT_TIMEZONE
                }
            },
            Err(_) => DEFAULT_TIMEZONE,
        };

        let reminder_tick_interval_secs = match std::env::var("REMINDER_TICK_INTERVAL_SECS") {
            Ok(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "The given REMINDER_TICK_INTERVAL_SECS: {} is not valid, falling back to the default interval: {}.",
                        secs, DEFAULT_TICK_INTERVAL_SECS
                    );
                    DEFAULT_TICK_INTERVAL_SECS
                }
            },
            Err(_) => DEFAULT_TICK_INTERVAL_SECS,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            warn!("Did not find DATABASE_URL environment variable. Reminders will only be kept in memory.");
        }

        let resend = match std::env::var("RESEND_API_KEY") {
            Ok(api_key) => Some(ResendConfig {
                api_key,
                api_url: std::env::var("RESEND_API_URL")
                    .unwrap_or_else(|_| DEFAULT_RESEND_API_URL.into()),
                from_email: std::env::var("RESEND_FROM_EMAIL")
                    .unwrap_or_else(|_| DEFAULT_RESEND_FROM_EMAIL.into()),
            }),
            Err(_) => {
                info!("Did not find RESEND_API_KEY environment variable. Reminder emails will only be logged.");
                None
            }
        };

        Self {
            timezone,
            reminder_tick_interval_secs,
            database_url,
            resend,
        }
    }

    /// Configuration without any external services, used for tests
    pub fn inmemory() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            reminder_tick_interval_secs: DEFAULT_TICK_INTERVAL_SECS,
            database_url: None,
            resend: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
