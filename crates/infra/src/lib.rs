mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, ResendConfig};
pub use repos::{DeleteResult, IEventRepo, IReminderRepo, IUserRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{Clock, ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct NotifierContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IDeliveryGateway>,
}

impl NotifierContext {
    /// Everything in memory with emails only logged. Meant for tests,
    /// which usually swap in a `StaticTimeSys` and an `InMemoryDeliveryGateway`.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::inmemory(),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(LogDeliveryGateway {}),
        }
    }

    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(connection_string) => Repos::create_postgres(connection_string).await?,
            None => Repos::create_inmemory(),
        };
        let mailer: Arc<dyn IDeliveryGateway> = match &config.resend {
            Some(resend) => Arc::new(ResendGateway::new(resend.clone())),
            None => Arc::new(LogDeliveryGateway {}),
        };
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        })
    }

    /// "Now" as a wall clock time in the application time zone
    pub fn clock(&self) -> Clock {
        Clock::new(self.sys.clone(), self.config.timezone)
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<NotifierContext> {
    let config = Config::new();
    info!(
        "Using time zone {} and a reminder tick every {} seconds",
        config.timezone, config.reminder_tick_interval_secs
    );
    NotifierContext::create(config).await
}
