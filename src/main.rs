mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use tracing::info;
use weekfitter_notifier_core::{NotificationEngine, ReminderScheduler};
use weekfitter_notifier_infra::setup_context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("weekfitter_notifier".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    let mut scheduler = ReminderScheduler::new(NotificationEngine::new(context));
    scheduler.start();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, waiting for the current reminder tick");
    scheduler.stop().await;

    Ok(())
}
