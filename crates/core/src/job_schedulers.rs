use crate::reminder::{DeliveryReport, NotificationEngine};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Drives reminder delivery: one tick as soon as it is started and then one
/// tick per interval until it is stopped.
///
/// Ticks run one after the other on a single task. Ticks missed while a slow
/// tick was running are dropped, never run back to back.
pub struct ReminderScheduler {
    engine: NotificationEngine,
    period: Duration,
    running: Option<(oneshot::Sender<()>, JoinHandle<()>)>,
}

impl ReminderScheduler {
    pub fn new(engine: NotificationEngine) -> Self {
        let period = Duration::from_secs(engine.context().config.reminder_tick_interval_secs);
        Self {
            engine,
            period,
            running: None,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Spawns the tick loop. Starting a running scheduler does nothing.
    pub fn start(&mut self) {
        if self.running.is_some() {
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let engine = self.engine.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        run_tick(&engine).await;
                    }
                }
            }
        });

        info!(
            "Reminder scheduler started with a tick every {} seconds",
            period.as_secs()
        );
        self.running = Some((shutdown_tx, handle));
    }

    /// Stops the tick loop. A tick in progress is allowed to finish.
    pub async fn stop(&mut self) {
        if let Some((shutdown_tx, handle)) = self.running.take() {
            let _ = shutdown_tx.send(());
            if let Err(e) = handle.await {
                error!("Reminder scheduler did not shut down cleanly: {:?}", e);
            }
            info!("Reminder scheduler stopped");
        }
    }
}

/// One delivery pass. Errors and panics end up in the log, never with the
/// caller, so that the next tick still runs.
pub async fn run_tick(engine: &NotificationEngine) -> Option<DeliveryReport> {
    let now = engine.context().clock().now();
    debug!("Reminder tick at {}", now);

    match AssertUnwindSafe(engine.deliver_due_reminders(now))
        .catch_unwind()
        .await
    {
        Ok(Ok(report)) => {
            if !report.is_empty() {
                info!(
                    "Reminder tick at {}: {} delivered, {} suppressed, {} failed, {} skipped",
                    now, report.delivered, report.suppressed, report.failed, report.skipped
                );
            }
            Some(report)
        }
        Ok(Err(e)) => {
            error!("Reminder tick at {} failed: {}", now, e);
            None
        }
        Err(_) => {
            error!("Reminder tick at {} panicked", now);
            None
        }
    }
}
