use super::{IDeliveryGateway, SentEmail};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

/// Keeps every accepted email around so that tests can inspect them
pub struct InMemoryDeliveryGateway {
    outbox: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl InMemoryDeliveryGateway {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// While failing, every email is rejected and nothing is recorded
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox().clone()
    }

    fn outbox(&self) -> MutexGuard<'_, Vec<SentEmail>> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryDeliveryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IDeliveryGateway for InMemoryDeliveryGateway {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("Email transport to {} is unavailable", to);
        }
        self.outbox().push(SentEmail {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        });
        Ok(())
    }
}
