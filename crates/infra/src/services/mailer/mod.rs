mod inmemory;
mod log;
mod resend;

pub use self::log::LogDeliveryGateway;
pub use inmemory::InMemoryDeliveryGateway;
pub use resend::ResendGateway;

/// Hands a finished email to some transport. An `Err` means the email was
/// not accepted; callers never retry.
#[async_trait::async_trait]
pub trait IDeliveryGateway: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}
