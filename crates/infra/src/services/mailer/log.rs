use super::IDeliveryGateway;
use tracing::info;

/// Used when no email provider is configured
pub struct LogDeliveryGateway {}

#[async_trait::async_trait]
impl IDeliveryGateway for LogDeliveryGateway {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        info!(to, subject, body, "Email delivery is not configured, logging email instead");
        Ok(())
    }
}
