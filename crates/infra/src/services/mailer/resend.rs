use super::IDeliveryGateway;
use crate::config::ResendConfig;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}

/// Sends plain text emails through the Resend HTTP API
pub struct ResendGateway {
    client: Client,
    config: ResendConfig,
}

impl ResendGateway {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryGateway for ResendGateway {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let payload = ResendEmailRequest {
            from: &self.config.from_email,
            to: vec![to],
            subject,
            text: body,
        };

        let res = match self
            .client
            .post(&self.config.api_url)
            .header("authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Resend API POST error. Error message: {:?}",
                    e
                );
                return Err(anyhow::Error::new(e));
            }
        };

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(
                "[Unexpected Response] Resend API responded with {}. Body: {}",
                status, body
            );
            anyhow::bail!("Resend API responded with status {}", status);
        }

        info!("Email sent to {}", to);
        Ok(())
    }
}
