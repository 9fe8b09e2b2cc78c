use async_trait::async_trait;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::{Order, OrderRequest, PaymentGateway};

/// REST client for the gateway's orders API, authenticated with HTTP basic
/// auth over the configured key pair.
pub struct RestGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl RestGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PaymentGateway for RestGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<Order, GatewayError> {
        let url = format!("{}/orders", self.config.base_url.trim_end_matches('/'));

        // payment_capture tells the gateway to capture the charge
        // immediately instead of leaving it authorized.
        let body = serde_json::json!({
            "amount": request.amount,
            "currency": request.currency,
            "payment_capture": 1,
        });

        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json::<Order>().await?)
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }
}
