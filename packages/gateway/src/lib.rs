pub mod config;
pub mod error;
pub mod mock;
pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// An order opened on the payment gateway, consumed as-is from its API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Gateway-side order identifier handed to client-side checkout.
    pub id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
}

/// Parameters for opening an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
}

/// Client handle to the payment gateway.
///
/// Implementations are constructed from configuration and injected into
/// application state; nothing in this crate holds a process-global client.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open an order for a pending charge. A single call, no retries.
    async fn create_order(&self, request: OrderRequest) -> Result<Order, GatewayError>;

    /// The public key identifier exposed to client-side checkout.
    fn key_id(&self) -> &str;
}
