use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::{Order, OrderRequest, PaymentGateway};

/// In-memory gateway that mints deterministic orders without any network
/// traffic. Drop-in test double for [`crate::rest::RestGateway`].
#[derive(Debug, Default)]
pub struct MockGateway {
    counter: AtomicU64,
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<Order, GatewayError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(Order {
            id: format!("order_mock_{n}"),
            amount: request.amount,
            currency: request.currency,
        })
    }

    fn key_id(&self) -> &str {
        "rzp_test_mock"
    }
}
