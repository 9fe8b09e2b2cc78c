use serde::Deserialize;

/// Payment-gateway connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Public key identifier, safe to expose to checkout clients.
    pub key_id: String,
    /// Secret key for API authentication. Never serialized back out.
    pub key_secret: String,
    pub base_url: String,
    /// ISO currency code used for all orders.
    pub currency: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: String::new(),
            base_url: "https://api.razorpay.com/v1".to_string(),
            currency: "INR".to_string(),
        }
    }
}
