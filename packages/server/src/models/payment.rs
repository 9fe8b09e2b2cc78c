use serde::{Deserialize, Serialize};

/// Everything a client-side checkout widget needs to start the gateway flow.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PaymentOrderResponse {
    pub course_id: i32,
    pub course_title: String,
    /// Gateway-side order identifier.
    pub order_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    /// Public key identifier for the checkout widget.
    pub key_id: String,
}

/// Query parameters of the gateway return-URL callback.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PaymentSuccessQuery {
    /// Gateway-supplied payment identifier. Absent on failed checkouts.
    pub payment_id: Option<String>,
}

/// Convert a course price in major units to the gateway's integer minor
/// units, truncating toward zero.
pub fn amount_in_minor_units(price: f64) -> i64 {
    (price * 100.0) as i64
}
