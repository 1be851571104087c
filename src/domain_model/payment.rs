use serde::{Deserialize, Serialize};

/// A gateway-side record of an amount to be collected. Ephemeral: owned by
/// the gateway, referenced here only by the id it hands back. The amount is
/// in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}
