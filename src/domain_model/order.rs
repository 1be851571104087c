use super::{LineItem, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode, Type};
use std::fmt;
use std::str::FromStr;

/// A finalized purchase. Immutable once created; only written by the
/// checkout service after a verified payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "paymentId")]
    pub payment_id: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    #[serde(rename = "totalAmount")]
    pub total_amount: i64,
    pub status: OrderStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// PAID is the only state modeled; orders are never updated after creation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PAID")]
    Paid,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Paid => "PAID",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "PAID" => Ok(Self::Paid),
            _ => anyhow::bail!("unknown order status: {}", s),
        }
    }
}

impl<'r, DB: Database> Decode<'r, DB> for OrderStatus
where
    &'r str: Decode<'r, DB>,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<DB>>::decode(value)?;
        Ok(s.parse()?)
    }
}

impl<'q, DB: Database> Encode<'q, DB> for OrderStatus
where
    String: Encode<'q, DB>,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        self.to_string().encode_by_ref(buf)
    }
}

impl<DB: Database> Type<DB> for OrderStatus
where
    String: Type<DB>,
{
    fn type_info() -> <DB as Database>::TypeInfo {
        <String as Type<DB>>::type_info()
    }
}
