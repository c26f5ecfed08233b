//! Read-only view of the payment gateway used by the verification handler.

use crate::models::{OrderRecord, PaymentRecord};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Cashfree credentials not configured")]
    NotConfigured,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx reply. `message` is the gateway's own wording.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("invalid gateway response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// All payment attempts recorded against `order_id`, in gateway order.
    async fn list_payments(&self, order_id: &str) -> Result<Vec<PaymentRecord>, GatewayError>;

    async fn fetch_order(&self, order_id: &str) -> Result<OrderRecord, GatewayError>;
}
