//! Cashfree payment and order records, as returned by the `2023-08-01` API.
//!
//! Every field is optional: the service reshapes whatever the gateway sends
//! and reports absent fields as `null` instead of inventing values.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
    NotAttempted,
    Pending,
    Failed,
    UserDropped,
    Void,
    Cancelled,
    /// Status strings this service does not know yet, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Active,
    Paid,
    Expired,
    Terminated,
    TerminationRequested,
    #[serde(untagged)]
    Other(String),
}

/// Gateway payment id. Older API versions send a number, newer ones a string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CfPaymentId {
    Number(u64),
    Text(String),
}

/// One payment attempt against an order.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PaymentRecord {
    #[serde(default)]
    pub cf_payment_id: Option<CfPaymentId>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub payment_amount: Option<Number>,
    #[serde(default)]
    pub payment_currency: Option<String>,
    /// Provider-specific object, e.g. `{"upi": {"upi_id": "..."}}`.
    #[serde(default)]
    pub payment_method: Option<Value>,
    #[serde(default)]
    pub payment_time: Option<String>,
}

impl PaymentRecord {
    pub fn parsed_time(&self) -> Option<DateTime<FixedOffset>> {
        self.payment_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OrderRecord {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
    #[serde(default)]
    pub order_amount: Option<Number>,
    #[serde(default)]
    pub order_currency: Option<String>,
}

/// Pick the attempt to report for an order.
///
/// The latest `payment_time` wins. Attempts with a readable timestamp beat
/// those without one, and ties keep the gateway's list order, so the first
/// listed entry is chosen when no timestamp can be read.
pub fn representative_payment(payments: &[PaymentRecord]) -> Option<&PaymentRecord> {
    let (first, rest) = payments.split_first()?;

    let mut selected = first;
    let mut selected_time = first.parsed_time();

    for payment in rest {
        let Some(time) = payment.parsed_time() else {
            continue;
        };
        if selected_time.map_or(true, |current| time > current) {
            selected = payment;
            selected_time = Some(time);
        }
    }

    Some(selected)
}
