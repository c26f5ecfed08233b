use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use validator::Validate;

use crate::models::{CfPaymentId, OrderRecord, OrderStatus, PaymentRecord, PaymentStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyPaymentQuery {
    #[validate(required, length(min = 1))]
    pub order_id: Option<String>,
}

/// Snapshot of an order's representative payment and the order itself.
///
/// Absent upstream fields serialize as `null`, so all keys are always present.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_status: Option<PaymentStatus>,
    pub payment_amount: Option<Number>,
    pub payment_currency: Option<String>,
    pub payment_method: Option<Value>,
    pub payment_time: Option<String>,
    pub cf_payment_id: Option<CfPaymentId>,
    pub order_status: Option<OrderStatus>,
    pub order_amount: Option<Number>,
}

impl VerifyPaymentResponse {
    pub fn new(order_id: String, payment: PaymentRecord, order: OrderRecord) -> Self {
        Self {
            success: true,
            order_id,
            payment_status: payment.payment_status,
            payment_amount: payment.payment_amount,
            payment_currency: payment.payment_currency,
            payment_method: payment.payment_method,
            payment_time: payment.payment_time,
            cf_payment_id: payment.cf_payment_id,
            order_status: order.order_status,
            order_amount: order.order_amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentNotFoundResponse {
    pub error: String,
    pub order_id: String,
}

impl PaymentNotFoundResponse {
    pub fn new(order_id: String) -> Self {
        Self {
            error: "Payment not found".to_string(),
            order_id,
        }
    }
}
