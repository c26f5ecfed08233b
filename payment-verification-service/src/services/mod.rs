pub mod cashfree;
pub mod gateway;
pub mod metrics;

pub use cashfree::CashfreeClient;
pub use gateway::{GatewayError, PaymentGateway};
