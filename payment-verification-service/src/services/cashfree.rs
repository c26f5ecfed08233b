//! Cashfree Payment Gateway client.
//!
//! Implements the two read calls of Cashfree's PG Orders API used to check
//! what happened to an order: "get payments for an order" and "get order".

use crate::config::CashfreeConfig;
use crate::models::{OrderRecord, PaymentRecord};
use crate::services::gateway::{GatewayError, PaymentGateway};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Cashfree client for the PG API. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CashfreeClient {
    client: Client,
    config: CashfreeConfig,
}

/// Cashfree API error response.
#[derive(Debug, Deserialize)]
struct CashfreeErrorBody {
    message: Option<String>,
    code: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl CashfreeClient {
    pub fn new(config: CashfreeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Check if Cashfree is configured (credentials are set).
    pub fn is_configured(&self) -> bool {
        !self.config.client_id.is_empty() && !self.config.client_secret.expose_secret().is_empty()
    }

    pub fn config(&self) -> &CashfreeConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        if !self.is_configured() {
            return Err(GatewayError::NotConfigured);
        }

        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .client
            .get(&url)
            .header("x-client-id", self.config.client_id.as_str())
            .header("x-client-secret", self.config.client_secret.expose_secret().as_str())
            .header("x-api-version", self.config.api_version.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, path = %path, "Cashfree response");

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let error = serde_json::from_str::<CashfreeErrorBody>(&body).ok();
        let code = error.as_ref().and_then(|e| e.code.clone());
        let message = error
            .as_ref()
            .and_then(|e| e.message.clone())
            .or_else(|| (!body.trim().is_empty()).then(|| body.clone()))
            .unwrap_or_else(|| format!("Cashfree request failed with status {}", status));

        tracing::error!(
            status = %status,
            code = ?code,
            kind = ?error.as_ref().and_then(|e| e.kind.as_deref()),
            message = %message,
            "Cashfree request failed"
        );

        Err(GatewayError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl PaymentGateway for CashfreeClient {
    async fn list_payments(&self, order_id: &str) -> Result<Vec<PaymentRecord>, GatewayError> {
        let path = format!("/orders/{}/payments", urlencoding::encode(order_id));
        self.get(&path).await
    }

    async fn fetch_order(&self, order_id: &str) -> Result<OrderRecord, GatewayError> {
        let path = format!("/orders/{}", urlencoding::encode(order_id));
        self.get(&path).await
    }
}
