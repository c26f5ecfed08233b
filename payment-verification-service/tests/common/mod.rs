#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use payment_verification_service::config::{
    CashfreeConfig, Config, GatewayEnvironment, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, CASHFREE_API_VERSION,
};
use payment_verification_service::models::{OrderRecord, PaymentRecord};
use payment_verification_service::services::{GatewayError, PaymentGateway};
use payment_verification_service::{build_router, AppState, Application};
use secrecy::Secret;
use service_core::middleware::CorsPolicy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const DEV_ORIGIN: &str = "http://localhost:3001";
pub const TEST_CLIENT_ID: &str = "TEST_APP_ID";
pub const TEST_CLIENT_SECRET: &str = "cfsk_test_secret";

/// In-memory gateway. `Err` entries are returned as gateway API errors with that message.
pub struct FakeGateway {
    payments: Result<Vec<PaymentRecord>, String>,
    order: Result<OrderRecord, String>,
    list_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new(
        payments: Result<Vec<PaymentRecord>, String>,
        order: Result<OrderRecord, String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            payments,
            order,
            list_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

fn api_error(message: &str) -> GatewayError {
    GatewayError::Api {
        status: 400,
        code: None,
        message: message.to_string(),
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn list_payments(&self, _order_id: &str) -> Result<Vec<PaymentRecord>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.payments.clone().map_err(|m| api_error(&m))
    }

    async fn fetch_order(&self, _order_id: &str) -> Result<OrderRecord, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.order.clone().map_err(|m| api_error(&m))
    }
}

pub fn router_with(gateway: Arc<FakeGateway>) -> Router {
    router_with_origin(gateway, DEV_ORIGIN)
}

pub fn router_with_origin(gateway: Arc<FakeGateway>, origin: &str) -> Router {
    build_router(
        AppState::new(gateway),
        CorsPolicy::new(origin).expect("valid origin"),
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub async fn send(router: Router, method: Method, uri: &str) -> TestResponse {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn test_config(api_base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        cashfree: CashfreeConfig {
            client_id: TEST_CLIENT_ID.to_string(),
            client_secret: Secret::new(TEST_CLIENT_SECRET.to_string()),
            environment: GatewayEnvironment::Sandbox,
            api_base_url: api_base_url.to_string(),
            api_version: CASHFREE_API_VERSION.to_string(),
        },
        runtime: RuntimeEnvironment::Development,
        deployment_host: None,
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(config: Config) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
