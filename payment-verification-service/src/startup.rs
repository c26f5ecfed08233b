//! Application startup and lifecycle management.

use crate::config::Config;
use crate::handlers::{
    self, health_check, readiness_check,
    verify::{method_not_allowed, preflight, verify_payment},
};
use crate::services::{CashfreeClient, PaymentGateway};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, MethodRouter},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors_middleware, http_trace_layer, metrics_middleware, request_id_middleware, CorsPolicy,
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Paths the verification endpoint answers on. The second one is where the
/// serverless deployment exposed it.
pub const VERIFY_PAYMENT_PATHS: [&str; 2] = ["/verify-payment", "/api/payments/verify-payment"];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

fn verify_payment_route() -> MethodRouter<AppState> {
    get(verify_payment)
        .head(method_not_allowed)
        .options(preflight)
        .fallback(method_not_allowed)
}

/// Build the HTTP router. Every response, errors included, carries the CORS headers.
pub fn build_router(state: AppState, cors: CorsPolicy) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(handlers::metrics));

    for path in VERIFY_PAYMENT_PATHS {
        router = router.route(path, verify_payment_route());
    }

    router
        .layer(from_fn(metrics_middleware))
        .layer(from_fn_with_state(cors, cors_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Port 0 binds a random free port, which tests rely on.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let cashfree = CashfreeClient::new(config.cashfree.clone());
        if cashfree.is_configured() {
            tracing::info!(
                environment = ?cashfree.config().environment,
                api_version = %cashfree.config().api_version,
                "Cashfree client initialized"
            );
        } else {
            tracing::warn!(
                "Cashfree credentials not configured - payment verification will fail"
            );
        }

        let origin = config.cors_origin();
        let cors = CorsPolicy::new(&origin)?;
        tracing::info!(origin = %origin, runtime = ?config.runtime, "CORS origin selected");

        let state = AppState::new(Arc::new(cashfree));
        let router = build_router(state, cors);

        let address = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Payment verification service listening on port {}", self.port);
        axum::serve(self.listener, self.router).await
    }
}
