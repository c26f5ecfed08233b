//! Fixed single-origin CORS.
//!
//! The browser frontend is served from exactly one origin per deployment, so
//! the same three headers are stamped on every response, including errors and
//! preflight replies.

use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};

pub const ALLOWED_METHODS: &str = "POST, GET, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

#[derive(Clone, Debug)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    pub fn new(origin: &str) -> Result<Self, AppError> {
        let allow_origin = HeaderValue::from_str(origin).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("invalid CORS origin '{}': {}", origin, e))
        })?;
        Ok(Self { allow_origin })
    }

    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}

pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    policy.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_all_three_headers() {
        let policy = CorsPolicy::new("http://localhost:3001").unwrap();
        let mut headers = HeaderMap::new();
        policy.apply(&mut headers);

        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3001"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
    }

    #[test]
    fn rejects_origin_with_control_characters() {
        assert!(matches!(
            CorsPolicy::new("https://bad\norigin"),
            Err(AppError::ConfigError(_))
        ));
    }
}
