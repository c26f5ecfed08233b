mod common;

use common::{test_config, TestApp};
use reqwest::Client;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn(test_config("http://127.0.0.1:9")).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "payment-verification-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn(test_config("http://127.0.0.1:9")).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    let app = TestApp::spawn(test_config("http://127.0.0.1:9")).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
}
