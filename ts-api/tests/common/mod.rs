//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use ts_api::ApiClient;
use ts_core::config::ServerConfig;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

pub const API_KEY: &str = "test-app-key";

/// Start a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, ApiClient) {
    ts_core::logging::init_console_logging("ts_api=debug");
    let server = MockServer::start().await;
    let client = create_client(&server.uri());
    (server, client)
}

/// Create a client for the given host with the test key and short timeouts.
pub fn create_client(host: &str) -> ApiClient {
    create_client_with_timeout(host, 5)
}

/// Create a client whose whole-request timeout is `request_timeout_secs`.
pub fn create_client_with_timeout(host: &str, request_timeout_secs: u64) -> ApiClient {
    let mut config = ServerConfig::new(host, API_KEY);
    config.request_timeout_secs = request_timeout_secs;
    config.connect_timeout_secs = 2;
    ApiClient::new(&config).expect("failed to build test client")
}

/// A 200 reply wrapping `body` under `tag`.
pub fn envelope(tag: &str, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ tag: body }))
}

/// Number of requests the mock server has seen.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|r| r.len())
        .unwrap_or(0)
}
