use askbridge::client::BridgeClient;
use askbridge::provider::{AvailabilityResult, CliProvider, ExecutionResult, ProviderRegistry};
use askbridge::server::{http, Dispatcher};
use askbridge::BridgeError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// 항상 "pong"으로 답하는 provider
struct EchoProvider;

#[async_trait]
impl CliProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn display_name(&self) -> &str {
        "Echo"
    }

    async fn execute(&self, _prompt: &str, _working_directory: Option<&Path>) -> ExecutionResult {
        ExecutionResult::success("pong".to_string(), Duration::ZERO)
    }

    async fn check_availability(&self) -> AvailabilityResult {
        AvailabilityResult::available("echo 1.0".to_string(), Duration::ZERO)
    }
}

/// 항상 실패하는 provider
struct BrokenProvider;

#[async_trait]
impl CliProvider for BrokenProvider {
    fn name(&self) -> &str {
        "broken"
    }

    fn display_name(&self) -> &str {
        "Broken CLI"
    }

    async fn execute(&self, _prompt: &str, _working_directory: Option<&Path>) -> ExecutionResult {
        ExecutionResult::failure("Broken CLI returned an error".to_string(), Duration::from_millis(3))
    }

    async fn check_availability(&self) -> AvailabilityResult {
        AvailabilityResult::unavailable("Broken CLI not found in PATH".to_string(), Duration::ZERO)
    }
}

struct TestServer {
    base_url: String,
    http: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<askbridge::Result<()>>,
}

impl TestServer {
    async fn start(default_provider: &str) -> Self {
        let mut registry = ProviderRegistry::empty();
        registry.register(EchoProvider);
        registry.register(BrokenProvider);
        let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry), default_provider));

        let listener = http::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(http::serve(listener, dispatcher, async move {
            let _ = rx.await;
        }));

        Self {
            base_url: format!("http://{}", addr),
            http: reqwest::Client::builder().no_proxy().build().unwrap(),
            shutdown: Some(tx),
            handle,
        }
    }

    fn client(&self) -> BridgeClient {
        BridgeClient::with_http(self.base_url.clone(), self.http.clone())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_ask_echo_provider() {
    let server = TestServer::start("echo").await;

    let response = server.client().ask("ping", Some("echo")).await.unwrap();

    assert!(response.success);
    assert_eq!(response.provider, "echo");
    assert_eq!(response.response, "pong");
    assert!(response.error.is_none());
    assert!(response.execution_time.unwrap() >= 0.0);

    server.stop().await;
}

#[tokio::test]
async fn test_ask_uses_default_provider() {
    let server = TestServer::start("echo").await;

    let (status, body) = server.post("/api/ask", json!({ "prompt": "ping" })).await;

    assert_eq!(status, 200);
    assert_eq!(body["provider"], "echo");
    assert_eq!(body["response"], "pong");
    assert!(body["error"].is_null());

    server.stop().await;
}

#[tokio::test]
async fn test_legacy_ask_route() {
    let server = TestServer::start("echo").await;

    let (status, body) = server.post("/ask", json!({ "prompt": "ping" })).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["provider"], "echo");

    server.stop().await;
}

#[tokio::test]
async fn test_provider_failure_is_200() {
    let server = TestServer::start("echo").await;

    let (status, body) = server
        .post("/api/ask", json!({ "prompt": "ping", "provider": "broken" }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert_eq!(body["response"], "");
    assert_eq!(body["error"], "Broken CLI returned an error");

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_provider_is_404() {
    let server = TestServer::start("echo").await;

    let (status, body) = server
        .post("/api/ask", json!({ "prompt": "ping", "provider": "claude" }))
        .await;

    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Provider 'claude' not found. Available: echo, broken");

    let err = server.client().ask("ping", Some("claude")).await.unwrap_err();
    assert!(matches!(err, BridgeError::ApiError { status: 404, .. }));

    server.stop().await;
}

#[tokio::test]
async fn test_list_providers() {
    let server = TestServer::start("echo").await;

    let listing = server.client().list_providers().await.unwrap();

    let names: Vec<&str> = listing.providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["echo", "broken"]);

    let echo = &listing.providers[0];
    assert_eq!(echo.display_name, "Echo");
    assert!(echo.status.available);
    assert_eq!(echo.status.version.as_deref(), Some("echo 1.0"));

    let broken = &listing.providers[1];
    assert!(!broken.status.available);
    assert!(broken.status.version.is_none());
    assert_eq!(broken.status.error.as_deref(), Some("Broken CLI not found in PATH"));

    server.stop().await;
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start("echo").await;

    assert!(server.client().health().await.unwrap());

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let server = TestServer::start("echo").await;

    let response = server
        .http
        .post(format!("{}/api/ask", server.base_url))
        .json(&json!({ "provider": "echo" }))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());

    server.stop().await;
}
