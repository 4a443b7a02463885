//! HTTP routes over the dispatcher.
//!
//! `POST /api/ask` (and the legacy `POST /ask`) run a prompt,
//! `GET /api/providers` reports availability, `GET /health` is a liveness probe.

use crate::error::{BridgeError, Result};
use crate::server::dispatch::Dispatcher;
use crate::server::protocol::{ErrorBody, PromptRequest, PromptResponse, ProvidersListResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// 에러를 `{"detail": ...}` JSON 응답으로 변환
struct ApiError(BridgeError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BridgeError::ProviderNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        warn!(status = %status, error = %self.0, "request rejected");

        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<BridgeError> for ApiError {
    fn from(e: BridgeError) -> Self {
        Self(e)
    }
}

/// 라우터 생성 (CORS 전체 허용)
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/api/ask", post(ask_handler))
        .route("/ask", post(ask_handler))
        .route("/api/providers", get(providers_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(dispatcher)
}

/// 주소 바인드
pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| BridgeError::ServerError(format!("failed to bind {}: {}", addr, e)))
}

/// `shutdown`이 끝날 때까지 서비스
pub async fn serve<F>(listener: TcpListener, dispatcher: Arc<Dispatcher>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, default_provider = dispatcher.default_provider(), "starting HTTP server");
    }

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| BridgeError::ServerError(format!("HTTP server error: {}", e)))
}

async fn ask_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(request): Json<PromptRequest>,
) -> std::result::Result<Json<PromptResponse>, ApiError> {
    let response = dispatcher.ask(request).await?;
    Ok(Json(response))
}

async fn providers_handler(State(dispatcher): State<Arc<Dispatcher>>) -> Json<ProvidersListResponse> {
    Json(dispatcher.list_providers().await)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
