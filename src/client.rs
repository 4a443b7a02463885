use crate::error::{BridgeError, Result};
use crate::server::protocol::{PromptRequest, PromptResponse, ProvidersListResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// askbridge 서버 클라이언트
pub struct BridgeClient {
    base_url: String,
    http: reqwest::Client,
}

impl BridgeClient {
    /// 새 클라이언트 생성
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// 미리 구성한 reqwest 클라이언트 사용 (프록시, 타임아웃 등)
    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 프롬프트 전송 (`POST /api/ask`)
    pub async fn ask(&self, prompt: &str, provider: Option<&str>) -> Result<PromptResponse> {
        let mut request = PromptRequest::new(prompt);
        if let Some(provider) = provider {
            request = request.with_provider(provider);
        }

        let response = self
            .http
            .post(self.url("/api/ask"))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        Self::decode(response).await
    }

    /// provider 목록 조회 (`GET /api/providers`)
    pub async fn list_providers(&self) -> Result<ProvidersListResponse> {
        let response = self
            .http
            .get(self.url("/api/providers"))
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        Self::decode(response).await
    }

    /// 서버 상태 확인 (`GET /health`)
    pub async fn health(&self) -> Result<bool> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        let body: Value = Self::decode(response).await?;
        Ok(body["status"] == "ok")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn connect_error(&self, e: reqwest::Error) -> BridgeError {
        if e.is_connect() {
            BridgeError::ConnectError(self.base_url.clone())
        } else {
            BridgeError::HttpError(e)
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
