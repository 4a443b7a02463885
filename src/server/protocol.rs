use crate::provider::{AvailabilityResult, ExecutionResult};
use serde::{Deserialize, Serialize};

/// `/api/ask` 요청 본문
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptRequest {
    /// provider 이름 (미지정시 기본 provider)
    #[serde(default)]
    pub provider: Option<String>,
    pub prompt: String,
    #[serde(default)]
    pub working_directory: Option<String>,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

/// `/api/ask` 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub success: bool,
    /// 실제로 응답한 provider
    pub provider: String,
    pub response: String,
    pub error: Option<String>,
    pub execution_time: Option<f64>,
}

impl PromptResponse {
    pub fn from_result(provider: impl Into<String>, result: ExecutionResult) -> Self {
        Self {
            success: result.success,
            provider: provider.into(),
            response: result.response,
            error: result.error,
            execution_time: Some(result.execution_time),
        }
    }
}

/// provider 하나의 상태 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub display_name: String,
    #[serde(flatten)]
    pub status: AvailabilityResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidersListResponse {
    pub providers: Vec<ProviderInfo>,
}

/// 에러 응답 본문 (`{"detail": ...}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
