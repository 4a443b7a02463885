use crate::error::{BridgeError, Result};
use crate::provider::ProviderRegistry;
use crate::server::protocol::{PromptRequest, PromptResponse, ProviderInfo, ProvidersListResponse};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 요청 디스패처
///
/// provider 이름을 해석(명시값 또는 기본값)하고, registry에서 찾아 실행한 뒤
/// 결과를 응답 형태로 만듭니다.
pub struct Dispatcher {
    registry: Arc<ProviderRegistry>,
    default_provider: String,
}

impl Dispatcher {
    pub fn new(registry: Arc<ProviderRegistry>, default_provider: impl Into<String>) -> Self {
        Self {
            registry,
            default_provider: default_provider.into(),
        }
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// 프롬프트를 provider에 전달
    ///
    /// # Errors
    /// * `BridgeError::ProviderNotFound` - 등록되지 않은 provider 이름
    pub async fn ask(&self, request: PromptRequest) -> Result<PromptResponse> {
        let provider_name = request
            .provider
            .unwrap_or_else(|| self.default_provider.clone());

        let provider = self
            .registry
            .get(&provider_name)
            .ok_or_else(|| BridgeError::ProviderNotFound {
                name: provider_name.clone(),
                available: self.registry.names(),
            })?;

        info!(
            provider = %provider_name,
            prompt_len = request.prompt.len(),
            "dispatching prompt"
        );

        let result = provider
            .execute(&request.prompt, request.working_directory.as_deref().map(Path::new))
            .await;

        info!(
            provider = %provider_name,
            success = result.success,
            elapsed = result.execution_time,
            "provider finished"
        );

        Ok(PromptResponse::from_result(provider_name, result))
    }

    /// 모든 provider 상태를 병렬로 확인 (등록 순서 유지)
    pub async fn list_providers(&self) -> ProvidersListResponse {
        let snapshot = self.registry.list_all();

        let statuses = join_all(snapshot.values().map(|p| p.check_availability())).await;

        let providers = snapshot
            .values()
            .zip(statuses)
            .map(|(provider, status)| ProviderInfo {
                name: provider.name().to_string(),
                display_name: provider.display_name().to_string(),
                status,
            })
            .collect();

        ProvidersListResponse { providers }
    }
}
