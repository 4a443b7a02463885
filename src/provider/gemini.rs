use crate::provider::invoke::CliTool;
use crate::provider::{AvailabilityResult, CliProvider, ExecutionResult};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Gemini CLI provider (프롬프트를 이스케이프해서 단일 인자로 전달)
pub struct GeminiProvider {
    tool: CliTool,
}

impl GeminiProvider {
    pub fn new() -> Self {
        Self::with_command("gemini")
    }

    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            tool: CliTool::new("Gemini CLI", "Gemini CLI", command),
        }
    }

    pub fn cli_command(&self) -> &str {
        self.tool.command()
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool = self.tool.with_timeout(timeout);
        self
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CliProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn display_name(&self) -> &str {
        "Gemini CLI"
    }

    async fn execute(&self, prompt: &str, working_directory: Option<&Path>) -> ExecutionResult {
        self.tool.execute_direct(prompt, working_directory).await
    }

    async fn check_availability(&self) -> AvailabilityResult {
        self.tool.probe_version().await
    }
}
