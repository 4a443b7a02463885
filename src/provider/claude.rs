use crate::provider::invoke::{quote, CliTool, InvokeError};
use crate::provider::{AvailabilityResult, CliProvider, ExecutionResult};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Claude Code provider
///
/// 프롬프트를 임시 파일에 쓰고 `cat <file> | claude --print` 파이프로 전달합니다.
/// 임시 파일은 프로세스 종료 후 성공/실패와 관계없이 삭제됩니다.
pub struct ClaudeProvider {
    tool: CliTool,
    /// 프롬프트 임시 파일 위치 (미지정시 시스템 임시 디렉토리)
    prompt_dir: Option<PathBuf>,
}

impl ClaudeProvider {
    pub fn new() -> Self {
        Self::with_command("claude")
    }

    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            tool: CliTool::new("Claude CLI", "Claude Code", command),
            prompt_dir: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool = self.tool.with_timeout(timeout);
        self
    }

    /// Configured executable name or path
    pub fn cli_command(&self) -> &str {
        self.tool.command()
    }

    pub fn with_prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    async fn run_piped(&self, prompt: &str, working_directory: Option<&Path>) -> Result<String, InvokeError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("askbridge-prompt-").suffix(".txt");

        let mut file = match &self.prompt_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(prompt.as_bytes())?;
        file.flush()?;

        // 핸들은 닫고 경로만 유지 (drop 시 삭제, 삭제 실패는 무시됨)
        let prompt_file = file.into_temp_path();
        let path = prompt_file.to_string_lossy().into_owned();

        let reader = if cfg!(windows) { "type" } else { "cat" };
        let source = format!("{} {}", reader, quote(&path));

        let outcome = self
            .tool
            .run(working_directory, |executable| format!("{} | {} --print", source, executable))
            .await;
        drop(prompt_file);
        outcome
    }
}

impl Default for ClaudeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CliProvider for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    fn display_name(&self) -> &str {
        "Claude Code"
    }

    async fn execute(&self, prompt: &str, working_directory: Option<&Path>) -> ExecutionResult {
        let start = Instant::now();
        let outcome = self.run_piped(prompt, working_directory).await;
        self.tool.execution_result(outcome, start.elapsed())
    }

    async fn check_availability(&self) -> AvailabilityResult {
        self.tool.probe_version().await
    }
}
