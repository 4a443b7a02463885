use crate::provider::invoke::CliTool;
use crate::provider::{AvailabilityResult, CliProvider, ExecutionResult};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Codex CLI provider
pub struct CodexProvider {
    tool: CliTool,
}

impl CodexProvider {
    pub fn new() -> Self {
        Self::with_command("codex")
    }

    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            tool: CliTool::new("Codex CLI", "Codex", command),
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

impl Default for CodexProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CliProvider for CodexProvider {
    fn name(&self) -> &str {
        "codex"
    }

    fn display_name(&self) -> &str {
        "Codex"
    }

    async fn execute(&self, prompt: &str, working_directory: Option<&Path>) -> ExecutionResult {
        self.tool.execute_direct(prompt, working_directory).await
    }

    async fn check_availability(&self) -> AvailabilityResult {
        self.tool.probe_version().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = CodexProvider::new();
        assert_eq!(provider.name(), "codex");
        assert_eq!(provider.display_name(), "Codex");
        assert_eq!(provider.cli_command(), "codex");
    }

    #[test]
    fn test_custom_command() {
        let provider = CodexProvider::with_command("/opt/codex/bin/codex")
            .with_timeout(Some(Duration::from_secs(30)));
        assert_eq!(provider.name(), "codex");
        assert_eq!(provider.cli_command(), "/opt/codex/bin/codex");
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use crate::provider::testing::{fake_tool, path_str};

        #[tokio::test]
        async fn test_runs_in_working_directory() {
            let bin = tempfile::tempdir().unwrap();
            let project = tempfile::tempdir().unwrap();
            std::fs::write(project.path().join("README.md"), "readme").unwrap();
            let fake = fake_tool(bin.path(), "codex", "ls; echo \"prompt=$1\"");
            let provider = CodexProvider::with_command(path_str(&fake));

            let result = provider.execute("summarize", Some(project.path())).await;

            assert!(result.success, "{:?}", result.error);
            assert_eq!(result.response, "README.md\nprompt=summarize\n");
        }

        #[tokio::test]
        async fn test_version_probe() {
            let bin = tempfile::tempdir().unwrap();
            let fake = fake_tool(bin.path(), "codex", "echo 'codex-cli 0.46.0'");
            let provider = CodexProvider::with_command(path_str(&fake));

            let status = provider.check_availability().await;

            assert!(status.available);
            assert_eq!(status.version.as_deref(), Some("codex-cli 0.46.0"));
        }

        #[tokio::test]
        async fn test_failure_message() {
            let bin = tempfile::tempdir().unwrap();
            let fake = fake_tool(bin.path(), "codex", "exit 42");
            let provider = CodexProvider::with_command(path_str(&fake));

            let result = provider.execute("hello", None).await;
            assert!(!result.success);
            assert_eq!(result.error.as_deref(), Some("Codex CLI returned an error"));

            let status = provider.check_availability().await;
            assert!(!status.available);
            assert_eq!(status.error.as_deref(), Some("Codex CLI check failed"));
        }

        #[tokio::test]
        async fn test_missing_cli() {
            let provider = CodexProvider::with_command("askbridge-no-such-codex");

            let result = provider.execute("hello", None).await;
            assert_eq!(
                result.error.as_deref(),
                Some("Codex CLI not found. Please ensure Codex is installed and in PATH.")
            );
        }
    }
}
