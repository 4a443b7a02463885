pub mod claude;
pub mod codex;
pub mod gemini;
pub mod invoke;
pub mod registry;

pub use claude::ClaudeProvider;
pub use codex::CodexProvider;
pub use gemini::GeminiProvider;
pub use registry::ProviderRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Outcome of a single `execute` call.
///
/// `response` is empty whenever `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub response: String,
    pub error: Option<String>,
    /// Wall-clock seconds from spawn to result
    pub execution_time: f64,
}

impl ExecutionResult {
    pub fn success(response: String, elapsed: Duration) -> Self {
        Self {
            success: true,
            response,
            error: None,
            execution_time: elapsed.as_secs_f64(),
        }
    }

    pub fn failure(error: String, elapsed: Duration) -> Self {
        Self {
            success: false,
            response: String::new(),
            error: Some(error),
            execution_time: elapsed.as_secs_f64(),
        }
    }
}

/// Outcome of a single `check_availability` probe. Never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: bool,
    pub version: Option<String>,
    pub error: Option<String>,
    pub execution_time: f64,
}

impl AvailabilityResult {
    pub fn available(version: String, elapsed: Duration) -> Self {
        Self {
            available: true,
            version: Some(version),
            error: None,
            execution_time: elapsed.as_secs_f64(),
        }
    }

    pub fn unavailable(error: String, elapsed: Duration) -> Self {
        Self {
            available: false,
            version: None,
            error: Some(error),
            execution_time: elapsed.as_secs_f64(),
        }
    }
}

/// AI CLI provider trait
///
/// Each implementation wraps one external command-line assistant. Both
/// operations fold every failure into their result value.
#[async_trait]
pub trait CliProvider: Send + Sync {
    /// Registry key (e.g., "claude", "gemini", "codex")
    fn name(&self) -> &str;

    /// Human label (e.g., "Claude Code")
    fn display_name(&self) -> &str;

    /// Send a prompt to the CLI and capture its answer
    async fn execute(&self, prompt: &str, working_directory: Option<&Path>) -> ExecutionResult;

    /// Probe the CLI with `--version`
    async fn check_availability(&self) -> AvailabilityResult;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_empty_response() {
        let result = ExecutionResult::failure("boom".to_string(), Duration::from_millis(5));
        assert!(!result.success);
        assert_eq!(result.response, "");
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.execution_time >= 0.0);
    }

    #[test]
    fn test_execution_result_json_shape() {
        let result = ExecutionResult::success("pong\n".to_string(), Duration::ZERO);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["response"], "pong\n");
        assert!(json["error"].is_null());
        assert_eq!(json["execution_time"], 0.0);
    }

    #[test]
    fn test_unavailable_has_no_version() {
        let result = AvailabilityResult::unavailable("missing".to_string(), Duration::ZERO);
        assert!(!result.available);
        assert!(result.version.is_none());
        assert_eq!(result.error.as_deref(), Some("missing"));
    }
}
