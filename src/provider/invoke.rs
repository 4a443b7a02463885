//! Shared process plumbing for the CLI providers.
//!
//! Every provider builds a shell command line, runs it through [`CliTool::run`]
//! and folds the outcome into an [`ExecutionResult`] or [`AvailabilityResult`]
//! with the tool-specific wording.

use crate::provider::{AvailabilityResult, ExecutionResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// 프로세스 실행 실패 분류
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("'{0}' not found")]
    ToolNotFound(String),

    #[error("exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("timed out after {}s", .0.as_secs_f64())]
    TimedOut(Duration),

    #[error("working directory '{0}' does not exist")]
    MissingWorkingDirectory(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Insert a backslash before every character the shell still interprets
/// inside double quotes: `\`, `"`, `$` and `` ` ``.
pub fn escape_prompt(prompt: &str) -> String {
    let mut escaped = String::with_capacity(prompt.len() + 8);
    for c in prompt.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 이스케이프 후 큰따옴표로 감싼 단일 인자
pub fn quote(arg: &str) -> String {
    format!("\"{}\"", escape_prompt(arg))
}

/// 플랫폼 셸로 명령줄 실행 (unix: sh -c, windows: cmd /C)
fn shell(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command_line);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

/// Send SIGKILL to the process group led by the spawned shell.
#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    let Some(pgid) = pid.and_then(|pid| libc::pid_t::try_from(pid).ok()) else {
        return;
    };
    if pgid <= 1 {
        return;
    }

    // SAFETY: killpg only sends a signal; pgid is the group created for this child.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } != 0 {
        debug!(pgid, error = %std::io::Error::last_os_error(), "process group already gone");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}

/// One external CLI plus the wording used in its failure messages.
#[derive(Debug, Clone)]
pub struct CliTool {
    /// 메시지용 라벨 (e.g., "Claude CLI")
    label: &'static str,
    /// 설치 안내용 제품명 (e.g., "Claude Code")
    product: &'static str,
    command: String,
    timeout: Option<Duration>,
}

impl CliTool {
    pub fn new(label: &'static str, product: &'static str, command: impl Into<String>) -> Self {
        Self {
            label,
            product,
            command: command.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Absolute path of the executable, resolved against the server's cwd.
    ///
    /// The shell may run in another working directory, so command lines are
    /// built from this path instead of the configured string.
    fn locate(&self) -> Result<PathBuf, InvokeError> {
        which::which(&self.command).map_err(|_| InvokeError::ToolNotFound(self.command.clone()))
    }

    /// Resolve the executable, build the command line from its quoted path
    /// and run it through the shell. Returns stdout on exit code 0.
    pub async fn run<F>(&self, working_directory: Option<&Path>, build: F) -> Result<String, InvokeError>
    where
        F: FnOnce(&str) -> String,
    {
        let executable = self.locate()?;
        let command_line = build(&quote(&executable.to_string_lossy()));

        let mut cmd = shell(&command_line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // 타임아웃 시 파이프라인 전체를 죽일 수 있도록 별도 프로세스 그룹
        #[cfg(unix)]
        cmd.process_group(0);

        if let Some(dir) = working_directory {
            if !dir.is_dir() {
                return Err(InvokeError::MissingWorkingDirectory(dir.display().to_string()));
            }
            cmd.current_dir(dir);
        }

        debug!(tool = %executable.display(), cwd = ?working_directory, "spawning CLI");

        let child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InvokeError::ToolNotFound(self.command.clone()),
            _ => InvokeError::Io(e),
        })?;
        let pid = child.id();

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => output?,
                Err(_) => {
                    // 셸은 kill_on_drop으로 종료 및 회수, 남은 자손은 그룹 단위로 종료
                    kill_process_group(pid);
                    return Err(InvokeError::TimedOut(limit));
                }
            },
            None => child.wait_with_output().await?,
        };

        if !output.status.success() {
            return Err(InvokeError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Fold an execution outcome into the response shape.
    pub fn execution_result(
        &self,
        outcome: Result<String, InvokeError>,
        elapsed: Duration,
    ) -> ExecutionResult {
        match outcome {
            Ok(stdout) => ExecutionResult::success(stdout, elapsed),
            Err(e) => {
                warn!(tool = self.label, error = %e, "execution failed");
                ExecutionResult::failure(self.execution_error(&e), elapsed)
            }
        }
    }

    /// 직접 인자 방식 실행: `<command> "<escaped prompt>"`
    pub async fn execute_direct(&self, prompt: &str, working_directory: Option<&Path>) -> ExecutionResult {
        let start = Instant::now();
        let argument = quote(prompt);
        let outcome = self
            .run(working_directory, |executable| format!("{} {}", executable, argument))
            .await;
        self.execution_result(outcome, start.elapsed())
    }

    /// `<command> --version` 실행으로 설치 여부 확인
    pub async fn probe_version(&self) -> AvailabilityResult {
        let start = Instant::now();
        match self.run(None, |executable| format!("{} --version", executable)).await {
            Ok(stdout) => {
                let version = stdout.trim();
                let version = if version.is_empty() { "installed" } else { version };
                AvailabilityResult::available(version.to_string(), start.elapsed())
            }
            Err(e) => {
                debug!(tool = self.label, error = %e, "availability check failed");
                AvailabilityResult::unavailable(self.availability_error(&e), start.elapsed())
            }
        }
    }

    fn execution_error(&self, error: &InvokeError) -> String {
        match error {
            InvokeError::ToolNotFound(_) => format!(
                "{} not found. Please ensure {} is installed and in PATH.",
                self.label, self.product
            ),
            InvokeError::NonZeroExit { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            InvokeError::NonZeroExit { .. } => format!("{} returned an error", self.label),
            InvokeError::TimedOut(limit) => {
                format!("{} timed out after {}s", self.label, limit.as_secs_f64())
            }
            other => format!("Error executing {}: {}", self.label, other),
        }
    }

    fn availability_error(&self, error: &InvokeError) -> String {
        match error {
            InvokeError::ToolNotFound(_) => format!("{} not found in PATH", self.label),
            InvokeError::NonZeroExit { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            InvokeError::NonZeroExit { .. } => format!("{} check failed", self.label),
            InvokeError::TimedOut(limit) => {
                format!("{} timed out after {}s", self.label, limit.as_secs_f64())
            }
            other => format!("Error checking {}: {}", self.label, other),
        }
    }
}
