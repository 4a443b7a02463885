use crate::error::{BridgeError, Result};
use dialoguer::Input;

/// 대화형 모드 종료 명령
const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// 대화형 모드 한 줄 입력
pub enum Question {
    Ask(String),
    Skip,
    Quit,
}

impl Question {
    /// 입력 문자열 분류 (공백 제거, 종료 명령은 대소문자 무시)
    pub fn parse(line: &str) -> Self {
        let text = line.trim();

        if text.is_empty() {
            Question::Skip
        } else if EXIT_WORDS.contains(&text.to_lowercase().as_str()) {
            Question::Quit
        } else {
            Question::Ask(text.to_string())
        }
    }
}

pub struct QuestionPrompt;

impl QuestionPrompt {
    pub fn new() -> Self {
        Self
    }

    /// 한 줄 입력 (터미널 대기는 blocking 스레드에서)
    pub async fn read(&self) -> Result<Question> {
        read_off_runtime(|| {
            Input::<String>::new()
                .with_prompt("Question")
                .allow_empty(true)
                .interact_text()
        })
        .await
    }
}

async fn read_off_runtime<F>(read_line: F) -> Result<Question>
where
    F: FnOnce() -> dialoguer::Result<String> + Send + 'static,
{
    let line = tokio::task::spawn_blocking(read_line)
        .await
        .map_err(|e| BridgeError::IoError(std::io::Error::other(e)))?
        .map_err(|_| BridgeError::UserCancelled)?;

    Ok(Question::parse(&line))
}

impl Default for QuestionPrompt {
    fn default() -> Self {
        Self::new()
    }
}
