pub mod progress;
pub mod prompt;

pub use progress::create_spinner;
pub use prompt::{Question, QuestionPrompt};
