use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Provider '{name}' not found. Available: {}", .available.join(", "))]
    ProviderNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Cannot connect to API at {0}")]
    ConnectError(String),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("User cancelled")]
    UserCancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_not_found_message() {
        let err = BridgeError::ProviderNotFound {
            name: "llama".to_string(),
            available: vec!["claude".to_string(), "gemini".to_string(), "codex".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Provider 'llama' not found. Available: claude, gemini, codex"
        );
    }

    #[test]
    fn test_provider_not_found_empty_registry() {
        let err = BridgeError::ProviderNotFound {
            name: "claude".to_string(),
            available: vec![],
        };

        assert_eq!(err.to_string(), "Provider 'claude' not found. Available: ");
    }
}
