use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Network unreachable, connection reset, or a body that failed to decode.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx answer from the orchestration API.
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server { status: u16, message: Option<String> },

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Helper for mapping any lower-level failure into a transport error
pub fn transport_error<E: ToString>(err: E) -> ConsoleError {
    ConsoleError::Transport(err.to_string())
}

impl ConsoleError {
    /// Text shown to the operator. Structured server messages and form
    /// problems are surfaced as-is; everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ConsoleError::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ConsoleError::InvalidForm(reason) => reason.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        transport_error(err)
    }
}

impl From<validator::ValidationErrors> for ConsoleError {
    fn from(err: validator::ValidationErrors) -> Self {
        ConsoleError::InvalidForm(err.to_string())
    }
}
