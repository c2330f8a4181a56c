use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Server(String),

    #[error("Failed to parse engine response: {0}")]
    ResponseParse(String),

    #[error("Session not started: {0}")]
    SessionNotStarted(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AutomationError {
    /// Message suitable for a tool result. Empty messages collapse to `None`.
    pub fn user_message(&self) -> Option<String> {
        let inner = match self {
            AutomationError::Http(m)
            | AutomationError::Unauthorized(m)
            | AutomationError::Api(m)
            | AutomationError::Server(m)
            | AutomationError::ResponseParse(m)
            | AutomationError::SessionNotStarted(m)
            | AutomationError::Extraction(m)
            | AutomationError::Internal(m) => m,
        };
        if inner.trim().is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl From<reqwest::Error> for AutomationError {
    fn from(err: reqwest::Error) -> Self {
        AutomationError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for AutomationError {
    fn from(err: serde_json::Error) -> Self {
        AutomationError::ResponseParse(err.to_string())
    }
}
