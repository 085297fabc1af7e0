use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Transport,
    Upstream,
    ContractViolation,
}

/// What the presentation layer shows when a refinement fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub code: ErrorCode,
    pub message: String,
}

impl FailureReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Declared failure of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation request did not complete: {message}")]
    Transport { message: String },
    #[error("generation service rejected the request{}: {message}", status_suffix(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

impl GenerationError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GenerationError::Transport { .. } => ErrorCode::Transport,
            GenerationError::Upstream { .. } => ErrorCode::Upstream,
        }
    }
}

/// ` with status N` when an HTTP status is known, empty otherwise.
pub fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|status| format!(" with status {status}"))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported platform '{0}' (expected linkedin, twitter, bluesky or threads)")]
pub struct UnknownPlatform(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_includes_status_when_known() {
        let err = GenerationError::upstream(Some(429), "rate limited");
        assert_eq!(
            err.to_string(),
            "generation service rejected the request with status 429: rate limited"
        );

        let err = GenerationError::upstream(None, "bad body");
        assert_eq!(
            err.to_string(),
            "generation service rejected the request: bad body"
        );
    }

    #[test]
    fn code_follows_variant() {
        assert_eq!(GenerationError::transport("refused").code(), ErrorCode::Transport);
        assert_eq!(GenerationError::upstream(Some(500), "x").code(), ErrorCode::Upstream);
    }
}
