use shared::error::{status_suffix, ErrorCode, FailureReport, GenerationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefineError {
    #[error("generation request did not complete: {message}")]
    Transport { message: String },
    #[error("generation service failed{}: {message}", status_suffix(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },
    #[error("no content recorded yet; add the original post before refining")]
    EmptyHistory,
    #[error("refinement instruction must not be empty")]
    EmptyInstruction,
    #[error("draft topic must not be empty")]
    EmptyTopic,
}

impl RefineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RefineError::Transport { .. } => ErrorCode::Transport,
            RefineError::Upstream { .. } => ErrorCode::Upstream,
            RefineError::EmptyHistory | RefineError::EmptyInstruction | RefineError::EmptyTopic => {
                ErrorCode::ContractViolation
            }
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self.code(), ErrorCode::ContractViolation)
    }
}

impl From<GenerationError> for RefineError {
    fn from(value: GenerationError) -> Self {
        match value {
            GenerationError::Transport { message } => RefineError::Transport { message },
            GenerationError::Upstream { status, message } => {
                RefineError::Upstream { status, message }
            }
        }
    }
}

impl From<&RefineError> for FailureReport {
    fn from(value: &RefineError) -> Self {
        FailureReport::new(value.code(), value.to_string())
    }
}
