use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ValidationFailed,
    ComponentUnavailable,
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },
    #[error("component unavailable: {component}")]
    ComponentUnavailable { component: &'static str },
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl SiteError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    pub fn unavailable(component: &'static str) -> Self {
        Self::ComponentUnavailable { component }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            Self::ComponentUnavailable { .. } => ErrorCode::ComponentUnavailable,
            Self::Storage { .. } => ErrorCode::Storage,
        }
    }

    /// Text suitable for showing to the visitor.
    pub fn user_message(&self) -> &str {
        match self {
            Self::ValidationFailed { message } | Self::Storage { message } => message,
            Self::ComponentUnavailable { component } => component,
        }
    }
}

/// Serializable form of [`SiteError`] for snapshots and script output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&SiteError> for ErrorReport {
    fn from(value: &SiteError) -> Self {
        Self {
            code: value.code(),
            message: value.user_message().to_string(),
        }
    }
}
