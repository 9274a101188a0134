//! Like Engine Error Types
//!
//! This module provides like-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Expected rejections (an active cooldown) are not errors: they travel
//! as [`crate::domain::value_objects::SubmitOutcome`] values. Only
//! transport and protocol faults use this type.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Like-specific result type alias
pub type LikeResult<T> = Result<T, LikeError>;

/// Like-specific error variants
#[derive(Debug, Error)]
pub enum LikeError {
    /// Network failure, timeout, or non-2xx response with no structured body
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered, but not in the shape the engine expects
    #[error("Unexpected backend response: {0}")]
    Protocol(String),

    /// The realtime subscription could not be established
    #[error("Realtime subscription unavailable: {0}")]
    Subscription(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LikeError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LikeError::Transport(_) => ErrorKind::Transport,
            LikeError::Protocol(_) => ErrorKind::Protocol,
            LikeError::Subscription(_) => ErrorKind::Subscription,
            LikeError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            LikeError::Transport(e) => {
                tracing::warn!(error = %e, "Like backend transport error");
            }
            LikeError::Protocol(msg) => {
                tracing::error!(message = %msg, "Like backend protocol error");
            }
            LikeError::Subscription(msg) => {
                tracing::warn!(message = %msg, "Like feed subscription error");
            }
            LikeError::Internal(msg) => {
                tracing::error!(message = %msg, "Like engine internal error");
            }
        }
    }
}

impl From<LikeError> for AppError {
    fn from(err: LikeError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}
