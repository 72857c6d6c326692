use thiserror::Error;

/// Core error types for Aerodex operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid entity kind: {0}")]
    InvalidEntityKind(String),

    #[error("Invalid locale tag: {0}")]
    InvalidLocale(String),

    #[error("Invalid entity data: {message}")]
    InvalidEntity { message: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new InvalidEntityKind error
    pub fn invalid_entity_kind(kind: impl Into<String>) -> Self {
        Self::InvalidEntityKind(kind.into())
    }

    /// Create a new InvalidLocale error
    pub fn invalid_locale(tag: impl Into<String>) -> Self {
        Self::InvalidLocale(tag.into())
    }

    /// Create a new InvalidEntity error
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            message: message.into(),
        }
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidEntityKind(_) | Self::InvalidLocale(_) | Self::InvalidEntity { .. } => {
                ErrorCategory::Validation
            }
            Self::JsonError(_) => ErrorCategory::Serialization,
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Serialization,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Serialization => write!(f, "serialization"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
