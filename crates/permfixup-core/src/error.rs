use thiserror::Error;

/// Core error types for permfixup operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid app id: {0}")]
    InvalidAppId(String),

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Invalid permission name: {0:?}")]
    InvalidPermissionName(String),
}

impl CoreError {
    /// Create a new InvalidAppId error
    pub fn invalid_app_id(value: impl Into<String>) -> Self {
        Self::InvalidAppId(value.into())
    }

    /// Create a new InvalidUserId error
    pub fn invalid_user_id(value: impl Into<String>) -> Self {
        Self::InvalidUserId(value.into())
    }

    /// Create a new InvalidPermissionName error
    pub fn invalid_permission_name(name: impl Into<String>) -> Self {
        Self::InvalidPermissionName(name.into())
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAppId(_) | Self::InvalidUserId(_) | Self::InvalidPermissionName(_) => {
                ErrorCategory::Validation
            }
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
