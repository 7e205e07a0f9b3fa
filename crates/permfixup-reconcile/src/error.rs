use permfixup_storage::{ErrorCategory, StorageError};

/// Errors surfaced by a fixup pass.
///
/// A missing provider and a user without legacy state are not errors; see
/// [`crate::FixupOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum FixupError {
    /// The legacy permission state provider failed to answer.
    #[error("Legacy permission state provider `{backend}` failed: {source}")]
    Provider {
        backend: &'static str,
        #[source]
        source: StorageError,
    },
}

impl FixupError {
    pub fn provider(backend: &'static str, source: StorageError) -> Self {
        Self::Provider { backend, source }
    }

    /// Returns the error category for logging/monitoring purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Provider { source, .. } => source.category(),
        }
    }
}
