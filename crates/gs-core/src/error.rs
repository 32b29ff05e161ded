use thiserror::Error;

/// Top-level error type for the gs-core crate and dependents.
#[derive(Debug, Error)]
pub enum GsError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("marker not found in source text: {marker:?}")]
    MarkerNotFound { marker: String },

    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GsError {
    /// `true` for the "nothing stored under this key" case, which callers
    /// treat as a cache miss rather than a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            GsError::NotFound(_) => true,
            GsError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Convenience Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, GsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_are_cache_misses() {
        assert!(GsError::NotFound("rules".into()).is_not_found());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(GsError::Io(io).is_not_found());
    }

    #[test]
    fn other_errors_are_not_cache_misses() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(!GsError::Io(io).is_not_found());
        assert!(!GsError::Internal("boom".into()).is_not_found());
    }

    #[test]
    fn marker_error_names_the_marker() {
        let err = GsError::MarkerNotFound { marker: "ADVENTURE I.".into() };
        assert!(err.to_string().contains("ADVENTURE I."));
    }
}
