use shiptrack_store::StoreError;
use thiserror::Error;

/// Errors from tracker writes. Reads never fail.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("unknown phase: {0}")]
    UnknownPhase(String),

    #[error("unknown document '{document}' in phase '{phase}'")]
    UnknownDocument { phase: String, document: String },

    #[error("store write failed: {0}")]
    Store(#[from] StoreError),
}

/// Convenience alias for tracker results.
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_document_display() {
        let err = TrackerError::UnknownDocument {
            phase: "Phase A".into(),
            document: "Visa".into(),
        };
        assert_eq!(err.to_string(), "unknown document 'Visa' in phase 'Phase A'");
    }

    #[test]
    fn store_error_converts() {
        let err: TrackerError = StoreError::LockPoisoned.into();
        assert!(matches!(err, TrackerError::Store(_)));
    }
}
