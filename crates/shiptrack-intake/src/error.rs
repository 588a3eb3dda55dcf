use std::path::PathBuf;
use thiserror::Error;

/// Errors from file intake. Each one fails only the upload it came from.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("upload '{0}' is empty")]
    EmptyUpload(String),

    #[error("upload '{0}' has no file extension")]
    MissingExtension(String),

    #[error("file type '.{extension}' is not accepted (allowed: {allowed})")]
    UnsupportedExtension { extension: String, allowed: String },

    #[error("failed to write upload to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan upload directory: {0}")]
    Scan(#[from] walkdir::Error),
}

/// Convenience alias for intake results.
pub type IntakeResult<T> = Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_lists_allowed() {
        let err = IntakeError::UnsupportedExtension {
            extension: "exe".into(),
            allowed: "pdf, jpg, png".into(),
        };
        let s = err.to_string();
        assert!(s.contains(".exe"));
        assert!(s.contains("pdf, jpg, png"));
    }
}
