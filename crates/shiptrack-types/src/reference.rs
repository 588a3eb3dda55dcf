use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata stored in place of an uploaded document's bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    /// Filename as supplied by the uploader.
    pub filename: String,
    /// When file intake accepted the upload.
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentReference {
    pub fn new(filename: impl Into<String>, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            filename: filename.into(),
            uploaded_at,
        }
    }

    pub fn now(filename: impl Into<String>) -> Self {
        Self::new(filename, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn json_shape_is_filename_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let reference = DocumentReference::new("contract.pdf", at);
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value["filename"], "contract.pdf");
        assert_eq!(value["uploaded_at"], "2026-10-19T08:00:00Z");
    }
}
