//! Legacy upload directories.
//!
//! The earlier tool wrote each upload to `<uploads>/<shipment>/<Doc_Name>.<ext>`
//! (spaces replaced by underscores) and recovered which documents were
//! present by reversing that mapping on the file names. No reference was
//! stored anywhere else, so importing those directories means scanning
//! them.

use crate::IntakeResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One file found in a legacy upload directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyUpload {
    /// Name of the per-shipment directory.
    pub shipment_id: String,
    /// Document name recovered from the file stem.
    pub document: String,
    pub filename: String,
    pub modified_at: DateTime<Utc>,
    pub path: PathBuf,
}

/// File stem the earlier tool used for `document`.
pub fn stored_document_stem(document: &str) -> String {
    document.replace(' ', "_")
}

/// Document name encoded in a legacy file name: everything before the first
/// `.`, with underscores turned back into spaces.
pub fn canonical_document_name(filename: &str) -> Option<String> {
    let stem = filename.split('.').next().unwrap_or_default().trim();
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace('_', " "))
}

/// Scan `<root>/<shipment>/<file>` entries. A missing root yields nothing.
pub fn scan_legacy_uploads(root: &Path) -> IntakeResult<Vec<LegacyUpload>> {
    if !root.exists() {
        debug!(root = %root.display(), "no legacy upload directory");
        return Ok(Vec::new());
    }

    let mut uploads = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().into_owned();
        let Some(document) = canonical_document_name(&filename) else {
            warn!(path = %entry.path().display(), "skipping legacy upload without a name");
            continue;
        };
        let shipment_id = entry
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let modified_at = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(Utc::now);

        uploads.push(LegacyUpload {
            shipment_id,
            document,
            filename,
            modified_at,
            path: entry.path().to_path_buf(),
        });
    }

    debug!(root = %root.display(), found = uploads.len(), "legacy uploads scanned");
    Ok(uploads)
}
