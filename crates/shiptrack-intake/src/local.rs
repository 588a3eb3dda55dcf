//! Local filesystem intake.

use crate::{IntakeError, IntakeResult};
use chrono::Utc;
use shiptrack_types::{DocumentReference, SubmissionKey};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// File types accepted when no explicit list is configured.
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["pdf", "jpg", "png"];

/// Hex characters of the (key, phase, document) digest kept in file names.
const DIGEST_PREFIX_LEN: usize = 16;

/// Result of a successful intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// What the tracker records.
    pub reference: DocumentReference,
    /// Where the bytes landed.
    pub path: PathBuf,
}

/// Durable storage for uploaded document bytes.
pub trait FileIntake {
    fn store(
        &self,
        key: &SubmissionKey,
        phase: &str,
        document: &str,
        bytes: &[u8],
        original_filename: &str,
    ) -> IntakeResult<StoredUpload>;
}

/// Writes uploads to `<root>/<key dir>/<digest>-<uuid>.<ext>`.
///
/// The digest covers key, phase and document; the uuid makes every upload
/// its own file, so a re-upload never clobbers the bytes an older reference
/// points at.
#[derive(Debug, Clone)]
pub struct LocalFileIntake {
    root: PathBuf,
    allowed_extensions: Vec<String>,
}

impl LocalFileIntake {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extensions(root, DEFAULT_EXTENSIONS)
    }

    pub fn with_extensions<I, S>(root: impl Into<PathBuf>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            root: root.into(),
            allowed_extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accepted_extension(&self, original_filename: &str) -> IntakeResult<String> {
        let extension = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| IntakeError::MissingExtension(original_filename.to_string()))?;

        if !self.allowed_extensions.iter().any(|a| *a == extension) {
            return Err(IntakeError::UnsupportedExtension {
                extension,
                allowed: self.allowed_extensions.join(", "),
            });
        }
        Ok(extension)
    }

    fn target_path(&self, key: &SubmissionKey, phase: &str, document: &str, extension: &str) -> PathBuf {
        let mut hasher = blake3::Hasher::new();
        for part in [key.as_str(), phase, document] {
            hasher.update(part.as_bytes());
            hasher.update(&[0]);
        }
        let digest = hasher.finalize().to_hex();
        let file_name = format!(
            "{}-{}.{}",
            &digest.as_str()[..DIGEST_PREFIX_LEN],
            Uuid::new_v4(),
            extension
        );
        self.root.join(key_dir(key)).join(file_name)
    }
}

impl FileIntake for LocalFileIntake {
    fn store(
        &self,
        key: &SubmissionKey,
        phase: &str,
        document: &str,
        bytes: &[u8],
        original_filename: &str,
    ) -> IntakeResult<StoredUpload> {
        if bytes.is_empty() {
            return Err(IntakeError::EmptyUpload(original_filename.to_string()));
        }
        let extension = self.accepted_extension(original_filename)?;
        let path = self.target_path(key, phase, document, &extension);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| IntakeError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, bytes).map_err(|source| IntakeError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            key = %key,
            phase,
            document,
            path = %path.display(),
            bytes = bytes.len(),
            "upload stored"
        );

        Ok(StoredUpload {
            reference: DocumentReference::new(original_filename, Utc::now()),
            path,
        })
    }
}

/// Directory name for a key: anything outside `[A-Za-z0-9._-]` becomes `_`.
fn key_dir(key: &SubmissionKey) -> String {
    let dir: String = key
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if dir.chars().all(|c| c == '.') {
        format!("_{dir}")
    } else {
        dir
    }
}
