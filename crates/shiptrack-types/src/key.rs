//! Submission keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Separator used by [`SubmissionKey::member`].
const MEMBER_SEPARATOR: char = '/';

/// Rejected submission key input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid submission key: {0}")]
pub struct InvalidKey(pub String);

/// Opaque identifier scoping one tracked entity's documents and phase
/// submissions.
///
/// Keys are compared as plain strings; two keys that differ only in
/// surrounding whitespace are the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionKey(String);

impl SubmissionKey {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidKey> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidKey("key must not be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Key for a single shipment.
    pub fn shipment(shipment_id: impl AsRef<str>) -> Result<Self, InvalidKey> {
        Self::new(shipment_id)
    }

    /// Composite key for a user acting inside an organization.
    pub fn member(
        organization: impl AsRef<str>,
        user: impl AsRef<str>,
    ) -> Result<Self, InvalidKey> {
        let organization = organization.as_ref().trim();
        let user = user.as_ref().trim();
        if organization.is_empty() || user.is_empty() {
            return Err(InvalidKey(
                "organization and user must both be non-empty".into(),
            ));
        }
        if organization.contains(MEMBER_SEPARATOR) {
            return Err(InvalidKey(format!(
                "organization '{}' must not contain '{}'",
                organization, MEMBER_SEPARATOR
            )));
        }
        Ok(Self(format!("{organization}{MEMBER_SEPARATOR}{user}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SubmissionKey {
    type Err = InvalidKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SubmissionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
