use std::fmt;
use std::sync::Arc;

use crate::{SubmissionPolicy, ValidationError};

/// How the user handed us the file. Both channels share one validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChannel {
    Picker,
    DragDrop,
}

/// A file the user selected but that has not been validated yet.
#[derive(Clone, PartialEq, Eq)]
pub struct ArtifactCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub bytes: Arc<[u8]>,
}

impl ArtifactCandidate {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }
}

impl fmt::Debug for ArtifactCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactCandidate")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// An accepted artifact. Immutable; a new selection replaces it wholesale.
#[derive(Clone, PartialEq, Eq)]
pub struct Artifact {
    name: String,
    size_bytes: u64,
    bytes: Arc<[u8]>,
}

impl Artifact {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Check a file's name and size against policy without touching its content.
///
/// Front ends call this before reading a file so that a rejected file is never
/// loaded.
pub fn check_artifact_metadata(
    policy: &SubmissionPolicy,
    name: &str,
    size_bytes: u64,
) -> Result<(), ValidationError> {
    if !name.ends_with(&policy.required_extension) {
        return Err(ValidationError::InvalidExtension {
            name: name.to_string(),
            expected: policy.required_extension.clone(),
        });
    }

    let max_bytes = policy.max_size_bytes();
    if size_bytes > max_bytes {
        return Err(ValidationError::TooLarge {
            actual_bytes: size_bytes,
            max_bytes,
            max_mb: policy.max_file_size_mb,
        });
    }
    Ok(())
}

/// Check a candidate against naming and size policy.
///
/// Only the metadata (`name`, `size_bytes`) is inspected; the content is
/// carried through untouched.
pub fn validate_artifact(
    policy: &SubmissionPolicy,
    candidate: ArtifactCandidate,
) -> Result<Artifact, ValidationError> {
    check_artifact_metadata(policy, &candidate.name, candidate.size_bytes)?;
    Ok(Artifact {
        name: candidate.name,
        size_bytes: candidate.size_bytes,
        bytes: candidate.bytes,
    })
}
