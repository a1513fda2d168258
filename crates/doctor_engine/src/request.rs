use std::fmt;

use doctor_core::{check_description, SubmissionPolicy, ValidationError};
use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::CompressedPayload;

pub const FILE_FIELD: &str = "file";
pub const DESCRIPTION_FIELD: &str = "description";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error(transparent)]
    Description(#[from] ValidationError),
    #[error("compressed payload has no file name")]
    MissingFileName,
}

/// Both parts of the outbound multipart body. Only constructed complete.
#[derive(Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    file_name: String,
    file_bytes: Vec<u8>,
    description: String,
}

impl SubmissionRequest {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_bytes(&self) -> &[u8] {
        &self.file_bytes
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn into_form(self) -> Form {
        let file = Part::bytes(self.file_bytes).file_name(self.file_name);
        Form::new()
            .part(FILE_FIELD, file)
            .text(DESCRIPTION_FIELD, self.description)
    }
}

impl fmt::Debug for SubmissionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionRequest")
            .field("file_name", &self.file_name)
            .field("file_len", &self.file_bytes.len())
            .field("description", &self.description)
            .finish()
    }
}

/// Pair a compressed artifact with the raw description.
///
/// The description is checked against the policy again even though the
/// controller already did; it is stored exactly as typed.
pub fn build_request(
    compressed: CompressedPayload,
    description: &str,
    policy: &SubmissionPolicy,
) -> Result<SubmissionRequest, RequestError> {
    check_description(policy, description)?;
    if compressed.original_name.is_empty() {
        return Err(RequestError::MissingFileName);
    }
    Ok(SubmissionRequest {
        file_name: compressed.original_name,
        file_bytes: compressed.bytes,
        description: description.to_string(),
    })
}
