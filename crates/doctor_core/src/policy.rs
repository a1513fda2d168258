use thiserror::Error;

pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 20;
pub const DEFAULT_REQUIRED_EXTENSION: &str = ".gcode";
pub const DEFAULT_MIN_DESCRIPTION_TOKENS: usize = 3;

/// Limits applied before anything is compressed or sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPolicy {
    pub max_file_size_mb: u64,
    /// Literal, case-sensitive filename suffix.
    pub required_extension: String,
    pub min_description_tokens: usize,
}

impl SubmissionPolicy {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            required_extension: DEFAULT_REQUIRED_EXTENSION.to_string(),
            min_description_tokens: DEFAULT_MIN_DESCRIPTION_TOKENS,
        }
    }
}

/// Pre-flight rejections. None of these ever reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a {expected} file (got {name}).")]
    InvalidExtension { name: String, expected: String },
    #[error("File is too large: {actual_bytes} bytes exceeds the {max_mb} MB limit.")]
    TooLarge {
        actual_bytes: u64,
        max_bytes: u64,
        max_mb: u64,
    },
    #[error("Please describe the problem in at least {min} words (got {actual}).")]
    DescriptionTooShort { min: usize, actual: usize },
}

/// Number of non-empty whitespace separated words in `description`.
pub fn description_token_count(description: &str) -> usize {
    description.split_whitespace().count()
}

pub fn check_description(
    policy: &SubmissionPolicy,
    description: &str,
) -> Result<(), ValidationError> {
    let actual = description_token_count(description);
    if actual < policy.min_description_tokens {
        return Err(ValidationError::DescriptionTooShort {
            min: policy.min_description_tokens,
            actual,
        });
    }
    Ok(())
}
