use crate::{SubmissionOutcome, SubmissionState, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub submission: SubmissionState,
    pub artifact: Option<ArtifactView>,
    pub description_tokens: usize,
    /// Whether the Submit control should be enabled.
    pub can_submit: bool,
    /// Last outcome; guidance from a previous attempt stays here while a new one runs.
    pub outcome: Option<SubmissionOutcome>,
    /// Local validation message, at most one at a time.
    pub notice: Option<ValidationError>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactView {
    pub name: String,
    pub size_bytes: u64,
}
