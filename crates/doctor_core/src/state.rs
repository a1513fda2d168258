use crate::view_model::{AppViewModel, ArtifactView};
use crate::{description_token_count, Artifact, SubmissionPolicy, ValidationError};

pub type AttemptId = u64;

/// Lifecycle of the single submission slot.
///
/// Validation happens synchronously inside `update` before `Compressing` is
/// entered, so it has no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Compressing,
    Sending,
    AwaitingResponse,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// True while an attempt is in flight. This is the concurrency guard.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            SubmissionState::Compressing
                | SubmissionState::Sending
                | SubmissionState::AwaitingResponse
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            SubmissionState::Idle => 0,
            SubmissionState::Compressing => 1,
            SubmissionState::Sending => 2,
            SubmissionState::AwaitingResponse => 3,
            SubmissionState::Succeeded | SubmissionState::Failed => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { guidance: String },
    Failure { message: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    /// The text shown to the user for this outcome.
    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Success { guidance } => guidance,
            SubmissionOutcome::Failure { message } => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    policy: SubmissionPolicy,
    artifact: Option<Artifact>,
    description: String,
    submission: SubmissionState,
    active_attempt: Option<AttemptId>,
    next_attempt_id: AttemptId,
    outcome: Option<SubmissionOutcome>,
    notice: Option<ValidationError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SubmissionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &SubmissionPolicy {
        &self.policy
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            submission: self.submission,
            artifact: self.artifact.as_ref().map(|artifact| ArtifactView {
                name: artifact.name().to_string(),
                size_bytes: artifact.size_bytes(),
            }),
            description_tokens: description_token_count(&self.description),
            can_submit: self.can_submit(),
            outcome: self.outcome.clone(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn can_submit(&self) -> bool {
        !self.submission.is_busy()
            && self.artifact.is_some()
            && description_token_count(&self.description) >= self.policy.min_description_tokens
    }

    pub(crate) fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn accept_artifact(&mut self, artifact: Artifact) {
        self.artifact = Some(artifact);
        if !matches!(self.notice, Some(ValidationError::DescriptionTooShort { .. })) {
            self.notice = None;
        }
        self.dirty = true;
    }

    pub(crate) fn reject_artifact(&mut self, reason: ValidationError) {
        self.artifact = None;
        self.notice = Some(reason);
        self.dirty = true;
    }

    pub(crate) fn set_description(&mut self, description: String) {
        if self.description == description {
            return;
        }
        self.description = description;
        let meets_minimum =
            description_token_count(&self.description) >= self.policy.min_description_tokens;
        if meets_minimum && matches!(self.notice, Some(ValidationError::DescriptionTooShort { .. }))
        {
            self.notice = None;
        }
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: ValidationError) {
        if self.notice.as_ref() != Some(&notice) {
            self.notice = Some(notice);
            self.dirty = true;
        }
    }

    /// Enter `Compressing` for a fresh attempt and return its id.
    pub(crate) fn begin_attempt(&mut self) -> AttemptId {
        self.next_attempt_id += 1;
        let attempt_id = self.next_attempt_id;
        self.active_attempt = Some(attempt_id);
        self.submission = SubmissionState::Compressing;
        // A stale failure goes away immediately; stale guidance stays until replaced.
        if matches!(self.outcome, Some(SubmissionOutcome::Failure { .. })) {
            self.outcome = None;
        }
        self.notice = None;
        self.dirty = true;
        attempt_id
    }

    pub(crate) fn apply_progress(&mut self, attempt_id: AttemptId, stage: SubmissionState) {
        if self.active_attempt != Some(attempt_id) || !stage.is_busy() {
            return;
        }
        if stage.rank() <= self.submission.rank() {
            return;
        }
        self.submission = stage;
        self.dirty = true;
    }

    pub(crate) fn apply_done(&mut self, attempt_id: AttemptId, outcome: SubmissionOutcome) {
        if self.active_attempt != Some(attempt_id) {
            return;
        }
        self.active_attempt = None;
        self.submission = if outcome.is_success() {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        };
        self.outcome = Some(outcome);
        self.dirty = true;
    }
}
