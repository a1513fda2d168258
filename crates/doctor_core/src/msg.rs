#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped a file.
    ArtifactSelected {
        candidate: crate::ArtifactCandidate,
        channel: crate::SelectionChannel,
    },
    /// User edited the problem description.
    DescriptionChanged(String),
    /// User clicked Submit.
    SubmitClicked,
    /// Engine progress for an attempt.
    AttemptProgress {
        attempt_id: crate::AttemptId,
        stage: crate::SubmissionState,
    },
    /// Engine settled an attempt, successfully or not.
    AttemptDone {
        attempt_id: crate::AttemptId,
        outcome: crate::SubmissionOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
