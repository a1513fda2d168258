use doctor_core::{AttemptId, SubmissionOutcome};

/// Phases of an attempt as seen from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compressing,
    /// Request assembled and being transmitted.
    Sending,
    /// Status line received; body is being buffered.
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptProgress {
    pub attempt_id: AttemptId,
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(AttemptProgress),
    /// Sent exactly once per attempt, whatever happened.
    AttemptCompleted {
        attempt_id: AttemptId,
        outcome: SubmissionOutcome,
    },
}
