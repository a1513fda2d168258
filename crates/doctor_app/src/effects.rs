use doctor_core::{Effect, Msg, SubmissionState};
use doctor_engine::{EngineError, EngineEvent, EngineHandle, EngineSettings, Stage};
use doctor_logging::doctor_info;

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit {
                    attempt_id,
                    artifact,
                    description,
                } => {
                    doctor_info!(
                        "Submit attempt_id={} file={} size={} description_len={}",
                        attempt_id,
                        artifact.name(),
                        artifact.size_bytes(),
                        description.len()
                    );
                    self.engine.submit(attempt_id, artifact, description);
                }
            }
        }
    }

    /// Blocks for the next engine event. `None` if the engine has shut down.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::AttemptProgress {
            attempt_id: progress.attempt_id,
            stage: map_stage(progress.stage),
        },
        EngineEvent::AttemptCompleted {
            attempt_id,
            outcome,
        } => Msg::AttemptDone {
            attempt_id,
            outcome,
        },
    }
}

fn map_stage(stage: Stage) -> SubmissionState {
    match stage {
        Stage::Compressing => SubmissionState::Compressing,
        Stage::Sending => SubmissionState::Sending,
        Stage::AwaitingResponse => SubmissionState::AwaitingResponse,
    }
}
