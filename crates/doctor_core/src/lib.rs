//! G-code Doctor core: submission policy, artifact validation and the pure
//! submission state machine.
mod artifact;
mod effect;
mod msg;
mod policy;
mod state;
mod update;
mod view_model;

pub use artifact::{
    check_artifact_metadata, validate_artifact, Artifact, ArtifactCandidate, SelectionChannel,
};
pub use effect::Effect;
pub use msg::Msg;
pub use policy::{
    check_description, description_token_count, SubmissionPolicy, ValidationError,
    DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_MIN_DESCRIPTION_TOKENS, DEFAULT_REQUIRED_EXTENSION,
};
pub use state::{AppState, AttemptId, SubmissionOutcome, SubmissionState};
pub use update::update;
pub use view_model::{AppViewModel, ArtifactView};
