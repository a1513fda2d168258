use crate::{Artifact, AttemptId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one attempt: compress, build the request, send it and resolve the reply.
    ///
    /// `description` is a snapshot; later edits do not reach the in-flight request.
    Submit {
        attempt_id: AttemptId,
        artifact: Artifact,
        description: String,
    },
}
