use doctor_core::{Artifact, AttemptId, SubmissionOutcome, SubmissionPolicy};
use doctor_logging::{doctor_debug, doctor_info, doctor_warn};

use crate::resolve::resolve_guidance;
use crate::{
    build_request, AttemptProgress, CompressedPayload, EngineEvent, ProgressSink, Stage,
    SubmissionError, Transport,
};

/// Run one attempt end to end and fold every failure into the outcome.
pub async fn run_attempt(
    transport: &dyn Transport,
    policy: &SubmissionPolicy,
    attempt_id: AttemptId,
    artifact: &Artifact,
    description: &str,
    sink: &dyn ProgressSink,
) -> SubmissionOutcome {
    doctor_info!(
        "attempt {} started name={} size={}",
        attempt_id,
        artifact.name(),
        artifact.size_bytes()
    );
    match try_attempt(transport, policy, attempt_id, artifact, description, sink).await {
        Ok(guidance) => {
            doctor_info!("attempt {} succeeded guidance_len={}", attempt_id, guidance.len());
            SubmissionOutcome::Success { guidance }
        }
        Err(err) => {
            doctor_warn!("attempt {} failed: {}", attempt_id, err);
            SubmissionOutcome::Failure {
                message: err.to_string(),
            }
        }
    }
}

async fn try_attempt(
    transport: &dyn Transport,
    policy: &SubmissionPolicy,
    attempt_id: AttemptId,
    artifact: &Artifact,
    description: &str,
    sink: &dyn ProgressSink,
) -> Result<String, SubmissionError> {
    emit_stage(sink, attempt_id, Stage::Compressing);
    let compressed = CompressedPayload::from_artifact(artifact)?;
    doctor_debug!(
        "attempt {} compressed {} -> {} bytes",
        attempt_id,
        artifact.size_bytes(),
        compressed.bytes.len()
    );

    emit_stage(sink, attempt_id, Stage::Sending);
    let request = build_request(compressed, description, policy)?;
    let response = transport.send(attempt_id, request, sink).await?;
    doctor_info!(
        "attempt {} response status={} body_len={:?}",
        attempt_id,
        response.status,
        response.body.as_ref().map(Vec::len)
    );

    resolve_guidance(&response)
}

fn emit_stage(sink: &dyn ProgressSink, attempt_id: AttemptId, stage: Stage) {
    sink.emit(EngineEvent::Progress(AttemptProgress { attempt_id, stage }));
}
