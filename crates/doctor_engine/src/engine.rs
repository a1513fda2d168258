use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use doctor_core::{Artifact, AttemptId, SubmissionOutcome, SubmissionPolicy};
use doctor_logging::doctor_error;

use crate::transport::ChannelProgressSink;
use crate::{run_attempt, EngineError, EngineEvent, ReqwestTransport, Transport, TransportSettings};

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub transport: TransportSettings,
    pub policy: SubmissionPolicy,
}

enum EngineCommand {
    Submit {
        attempt_id: AttemptId,
        artifact: Artifact,
        description: String,
    },
}

/// Runs attempts on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(settings.transport)?;
        Self::with_transport(Arc::new(transport), settings.policy)
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        policy: SubmissionPolicy,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let policy = Arc::new(policy);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let policy = policy.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport, policy, command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, attempt_id: AttemptId, artifact: Artifact, description: String) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            attempt_id,
            artifact,
            description,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: Arc<dyn Transport>,
    policy: Arc<SubmissionPolicy>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            attempt_id,
            artifact,
            description,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let attempt = tokio::spawn(async move {
                run_attempt(
                    transport.as_ref(),
                    &policy,
                    attempt_id,
                    &artifact,
                    &description,
                    &sink,
                )
                .await
            });
            // A panicking attempt must still settle, or the front end stays busy forever.
            let outcome = match attempt.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    doctor_error!("attempt {} aborted: {}", attempt_id, err);
                    SubmissionOutcome::Failure {
                        message: format!("Submission aborted unexpectedly: {err}"),
                    }
                }
            };
            let _ = event_tx.send(EngineEvent::AttemptCompleted {
                attempt_id,
                outcome,
            });
        }
    }
}
