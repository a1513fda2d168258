use std::time::Duration;

use doctor_core::AttemptId;
use doctor_logging::{doctor_debug, doctor_warn};
use futures_util::StreamExt;

use crate::{
    AttemptProgress, EngineEvent, RawResponse, Stage, SubmissionRequest, TransportError,
    TransportFailure,
};

#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Troubleshooting endpoint the multipart body is POSTed to.
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Upper bound for the whole exchange, body included.
    pub request_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/troubleshoot".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub(crate) struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub(crate) fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Delivers a request and hands back the fully buffered reply.
///
/// An HTTP error status is a successful transport result; only failures to
/// obtain a reply at all are errors here.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        attempt_id: AttemptId,
        request: SubmissionRequest,
        sink: &dyn ProgressSink,
    ) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(TransportFailure::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        attempt_id: AttemptId,
        request: SubmissionRequest,
        sink: &dyn ProgressSink,
    ) -> Result<RawResponse, TransportError> {
        let url = reqwest::Url::parse(&self.settings.endpoint).map_err(|err| {
            TransportError::new(
                TransportFailure::InvalidEndpoint,
                format!("{}: {err}", self.settings.endpoint),
            )
        })?;

        let response = self
            .client
            .post(url)
            .multipart(request.into_form())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        doctor_debug!("attempt {} got status {}", attempt_id, status);
        sink.emit(EngineEvent::Progress(AttemptProgress {
            attempt_id,
            stage: Stage::AwaitingResponse,
        }));

        let body = read_body(attempt_id, response).await?;
        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Drain the body exactly once. A broken stream yields `None` so the resolver
/// can still fall back to the status line; a timeout stays a transport error.
async fn read_body(
    attempt_id: AttemptId,
    response: reqwest::Response,
) -> Result<Option<Vec<u8>>, TransportError> {
    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => bytes.extend_from_slice(&chunk),
            Err(err) if err.is_timeout() => return Err(map_reqwest_error(err)),
            Err(err) => {
                doctor_warn!("attempt {} body read failed: {}", attempt_id, err);
                return Ok(None);
            }
        }
    }
    Ok(Some(bytes))
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportFailure::Timeout, err.to_string());
    }
    if err.is_connect() {
        return TransportError::new(TransportFailure::Connect, err.to_string());
    }
    if err.is_builder() {
        return TransportError::new(TransportFailure::InvalidEndpoint, err.to_string());
    }
    TransportError::new(TransportFailure::Network, err.to_string())
}
