use doctor_core::SubmissionOutcome;
use doctor_logging::doctor_debug;
use reqwest::StatusCode;
use serde_json::Value;

use crate::SubmissionError;

/// Guidance shown when a 2xx reply carries no `ai_guidance`.
pub const NO_GUIDANCE: &str = "No guidance received.";

/// A reply whose body has already been read into memory.
///
/// `body` is `None` when the body could not be read. Every resolution step
/// works against this one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Option<Vec<u8>>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: canonical_reason(status),
            body: Some(body.into()),
        }
    }

    pub fn unreadable(status: u16) -> Self {
        Self {
            status,
            status_text: canonical_reason(status),
            body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn canonical_reason(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// `Request failed: <status> <statusText>`, without a dangling space when the
/// status has no reason phrase.
pub fn request_failed_message(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("Request failed: {status}")
    } else {
        format!("Request failed: {status} {status_text}")
    }
}

/// Turn a buffered reply into exactly one user-facing outcome. Never fails.
pub fn resolve(response: &RawResponse) -> SubmissionOutcome {
    match resolve_guidance(response) {
        Ok(guidance) => SubmissionOutcome::Success { guidance },
        Err(err) => SubmissionOutcome::Failure {
            message: err.to_string(),
        },
    }
}

pub(crate) fn resolve_guidance(response: &RawResponse) -> Result<String, SubmissionError> {
    if response.is_success() {
        success_guidance(response)
    } else {
        Err(SubmissionError::Server {
            status: response.status,
            message: failure_message(response),
        })
    }
}

fn success_guidance(response: &RawResponse) -> Result<String, SubmissionError> {
    let value = response
        .body
        .as_deref()
        .and_then(|body| serde_json::from_slice::<Value>(body).ok())
        .ok_or_else(|| SubmissionError::MalformedSuccess {
            status: response.status,
            message: request_failed_message(response.status, &response.status_text),
        })?;

    let guidance = value
        .get("ai_guidance")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_GUIDANCE);
    Ok(guidance.to_string())
}

fn failure_message(response: &RawResponse) -> String {
    let fallback = || request_failed_message(response.status, &response.status_text);

    let Some(body) = response.body.as_deref() else {
        doctor_debug!("status {} with unreadable body", response.status);
        return fallback();
    };

    match serde_json::from_slice::<Value>(body) {
        Ok(value) => {
            if let Some(error) = value
                .get("error")
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
            {
                return error.to_string();
            }
            doctor_debug!("status {} JSON body without usable error field", response.status);
            let serialized = value.to_string();
            if serialized.is_empty() {
                fallback()
            } else {
                serialized
            }
        }
        Err(_) => match std::str::from_utf8(body) {
            Ok(text) if !text.is_empty() => text.to_string(),
            _ => fallback(),
        },
    }
}
