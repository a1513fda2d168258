use std::fmt;

use thiserror::Error;

use crate::{CompressError, RequestError};

/// No usable response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    InvalidEndpoint,
    Connect,
    Timeout,
    Network,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::InvalidEndpoint => write!(f, "Invalid service endpoint"),
            TransportFailure::Connect => write!(f, "Could not reach the diagnostic service"),
            TransportFailure::Timeout => write!(f, "Request timed out"),
            TransportFailure::Network => write!(f, "Network error"),
        }
    }
}

/// Everything that can end an attempt without guidance. The `Display` text is
/// what the user sees.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Compress(#[from] CompressError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Non-2xx reply, message picked by the fallback ladder.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 2xx reply whose body is not JSON.
    #[error("{message}")]
    MalformedSuccess { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
