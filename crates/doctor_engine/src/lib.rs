//! G-code Doctor engine: compression, request assembly, transport and
//! response resolution for submission attempts.
mod compress;
mod engine;
mod error;
mod pipeline;
mod request;
mod resolve;
mod transport;
mod types;

pub use compress::{compress, CompressError, CompressedPayload};
pub use engine::{EngineHandle, EngineSettings};
pub use error::{EngineError, SubmissionError, TransportError, TransportFailure};
pub use pipeline::run_attempt;
pub use request::{build_request, RequestError, SubmissionRequest, DESCRIPTION_FIELD, FILE_FIELD};
pub use resolve::{request_failed_message, resolve, RawResponse, NO_GUIDANCE};
pub use transport::{ProgressSink, ReqwestTransport, Transport, TransportSettings};
pub use types::{AttemptProgress, EngineEvent, Stage};
