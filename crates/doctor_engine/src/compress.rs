use std::io::{self, Write};

use doctor_core::Artifact;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to compress {name}: {source}")]
pub struct CompressError {
    pub name: String,
    #[source]
    pub source: io::Error,
}

/// Gzip the artifact bytes in one shot.
///
/// The header carries no timestamp or filename, so the output depends only on
/// the input bytes.
pub fn compress(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(bytes.len() / 4 + 32),
        Compression::default(),
    );
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Compressed artifact, recomputed for every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPayload {
    pub bytes: Vec<u8>,
    /// Artifact name with `.gz` appended.
    pub original_name: String,
}

impl CompressedPayload {
    pub fn from_artifact(artifact: &Artifact) -> Result<Self, CompressError> {
        let bytes = compress(artifact.bytes()).map_err(|source| CompressError {
            name: artifact.name().to_string(),
            source,
        })?;
        Ok(Self {
            bytes,
            original_name: format!("{}.gz", artifact.name()),
        })
    }
}
