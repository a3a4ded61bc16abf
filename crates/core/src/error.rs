//! Fetch-boundary error taxonomy

use thiserror::Error;

/// Failures a collaborator fetch can surface
///
/// All of these are absorbed where the fetch settles and normalized to a
/// defined empty/fallback state for the affected entity only; none propagate
/// past the engine boundary.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Network-level failure before a response was read
    #[error("transport error: {0}")]
    Transport(String),

    /// The collaborator answered with a non-success status
    #[error("unexpected status {0}")]
    Status(u16),

    /// The response body was not the expected shape
    #[error("malformed payload: {0}")]
    Malformed(&'static str),
}
