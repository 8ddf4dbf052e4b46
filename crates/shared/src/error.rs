use thiserror::Error;

/// The one error kind the grid recognizes: a fetch that did not produce a
/// page, whatever the underlying cause (network, HTTP status, body
/// decoding). `Clone` so the latest failure can travel inside a render
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("capsule fetch failed: {message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
