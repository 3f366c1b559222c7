use thiserror::Error;

/// Failure modes of the remote store. Local presence-check failures never
/// become a `StoreError`; they stay on the editor state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network failure or a non-2xx response.
    #[error("transport: {0}")]
    Transport(String),

    /// The server rejected the payload (400/422).
    #[error("server rejected payload ({status}): {message}")]
    Validation { status: u16, message: String },

    /// The Country reference list failed to load.
    #[error("reference list load failed: {0}")]
    ReferenceLoad(String),
}
