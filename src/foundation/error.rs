/// Convenience result type used across the batch renderer.
pub type WaveformResult<T> = Result<T, WaveformError>;

/// Top-level error taxonomy.
///
/// Anything reaching the caller as a [`WaveformError`] aborts the whole batch. Failures that
/// only concern one request are carried by [`crate::EngineError`] and reported in that request's
/// response instead.
#[derive(thiserror::Error, Debug)]
pub enum WaveformError {
    /// Invalid startup configuration (unknown color strategy, bad thread count).
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure while reading the input stream.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// The input document could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A response document or rendered image could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WaveformError {
    /// Build a [`WaveformError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WaveformError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WaveformError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
