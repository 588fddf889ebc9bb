//! Error types for the synthesis pipeline.

use thiserror::Error;

/// A request argument or a voice profile that is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("text is empty")]
    EmptyText,

    #[error("pitch offset {0} is outside -100..=100")]
    PitchOffset(i32),

    #[error("speed multiplier {0} is outside 0.25..=4.0")]
    Speed(f64),

    #[error("volume {0} is outside 0..=100")]
    Volume(u8),

    #[error("quality hint {0} is not one of 64000, 128000, 192000, 320000")]
    Quality(u32),

    #[error("no voice with id `{0}`")]
    UnknownVoice(String),

    #[error("voice `{id}` is invalid: {reason}")]
    Profile { id: String, reason: String },
}

/// Every way a synthesis request can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The output device could not be resumed.
    #[error("output device not ready: {0}")]
    EngineNotReady(String),

    /// Offline buffer allocation or computation failed.
    #[error("render failed: {0}")]
    Render(String),

    /// The sample buffer could not be serialised.
    #[error("encode failed: {0}")]
    Encode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote speech bridge failed; callers fall back to local synthesis.
    #[error("speech bridge failed: {0}")]
    Bridge(String),
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Encode(e.to_string())
    }
}

/// Result type for the synthesis pipeline
pub type Result<T> = std::result::Result<T, Error>;
