use std::fmt;

/// Convenience result type used across the core crate.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Top-level error taxonomy for a conversion run.
///
/// Every variant is fatal; nothing is retried and no partial output is
/// guaranteed to exist after a failure.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// The input path's extension is not one of the recognized containers.
    /// Raised before any file I/O; content is never sniffed.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// The container opened but frame extraction failed partway through.
    #[error("decode error: {0}")]
    Decode(String),

    /// The input yielded zero decodable frames.
    #[error("input contains no decodable frames")]
    EmptyInput,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::UnsupportedFormat`] value.
    pub fn unsupported_format(ext: impl fmt::Display) -> Self {
        Self::UnsupportedFormat(ext.to_string())
    }

    /// Build a [`SpriteError::Decode`] value.
    pub fn decode(msg: impl fmt::Display) -> Self {
        Self::Decode(msg.to_string())
    }
}
