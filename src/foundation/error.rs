/// Convenience result type used across Wallforge.
pub type WallforgeResult<T> = Result<T, WallforgeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Schema problems are deliberately absent: malformed or partial parameter
/// input is resolved by [`crate::params::normalize`], which is total.
#[derive(thiserror::Error, Debug)]
pub enum WallforgeError {
    /// A rendering backend is unavailable or failed to initialize.
    ///
    /// Non-fatal: callers fall back to the reference backend for the rest of
    /// the session.
    #[error("capability error: {0}")]
    Capability(String),

    /// The output encoder failed to produce a final image buffer.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Metadata embedding failed for the produced image container.
    ///
    /// Callers catch this locally and return the unmodified image.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallforgeError {
    /// Build a [`WallforgeError::Capability`] value.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    /// Build a [`WallforgeError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`WallforgeError::Metadata`] value.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Build a [`WallforgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
