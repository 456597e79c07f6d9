use std::path::PathBuf;

/// Convenience result type used across the crate.
pub type PoseDistResult<T> = Result<T, PoseDistError>;

/// Top-level error taxonomy used by the conversion APIs.
#[derive(thiserror::Error, Debug)]
pub enum PoseDistError {
    /// Image bytes are not a supported raster format.
    #[error("decode error: {0}")]
    Decode(String),

    /// The raster could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// The archive does not carry the pose document.
    #[error("missing payload: '{0}' not found in archive")]
    MissingPayload(String),

    /// The pose document could not be parsed.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// No frame image exists for a record under any naming convention.
    #[error("missing frame asset: no image for t={0}")]
    MissingFrameAsset(i64),

    /// No archive exists for a catalog entry.
    #[error("missing archive for entry '{0}'")]
    MissingArchive(String),

    /// The entry output directory is already present.
    #[error("output already exists: '{}'", .0.display())]
    OutputExists(PathBuf),

    /// An operation was called in a state it does not support.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Invalid user-provided input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// How far a failure reaches inside one conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorScope {
    /// Only the current frame is lost; the entry continues with the next record.
    Frame,
    /// The whole entry is abandoned; the batch continues with the next entry.
    Entry,
}

impl PoseDistError {
    /// Recovery scope of this error.
    pub fn scope(&self) -> ErrorScope {
        match self {
            Self::Decode(_) | Self::Encode(_) | Self::MissingFrameAsset(_) => ErrorScope::Frame,
            Self::MissingPayload(_)
            | Self::MalformedDocument(_)
            | Self::MissingArchive(_)
            | Self::OutputExists(_)
            | Self::Precondition(_)
            | Self::Validation(_)
            | Self::Other(_) => ErrorScope::Entry,
        }
    }

    /// Build a [`PoseDistError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PoseDistError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PoseDistError::MalformedDocument`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Build a [`PoseDistError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`PoseDistError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
