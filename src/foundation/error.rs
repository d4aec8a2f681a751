/// Convenience result type used across covergen.
pub type CovergenResult<T> = Result<T, CovergenError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CovergenError {
    /// No usable font source and no permitted fallback, or an unusable configuration file.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Empty or malformed chart/diagram input.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// Invalid job parameters (canvas size, tags, output target).
    #[error("validation error: {0}")]
    Validation(String),

    /// Output could not be encoded or written.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CovergenError {
    /// Build a [`CovergenError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`CovergenError::InvalidDataset`] value.
    pub fn invalid_dataset(msg: impl Into<String>) -> Self {
        Self::InvalidDataset(msg.into())
    }

    /// Build a [`CovergenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CovergenError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Return `true` for [`CovergenError::InvalidDataset`].
    pub fn is_invalid_dataset(&self) -> bool {
        matches!(self, Self::InvalidDataset(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
