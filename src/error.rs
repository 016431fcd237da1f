use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error("marquee container `{0}` could not be resolved")]
    ContainerNotFound(String),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("invalid length `{0}` (expected a number with px, em, rem or % unit)")]
    InvalidLength(String),
    #[error("invalid iteration count `{0}` (expected a count or \"infinite\")")]
    InvalidIterations(String),
    #[error("failed to parse marquee options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A single item that failed to render. Assembly carries on with a placeholder.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to render item {index}: {message}")]
pub struct RenderError {
    pub index: usize,
    pub message: String,
}

impl RenderError {
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        Self { index, message: message.into() }
    }
}
