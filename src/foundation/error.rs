/// Convenience result type used across Signet.
pub type SignetResult<T> = Result<T, SignetError>;

/// Top-level error taxonomy used by compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum SignetError {
    /// Source bytes could not be decoded into a bitmap.
    #[error("decode error: {0}")]
    Decode(String),

    /// The rendered bitmap could not be encoded as PNG.
    #[error("encode error: {0}")]
    Encode(String),

    /// A compositing or export request arrived before any image was selected.
    #[error("no image selected; pick an image first")]
    NoSource,

    /// Invalid user-provided signature parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while laying out, rasterizing or blending the signature.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing signature specs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SignetError {
    /// Build a [`SignetError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SignetError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SignetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SignetError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SignetError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
