use thiserror::Error;

/// Errors raised while decoding or encoding a shape record.
///
/// Geometric queries never fail; only the codecs return these.
#[derive(Error, Debug)]
pub enum ShapeError {
    /// Binary input ended before a full record was read.
    #[error("truncated input")]
    Truncated,
    #[error("malformed text record: {reason}")]
    MalformedText { reason: String },
    #[error("unknown shape kind tag {0}")]
    UnknownKind(u8),
    #[error("unknown shape kind name `{0}`")]
    UnknownKindName(String),
    /// Radius refused by a non-permissive [`RadiusPolicy`](crate::RadiusPolicy).
    #[error("invalid radius {0}")]
    InvalidRadius(f64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to encode shape: {0}")]
    Encode(bincode::error::EncodeError),
    #[error("failed to decode shape: {0}")]
    Decode(bincode::error::DecodeError),
}

pub type ShapeResult<T> = Result<T, ShapeError>;

impl ShapeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ShapeError::MalformedText { reason: reason.into() }
    }
}

impl From<bincode::error::EncodeError> for ShapeError {
    fn from(err: bincode::error::EncodeError) -> Self {
        match err {
            bincode::error::EncodeError::Io { inner, .. } => ShapeError::Io(inner),
            other => ShapeError::Encode(other),
        }
    }
}

impl From<bincode::error::DecodeError> for ShapeError {
    fn from(err: bincode::error::DecodeError) -> Self {
        use bincode::error::DecodeError;
        match err {
            DecodeError::UnexpectedEnd { .. } => ShapeError::Truncated,
            DecodeError::Io { inner, .. } if inner.kind() == std::io::ErrorKind::UnexpectedEof => {
                ShapeError::Truncated
            }
            DecodeError::Io { inner, .. } => ShapeError::Io(inner),
            other => ShapeError::Decode(other),
        }
    }
}
