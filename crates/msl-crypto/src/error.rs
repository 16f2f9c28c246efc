use msl_io::MslEncoderError;
use msl_primitives::PrimitivesError;

/// Error types for crypto context operations.
#[derive(Debug, thiserror::Error)]
pub enum MslCryptoError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("missing key: {0}")]
    MissingKey(String),
    #[error("encoding error: {0}")]
    Encoding(#[from] MslEncoderError),
    #[error("envelope error: {0}")]
    Envelope(String),
    #[error("crypto error: {0}")]
    Crypto(#[from] PrimitivesError),
}

impl MslCryptoError {
    /// True when the input or output could not be framed, as opposed to
    /// a failure of the cryptography itself.
    pub fn is_encoding_error(&self) -> bool {
        matches!(self, MslCryptoError::Encoding(_) | MslCryptoError::Envelope(_))
    }
}
