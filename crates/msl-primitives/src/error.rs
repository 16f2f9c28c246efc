/// Errors raised by key handling, signatures, ECIES and binary decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("public key is not a point on secp256k1")]
    PointNotOnCurve,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("ECIES seal failed: {0}")]
    EciesSeal(String),

    #[error("ECIES open failed: {0}")]
    EciesOpen(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("invalid compressed data: {0}")]
    InvalidCompressedData(String),

    #[error("uncompressed data exceeds {limit} bytes")]
    CompressionRatioExceeded { limit: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("length {0} does not fit in memory")]
    LengthOverflow(u64),

    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
