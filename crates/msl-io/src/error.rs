use msl_primitives::PrimitivesError;

/// Error types for encoding and decoding MSL objects.
#[derive(Debug, thiserror::Error)]
pub enum MslEncoderError {
    #[error("cannot parse an empty byte sequence")]
    Empty,
    #[error("unsupported encoder format: {0}")]
    UnsupportedFormat(String),
    #[error("unrecognized encoding identifier 0x{0:02x}")]
    UnknownIdentifier(u8),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed binary encoding: {0}")]
    Binary(String),
    #[error("truncated binary encoding: {0}")]
    Truncated(#[from] PrimitivesError),
    #[error("{0}")]
    Unsupported(String),
    #[error("missing key: {0}")]
    MissingKey(String),
    #[error("value for {key} is not {expected}")]
    WrongType { key: String, expected: &'static str },
    #[error("value for {key} is not valid base64: {reason}")]
    Base64 { key: String, reason: String },
    #[error("object nesting exceeds {0} levels")]
    TooDeep(usize),
}
