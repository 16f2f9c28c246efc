//! Envelopes that frame ciphertexts and signatures on the wire.

pub mod ciphertext;
pub mod signature;

pub use ciphertext::MslCiphertextEnvelope;
pub use signature::MslSignatureEnvelope;

use crate::MslCryptoError;

/// Envelope layout version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// Legacy layout.
    V1,
    /// Self-describing layout naming its algorithm.
    V2,
}

impl Version {
    pub fn value(&self) -> i64 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
        }
    }

    pub fn from_value(value: i64) -> Result<Self, MslCryptoError> {
        match value {
            1 => Ok(Version::V1),
            2 => Ok(Version::V2),
            other => Err(MslCryptoError::Envelope(format!(
                "unsupported envelope version {}",
                other
            ))),
        }
    }
}
