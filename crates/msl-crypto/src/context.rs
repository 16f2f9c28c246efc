//! The crypto context contract shared by every context implementation.

use msl_io::{MslEncoderFactory, MslEncoderFormat};

use crate::MslCryptoError;

/// Cryptographic operations bound to one set of keys and algorithms.
///
/// Outputs of `encrypt`, `wrap` and `sign` are envelopes encoded in the
/// requested format; the matching inverse operations accept any format the
/// encoder can detect. Implementations are immutable after construction
/// and may be shared across threads as `Arc<dyn CryptoContext>`.
pub trait CryptoContext: Send + Sync {
    /// Encrypt `data` and return the encoded ciphertext envelope.
    fn encrypt(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError>;

    /// Decrypt an encoded ciphertext envelope.
    fn decrypt(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
    ) -> Result<Vec<u8>, MslCryptoError>;

    /// Wrap key material for transport.
    fn wrap(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError>;

    /// Unwrap key material produced by [`CryptoContext::wrap`].
    fn unwrap(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
    ) -> Result<Vec<u8>, MslCryptoError>;

    /// Sign `data` and return the signature envelope bytes.
    ///
    /// Version 1 signature envelopes are raw bytes, so a context that emits
    /// them never consults `format` and accepts one the encoder cannot write.
    fn sign(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError>;

    /// Check `signature` over `data`.
    ///
    /// A signature that does not match is `Ok(false)`, not an error.
    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        encoder: &dyn MslEncoderFactory,
    ) -> Result<bool, MslCryptoError>;
}
