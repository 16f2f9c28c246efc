//! Crypto context that passes data through untouched.

use msl_io::{MslEncoderFactory, MslEncoderFormat};

use crate::{CryptoContext, MslCryptoError};

/// A context that applies no protection.
///
/// Encrypt, decrypt, wrap and unwrap return their input unchanged. Signatures
/// are empty and every signature verifies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCryptoContext;

impl NullCryptoContext {
    pub fn new() -> Self {
        NullCryptoContext
    }
}

impl CryptoContext for NullCryptoContext {
    fn encrypt(
        &self,
        data: &[u8],
        _encoder: &dyn MslEncoderFactory,
        _format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Ok(data.to_vec())
    }

    fn decrypt(
        &self,
        data: &[u8],
        _encoder: &dyn MslEncoderFactory,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Ok(data.to_vec())
    }

    fn wrap(
        &self,
        data: &[u8],
        _encoder: &dyn MslEncoderFactory,
        _format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Ok(data.to_vec())
    }

    fn unwrap(
        &self,
        data: &[u8],
        _encoder: &dyn MslEncoderFactory,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Ok(data.to_vec())
    }

    fn sign(
        &self,
        _data: &[u8],
        _encoder: &dyn MslEncoderFactory,
        _format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Ok(Vec::new())
    }

    fn verify(
        &self,
        _data: &[u8],
        _signature: &[u8],
        _encoder: &dyn MslEncoderFactory,
    ) -> Result<bool, MslCryptoError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msl_io::DefaultMslEncoderFactory;

    #[test]
    fn test_identity_operations() {
        let ctx = NullCryptoContext::new();
        let encoder = DefaultMslEncoderFactory::new();
        let format = MslEncoderFormat::JSON;
        let data = b"plain";

        assert_eq!(ctx.encrypt(data, &encoder, &format).unwrap(), data);
        assert_eq!(ctx.decrypt(data, &encoder).unwrap(), data);
        assert_eq!(ctx.wrap(data, &encoder, &format).unwrap(), data);
        assert_eq!(ctx.unwrap(data, &encoder).unwrap(), data);
        assert!(ctx.sign(data, &encoder, &format).unwrap().is_empty());
        assert!(ctx.verify(data, b"anything", &encoder).unwrap());
    }
}
