//! Elliptic curve crypto context.
//!
//! Encryption is ECIES to the context's public key; signatures are ECDSA
//! over SHA-256. Both run on secp256k1. Which family a context serves is
//! fixed by its [`Mode`].

use msl_io::{MslEncoderFactory, MslEncoderFormat};
use msl_primitives::ec::{ecies, PrivateKey, PublicKey, Signature};
use tracing::{debug, trace};

use crate::algorithms::{CipherSpec, SignatureAlgo};
use crate::envelope::ciphertext::MslCiphertextEnvelope;
use crate::envelope::signature::MslSignatureEnvelope;
use crate::envelope::Version;
use crate::{CryptoContext, KeyPair, MslCryptoError};

/// Operation family an [`EccCryptoContext`] supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    EncryptDecrypt,
    SignVerify,
}

impl Mode {
    fn transform(&self) -> Option<CipherSpec> {
        match self {
            Mode::EncryptDecrypt => Some(CipherSpec::Ecies),
            Mode::SignVerify => None,
        }
    }

    fn algorithm(&self) -> Option<SignatureAlgo> {
        match self {
            Mode::EncryptDecrypt => None,
            Mode::SignVerify => Some(SignatureAlgo::Sha256WithEcdsa),
        }
    }
}

/// Crypto context over an elliptic curve key pair.
///
/// Either key may be absent. Operations that need the missing half fail
/// with [`MslCryptoError::MissingKey`] when called. Wrap and unwrap are
/// never supported.
#[derive(Debug, Clone)]
pub struct EccCryptoContext {
    id: String,
    private_key: Option<PrivateKey>,
    public_key: Option<PublicKey>,
    mode: Mode,
    transform: Option<CipherSpec>,
    algo: Option<SignatureAlgo>,
}

impl EccCryptoContext {
    pub fn new(
        id: impl Into<String>,
        private_key: Option<PrivateKey>,
        public_key: Option<PublicKey>,
        mode: Mode,
    ) -> Self {
        let id = id.into();
        debug!(
            id = %id,
            ?mode,
            has_private_key = private_key.is_some(),
            has_public_key = public_key.is_some(),
            "created ECC crypto context"
        );
        EccCryptoContext {
            id,
            private_key,
            public_key,
            mode,
            transform: mode.transform(),
            algo: mode.algorithm(),
        }
    }

    pub fn from_key_pair(id: impl Into<String>, key_pair: &KeyPair, mode: Mode) -> Self {
        Self::new(
            id,
            key_pair.private_key().cloned(),
            key_pair.public_key().cloned(),
            mode,
        )
    }

    /// Identity of the key pair, written as the `keyid` of ciphertexts.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Cipher transform, set only in [`Mode::EncryptDecrypt`].
    pub fn transform(&self) -> Option<CipherSpec> {
        self.transform
    }

    /// Signature algorithm, set only in [`Mode::SignVerify`].
    pub fn algorithm(&self) -> Option<SignatureAlgo> {
        self.algo
    }

    fn require_transform(&self, operation: &str) -> Result<CipherSpec, MslCryptoError> {
        self.transform.ok_or_else(|| {
            debug!(id = %self.id, operation, "rejected: context is in sign/verify mode");
            MslCryptoError::UnsupportedOperation(format!(
                "{} requires encrypt/decrypt mode",
                operation
            ))
        })
    }

    fn require_algorithm(&self, operation: &str) -> Result<SignatureAlgo, MslCryptoError> {
        self.algo.ok_or_else(|| {
            debug!(id = %self.id, operation, "rejected: context is in encrypt/decrypt mode");
            MslCryptoError::UnsupportedOperation(format!(
                "{} requires sign/verify mode",
                operation
            ))
        })
    }

    fn require_private_key(&self, operation: &str) -> Result<&PrivateKey, MslCryptoError> {
        self.private_key.as_ref().ok_or_else(|| {
            debug!(id = %self.id, operation, "rejected: no private key");
            MslCryptoError::MissingKey(format!("{} requires a private key", operation))
        })
    }

    fn require_public_key(&self, operation: &str) -> Result<&PublicKey, MslCryptoError> {
        self.public_key.as_ref().ok_or_else(|| {
            debug!(id = %self.id, operation, "rejected: no public key");
            MslCryptoError::MissingKey(format!("{} requires a public key", operation))
        })
    }

    fn digest(algo: SignatureAlgo, data: &[u8]) -> Result<[u8; 32], MslCryptoError> {
        algo.digest(data).ok_or_else(|| {
            MslCryptoError::UnsupportedOperation(format!("{} is not a hash-then-sign algorithm", algo))
        })
    }
}

impl CryptoContext for EccCryptoContext {
    fn encrypt(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        let transform = self.require_transform("encrypt")?;
        let public_key = self.require_public_key("encrypt")?;

        let ciphertext = ecies::encrypt(public_key, data)?;
        trace!(%transform, plaintext_len = data.len(), ciphertext_len = ciphertext.len(), "encrypted");

        MslCiphertextEnvelope::new_v1(self.id.clone(), None, ciphertext)
            .to_msl_encoding(encoder, format)
    }

    fn decrypt(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
    ) -> Result<Vec<u8>, MslCryptoError> {
        let transform = self.require_transform("decrypt")?;
        let private_key = self.require_private_key("decrypt")?;

        let obj = encoder.parse_object(data)?;
        let envelope = MslCiphertextEnvelope::parse(&obj, Some(Version::V1))?;
        let plaintext = ecies::decrypt(private_key, envelope.ciphertext())?;
        trace!(%transform, ciphertext_len = envelope.ciphertext().len(), plaintext_len = plaintext.len(), "decrypted");
        Ok(plaintext)
    }

    fn wrap(
        &self,
        _data: &[u8],
        _encoder: &dyn MslEncoderFactory,
        _format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Err(MslCryptoError::UnsupportedOperation(
            "wrap is not supported by ECC crypto contexts".to_string(),
        ))
    }

    fn unwrap(
        &self,
        _data: &[u8],
        _encoder: &dyn MslEncoderFactory,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Err(MslCryptoError::UnsupportedOperation(
            "unwrap is not supported by ECC crypto contexts".to_string(),
        ))
    }

    fn sign(
        &self,
        data: &[u8],
        encoder: &dyn MslEncoderFactory,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        let algo = self.require_algorithm("sign")?;
        let private_key = self.require_private_key("sign")?;

        let hash = Self::digest(algo, data)?;
        let signature = private_key.sign(&hash)?.to_der();
        trace!(%algo, data_len = data.len(), signature_len = signature.len(), "signed");

        MslSignatureEnvelope::new_v1(signature).get_bytes(encoder, format)
    }

    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        encoder: &dyn MslEncoderFactory,
    ) -> Result<bool, MslCryptoError> {
        let algo = self.require_algorithm("verify")?;
        let public_key = self.require_public_key("verify")?;

        let envelope = MslSignatureEnvelope::parse(signature, encoder)?;
        let signature = match Signature::from_der(envelope.signature()) {
            Ok(sig) => sig,
            Err(e) => {
                debug!(id = %self.id, reason = %e, "signature is not valid DER");
                return Ok(false);
            }
        };

        let hash = Self::digest(algo, data)?;
        let valid = public_key.verify(&hash, &signature);
        trace!(%algo, data_len = data.len(), valid, "verified");
        Ok(valid)
    }
}
