//! Key pairs handed to crypto contexts.

use msl_primitives::ec::{PrivateKey, PublicKey, CURVE_NAME};
use msl_primitives::PrimitivesError;

/// Key algorithm name for elliptic curve key pairs.
pub const EC_ALGORITHM: &str = "EC";

/// An elliptic curve key pair where either half may be absent.
///
/// A pair holding only a public key can encrypt and verify; one holding
/// only a private key can decrypt and sign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyPair {
    private_key: Option<PrivateKey>,
    public_key: Option<PublicKey>,
}

impl KeyPair {
    pub fn new(private_key: Option<PrivateKey>, public_key: Option<PublicKey>) -> Self {
        KeyPair {
            private_key,
            public_key,
        }
    }

    /// Full pair with the public half derived from `private_key`.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.pub_key();
        KeyPair::new(Some(private_key), Some(public_key))
    }

    /// Build from raw encodings: a 32-byte scalar and a SEC1 point.
    pub fn from_bytes(
        private_key: Option<&[u8]>,
        public_key: Option<&[u8]>,
    ) -> Result<Self, PrimitivesError> {
        Ok(KeyPair::new(
            private_key.map(PrivateKey::from_bytes).transpose()?,
            public_key.map(PublicKey::from_bytes).transpose()?,
        ))
    }

    /// Build from hex encodings of the same forms as [`KeyPair::from_bytes`].
    pub fn from_hex(
        private_key: Option<&str>,
        public_key: Option<&str>,
    ) -> Result<Self, PrimitivesError> {
        Ok(KeyPair::new(
            private_key.map(PrivateKey::from_hex).transpose()?,
            public_key.map(PublicKey::from_hex).transpose()?,
        ))
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        self.public_key.as_ref()
    }

    /// Copy of this pair without the private half.
    pub fn public_only(&self) -> Self {
        KeyPair::new(None, self.public_key.clone())
    }

    /// Copy of this pair without the public half.
    pub fn private_only(&self) -> Self {
        KeyPair::new(self.private_key.clone(), None)
    }

    pub fn algorithm(&self) -> &'static str {
        EC_ALGORITHM
    }

    pub fn curve(&self) -> &'static str {
        CURVE_NAME
    }
}
