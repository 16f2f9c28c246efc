//! ECDSA signature with DER serialization and RFC6979 deterministic nonces.
//!
//! Signatures are always produced low-S normalized. Verification operates
//! on a prehashed message; the hash is left-padded or truncated to the
//! 32-byte scalar size before use.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Upper bound on a DER-encoded secp256k1 signature.
pub const MAX_DER_LEN: usize = 72;

/// An ECDSA signature over secp256k1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ecdsa::Signature,
}

impl Signature {
    /// Build from big-endian `r` and `s`; both must be in `[1, n)`.
    pub fn from_scalars(r: [u8; 32], s: [u8; 32]) -> Result<Self, PrimitivesError> {
        let inner = ecdsa::Signature::from_scalars(r, s)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Signature { inner })
    }

    pub fn r(&self) -> [u8; 32] {
        self.inner.r().to_bytes().into()
    }

    pub fn s(&self) -> [u8; 32] {
        self.inner.s().to_bytes().into()
    }

    /// Parse a strict DER `SEQUENCE { r INTEGER, s INTEGER }`.
    ///
    /// Trailing bytes, non-minimal integers and out-of-range scalars are
    /// all rejected.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 8 || bytes.len() > MAX_DER_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "malformed signature: bad length {}",
                bytes.len()
            )));
        }
        let inner = ecdsa::Signature::from_der(bytes)
            .map_err(|e| PrimitivesError::InvalidSignature(format!("malformed signature: {}", e)))?;
        Ok(Signature { inner })
    }

    /// DER encoding of the low-S form.
    pub fn to_der(&self) -> Vec<u8> {
        let normalized = self.inner.normalize_s().unwrap_or(self.inner);
        normalized.to_der().as_bytes().to_vec()
    }

    /// Deterministic (RFC 6979) signature over a digest.
    pub fn sign(hash: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let padded = normalize_hash(hash);
        let sig: ecdsa::Signature = priv_key
            .signing_key()
            .sign_prehash(&padded)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let inner = sig.normalize_s().unwrap_or(sig);
        Ok(Signature { inner })
    }

    pub fn verify(&self, hash: &[u8], pub_key: &PublicKey) -> bool {
        let padded = normalize_hash(hash);
        pub_key
            .verifying_key()
            .verify_prehash(&padded, &self.inner)
            .is_ok()
    }
}

/// Left-pad short digests with zeros and keep the leftmost 32 bytes of long ones.
fn normalize_hash(hash: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if hash.len() >= 32 {
        padded.copy_from_slice(&hash[..32]);
    } else {
        padded[32 - hash.len()..].copy_from_slice(hash);
    }
    padded
}
