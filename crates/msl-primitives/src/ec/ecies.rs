//! ECIES hybrid encryption on secp256k1.
//!
//! A fresh ephemeral key pair is generated per message. The ECDH shared
//! X coordinate is run through HKDF-SHA256 to produce an AES-256-GCM key.
//! The ephemeral public key is bound into both the KDF info and the GCM
//! associated data.
//!
//! Format: `ephemeral_pubkey (33, compressed) || nonce (12) || ciphertext || tag (16)`.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::{PublicKey, COMPRESSED_LEN};
use crate::PrimitivesError;

/// Length of the compressed ephemeral public key prefix.
pub const EPHEMERAL_KEY_LEN: usize = COMPRESSED_LEN;

/// AES-GCM nonce length.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// Bytes an ECIES message carries on top of the plaintext.
pub const OVERHEAD: usize = EPHEMERAL_KEY_LEN + NONCE_LEN + TAG_LEN;

/// HKDF info prefix; the ephemeral public key is appended.
const HKDF_INFO: &[u8] = b"msl-ecies-v1";

/// Encrypt `plaintext` to `recipient`.
///
/// # Returns
/// The ECIES message, or an error if key agreement or sealing fails.
pub fn encrypt(recipient: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
    let ephemeral = PrivateKey::new();
    let mut nonce = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    seal(recipient, plaintext, &ephemeral, &nonce)
}

/// Decrypt an ECIES message with the recipient's private key.
///
/// # Returns
/// The plaintext, or an `EciesOpen` error if the message is truncated,
/// carries an invalid ephemeral key, or fails authentication.
pub fn decrypt(recipient: &PrivateKey, message: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
    if message.len() < OVERHEAD {
        return Err(PrimitivesError::EciesOpen(format!(
            "message too short: expected at least {} bytes, got {}",
            OVERHEAD,
            message.len()
        )));
    }

    let (ephemeral_bytes, rest) = message.split_at(EPHEMERAL_KEY_LEN);
    let (nonce, sealed) = rest.split_at(NONCE_LEN);

    let ephemeral = PublicKey::from_bytes(ephemeral_bytes)
        .map_err(|e| PrimitivesError::EciesOpen(format!("ephemeral key: {}", e)))?;
    let shared = recipient.derive_shared_secret(&ephemeral)?;
    let key = derive_key(&shared, &ephemeral.to_compressed())?;

    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| PrimitivesError::EciesOpen(e.to_string()))?;
    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: sealed,
                aad: ephemeral_bytes,
            },
        )
        .map_err(|_| PrimitivesError::EciesOpen("authentication failed".to_string()))
}

/// Seal with a caller-chosen ephemeral key and nonce.
fn seal(
    recipient: &PublicKey,
    plaintext: &[u8],
    ephemeral: &PrivateKey,
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>, PrimitivesError> {
    let ephemeral_pub = ephemeral.pub_key().to_compressed();
    let shared = ephemeral.derive_shared_secret(recipient)?;
    let key = derive_key(&shared, &ephemeral_pub)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| PrimitivesError::EciesSeal(e.to_string()))?;
    let sealed = cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad: &ephemeral_pub,
            },
        )
        .map_err(|e| PrimitivesError::EciesSeal(e.to_string()))?;

    let mut out = Vec::with_capacity(EPHEMERAL_KEY_LEN + NONCE_LEN + sealed.len());
    out.extend_from_slice(&ephemeral_pub);
    out.extend_from_slice(nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// HKDF-SHA256 over the shared X coordinate.
fn derive_key(
    shared: &PublicKey,
    ephemeral_pub: &[u8; EPHEMERAL_KEY_LEN],
) -> Result<Zeroizing<[u8; 32]>, PrimitivesError> {
    let shared_x = Zeroizing::new(shared.x_coordinate());
    let hk = Hkdf::<Sha256>::new(None, shared_x.as_slice());

    let mut info = Vec::with_capacity(HKDF_INFO.len() + EPHEMERAL_KEY_LEN);
    info.extend_from_slice(HKDF_INFO);
    info.extend_from_slice(ephemeral_pub);

    let mut okm = Zeroizing::new([0u8; 32]);
    hk.expand(&info, okm.as_mut_slice())
        .map_err(|e| PrimitivesError::KeyDerivation(format!("hkdf expand: {}", e)))?;
    Ok(okm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let recipient = PrivateKey::new();
        let msg = vec![1, 2, 4, 8, 16, 32];

        let encrypted = encrypt(&recipient.pub_key(), &msg).unwrap();
        assert_eq!(encrypted.len(), msg.len() + OVERHEAD);
        assert_eq!(decrypt(&recipient, &encrypted).unwrap(), msg);
    }

    #[test]
    fn test_empty_plaintext() {
        let recipient = PrivateKey::new();
        let encrypted = encrypt(&recipient.pub_key(), &[]).unwrap();
        assert_eq!(encrypted.len(), OVERHEAD);
        assert!(decrypt(&recipient, &encrypted).unwrap().is_empty());
    }

    #[test]
    fn test_encryption_is_randomized() {
        let recipient = PrivateKey::new();
        let a = encrypt(&recipient.pub_key(), b"same").unwrap();
        let b = encrypt(&recipient.pub_key(), b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_seal_is_deterministic_for_fixed_inputs() {
        let recipient = PrivateKey::new();
        let ephemeral = PrivateKey::new();
        let nonce = [7u8; NONCE_LEN];

        let a = seal(&recipient.pub_key(), b"fixed", &ephemeral, &nonce).unwrap();
        let b = seal(&recipient.pub_key(), b"fixed", &ephemeral, &nonce).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..EPHEMERAL_KEY_LEN], &ephemeral.pub_key().to_compressed());
        assert_eq!(&a[EPHEMERAL_KEY_LEN..EPHEMERAL_KEY_LEN + NONCE_LEN], &nonce);
    }

    #[test]
    fn test_wrong_recipient_fails() {
        let recipient = PrivateKey::new();
        let other = PrivateKey::new();
        let encrypted = encrypt(&recipient.pub_key(), b"secret").unwrap();
        assert!(matches!(
            decrypt(&other, &encrypted),
            Err(PrimitivesError::EciesOpen(_))
        ));
    }

    #[test]
    fn test_every_byte_is_authenticated() {
        let recipient = PrivateKey::new();
        let encrypted = encrypt(&recipient.pub_key(), b"tamper me").unwrap();

        for i in 0..encrypted.len() {
            let mut tampered = encrypted.clone();
            tampered[i] ^= 0x01;
            assert!(
                decrypt(&recipient, &tampered).is_err(),
                "flipping byte {} was not detected",
                i
            );
        }
    }

    #[test]
    fn test_too_short() {
        let recipient = PrivateKey::new();
        let err = decrypt(&recipient, &[0u8; OVERHEAD - 1]).unwrap_err();
        assert!(err.to_string().contains("message too short"), "got: {}", err);
    }
}
